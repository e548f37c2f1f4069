/// Convenience result type used across Mosaico.
pub type MosaicoResult<T> = Result<T, MosaicoError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Geometry and transform operations never produce these; they are total over their
/// numeric domain and reject invalid requests by leaving state untouched.
#[derive(thiserror::Error, Debug)]
pub enum MosaicoError {
    /// Invalid user-provided or scene data.
    #[error("validation error: {0}")]
    Validation(String),

    /// An image reference could not be read or decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Errors while rasterizing a composite.
    #[error("render error: {0}")]
    Render(String),

    /// Errors while encoding or writing an output file.
    #[error("export error: {0}")]
    Export(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MosaicoError {
    /// Build a [`MosaicoError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MosaicoError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`MosaicoError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`MosaicoError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Build a [`MosaicoError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
