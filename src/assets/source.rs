use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;

use crate::foundation::error::{MosaicoError, MosaicoResult};

/// Resolves a fragment's opaque image reference to encoded bytes.
///
/// Implementations are shared across decode workers, hence `Send + Sync`.
pub trait ImageSource: Send + Sync {
    fn load_bytes(&self, source: &str) -> MosaicoResult<Vec<u8>>;
}

/// Reads references as paths relative to a root directory.
#[derive(Clone, Debug)]
pub struct DirImageSource {
    root: PathBuf,
}

impl DirImageSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ImageSource for DirImageSource {
    fn load_bytes(&self, source: &str) -> MosaicoResult<Vec<u8>> {
        let norm = normalize_rel_path(source)?;
        let path = self.root.join(Path::new(&norm));
        std::fs::read(&path)
            .with_context(|| format!("read image bytes from '{}'", path.display()))
            .map_err(MosaicoError::from)
    }
}

/// In-memory references, e.g. freshly cropped images that never touched disk.
#[derive(Clone, Debug, Default)]
pub struct MemoryImageSource {
    entries: HashMap<String, Arc<Vec<u8>>>,
}

impl MemoryImageSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, bytes: Vec<u8>) {
        self.entries.insert(key.into(), Arc::new(bytes));
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ImageSource for MemoryImageSource {
    fn load_bytes(&self, source: &str) -> MosaicoResult<Vec<u8>> {
        self.entries
            .get(source)
            .map(|b| b.as_ref().clone())
            .ok_or_else(|| MosaicoError::decode(format!("unknown image reference '{source}'")))
    }
}

/// Normalize a relative reference: backslashes become `/`, `.` and empty segments drop out.
///
/// Absolute paths and `..` are rejected.
pub fn normalize_rel_path(source: &str) -> MosaicoResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(MosaicoError::validation("image paths must be relative"));
    }
    if s.is_empty() {
        return Err(MosaicoError::validation("image path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(MosaicoError::validation("image paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(MosaicoError::validation("image path must contain a file name"));
    }
    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
