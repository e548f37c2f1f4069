pub mod document;
pub mod png;
