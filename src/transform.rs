pub mod editor;
pub mod gesture;
