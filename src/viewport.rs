pub mod frame;
pub mod grid;
pub mod mask;
pub mod template;
