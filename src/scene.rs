pub mod model;
pub mod workspace;
