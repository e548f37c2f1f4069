pub mod composite;
pub mod cpu;
pub mod pipeline;
pub mod plan;
