pub mod fragment;
pub mod outline;
