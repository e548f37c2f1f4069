pub mod crop;
pub mod decode;
pub mod source;
