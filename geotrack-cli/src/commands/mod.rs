pub mod batch;
pub mod decode;
pub mod encode;
