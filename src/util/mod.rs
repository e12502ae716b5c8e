pub mod digest;
pub mod errors;
