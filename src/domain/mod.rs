pub mod errors;
pub mod reaction;
