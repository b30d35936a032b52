pub mod constant;
pub mod operations;
