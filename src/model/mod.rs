pub mod common;
pub mod output;
pub mod raw;
