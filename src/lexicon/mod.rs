pub mod compiler;
pub mod data;

pub use compiler::*;
