//! # Trait Definitions
pub mod field;
pub mod fmm;
pub mod kernel;
pub mod tree;
pub mod types;
