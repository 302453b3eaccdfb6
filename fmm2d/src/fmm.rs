//! Implementation of the FMM
pub mod builder;
pub mod constants;
pub mod eval;
pub mod field_translation;
pub mod helpers;
pub mod single_node;
pub mod types;
