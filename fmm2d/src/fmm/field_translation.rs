//! Field translations
pub mod metadata;
pub mod source;
pub mod source_to_target;
pub mod target;
