//! CLI command implementations

pub mod discover;
pub mod validate;
