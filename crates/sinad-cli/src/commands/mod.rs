//! CLI command implementations.

pub mod common;
pub mod generate;
pub mod info;
pub mod measure;
pub mod spectrum;
