//! CLI command implementations

pub mod build;

mod reporting;
