//! gd2prep CLI library.
//!
//! This crate provides the asset preparation driver, the built-in sheet
//! table and the command implementations behind the `gd2prep` binary.

pub mod commands;
pub mod driver;
pub mod sheets;
