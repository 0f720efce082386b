//! gd2prep Bundle Backend
//!
//! This crate turns sprite sheets into an asset bundle for the FT800
//! graphics controller used by the Gameduino 2.
//!
//! # Features
//!
//! - **Grid slicing**: row-major tiling with remainder pixels discarded
//! - **Pixel formats**: RGB565, ARGB1555, ARGB4, L8 and RGB332 packing
//! - **Bundle builder**: handle slots, graphics RAM layout, register limits
//! - **Deterministic output**: identical inputs give a byte-identical header
//! - **Atomic finalize**: the output file is replaced in a single rename
//!
//! # Example
//!
//! ```no_run
//! use gd2prep_bundle::{load_sheet, split, AssetBundle, PixelFormat};
//! use std::path::Path;
//!
//! let sheet = load_sheet(Path::new("assets/Icons.png")).unwrap();
//! let cells = split(&sheet, 16, 16).unwrap();
//!
//! let mut bundle = AssetBundle::new("Interface");
//! bundle.load_handle("ICONS", &cells, PixelFormat::Rgb565).unwrap();
//! bundle.finalize(Path::new("Interface_assets.h")).unwrap();
//! ```

pub mod bundle;
pub mod encode;
pub mod error;
pub mod format;
pub mod sheet;
pub mod write;

pub use bundle::{AssetBundle, BundleEntry, BundleOutput, MAX_HANDLE, RAM_G_SIZE};
pub use error::BundleError;
pub use format::PixelFormat;
pub use sheet::{load_sheet, split, split_grid, CellGrid};
pub use write::write_atomic;
