//! Error types for sheet slicing and bundle building.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading sheets, building a bundle, or writing it out.
///
/// Every variant aborts the run; nothing is retried.
#[derive(Debug, Error)]
pub enum BundleError {
    /// A source image is missing or could not be decoded.
    #[error("Failed to load sheet '{}': {source}", path.display())]
    AssetLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Two entries share a handle name.
    #[error("Duplicate handle '{0}': each sheet must be registered under a unique name")]
    DuplicateHandle(String),

    /// The finalized bundle could not be written.
    #[error("Failed to write bundle '{}': {source}", path.display())]
    BundleWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Cell dimensions must be non-zero.
    #[error("Invalid cell size {0}x{1}: width and height must be non-zero")]
    InvalidCellSize(u32, u32),

    /// The sheet is not an exact multiple of the cell size (strict grid mode only).
    #[error(
        "Sheet '{name}' is {width}x{height}, not a multiple of the {cell_width}x{cell_height} cell size"
    )]
    GridRemainder {
        name: String,
        width: u32,
        height: u32,
        cell_width: u32,
        cell_height: u32,
    },

    /// Slicing produced no cells at all.
    #[error("Sheet '{0}' contains no complete cells")]
    EmptySheet(String),

    /// Cells registered under one handle have different sizes.
    #[error("Cells for '{0}' do not share the same dimensions")]
    InconsistentCells(String),

    /// Handle names become C preprocessor symbols.
    #[error("Invalid handle name '{0}': must be a C identifier")]
    InvalidHandleName(String),

    /// The controller exposes a fixed number of bitmap handles.
    #[error("Too many handles: '{name}' would need slot {slot}, maximum is {max}")]
    TooManyHandles { name: String, slot: u8, max: u8 },

    /// A cell does not fit the bitmap layout registers.
    #[error("Cells for '{name}' are too large: {reason}")]
    CellTooLarge { name: String, reason: String },

    /// The bundle no longer fits in graphics RAM.
    #[error("Out of graphics memory: '{name}' needs {needed} bytes, {available} available")]
    OutOfMemory {
        name: String,
        needed: usize,
        available: usize,
    },

    /// The sheet manifest is unreadable or malformed.
    #[error("Invalid manifest '{}': {message}", path.display())]
    Manifest { path: PathBuf, message: String },
}

impl BundleError {
    /// Stable error code for machine-readable output.
    pub fn code(&self) -> &'static str {
        match self {
            BundleError::AssetLoad { .. } => "GD2_001",
            BundleError::DuplicateHandle(_) => "GD2_002",
            BundleError::BundleWrite { .. } => "GD2_003",
            BundleError::InvalidCellSize(..) => "GD2_004",
            BundleError::GridRemainder { .. } => "GD2_005",
            BundleError::EmptySheet(_) => "GD2_006",
            BundleError::InconsistentCells(_) => "GD2_007",
            BundleError::InvalidHandleName(_) => "GD2_008",
            BundleError::TooManyHandles { .. } => "GD2_009",
            BundleError::CellTooLarge { .. } => "GD2_010",
            BundleError::OutOfMemory { .. } => "GD2_011",
            BundleError::Manifest { .. } => "GD2_012",
        }
    }

    /// Coarse error category.
    pub fn category(&self) -> &'static str {
        match self {
            BundleError::AssetLoad { .. }
            | BundleError::InvalidCellSize(..)
            | BundleError::GridRemainder { .. }
            | BundleError::EmptySheet(_) => "sheet",
            BundleError::BundleWrite { .. } => "io",
            BundleError::Manifest { .. } => "config",
            _ => "bundle",
        }
    }
}
