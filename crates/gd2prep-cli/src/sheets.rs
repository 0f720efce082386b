//! Sheet descriptor tables.
//!
//! The built-in [`INTERFACE_SHEETS`] table lists every sprite sheet of the
//! instrument interface. A JSON manifest with the same shape can replace it
//! at runtime, so sheets are added by data rather than code.

use std::borrow::Cow;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use gd2prep_bundle::bundle::is_c_identifier;
use gd2prep_bundle::{BundleError, PixelFormat};
use serde::{Deserialize, Serialize};

/// One sprite sheet to slice and register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetSpec {
    /// Source image path, relative to the assets root.
    pub path: Cow<'static, str>,
    /// Cell width in pixels.
    pub cell_width: u32,
    /// Cell height in pixels.
    pub cell_height: u32,
    /// Handle name in the bundle.
    pub handle: Cow<'static, str>,
    /// Output pixel format.
    #[serde(default)]
    pub format: PixelFormat,
}

impl SheetSpec {
    /// RGB565 sheet descriptor usable in `const` tables.
    pub const fn rgb565(
        path: &'static str,
        cell_width: u32,
        cell_height: u32,
        handle: &'static str,
    ) -> Self {
        Self {
            path: Cow::Borrowed(path),
            cell_width,
            cell_height,
            handle: Cow::Borrowed(handle),
            format: PixelFormat::Rgb565,
        }
    }
}

/// Name of the built-in bundle.
pub const INTERFACE_NAME: &str = "Interface";

/// Sheets of the instrument interface, in bundle order.
pub const INTERFACE_SHEETS: &[SheetSpec] = &[
    SheetSpec::rgb565("assets/InterfaceElements.png", 30, 157, "INTERFACE"),
    SheetSpec::rgb565("assets/ChartElements.png", 106, 27, "AXES"),
    SheetSpec::rgb565("assets/BigNumbers.png", 48, 32, "BIG_NUMBERS"),
    SheetSpec::rgb565("assets/BigSigns.png", 48, 40, "BIG_SIGNS"),
    SheetSpec::rgb565("assets/SmallNumbers.png", 19, 13, "SMALL_NUMBERS"),
    SheetSpec::rgb565("assets/SmallSigns.png", 21, 16, "SMALL_SIGNS"),
    SheetSpec::rgb565("assets/Icons.png", 16, 16, "ICONS"),
];

/// A named list of sheets forming one bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetTable {
    /// Bundle name; the default output file is `<name>_assets.h`.
    pub name: String,
    /// Reject sheets whose size is not a multiple of the cell size.
    #[serde(default)]
    pub strict_grid: bool,
    /// Sheets in registration order.
    pub sheets: Vec<SheetSpec>,
}

impl Default for SheetTable {
    fn default() -> Self {
        Self::interface()
    }
}

impl SheetTable {
    /// The built-in seven-sheet interface table.
    pub fn interface() -> Self {
        Self {
            name: INTERFACE_NAME.to_string(),
            strict_grid: false,
            sheets: INTERFACE_SHEETS.to_vec(),
        }
    }

    /// Load a table from a JSON manifest.
    pub fn from_path(path: &Path) -> Result<Self, BundleError> {
        let manifest_err = |message: String| BundleError::Manifest {
            path: path.to_path_buf(),
            message,
        };
        let json = fs::read_to_string(path).map_err(|e| manifest_err(e.to_string()))?;
        let table: SheetTable =
            serde_json::from_str(&json).map_err(|e| manifest_err(e.to_string()))?;
        if !is_c_identifier(&table.name) {
            return Err(manifest_err(format!(
                "bundle name {:?} is not a C identifier",
                table.name
            )));
        }
        Ok(table)
    }

    /// Default output file name for this table.
    pub fn default_output(&self) -> String {
        format!("{}_assets.h", self.name)
    }

    /// Fail on the first handle name that appears twice.
    pub fn check_unique_handles(&self) -> Result<(), BundleError> {
        let mut seen: HashSet<&str> = HashSet::new();
        for sheet in &self.sheets {
            if !seen.insert(&sheet.handle) {
                return Err(BundleError::DuplicateHandle(sheet.handle.to_string()));
            }
        }
        Ok(())
    }
}
