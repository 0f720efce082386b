//! Asset preparation driver.
//!
//! Loads every sheet of a [`SheetTable`], slices it into cells, registers
//! the cells in an [`AssetBundle`] it owns, and finalizes the bundle once
//! all sheets succeeded. Any error aborts the run before the output file
//! is touched.

use std::path::{Path, PathBuf};

use gd2prep_bundle::{load_sheet, split_grid, AssetBundle, BundleError, BundleOutput, CellGrid};
use serde::Serialize;

use crate::sheets::{SheetSpec, SheetTable};

/// Everything a build needs.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Sheets to bundle.
    pub table: SheetTable,
    /// Directory sheet paths are resolved against.
    pub assets_dir: PathBuf,
    /// Bundle output path.
    pub output: PathBuf,
    /// Reject sheets with remainder pixels.
    pub strict_grid: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self::for_table(SheetTable::interface())
    }
}

impl BuildConfig {
    /// Configuration for `table` with inputs and output in the current directory.
    pub fn for_table(table: SheetTable) -> Self {
        Self {
            output: PathBuf::from(table.default_output()),
            assets_dir: PathBuf::from("."),
            strict_grid: table.strict_grid,
            table,
        }
    }

    /// Absolute or assets-relative location of a sheet image.
    pub fn sheet_path(&self, sheet: &SheetSpec) -> PathBuf {
        self.assets_dir.join(&*sheet.path)
    }
}

/// Outcome for a single sheet.
#[derive(Debug, Clone, Serialize)]
pub struct SheetReport {
    pub handle: String,
    pub path: PathBuf,
    pub handle_slot: u8,
    pub image_width: u32,
    pub image_height: u32,
    pub cols: u32,
    pub rows: u32,
    pub cells: usize,
    pub format: String,
    pub address: usize,
    pub bytes: usize,
    /// Pixels dropped at the right and bottom edges.
    pub discarded: [u32; 2],
}

impl SheetReport {
    /// True if some pixels were not covered by complete cells.
    pub fn has_remainder(&self) -> bool {
        self.discarded != [0, 0]
    }
}

/// Outcome of a whole build.
#[derive(Debug, Clone, Serialize)]
pub struct BuildSummary {
    pub bundle: String,
    pub sheets: Vec<SheetReport>,
    /// Graphics RAM used by the bundle.
    pub ram_used: usize,
    pub output: BundleOutput,
}

/// Build the built-in interface bundle from the current directory.
pub fn run_default() -> Result<BuildSummary, BundleError> {
    run(&BuildConfig::default())
}

/// Build and finalize the bundle described by `config`.
pub fn run(config: &BuildConfig) -> Result<BuildSummary, BundleError> {
    let (bundle, sheets) = assemble(config)?;
    let output = bundle.finalize(&config.output)?;
    Ok(BuildSummary {
        bundle: bundle.name().to_string(),
        ram_used: bundle.end_address(),
        sheets,
        output,
    })
}

/// Load and register every sheet without writing anything.
pub fn assemble(config: &BuildConfig) -> Result<(AssetBundle, Vec<SheetReport>), BundleError> {
    config.table.check_unique_handles()?;

    let mut bundle = AssetBundle::new(config.table.name.clone());
    let mut reports = Vec::with_capacity(config.table.sheets.len());
    for sheet in &config.table.sheets {
        let path = config.sheet_path(sheet);
        reports.push(add_sheet(&mut bundle, sheet, &path, config.strict_grid)?);
    }
    Ok((bundle, reports))
}

/// Slice one sheet from disk and register it in `bundle`.
pub fn add_sheet(
    bundle: &mut AssetBundle,
    sheet: &SheetSpec,
    path: &Path,
    strict_grid: bool,
) -> Result<SheetReport, BundleError> {
    let image = load_sheet(path)?;
    let grid = CellGrid::compute(
        image.width(),
        image.height(),
        sheet.cell_width,
        sheet.cell_height,
    )?;
    if strict_grid && !grid.is_exact() {
        return Err(BundleError::GridRemainder {
            name: sheet.handle.to_string(),
            width: image.width(),
            height: image.height(),
            cell_width: sheet.cell_width,
            cell_height: sheet.cell_height,
        });
    }

    let cells = split_grid(&image, &grid);
    let entry = bundle.load_handle(&sheet.handle, &cells, sheet.format)?;

    Ok(SheetReport {
        handle: entry.name.clone(),
        path: path.to_path_buf(),
        handle_slot: entry.handle,
        image_width: image.width(),
        image_height: image.height(),
        cols: grid.cols,
        rows: grid.rows,
        cells: entry.cells,
        format: entry.format.to_string(),
        address: entry.address,
        bytes: entry.size,
        discarded: [grid.remainder_x, grid.remainder_y],
    })
}
