//! Build command implementation
//!
//! Slices every sheet of the selected table and writes the asset bundle.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use super::reporting;
use crate::driver::{self, BuildConfig};
use crate::sheets::SheetTable;

/// Options accepted by the build command.
#[derive(Debug, Clone, Default)]
pub struct BuildArgs {
    /// Directory sheet paths are resolved against (default: current directory)
    pub assets_dir: Option<PathBuf>,
    /// Bundle output path (default: `<name>_assets.h`)
    pub output: Option<PathBuf>,
    /// JSON sheet manifest replacing the built-in table
    pub manifest: Option<PathBuf>,
    /// Reject sheets whose size is not a multiple of the cell size
    pub strict_grid: bool,
}

impl BuildArgs {
    /// Resolve the arguments into a driver configuration.
    pub fn to_config(&self) -> Result<BuildConfig> {
        let table = match &self.manifest {
            Some(path) => SheetTable::from_path(path)?,
            None => SheetTable::interface(),
        };

        let mut config = BuildConfig::for_table(table);
        if let Some(dir) = &self.assets_dir {
            if !dir.is_dir() {
                anyhow::bail!("Assets directory does not exist: {}", dir.display());
            }
            config.assets_dir = dir.clone();
        }
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        config.strict_grid |= self.strict_grid;
        Ok(config)
    }
}

/// Run the build command
///
/// # Arguments
/// * `args` - Resolved command-line options
/// * `json_output` - Whether to output machine-readable JSON instead of colored text
///
/// # Returns
/// Exit code: 0 success, 1 on any failure
pub fn run(args: &BuildArgs, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(args)
    } else {
        run_human(args)
    }
}

/// Run the build with human-readable (colored) output
fn run_human(args: &BuildArgs) -> Result<ExitCode> {
    let start = Instant::now();
    let config = args.to_config()?;

    reporting::print_banner(&config);

    let summary = driver::run(&config)
        .with_context(|| format!("Bundle '{}' was not written", config.table.name))?;

    for sheet in &summary.sheets {
        reporting::print_sheet(sheet);
    }
    reporting::print_summary(&summary, start.elapsed());
    Ok(ExitCode::SUCCESS)
}

/// Run the build with JSON output on stdout
fn run_json(args: &BuildArgs) -> Result<ExitCode> {
    let result = args
        .to_config()
        .and_then(|config| driver::run(&config).map_err(anyhow::Error::from));

    let (report, code) = match result {
        Ok(summary) => (reporting::BuildReport::success(summary), ExitCode::SUCCESS),
        Err(e) => (reporting::BuildReport::failure(&e), ExitCode::from(1)),
    };

    let json = serde_json::to_string_pretty(&report).context("Failed to serialize build report")?;
    println!("{}", json);
    Ok(code)
}

/// Print the sheets a build would use, without loading them.
pub fn print_plan(args: &BuildArgs) -> Result<()> {
    let config = args.to_config()?;
    reporting::print_banner(&config);
    for sheet in &config.table.sheets {
        let path = config.sheet_path(sheet);
        let marker = if path.exists() {
            "ok".green()
        } else {
            "missing".red()
        };
        println!(
            "  {:<16} {:>4}x{:<4} {:<9} {} [{}]",
            sheet.handle,
            sheet.cell_width,
            sheet.cell_height,
            sheet.format.as_str(),
            path.display(),
            marker
        );
    }
    Ok(())
}
