use colored::Colorize;
use gd2prep_bundle::{BundleError, RAM_G_SIZE};
use serde::Serialize;
use std::time::Duration;

use crate::driver::{BuildConfig, BuildSummary, SheetReport};

pub(super) fn print_banner(config: &BuildConfig) {
    println!("{} {}", "Bundle:".cyan().bold(), config.table.name);
    println!("{} {}", "Assets:".cyan().bold(), config.assets_dir.display());
    println!("{} {}", "Output:".cyan().bold(), config.output.display());
    if config.strict_grid {
        println!("{} {}", "Strict grid:".cyan().bold(), "enabled".green());
    }
    println!();
}

pub(super) fn print_sheet(sheet: &SheetReport) {
    println!(
        "  {} {:<16} handle {:>2}  {:>3} cells ({}x{})  {:>7} bytes @ 0x{:05x}",
        "+".green(),
        sheet.handle,
        sheet.handle_slot,
        sheet.cells,
        sheet.cols,
        sheet.rows,
        sheet.bytes,
        sheet.address
    );
    if sheet.has_remainder() {
        println!(
            "    {} {} is {}x{}: dropped {}px right, {}px bottom",
            "!".yellow(),
            sheet.path.display(),
            sheet.image_width,
            sheet.image_height,
            sheet.discarded[0],
            sheet.discarded[1]
        );
    }
}

pub(super) fn print_summary(summary: &BuildSummary, elapsed: Duration) {
    let percent = summary.ram_used as f64 * 100.0 / RAM_G_SIZE as f64;
    println!();
    println!(
        "{} {} handles, {} of {} bytes graphics RAM ({:.1}%)",
        "Packed".green().bold(),
        summary.sheets.len(),
        summary.ram_used,
        RAM_G_SIZE,
        percent
    );
    println!(
        "{} {} ({} bytes, {})",
        "Wrote".green().bold(),
        summary.output.path.display(),
        summary.output.bytes,
        &summary.output.hash[..16]
    );
    println!("{} {:.2}s", "Done in".dimmed(), elapsed.as_secs_f64());
}

/// Machine-readable build result.
#[derive(Debug, Serialize)]
pub(super) struct BuildReport {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<BuildSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonError>,
}

/// Error entry of a [`BuildReport`].
#[derive(Debug, Serialize)]
pub(super) struct JsonError {
    code: String,
    category: String,
    message: String,
}

impl BuildReport {
    pub(super) fn success(summary: BuildSummary) -> Self {
        Self {
            success: true,
            summary: Some(summary),
            error: None,
        }
    }

    pub(super) fn failure(err: &anyhow::Error) -> Self {
        let (code, category) = match err.downcast_ref::<BundleError>() {
            Some(e) => (e.code(), e.category()),
            None => ("GD2_000", "cli"),
        };
        Self {
            success: false,
            summary: None,
            error: Some(JsonError {
                code: code.to_string(),
                category: category.to_string(),
                message: format!("{:#}", err),
            }),
        }
    }
}
