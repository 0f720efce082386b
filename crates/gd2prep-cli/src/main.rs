//! gd2prep - sprite-sheet bundler for the Gameduino 2
//!
//! Invoked without arguments, slices the built-in interface sheets and
//! writes `Interface_assets.h` in the current directory.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use gd2prep_cli::commands::build::{self, BuildArgs};

/// gd2prep - Gameduino 2 asset bundle builder
#[derive(Parser)]
#[command(name = "gd2prep")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory sheet paths are resolved against (default: current directory)
    #[arg(long)]
    assets_dir: Option<PathBuf>,

    /// Bundle output path (default: <name>_assets.h)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON sheet manifest to use instead of the built-in interface table
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Fail if a sheet is not an exact multiple of its cell size
    #[arg(long)]
    strict_grid: bool,

    /// List the sheets and whether they exist, without building
    #[arg(long)]
    dry_run: bool,

    /// Output machine-readable JSON (no colored output)
    #[arg(long, conflicts_with = "dry_run")]
    json: bool,
}

impl Cli {
    fn build_args(&self) -> BuildArgs {
        BuildArgs {
            assets_dir: self.assets_dir.clone(),
            output: self.output.clone(),
            manifest: self.manifest.clone(),
            strict_grid: self.strict_grid,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let args = cli.build_args();

    let result = if cli.dry_run {
        build::print_plan(&args).map(|()| ExitCode::SUCCESS)
    } else {
        build::run(&args, cli.json)
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
