//! Region map generator CLI.
//!
//! Converts a rendered black/white outline PNG into the region artifacts:
//! ID-map raster, metadata table, containment table, and overlay.
//!
//! ```text
//! generate_regions <rendered_outline.png> [--prefix PREFIX] [--outdir DIR]
//! generate_regions outlines_render_scene2.png --prefix scene2_
//! ```

use anyhow::{Result, bail};
use flexi_logger::Logger;
use log::info;
use regionmap::pipeline::{PipelineConfig, RunOptions, run_pipeline};
use std::path::PathBuf;

const USAGE: &str = "Usage: generate_regions <rendered_outline.png> [--prefix PREFIX] [--outdir DIR]";

struct Args {
    input: PathBuf,
    options: RunOptions,
}

fn parse_args(mut args: std::env::Args) -> Result<Args> {
    args.next(); // program name
    let mut input = None;
    let mut options = RunOptions::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--prefix" => {
                let Some(value) = args.next() else {
                    bail!("--prefix requires a value\n{USAGE}");
                };
                options.prefix = value;
            }
            "--outdir" => {
                let Some(value) = args.next() else {
                    bail!("--outdir requires a value\n{USAGE}");
                };
                options.outdir = value.into();
            }
            other if other.starts_with("--") => bail!("unknown argument {other:?}\n{USAGE}"),
            _ => {
                if input.replace(PathBuf::from(&arg)).is_some() {
                    bail!("unexpected extra argument {arg:?}\n{USAGE}");
                }
            }
        }
    }
    let Some(input) = input else {
        bail!("{USAGE}");
    };
    Ok(Args { input, options })
}

fn main() -> Result<()> {
    let _logger = Logger::try_with_env_or_str("info")?
        .format(flexi_logger::colored_default_format)
        .start()?;

    let args = parse_args(std::env::args())?;
    if !args.input.exists() {
        bail!("{} not found", args.input.display());
    }

    let summary = run_pipeline(&args.input, &args.options, &PipelineConfig::default())?;
    info!(
        "Done. {} regions ({} white, {} black, {} parents).",
        summary.regions, summary.white, summary.black, summary.parents
    );
    Ok(())
}
