//! One-shot pipeline run
//!
//! Wires the stages together: load the grayscale render, run both region
//! finders, combine, encode the ID-map, render the overlay, re-decode the
//! encoded ID-map, resolve containment, and persist the four artifacts.
//!
//! Containment deliberately runs on the decoded ID-map rather than the
//! in-memory combined grid, so its answers match what a consumer loading
//! only the persisted PNG artifact would see.
//!
//! All computation happens before the first byte is written: an unreadable
//! input or an over-full region space fails the run without leaving
//! partial artifacts behind.

use crate::combine::combine_regions;
use crate::config::PipelineConfig;
use crate::containment::resolve_containment;
use crate::error::PipelineResult;
use crate::idmap::{decode_id_map, encode_id_map};
use crate::overlay::render_overlay;
use log::info;
use regionmap_core::Region;
use regionmap_io::{read_gray_file, write_json, write_json_pretty, write_rgb_file, write_rgba_file};
use regionmap_segment::{BlackFinder, RegionFinder, WhiteFinder};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Artifact file suffixes, shared with every consumer of the output files
pub const ID_MAP_SUFFIX: &str = "region_id_map.png";
/// Metadata table suffix
pub const META_SUFFIX: &str = "region_meta.json";
/// Overlay raster suffix
pub const OVERLAY_SUFFIX: &str = "region_overlay.png";
/// Children table suffix
pub const CHILDREN_SUFFIX: &str = "region_children.json";

/// Where and under what names to write the artifacts
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Filename prefix, e.g. `"scene2_"`
    pub prefix: String,
    /// Output directory, created if absent
    pub outdir: PathBuf,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            outdir: PathBuf::from("."),
        }
    }
}

impl RunOptions {
    /// Path of one artifact under these options
    pub fn artifact_path(&self, suffix: &str) -> PathBuf {
        self.outdir.join(format!("{}{}", self.prefix, suffix))
    }
}

/// Counts reported after a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Total regions extracted
    pub regions: usize,
    /// White (gap) regions
    pub white: usize,
    /// Black (filled shape) regions
    pub black: usize,
    /// Parents that received at least one child
    pub parents: usize,
}

/// Run the full pipeline over one input raster and write all artifacts.
pub fn run_pipeline<P: AsRef<Path>>(
    input: P,
    options: &RunOptions,
    config: &PipelineConfig,
) -> PipelineResult<RunSummary> {
    let input = input.as_ref();
    info!("Loading {}...", input.display());
    let gray = read_gray_file(input)?;
    info!("Image size: {}x{}", gray.width(), gray.height());

    let white = WhiteFinder::new(config.intensity_threshold, config.min_pixels).find(&gray)?;
    let black = BlackFinder::new(
        config.intensity_threshold,
        config.erosion_iterations,
        config.min_pixels,
    )
    .find(&gray)?;
    drop(gray);

    let combined = combine_regions(&white, &black)?;
    drop(white);
    drop(black);

    let id_map = encode_id_map(&combined.grid)?;
    let overlay = render_overlay(&combined.grid, combined.regions.len(), config.overlay_seed)?;

    let pixel_ids = decode_id_map(&id_map)?;
    let children = resolve_containment(&pixel_ids, &combined.regions, config);
    drop(pixel_ids);

    let meta: BTreeMap<String, &Region> = combined
        .regions
        .iter()
        .map(|r| (r.idx.to_string(), r))
        .collect();
    let children_table: BTreeMap<String, &Vec<u32>> = children
        .iter()
        .map(|(idx, kids)| (idx.to_string(), kids))
        .collect();

    std::fs::create_dir_all(&options.outdir).map_err(regionmap_core::Error::Io)?;

    let id_map_path = options.artifact_path(ID_MAP_SUFFIX);
    write_rgb_file(&id_map, &id_map_path)?;
    info!("Saved {}", id_map_path.display());

    let meta_path = options.artifact_path(META_SUFFIX);
    write_json(&meta_path, &meta)?;
    info!("Saved {}", meta_path.display());

    let overlay_path = options.artifact_path(OVERLAY_SUFFIX);
    write_rgba_file(&overlay, &overlay_path)?;
    info!("Saved {}", overlay_path.display());

    let children_path = options.artifact_path(CHILDREN_SUFFIX);
    write_json_pretty(&children_path, &children_table)?;
    info!("Saved {}", children_path.display());

    let white_count = combined
        .regions
        .iter()
        .filter(|r| r.kind == regionmap_core::RegionKind::White)
        .count();
    Ok(RunSummary {
        regions: combined.regions.len(),
        white: white_count,
        black: combined.regions.len() - white_count,
        parents: children.len(),
    })
}
