//! regionmap-pipeline - Region extraction and containment inference
//!
//! The offline pipeline that turns a rendered black/white outline raster
//! into the region artifacts consumed by the performance tools:
//!
//! - **Combiner** - merges the white and black labelings into one canonical
//!   index space with per-region metadata
//! - **ID-map codec** - persists region identity as a 3-channel raster
//!   (two ID bytes plus a validity marker)
//! - **Overlay renderer** - seeded random-color visualization, cosmetic only
//! - **Containment resolver** - parent/child inference via flood-fill-with-
//!   walls unioned with bounding-box containment
//! - **Runner** - one-shot orchestration and artifact persistence
//!
//! # Examples
//!
//! ```no_run
//! use regionmap_pipeline::{PipelineConfig, RunOptions, run_pipeline};
//!
//! let summary = run_pipeline(
//!     "outlines_render.png",
//!     &RunOptions::default(),
//!     &PipelineConfig::default(),
//! )?;
//! println!("Generated {} regions.", summary.regions);
//! # Ok::<(), regionmap_pipeline::PipelineError>(())
//! ```

pub mod combine;
pub mod config;
pub mod containment;
pub mod error;
pub mod idmap;
pub mod overlay;
pub mod run;

pub use combine::{Combined, combine_regions};
pub use config::PipelineConfig;
pub use containment::resolve_containment;
pub use error::{PipelineError, PipelineResult};
pub use idmap::{MARKER, MARKER_MIN, MAX_REGIONS, decode_id_map, encode_id_map};
pub use overlay::render_overlay;
pub use run::{
    CHILDREN_SUFFIX, ID_MAP_SUFFIX, META_SUFFIX, OVERLAY_SUFFIX, RunOptions, RunSummary,
    run_pipeline,
};
