//! Regionmap - region extraction for projected stage scenes
//!
//! Turns a rendered black/white outline raster into a labeled region map
//! for an interactive stage-lighting / projection tool. Each disjoint
//! white gap or black filled shape becomes an addressable region with a
//! stable integer ID, metadata, and parent/child containment relations.
//!
//! # Overview
//!
//! - White regions are found by thresholding and connected component
//!   labeling; black regions by erosion-seeded regrowth, so shapes joined
//!   by thin outline strokes separate cleanly
//! - Regions are combined into one ID space and persisted as a lossless
//!   ID-map PNG, a metadata JSON table, a containment table, and a
//!   colorized overlay
//!
//! # Example
//!
//! ```no_run
//! use regionmap::pipeline::{PipelineConfig, RunOptions, run_pipeline};
//!
//! let summary = run_pipeline(
//!     "outlines_render.png",
//!     &RunOptions::default(),
//!     &PipelineConfig::default(),
//! )?;
//! println!("Generated {} regions.", summary.regions);
//! # Ok::<(), regionmap::pipeline::PipelineError>(())
//! ```

// Re-export core types (primary data structures used everywhere)
pub use regionmap_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use regionmap_io as io;
pub use regionmap_pipeline as pipeline;
pub use regionmap_segment as segment;
