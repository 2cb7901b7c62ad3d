//! Pipeline configuration
//!
//! All thresholds and margins the reference artwork was curated against
//! live here as one immutable struct threaded through every stage, so
//! independent runs can use different settings and tests can tighten or
//! loosen the filters without touching globals.

/// Configuration for a full pipeline run.
///
/// The defaults reproduce the curated reference behavior; changing them
/// changes which regions exist and how containment resolves.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Classification threshold: white where intensity >= this, black below
    pub intensity_threshold: u8,
    /// Minimum region size in pixels for both passes
    pub min_pixels: u64,
    /// Erosion iterations before black seed labeling
    pub erosion_iterations: u32,
    /// Minimum size for a region to be considered as a parent
    pub parent_min_size: u64,
    /// Padding around the parent bbox for the flood-fill crop
    pub flood_fill_pad: i32,
    /// Inward margin for bounding-box containment
    pub children_bbox_margin: i32,
    /// Bbox-child size must be below parent size times this ratio
    pub children_size_ratio: f64,
    /// Seed for the cosmetic overlay colors
    pub overlay_seed: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            intensity_threshold: 128,
            min_pixels: 50,
            erosion_iterations: 2,
            parent_min_size: 5000,
            flood_fill_pad: 5,
            children_bbox_margin: 10,
            children_size_ratio: 0.5,
            overlay_seed: 42,
        }
    }
}

impl PipelineConfig {
    /// Create a configuration with the reference defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum region size
    pub fn with_min_pixels(mut self, min_pixels: u64) -> Self {
        self.min_pixels = min_pixels;
        self
    }

    /// Set the parent candidate size floor
    pub fn with_parent_min_size(mut self, parent_min_size: u64) -> Self {
        self.parent_min_size = parent_min_size;
        self
    }

    /// Set the erosion depth for black seed extraction
    pub fn with_erosion_iterations(mut self, iterations: u32) -> Self {
        self.erosion_iterations = iterations;
        self
    }
}
