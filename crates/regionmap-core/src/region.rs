//! Region metadata
//!
//! A [`Region`] is the canonical addressable entity the pipeline produces:
//! one maximal connected area of uniform classification that survived the
//! minimum-size filter. The struct serializes directly into the
//! `region_meta.json` entry format consumed by the performance tools.

use crate::bbox::BBox;
use serde::{Deserialize, Serialize};

/// Classification of a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionKind {
    /// A gap between outlines (pixels at or above the intensity threshold)
    White,
    /// A filled shape (pixels below the intensity threshold)
    Black,
}

/// Metadata for a single extracted region.
///
/// `idx` is 0-based and globally unique, assigned in white-then-black
/// discovery order. Downstream consumers depend on that ordering, so it is
/// stable across runs for a fixed input raster and configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Global region index
    pub idx: u32,
    /// White (gap) or black (filled shape)
    #[serde(rename = "type")]
    pub kind: RegionKind,
    /// Member pixel count
    pub size: u64,
    /// Centroid x, truncated mean of member pixel x coordinates
    pub cx: i32,
    /// Centroid y, truncated mean of member pixel y coordinates
    pub cy: i32,
    /// Inclusive bounding box of member pixels
    pub bbox: BBox,
}
