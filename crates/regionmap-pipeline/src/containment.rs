//! Containment resolver
//!
//! Infers parent→children relations between regions with two independent
//! heuristics whose results are unioned:
//!
//! - **Flood-fill containment**: inside a padded crop of the parent's bbox,
//!   parent pixels act as walls; a smaller region whose centroid sits in a
//!   passable component that never touches the crop border is enclosed.
//! - **Bounding-box containment**: a much smaller region whose bbox lies
//!   strictly inside the parent's bbox shrunk by a margin.
//!
//! Hand-drawn outlines often have small gaps in their boundary strokes, so
//! pure flood-fill containment leaks through the gap and misses the child;
//! the bbox method recovers those cases at the cost of occasional false
//! positives. The union favors recall, since a human curates the output.
//!
//! The resolver reads the *decoded* ID-map, not the in-memory combined
//! grid: its answers must match what a consumer loading only the persisted
//! PNG would compute.
//!
//! Note the deliberate asymmetry between the methods' size thresholds:
//! flood children only need to be smaller than the parent, bbox children
//! must be below half the parent's size. Both cut-offs are part of the
//! curated reference behavior and are preserved exactly.

use crate::config::PipelineConfig;
use log::info;
use regionmap_core::{Grid, Region};
use regionmap_segment::{Connectivity, label_components};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Passable-component labeling of one parent's padded crop.
struct CropLabels {
    x0: i32,
    y0: i32,
    x1: i32, // exclusive
    y1: i32, // exclusive
    labels: Grid<u32>,
    open: HashSet<u32>,
}

impl CropLabels {
    /// Label the non-parent pixels of the crop and collect the labels that
    /// touch the crop border (those connect to the outside world).
    ///
    /// Returns `None` when the padded bbox does not intersect the raster,
    /// which only happens for metadata that does not belong to this grid.
    fn build(pixel_ids: &Grid<i32>, parent_idx: i32, parent: &Region, pad: i32) -> Option<Self> {
        let (w, h) = pixel_ids.dimensions();
        let bbox = &parent.bbox;
        let x0 = (bbox.x0 - pad).max(0);
        let y0 = (bbox.y0 - pad).max(0);
        let x1 = (bbox.x1 + pad + 1).min(w as i32);
        let y1 = (bbox.y1 + pad + 1).min(h as i32);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }

        let cw = (x1 - x0) as u32;
        let ch = (y1 - y0) as u32;
        let mut passable = vec![0u8; cw as usize * ch as usize];
        for cy in 0..ch {
            for cx in 0..cw {
                let id = pixel_ids.at((x0 as u32) + cx, (y0 as u32) + cy);
                if id != parent_idx {
                    passable[(cy * cw + cx) as usize] = 1;
                }
            }
        }
        let passable = Grid::from_raw(cw, ch, passable).expect("crop dimensions are positive");
        let (labels, _) = label_components(&passable, Connectivity::FourWay)
            .expect("crop labeling cannot overflow");

        let mut open = HashSet::new();
        for cx in 0..cw {
            open.insert(labels.at(cx, 0));
            open.insert(labels.at(cx, ch - 1));
        }
        for cy in 0..ch {
            open.insert(labels.at(0, cy));
            open.insert(labels.at(cw - 1, cy));
        }
        open.remove(&0);

        Some(Self {
            x0,
            y0,
            x1,
            y1,
            labels,
            open,
        })
    }

    /// Whether the point (raster coordinates) falls inside an enclosed
    /// passable component.
    fn encloses(&self, x: i32, y: i32) -> bool {
        if x < self.x0 || x >= self.x1 || y < self.y0 || y >= self.y1 {
            return false;
        }
        let label = self.labels.at((x - self.x0) as u32, (y - self.y0) as u32);
        label > 0 && !self.open.contains(&label)
    }
}

/// Resolve parent→children containment over the decoded ID-map.
///
/// Returns a map from parent index to the sorted child indices; regions
/// with no children do not appear. This step cannot fail: degenerate
/// inputs just produce an empty mapping.
pub fn resolve_containment(
    pixel_ids: &Grid<i32>,
    regions: &[Region],
    config: &PipelineConfig,
) -> BTreeMap<u32, Vec<u32>> {
    info!("Computing parent-child relationships...");
    let mut children: BTreeMap<u32, Vec<u32>> = BTreeMap::new();

    for parent in regions {
        if parent.size < config.parent_min_size {
            continue;
        }

        let Some(crop) = CropLabels::build(
            pixel_ids,
            parent.idx as i32,
            parent,
            config.flood_fill_pad,
        ) else {
            // Parent bbox entirely off-raster: nothing it can enclose
            continue;
        };
        let inner_bbox = parent.bbox.shrink(config.children_bbox_margin);
        let bbox_size_limit = parent.size as f64 * config.children_size_ratio;

        let mut kids: BTreeSet<u32> = BTreeSet::new();
        for child in regions {
            if child.idx == parent.idx {
                continue;
            }

            // Method A: enclosed by the parent's walls in the crop
            if child.size < parent.size && crop.encloses(child.cx, child.cy) {
                kids.insert(child.idx);
                continue;
            }

            // Method B: bbox strictly inside the shrunk parent bbox
            if (child.size as f64) < bbox_size_limit && inner_bbox.contains(&child.bbox) {
                kids.insert(child.idx);
            }
        }

        if !kids.is_empty() {
            children.insert(parent.idx, kids.into_iter().collect());
        }
    }

    info!("  Found {} parent regions", children.len());
    children
}
