//! Region combiner
//!
//! Merges the white and black labelings into one canonical index space and
//! computes per-region metadata. Global indices are assigned white-first,
//! then black, each in ascending pass-local label order; downstream
//! consumers depend on this ordering being stable across runs.

use crate::error::{PipelineError, PipelineResult};
use crate::idmap::MAX_REGIONS;
use log::info;
use regionmap_core::{BBox, Grid, Region, RegionKind};
use regionmap_segment::Labeling;

/// Combined label map plus the ordered region table
#[derive(Debug, Clone)]
pub struct Combined {
    /// Grid with 0 for background and `region.idx + 1` on region pixels
    pub grid: Grid<u32>,
    /// Region metadata, indexed by `idx`
    pub regions: Vec<Region>,
}

#[derive(Clone)]
struct Accum {
    count: u64,
    sum_x: u64,
    sum_y: u64,
    bbox: Option<BBox>,
}

/// Paint one pass's survivors into the combined grid and compute their
/// metadata. Survivor slot `i` receives global index `start_idx + i`.
fn accumulate(
    labeling: &Labeling,
    kind: RegionKind,
    start_idx: usize,
    combined: &mut Grid<u32>,
) -> Vec<Region> {
    let max_label = labeling
        .survivors
        .iter()
        .map(|&(label, _)| label)
        .max()
        .unwrap_or(0);
    let mut slot_of: Vec<Option<usize>> = vec![None; max_label as usize + 1];
    for (slot, &(label, _)) in labeling.survivors.iter().enumerate() {
        slot_of[label as usize] = Some(slot);
    }

    let mut accums = vec![
        Accum {
            count: 0,
            sum_x: 0,
            sum_y: 0,
            bbox: None,
        };
        labeling.survivors.len()
    ];

    let (w, h) = labeling.labels.dimensions();
    for y in 0..h {
        for x in 0..w {
            let label = labeling.labels.at(x, y);
            if label == 0 || label > max_label {
                continue;
            }
            let Some(slot) = slot_of[label as usize] else {
                continue;
            };
            combined.set(x, y, (start_idx + slot) as u32 + 1);
            let acc = &mut accums[slot];
            acc.count += 1;
            acc.sum_x += x as u64;
            acc.sum_y += y as u64;
            match &mut acc.bbox {
                Some(b) => b.include(x as i32, y as i32),
                None => acc.bbox = Some(BBox::at_point(x as i32, y as i32)),
            }
        }
    }

    accums
        .into_iter()
        .enumerate()
        .map(|(slot, acc)| Region {
            idx: (start_idx + slot) as u32,
            kind,
            size: acc.count,
            // Truncated integer centroid, matching the persisted artifacts
            cx: (acc.sum_x / acc.count.max(1)) as i32,
            cy: (acc.sum_y / acc.count.max(1)) as i32,
            bbox: acc.bbox.unwrap_or(BBox::at_point(0, 0)),
        })
        .collect()
}

/// Combine the white and black labelings into a single region map.
///
/// # Errors
///
/// Returns [`PipelineError::DimensionMismatch`] if the label grids differ
/// in size, and [`PipelineError::TooManyRegions`] when the total survivor
/// count does not fit the 16-bit ID-map encoding. The latter is fatal by
/// design: silently wrapping IDs would corrupt the persisted ID-map.
pub fn combine_regions(white: &Labeling, black: &Labeling) -> PipelineResult<Combined> {
    info!("Combining regions...");
    if white.labels.dimensions() != black.labels.dimensions() {
        return Err(PipelineError::DimensionMismatch {
            left: white.labels.dimensions(),
            right: black.labels.dimensions(),
        });
    }

    let total = white.survivors.len() + black.survivors.len();
    if total > MAX_REGIONS {
        return Err(PipelineError::TooManyRegions {
            count: total,
            max: MAX_REGIONS,
        });
    }

    let (w, h) = white.labels.dimensions();
    let mut grid: Grid<u32> = Grid::new(w, h)?;

    let mut regions = accumulate(white, RegionKind::White, 0, &mut grid);
    let black_regions = accumulate(black, RegionKind::Black, regions.len(), &mut grid);
    regions.extend(black_regions);

    let white_count = regions
        .iter()
        .filter(|r| r.kind == RegionKind::White)
        .count();
    info!(
        "  Total: {} regions (white={}, black={})",
        regions.len(),
        white_count,
        regions.len() - white_count
    );
    Ok(Combined { grid, regions })
}

#[cfg(test)]
mod tests {
    use super::*;
    use regionmap_segment::{BlackFinder, RegionFinder, WhiteFinder};

    /// 30x10 raster: left half white, right half black.
    fn half_raster() -> Grid<u8> {
        let mut gray = Grid::from_raw(30, 10, vec![255u8; 300]).unwrap();
        for y in 0..10 {
            for x in 15..30 {
                gray.set(x, y, 0);
            }
        }
        gray
    }

    fn labelings(gray: &Grid<u8>) -> (Labeling, Labeling) {
        let white = WhiteFinder::new(128, 50).find(gray).unwrap();
        let black = BlackFinder::new(128, 2, 50).find(gray).unwrap();
        (white, black)
    }

    #[test]
    fn test_white_then_black_ordering() {
        let gray = half_raster();
        let (white, black) = labelings(&gray);
        let combined = combine_regions(&white, &black).unwrap();

        assert_eq!(combined.regions.len(), 2);
        assert_eq!(combined.regions[0].kind, RegionKind::White);
        assert_eq!(combined.regions[0].idx, 0);
        assert_eq!(combined.regions[1].kind, RegionKind::Black);
        assert_eq!(combined.regions[1].idx, 1);

        // Grid holds idx + 1
        assert_eq!(combined.grid.at(0, 0), 1);
        assert_eq!(combined.grid.at(29, 9), 2);
    }

    #[test]
    fn test_metadata_values() {
        let gray = half_raster();
        let (white, black) = labelings(&gray);
        let combined = combine_regions(&white, &black).unwrap();

        let white_region = &combined.regions[0];
        assert_eq!(white_region.size, 150);
        assert_eq!(white_region.bbox, BBox::from([0, 0, 14, 9]));
        assert_eq!(white_region.cx, 7); // truncated mean of 0..=14
        assert_eq!(white_region.cy, 4); // truncated mean of 0..=9

        let black_region = &combined.regions[1];
        assert_eq!(black_region.size, 150);
        assert_eq!(black_region.bbox, BBox::from([15, 0, 29, 9]));
        assert_eq!(black_region.cx, 22);
    }

    #[test]
    fn test_all_white_single_region() {
        let gray = Grid::from_raw(20, 12, vec![255u8; 240]).unwrap();
        let (white, black) = labelings(&gray);
        let combined = combine_regions(&white, &black).unwrap();

        assert_eq!(combined.regions.len(), 1);
        let region = &combined.regions[0];
        assert_eq!(region.kind, RegionKind::White);
        assert_eq!(region.size, 240);
        assert_eq!(region.bbox, BBox::from([0, 0, 19, 11]));
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let a = WhiteFinder::new(128, 1)
            .find(&Grid::from_raw(4, 4, vec![255u8; 16]).unwrap())
            .unwrap();
        let b = BlackFinder::new(128, 0, 1)
            .find(&Grid::from_raw(5, 4, vec![0u8; 20]).unwrap())
            .unwrap();
        assert!(matches!(
            combine_regions(&a, &b),
            Err(PipelineError::DimensionMismatch { .. })
        ));
    }
}
