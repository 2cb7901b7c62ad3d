//! Region finders
//!
//! Both region classes follow the same contract - binarize, label,
//! size-filter, emit the label grid plus the surviving (label, size) pairs -
//! but with different labeling strategies:
//!
//! - [`WhiteFinder`]: direct connected component labeling of the white mask.
//! - [`BlackFinder`]: erosion-seeded growth. Adjacent filled shapes often
//!   touch at thin bridges; eroding the black mask first separates them
//!   into distinct seed cores, and growing the seeds back over the original
//!   mask restores each shape's true extent without re-merging neighbors.
//!
//! The [`RegionFinder`] trait is the dispatch seam between the two.

use crate::conncomp::{Connectivity, component_sizes, label_components};
use crate::error::SegmentResult;
use crate::growth::grow_seeds;
use crate::mask::{binarize_at_least, binarize_below, erode_cross};
use log::info;
use regionmap_core::Grid;

/// Result of one labeling pass
#[derive(Debug, Clone)]
pub struct Labeling {
    /// Label grid in the pass-local numbering space (0 = background).
    ///
    /// The grid is pre-filter: labels that did not survive the size filter
    /// may still appear in it for the white pass. Consumers must only read
    /// pixels of labels listed in `survivors`.
    pub labels: Grid<u32>,
    /// Surviving (label, size) pairs in ascending label order
    pub survivors: Vec<(u32, u64)>,
}

/// One pass of the two-class segmentation
pub trait RegionFinder {
    /// Run the pass over a grayscale raster
    fn find(&self, gray: &Grid<u8>) -> SegmentResult<Labeling>;
}

/// Finds white regions (gaps between outlines) by direct component labeling
#[derive(Debug, Clone)]
pub struct WhiteFinder {
    /// Pixels with intensity >= threshold are white
    pub threshold: u8,
    /// Minimum component size in pixels
    pub min_pixels: u64,
}

impl WhiteFinder {
    /// Create a finder with the given threshold and size filter
    pub fn new(threshold: u8, min_pixels: u64) -> Self {
        Self {
            threshold,
            min_pixels,
        }
    }
}

impl RegionFinder for WhiteFinder {
    fn find(&self, gray: &Grid<u8>) -> SegmentResult<Labeling> {
        info!("Finding white regions...");
        let mask = binarize_at_least(gray, self.threshold)?;
        let (labels, count) = label_components(&mask, Connectivity::FourWay)?;
        let sizes = component_sizes(&labels, count);

        let survivors: Vec<(u32, u64)> = sizes
            .iter()
            .enumerate()
            .filter(|&(_, &size)| size >= self.min_pixels)
            .map(|(i, &size)| (i as u32 + 1, size))
            .collect();

        info!(
            "  Found {} white regions (of {} total, min {}px)",
            survivors.len(),
            count,
            self.min_pixels
        );
        Ok(Labeling { labels, survivors })
    }
}

/// Finds black regions (filled shapes) via erosion-seeded growth
#[derive(Debug, Clone)]
pub struct BlackFinder {
    /// Pixels with intensity < threshold are black
    pub threshold: u8,
    /// Erosion iterations applied before seed labeling
    pub erosion_iterations: u32,
    /// Minimum size in pixels, applied at both the seed and final stage
    pub min_pixels: u64,
}

impl BlackFinder {
    /// Create a finder with the given threshold, erosion depth and size filter
    pub fn new(threshold: u8, erosion_iterations: u32, min_pixels: u64) -> Self {
        Self {
            threshold,
            erosion_iterations,
            min_pixels,
        }
    }
}

impl RegionFinder for BlackFinder {
    fn find(&self, gray: &Grid<u8>) -> SegmentResult<Labeling> {
        info!("Finding black regions...");
        let mask = binarize_below(gray, self.threshold)?;

        // Eroded cores of each black shape become the seeds
        let eroded = erode_cross(&mask, self.erosion_iterations)?;
        let (mut seeds, seed_count) = label_components(&eroded, Connectivity::FourWay)?;
        drop(eroded);

        let seed_sizes = component_sizes(&seeds, seed_count);
        let mut keep = vec![false; seed_count as usize + 1];
        let mut valid_ids = Vec::new();
        for (i, &size) in seed_sizes.iter().enumerate() {
            if size >= self.min_pixels {
                keep[i + 1] = true;
                valid_ids.push(i as u32 + 1);
            }
        }
        info!(
            "  Found {} seed regions (of {} total)",
            valid_ids.len(),
            seed_count
        );

        // Clear seeds that are too small so growth ignores them
        if valid_ids.len() < seed_count as usize {
            for label in seeds.as_mut_slice() {
                if *label > 0 && !keep[*label as usize] {
                    *label = 0;
                }
            }
        }

        info!("  Growing seeds...");
        let grown = grow_seeds(&seeds, &mask)?;
        drop(seeds);
        drop(mask);

        // A seed can still vanish here: its grown area under the mask may
        // end up below the size filter. Checked, not assumed preserved.
        let grown_sizes = component_sizes(&grown, seed_count);
        let survivors: Vec<(u32, u64)> = valid_ids
            .into_iter()
            .filter_map(|id| {
                let size = grown_sizes[id as usize - 1];
                (size >= self.min_pixels).then_some((id, size))
            })
            .collect();

        info!("  Final black regions: {}", survivors.len());
        Ok(Labeling {
            labels: grown,
            survivors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 40x20 raster, all white except a black 10x10 square on the left and
    /// a black 8x8 square on the right.
    fn squares_raster() -> Grid<u8> {
        let mut gray = Grid::from_raw(40, 20, vec![255u8; 800]).unwrap();
        for y in 4..14 {
            for x in 4..14 {
                gray.set(x, y, 0);
            }
        }
        for y in 6..14 {
            for x in 24..32 {
                gray.set(x, y, 0);
            }
        }
        gray
    }

    #[test]
    fn test_white_finder_filters_small() {
        let gray = squares_raster();
        let finder = WhiteFinder::new(128, 50);
        let labeling = finder.find(&gray).unwrap();
        // One big white component (the background is connected around the squares)
        assert_eq!(labeling.survivors.len(), 1);
        let (_, size) = labeling.survivors[0];
        assert_eq!(size, 800 - 100 - 64);
    }

    #[test]
    fn test_black_finder_recovers_full_extent() {
        let gray = squares_raster();
        let finder = BlackFinder::new(128, 2, 5);
        let labeling = finder.find(&gray).unwrap();
        assert_eq!(labeling.survivors.len(), 2);
        // Growth restores the pre-erosion sizes
        let sizes: Vec<u64> = labeling.survivors.iter().map(|&(_, s)| s).collect();
        assert_eq!(sizes, vec![100, 64]);
    }

    #[test]
    fn test_black_finder_drops_small_seed() {
        let gray = squares_raster();
        // After 2 erosions the 8x8 square leaves a 4x4 = 16px seed
        let finder = BlackFinder::new(128, 2, 20);
        let labeling = finder.find(&gray).unwrap();
        assert_eq!(labeling.survivors.len(), 1);
        assert_eq!(labeling.survivors[0].1, 100);
    }

    #[test]
    fn test_all_black_raster_has_no_white_regions() {
        let gray = Grid::from_raw(16, 16, vec![0u8; 256]).unwrap();
        let labeling = WhiteFinder::new(128, 50).find(&gray).unwrap();
        assert!(labeling.survivors.is_empty());
    }
}
