//! Overlay renderer
//!
//! Cosmetic only: a translucent RGBA visualization with one random color
//! per region, for visual QA of the segmentation. The RNG seed is fixed so
//! repeated runs produce byte-identical overlays; nothing downstream reads
//! this artifact programmatically.

use crate::error::PipelineResult;
use log::info;
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use regionmap_core::{Grid, RgbaImage};

/// Alpha value painted on region pixels
const OVERLAY_ALPHA: u8 = 128;

/// Render the per-region color overlay.
///
/// Colors are drawn from a seeded RNG in region-index order, channels in
/// [50, 255). Background pixels stay fully transparent black.
pub fn render_overlay(
    combined: &Grid<u32>,
    region_count: usize,
    seed: u64,
) -> PipelineResult<RgbaImage> {
    info!("Building overlay...");
    let mut rng = StdRng::seed_from_u64(seed);
    let colors: Vec<[u8; 3]> = (0..region_count)
        .map(|_| {
            [
                rng.random_range(50..255),
                rng.random_range(50..255),
                rng.random_range(50..255),
            ]
        })
        .collect();

    let (w, h) = combined.dimensions();
    let mut overlay = RgbaImage::new(w, h)?;
    for y in 0..h {
        for x in 0..w {
            let value = combined.at(x, y);
            if value == 0 {
                continue;
            }
            let idx = value as usize - 1;
            if let Some(&[r, g, b]) = colors.get(idx) {
                overlay.set(x, y, [r, g, b, OVERLAY_ALPHA]);
            }
        }
    }

    Ok(overlay)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_region_grid() -> Grid<u32> {
        let mut grid: Grid<u32> = Grid::new(4, 1).unwrap();
        grid.set(0, 0, 1);
        grid.set(2, 0, 2);
        grid
    }

    #[test]
    fn test_overlay_paints_regions_only() {
        let overlay = render_overlay(&two_region_grid(), 2, 42).unwrap();

        let px = overlay.get(0, 0).unwrap();
        assert_eq!(px[3], OVERLAY_ALPHA);
        assert!(px[0] >= 50 && px[1] >= 50 && px[2] >= 50);

        // Background stays transparent
        assert_eq!(overlay.get(1, 0), Some([0, 0, 0, 0]));
        assert_eq!(overlay.get(3, 0), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_fixed_seed_is_reproducible() {
        let grid = two_region_grid();
        let a = render_overlay(&grid, 2, 42).unwrap();
        let b = render_overlay(&grid, 2, 42).unwrap();
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn test_regions_get_distinct_colors() {
        let overlay = render_overlay(&two_region_grid(), 2, 42).unwrap();
        // Not guaranteed in general, but holds for this seed and is what
        // makes the overlay useful for inspection.
        assert_ne!(overlay.get(0, 0), overlay.get(2, 0));
    }
}
