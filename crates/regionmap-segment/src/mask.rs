//! Binary masks: thresholding and erosion
//!
//! Masks are `Grid<u8>` with 1 for foreground and 0 for background. The
//! erosion here uses the 4-connected cross structuring element with the
//! outside of the raster treated as background, so each iteration removes
//! one ring of foreground pixels, including pixels on the raster border.

use crate::error::SegmentResult;
use regionmap_core::Grid;

/// Binarize a grayscale image: foreground where intensity >= `threshold`
pub fn binarize_at_least(gray: &Grid<u8>, threshold: u8) -> SegmentResult<Grid<u8>> {
    let data = gray
        .as_slice()
        .iter()
        .map(|&v| u8::from(v >= threshold))
        .collect();
    Ok(Grid::from_raw(gray.width(), gray.height(), data)?)
}

/// Binarize a grayscale image: foreground where intensity < `threshold`
pub fn binarize_below(gray: &Grid<u8>, threshold: u8) -> SegmentResult<Grid<u8>> {
    let data = gray
        .as_slice()
        .iter()
        .map(|&v| u8::from(v < threshold))
        .collect();
    Ok(Grid::from_raw(gray.width(), gray.height(), data)?)
}

/// Erode a binary mask with the 4-connected cross SEL, `iterations` times.
///
/// A foreground pixel survives one iteration only if all four of its
/// edge-neighbors are foreground; border pixels never survive because the
/// outside counts as background.
pub fn erode_cross(mask: &Grid<u8>, iterations: u32) -> SegmentResult<Grid<u8>> {
    let (w, h) = mask.dimensions();
    let mut current = mask.clone();

    for _ in 0..iterations {
        let mut next: Grid<u8> = Grid::new(w, h)?;
        for y in 1..h.saturating_sub(1) {
            for x in 1..w.saturating_sub(1) {
                if current.at(x, y) != 0
                    && current.at(x - 1, y) != 0
                    && current.at(x + 1, y) != 0
                    && current.at(x, y - 1) != 0
                    && current.at(x, y + 1) != 0
                {
                    next.set(x, y, 1);
                }
            }
        }
        current = next;
    }

    Ok(current)
}
