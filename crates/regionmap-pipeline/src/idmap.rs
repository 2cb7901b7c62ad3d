//! ID-map encoding
//!
//! The combined label map persists as a 3-channel raster: R holds the low
//! byte of the region index, G the high byte, and B is a validity marker
//! (255 on region pixels, 0 on boundary/background). Decoding accepts any
//! marker value of 250 or more so the lookup still works after a lossy
//! round-trip through intermediate storage.

use crate::error::{PipelineError, PipelineResult};
use log::info;
use regionmap_core::{Grid, RgbImage};

/// Highest region count the two ID bytes can address
pub const MAX_REGIONS: usize = 65536;

/// Marker byte written on region pixels
pub const MARKER: u8 = 255;

/// Lowest marker byte accepted as "region pixel" when decoding
pub const MARKER_MIN: u8 = 250;

/// Encode the combined label map into the ID-map raster.
///
/// # Errors
///
/// Returns [`PipelineError::TooManyRegions`] if any pixel refers to an
/// index outside the 16-bit space (the combiner already rejects such runs).
pub fn encode_id_map(combined: &Grid<u32>) -> PipelineResult<RgbImage> {
    info!("Building ID map...");
    let (w, h) = combined.dimensions();
    let mut image = RgbImage::new(w, h)?;

    for y in 0..h {
        for x in 0..w {
            let value = combined.at(x, y);
            if value == 0 {
                continue;
            }
            let idx = value as usize - 1;
            if idx >= MAX_REGIONS {
                return Err(PipelineError::TooManyRegions {
                    count: idx + 1,
                    max: MAX_REGIONS,
                });
            }
            image.set(x, y, [(idx & 0xFF) as u8, ((idx >> 8) & 0xFF) as u8, MARKER]);
        }
    }

    Ok(image)
}

/// Decode an ID-map raster into a pixel-to-region-index grid.
///
/// Region pixels yield their index; boundary/background pixels yield -1.
pub fn decode_id_map(image: &RgbImage) -> PipelineResult<Grid<i32>> {
    let (w, h) = (image.width(), image.height());
    let mut ids = Grid::from_raw(w, h, vec![-1i32; w as usize * h as usize])?;

    for y in 0..h {
        for x in 0..w {
            // Inside the image by construction
            if let Some([r, g, b]) = image.get(x, y)
                && b >= MARKER_MIN
            {
                ids.set(x, y, r as i32 | ((g as i32) << 8));
            }
        }
    }

    Ok(ids)
}
