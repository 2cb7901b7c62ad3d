//! BBox - inclusive pixel bounding boxes
//!
//! Bounding boxes use inclusive min/max coordinates on both axes, matching
//! the serialized `[xmin, ymin, xmax, ymax]` artifact format.

use serde::{Deserialize, Serialize};

/// An inclusive axis-aligned bounding box.
///
/// A box built with [`BBox::at_point`] and grown with [`BBox::include`]
/// always covers at least one pixel. Shrinking can produce an inverted box;
/// [`BBox::contains`] on an inverted box is false for every argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[i32; 4]", into = "[i32; 4]")]
pub struct BBox {
    /// Minimum x coordinate (inclusive)
    pub x0: i32,
    /// Minimum y coordinate (inclusive)
    pub y0: i32,
    /// Maximum x coordinate (inclusive)
    pub x1: i32,
    /// Maximum y coordinate (inclusive)
    pub y1: i32,
}

impl BBox {
    /// Create a box covering a single pixel
    pub fn at_point(x: i32, y: i32) -> Self {
        Self {
            x0: x,
            y0: y,
            x1: x,
            y1: y,
        }
    }

    /// Grow the box to cover `(x, y)`
    pub fn include(&mut self, x: i32, y: i32) {
        self.x0 = self.x0.min(x);
        self.y0 = self.y0.min(y);
        self.x1 = self.x1.max(x);
        self.y1 = self.y1.max(y);
    }

    /// Width in pixels
    #[inline]
    pub fn width(&self) -> i32 {
        self.x1 - self.x0 + 1
    }

    /// Height in pixels
    #[inline]
    pub fn height(&self) -> i32 {
        self.y1 - self.y0 + 1
    }

    /// Expand outward by `pad` pixels on all four sides
    pub fn expand(&self, pad: i32) -> Self {
        Self {
            x0: self.x0 - pad,
            y0: self.y0 - pad,
            x1: self.x1 + pad,
            y1: self.y1 + pad,
        }
    }

    /// Shrink inward by `margin` pixels on all four sides
    pub fn shrink(&self, margin: i32) -> Self {
        self.expand(-margin)
    }

    /// Clamp the box to a raster of the given dimensions
    pub fn clamp(&self, width: u32, height: u32) -> Self {
        Self {
            x0: self.x0.max(0),
            y0: self.y0.max(0),
            x1: self.x1.min(width as i32 - 1),
            y1: self.y1.min(height as i32 - 1),
        }
    }

    /// Check whether `other` lies fully inside this box (inclusive)
    pub fn contains(&self, other: &BBox) -> bool {
        other.x0 >= self.x0 && other.y0 >= self.y0 && other.x1 <= self.x1 && other.y1 <= self.y1
    }

    /// Check whether a point lies inside this box (inclusive)
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }
}

impl From<[i32; 4]> for BBox {
    fn from(v: [i32; 4]) -> Self {
        Self {
            x0: v[0],
            y0: v[1],
            x1: v[2],
            y1: v[3],
        }
    }
}

impl From<BBox> for [i32; 4] {
    fn from(b: BBox) -> Self {
        [b.x0, b.y0, b.x1, b.y1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_include_grows() {
        let mut b = BBox::at_point(5, 5);
        b.include(2, 8);
        b.include(9, 3);
        assert_eq!(b, BBox::from([2, 3, 9, 8]));
        assert_eq!(b.width(), 8);
        assert_eq!(b.height(), 6);
    }

    #[test]
    fn test_expand_and_clamp() {
        let b = BBox::from([2, 2, 8, 8]);
        let padded = b.expand(5).clamp(10, 10);
        assert_eq!(padded, BBox::from([0, 0, 9, 9]));
    }

    #[test]
    fn test_shrink_containment() {
        let parent = BBox::from([0, 0, 100, 100]);
        let inner = BBox::from([20, 20, 60, 60]);
        let touching = BBox::from([5, 20, 60, 60]);
        assert!(parent.shrink(10).contains(&inner));
        assert!(!parent.shrink(10).contains(&touching));
    }

    #[test]
    fn test_serde_array_form() {
        let b = BBox::from([1, 2, 3, 4]);
        let json = serde_json::to_string(&b).unwrap();
        assert_eq!(json, "[1,2,3,4]");
        let back: BBox = serde_json::from_str(&json).unwrap();
        assert_eq!(back, b);
    }
}
