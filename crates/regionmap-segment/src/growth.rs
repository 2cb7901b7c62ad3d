//! Seeded growth over a passable mask
//!
//! The black-region pass erodes its mask to split shapes that touch at thin
//! bridges, labels the eroded cores as seeds, then grows every seed back
//! out to the original mask extent. Growth is a multi-source breadth-first
//! flood: all seed fronts advance one ring per step, so each passable pixel
//! is claimed by the seed whose front reaches it first and competing seeds
//! cannot re-merge across the territory boundary. With a flat 0/255 cost
//! surface this is exactly the priority-flood watershed the reference
//! pipeline relies on, without the priority queue.

use crate::error::{SegmentError, SegmentResult};
use regionmap_core::Grid;
use std::collections::VecDeque;

/// Grow labeled seeds outward through the foreground of `mask`.
///
/// `seeds` holds positive labels on seed pixels and 0 elsewhere. Every
/// foreground mask pixel reachable from a seed without leaving the mask is
/// assigned that seed's label; mask background is never assigned, so any
/// seed pixel that (unexpectedly) lies outside the mask is cleared. Growth
/// is 4-connected and deterministic: seed pixels enter the frontier in scan
/// order.
///
/// # Errors
///
/// Returns [`SegmentError::DimensionMismatch`] if the grids differ in size.
pub fn grow_seeds(seeds: &Grid<u32>, mask: &Grid<u8>) -> SegmentResult<Grid<u32>> {
    if seeds.dimensions() != mask.dimensions() {
        return Err(SegmentError::DimensionMismatch {
            left: seeds.dimensions(),
            right: mask.dimensions(),
        });
    }

    let (w, h) = mask.dimensions();
    let mut grown: Grid<u32> = Grid::new(w, h)?;
    let mut frontier = VecDeque::new();

    for y in 0..h {
        for x in 0..w {
            let label = seeds.at(x, y);
            if label > 0 && mask.at(x, y) != 0 {
                grown.set(x, y, label);
                frontier.push_back((x, y));
            }
        }
    }

    const NEIGHBORS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
    while let Some((cx, cy)) = frontier.pop_front() {
        let label = grown.at(cx, cy);
        for (dx, dy) in NEIGHBORS {
            let nx = cx as i32 + dx;
            let ny = cy as i32 + dy;
            if !mask.contains(nx, ny) {
                continue;
            }
            let (nx, ny) = (nx as u32, ny as u32);
            if mask.at(nx, ny) != 0 && grown.at(nx, ny) == 0 {
                grown.set(nx, ny, label);
                frontier.push_back((nx, ny));
            }
        }
    }

    Ok(grown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_growth_fills_mask_without_merging() {
        // Two 1-wide corridors meeting in the middle of a 7x1 strip;
        // seeds at both ends must split the strip between them.
        let mask = Grid::from_raw(7, 1, vec![1u8; 7]).unwrap();
        let mut seeds: Grid<u32> = Grid::new(7, 1).unwrap();
        seeds.set(0, 0, 1);
        seeds.set(6, 0, 2);

        let grown = grow_seeds(&seeds, &mask).unwrap();
        assert_eq!(grown.at(0, 0), 1);
        assert_eq!(grown.at(2, 0), 1);
        assert_eq!(grown.at(4, 0), 2);
        assert_eq!(grown.at(6, 0), 2);
        // Every mask pixel is claimed by some seed
        assert!(grown.as_slice().iter().all(|&v| v != 0));
    }

    #[test]
    fn test_growth_respects_walls() {
        // Mask with a background column splitting the strip
        let mask = Grid::from_raw(5, 1, vec![1, 1, 0, 1, 1]).unwrap();
        let mut seeds: Grid<u32> = Grid::new(5, 1).unwrap();
        seeds.set(0, 0, 1);

        let grown = grow_seeds(&seeds, &mask).unwrap();
        assert_eq!(grown.at(1, 0), 1);
        assert_eq!(grown.at(2, 0), 0); // wall
        assert_eq!(grown.at(3, 0), 0); // unreachable across the wall
    }

    #[test]
    fn test_seed_outside_mask_is_cleared() {
        let mask = Grid::from_raw(3, 1, vec![0, 1, 1]).unwrap();
        let mut seeds: Grid<u32> = Grid::new(3, 1).unwrap();
        seeds.set(0, 0, 5);

        let grown = grow_seeds(&seeds, &mask).unwrap();
        assert!(grown.as_slice().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_dimension_mismatch() {
        let mask = Grid::<u8>::new(4, 4).unwrap();
        let seeds = Grid::<u32>::new(5, 4).unwrap();
        assert!(matches!(
            grow_seeds(&seeds, &mask),
            Err(SegmentError::DimensionMismatch { .. })
        ));
    }
}
