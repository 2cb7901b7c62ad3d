//! Connected component labeling
//!
//! Components are labeled with an explicit breadth-first frontier (no
//! recursion, so large rasters cannot overflow the stack). Labels are
//! assigned in scan order: the component whose first pixel appears earliest
//! in row-major order gets the lowest label. That makes labeling
//! deterministic for a fixed mask, which the global region index ordering
//! depends on.

use crate::error::{SegmentError, SegmentResult};
use regionmap_core::Grid;
use std::collections::VecDeque;

/// Connectivity for component analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connectivity {
    /// 4-way connectivity (up, down, left, right)
    #[default]
    FourWay,
    /// 8-way connectivity (includes diagonals)
    EightWay,
}

impl Connectivity {
    /// Neighbor offsets for this connectivity
    pub fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            Connectivity::FourWay => &[(-1, 0), (1, 0), (0, -1), (0, 1)],
            Connectivity::EightWay => &[
                (-1, 0),
                (1, 0),
                (0, -1),
                (0, 1),
                (-1, -1),
                (1, -1),
                (-1, 1),
                (1, 1),
            ],
        }
    }
}

/// Label the connected foreground components of a binary mask.
///
/// Returns the label grid (0 = background, labels start at 1) and the
/// number of components found.
pub fn label_components(
    mask: &Grid<u8>,
    connectivity: Connectivity,
) -> SegmentResult<(Grid<u32>, u32)> {
    let (w, h) = mask.dimensions();
    let mut labels: Grid<u32> = Grid::new(w, h)?;
    let mut next_label = 0u32;
    let mut frontier = VecDeque::new();

    for y in 0..h {
        for x in 0..w {
            if mask.at(x, y) == 0 || labels.at(x, y) != 0 {
                continue;
            }
            next_label = next_label
                .checked_add(1)
                .ok_or(SegmentError::TooManyComponents(u32::MAX as u64 + 1))?;

            labels.set(x, y, next_label);
            frontier.push_back((x, y));
            while let Some((cx, cy)) = frontier.pop_front() {
                for &(dx, dy) in connectivity.offsets() {
                    let nx = cx as i32 + dx;
                    let ny = cy as i32 + dy;
                    if !mask.contains(nx, ny) {
                        continue;
                    }
                    let (nx, ny) = (nx as u32, ny as u32);
                    if mask.at(nx, ny) != 0 && labels.at(nx, ny) == 0 {
                        labels.set(nx, ny, next_label);
                        frontier.push_back((nx, ny));
                    }
                }
            }
        }
    }

    Ok((labels, next_label))
}

/// Count pixels per label.
///
/// Index `i` in the returned vector holds the size of label `i + 1`.
pub fn component_sizes(labels: &Grid<u32>, count: u32) -> Vec<u64> {
    let mut sizes = vec![0u64; count as usize];
    for &label in labels.as_slice() {
        if label > 0 && label <= count {
            sizes[label as usize - 1] += 1;
        }
    }
    sizes
}
