//! regionmap-core - Core data structures for the regionmap pipeline
//!
//! This crate provides the raster and metadata types shared by every stage
//! of the region extraction pipeline:
//!
//! - **[`Grid`]** - row-major 2D containers for grayscale images, binary
//!   masks and label grids
//! - **[`RgbImage`] / [`RgbaImage`]** - interleaved channel buffers for the
//!   ID-map and overlay artifacts
//! - **[`BBox`]** - inclusive pixel bounding boxes
//! - **[`Region`] / [`RegionKind`]** - per-region metadata as persisted in
//!   `region_meta.json`
//!
//! # Examples
//!
//! ```
//! use regionmap_core::Grid;
//!
//! let mut labels: Grid<u32> = Grid::new(64, 48).unwrap();
//! labels.set(10, 10, 3);
//! assert_eq!(labels.get(10, 10), Some(3));
//! assert_eq!(labels.get(0, 0), Some(0));
//! ```

pub mod bbox;
pub mod error;
pub mod grid;
pub mod image;
pub mod region;

pub use bbox::BBox;
pub use error::{Error, Result};
pub use grid::Grid;
pub use image::{RgbImage, RgbaImage};
pub use region::{Region, RegionKind};
