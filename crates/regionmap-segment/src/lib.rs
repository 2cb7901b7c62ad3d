//! regionmap-segment - Binary segmentation for the regionmap pipeline
//!
//! This crate turns a grayscale outline raster into per-class label grids:
//!
//! - **Masks** - thresholding and binary cross erosion
//! - **Connected components** - deterministic scan-order BFS labeling
//! - **Seeded growth** - multi-source flood restoring eroded seeds to
//!   their original mask extent
//! - **Region finders** - the white (direct labeling) and black
//!   (erode-then-grow) passes behind one [`RegionFinder`] contract
//!
//! # Examples
//!
//! ```
//! use regionmap_core::Grid;
//! use regionmap_segment::{RegionFinder, WhiteFinder};
//!
//! // An all-white raster yields exactly one white region
//! let gray = Grid::from_raw(32, 32, vec![255u8; 32 * 32]).unwrap();
//! let labeling = WhiteFinder::new(128, 50).find(&gray).unwrap();
//! assert_eq!(labeling.survivors, vec![(1, 32 * 32)]);
//! ```

pub mod conncomp;
pub mod error;
pub mod finder;
pub mod growth;
pub mod mask;

pub use conncomp::{Connectivity, component_sizes, label_components};
pub use error::{SegmentError, SegmentResult};
pub use finder::{BlackFinder, Labeling, RegionFinder, WhiteFinder};
pub use growth::grow_seeds;
pub use mask::{binarize_at_least, binarize_below, erode_cross};
