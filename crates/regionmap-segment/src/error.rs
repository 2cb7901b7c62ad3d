//! Error types for regionmap-segment

use thiserror::Error;

/// Errors that can occur during segmentation and labeling
#[derive(Debug, Error)]
pub enum SegmentError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] regionmap_core::Error),

    /// Input grids have mismatched dimensions
    #[error("dimension mismatch: {}x{} vs {}x{}", .left.0, .left.1, .right.0, .right.1)]
    DimensionMismatch {
        left: (u32, u32),
        right: (u32, u32),
    },

    /// Label grid overflow (more components than the label type can hold)
    #[error("too many components: {0}")]
    TooManyComponents(u64),
}

/// Result type for segmentation operations
pub type SegmentResult<T> = Result<T, SegmentError>;
