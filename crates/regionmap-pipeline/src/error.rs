//! Error types for regionmap-pipeline

use thiserror::Error;

/// Errors that can occur while running the pipeline
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] regionmap_core::Error),

    /// Segmentation error
    #[error("segmentation error: {0}")]
    Segment(#[from] regionmap_segment::SegmentError),

    /// Artifact I/O error
    #[error("I/O error: {0}")]
    Io(#[from] regionmap_io::IoError),

    /// Region count exceeds the 16-bit ID space of the ID-map encoding
    #[error("too many regions: {count} exceeds the ID-map limit of {max}")]
    TooManyRegions { count: usize, max: usize },

    /// Input grids have mismatched dimensions
    #[error("dimension mismatch: {}x{} vs {}x{}", .left.0, .left.1, .right.0, .right.1)]
    DimensionMismatch {
        left: (u32, u32),
        right: (u32, u32),
    },
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;
