//! regionmap-io - Artifact I/O for the regionmap pipeline
//!
//! PNG reading/writing for the grayscale input, ID-map and overlay rasters
//! (via the `png` crate), and JSON reading/writing for the metadata and
//! children tables (via `serde_json`).

pub mod error;
pub mod json;
pub mod png;

pub use error::{IoError, IoResult};
pub use json::{read_json, write_json, write_json_pretty};
pub use png::{
    read_gray, read_gray_file, read_rgb, read_rgb_file, write_gray, write_gray_file, write_rgb,
    write_rgb_file, write_rgba, write_rgba_file,
};
