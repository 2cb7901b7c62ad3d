//! Interleaved 8-bit channel images
//!
//! The ID-map artifact is a 3-channel raster (two ID bytes plus a marker
//! byte) and the overlay artifact is 4-channel RGBA. Both are stored as
//! flat interleaved byte buffers ready for PNG encoding.

use crate::error::{Error, Result};

macro_rules! channel_image {
    ($name:ident, $channels:expr, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            width: u32,
            height: u32,
            data: Vec<u8>,
        }

        impl $name {
            /// Number of channels per pixel
            pub const CHANNELS: usize = $channels;

            /// Create a zero-filled image.
            ///
            /// # Errors
            ///
            /// Returns [`Error::InvalidDimension`] if either dimension is zero.
            pub fn new(width: u32, height: u32) -> Result<Self> {
                if width == 0 || height == 0 {
                    return Err(Error::InvalidDimension { width, height });
                }
                Ok(Self {
                    width,
                    height,
                    data: vec![0u8; width as usize * height as usize * Self::CHANNELS],
                })
            }

            /// Create an image from an interleaved buffer.
            ///
            /// # Errors
            ///
            /// Returns [`Error::InvalidDimension`] for zero dimensions, or
            /// [`Error::IndexOutOfBounds`] if the buffer length is wrong.
            pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
                if width == 0 || height == 0 {
                    return Err(Error::InvalidDimension { width, height });
                }
                let expected = width as usize * height as usize * Self::CHANNELS;
                if data.len() != expected {
                    return Err(Error::IndexOutOfBounds {
                        index: data.len(),
                        len: expected,
                    });
                }
                Ok(Self {
                    width,
                    height,
                    data,
                })
            }

            /// Width in pixels
            #[inline]
            pub fn width(&self) -> u32 {
                self.width
            }

            /// Height in pixels
            #[inline]
            pub fn height(&self) -> u32 {
                self.height
            }

            #[inline]
            fn index(&self, x: u32, y: u32) -> usize {
                (y as usize * self.width as usize + x as usize) * Self::CHANNELS
            }

            /// Get the channel values at `(x, y)`, or `None` when out of bounds
            #[inline]
            pub fn get(&self, x: u32, y: u32) -> Option<[u8; $channels]> {
                if x < self.width && y < self.height {
                    let idx = self.index(x, y);
                    let mut px = [0u8; $channels];
                    px.copy_from_slice(&self.data[idx..idx + Self::CHANNELS]);
                    Some(px)
                } else {
                    None
                }
            }

            /// Set the channel values at `(x, y)`; out-of-bounds writes are ignored
            #[inline]
            pub fn set(&mut self, x: u32, y: u32, pixel: [u8; $channels]) -> bool {
                if x < self.width && y < self.height {
                    let idx = self.index(x, y);
                    self.data[idx..idx + Self::CHANNELS].copy_from_slice(&pixel);
                    true
                } else {
                    false
                }
            }

            /// Borrow the interleaved byte buffer
            #[inline]
            pub fn as_bytes(&self) -> &[u8] {
                &self.data
            }
        }
    };
}

channel_image!(RgbImage, 3, "Interleaved 3-channel (RGB) 8-bit image");
channel_image!(RgbaImage, 4, "Interleaved 4-channel (RGBA) 8-bit image");
