//! Grid - row-major 2D sample container
//!
//! `Grid<T>` is the fundamental raster type in regionmap. The pipeline uses
//! `Grid<u8>` for grayscale images and binary masks (0/1), `Grid<u32>` for
//! label grids (0 = background, positive values = component labels) and
//! `Grid<i32>` for decoded pixel-to-region lookups (-1 = non-region).
//!
//! Data is stored unpadded, one element per pixel, row by row. Buffers are
//! produced once by a pipeline stage and treated as write-once afterwards.

use crate::error::{Error, Result};

/// Row-major 2D grid of samples
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    width: u32,
    height: u32,
    data: Vec<T>,
}

impl<T: Copy + Default> Grid<T> {
    /// Create a new grid filled with the default value.
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
            data: vec![T::default(); width as usize * height as usize],
        })
    }
}

impl<T: Copy> Grid<T> {
    /// Create a grid from an existing buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if the dimensions are zero or the
    /// buffer length does not equal `width * height`.
    pub fn from_raw(width: u32, height: u32, data: Vec<T>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        if data.len() != width as usize * height as usize {
            return Err(Error::IndexOutOfBounds {
                index: data.len(),
                len: width as usize * height as usize,
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

    /// Dimensions as a `(width, height)` pair
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Check whether a coordinate lies inside the grid
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && (x as u32) < self.width && y >= 0 && (y as u32) < self.height
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the sample at `(x, y)`, or `None` when out of bounds
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<T> {
        if x < self.width && y < self.height {
            Some(self.data[self.index(x, y)])
        } else {
            None
        }
    }

    /// Get the sample at `(x, y)` without a bounds check result.
    ///
    /// Panics in debug builds when out of bounds; callers are expected to
    /// have validated coordinates against the grid dimensions.
    #[inline]
    pub fn at(&self, x: u32, y: u32) -> T {
        debug_assert!(x < self.width && y < self.height);
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Set the sample at `(x, y)`.
    ///
    /// Out-of-bounds writes are ignored and reported via the return value.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: T) -> bool {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            self.data[idx] = value;
            true
        } else {
            false
        }
    }

    /// Overwrite every sample with `value`
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Borrow the underlying buffer
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutably borrow the underlying buffer
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Borrow a single row
    #[inline]
    pub fn row(&self, y: u32) -> &[T] {
        let start = y as usize * self.width as usize;
        &self.data[start..start + self.width as usize]
    }

    /// Consume the grid and return the underlying buffer
    pub fn into_raw(self) -> Vec<T> {
        self.data
    }
}
