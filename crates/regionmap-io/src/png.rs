//! PNG image format support
//!
//! The pipeline reads one grayscale input raster and writes two image
//! artifacts: the 3-channel ID-map and the 4-channel overlay. Reading
//! accepts color inputs and reduces them to 8-bit grayscale with the
//! ITU-R 601-2 luma transform (truncated), so a color export of the
//! outline render behaves the same as a proper grayscale one.

use crate::error::{IoError, IoResult};
use png::{BitDepth, ColorType, Decoder, Encoder};
use regionmap_core::{Grid, RgbImage, RgbaImage};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Seek, Write};
use std::path::Path;

#[inline]
fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * 299 + g as u32 * 587 + b as u32 * 114) / 1000) as u8
}

/// Read a PNG image as 8-bit grayscale
pub fn read_gray<R: BufRead + Seek>(reader: R) -> IoResult<Grid<u8>> {
    let decoder = Decoder::new(reader);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let info = reader.info();
    let width = info.width;
    let height = info.height;
    let color_type = info.color_type;
    let bit_depth = info.bit_depth;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];

    let mut gray = vec![0u8; width as usize * height as usize];

    match (color_type, bit_depth) {
        (ColorType::Grayscale, BitDepth::Eight) => {
            for y in 0..height as usize {
                let row = &data[y * bytes_per_row..y * bytes_per_row + width as usize];
                gray[y * width as usize..(y + 1) * width as usize].copy_from_slice(row);
            }
        }
        (ColorType::Grayscale, BitDepth::Sixteen) => {
            for y in 0..height as usize {
                let row_start = y * bytes_per_row;
                for x in 0..width as usize {
                    gray[y * width as usize + x] = data[row_start + x * 2];
                }
            }
        }
        (ColorType::GrayscaleAlpha, BitDepth::Eight) => {
            for y in 0..height as usize {
                let row_start = y * bytes_per_row;
                for x in 0..width as usize {
                    gray[y * width as usize + x] = data[row_start + x * 2];
                }
            }
        }
        (ColorType::Rgb, BitDepth::Eight) => {
            for y in 0..height as usize {
                let row_start = y * bytes_per_row;
                for x in 0..width as usize {
                    let idx = row_start + x * 3;
                    gray[y * width as usize + x] = luma(data[idx], data[idx + 1], data[idx + 2]);
                }
            }
        }
        (ColorType::Rgba, BitDepth::Eight) => {
            for y in 0..height as usize {
                let row_start = y * bytes_per_row;
                for x in 0..width as usize {
                    let idx = row_start + x * 4;
                    gray[y * width as usize + x] = luma(data[idx], data[idx + 1], data[idx + 2]);
                }
            }
        }
        _ => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNG format: {:?} {:?}",
                color_type, bit_depth
            )));
        }
    }

    Ok(Grid::from_raw(width, height, gray)?)
}

/// Read a PNG file as 8-bit grayscale
pub fn read_gray_file<P: AsRef<Path>>(path: P) -> IoResult<Grid<u8>> {
    let file = File::open(path)?;
    read_gray(BufReader::new(file))
}

/// Read an 8-bit RGB PNG (e.g. a persisted ID-map artifact)
pub fn read_rgb<R: BufRead + Seek>(reader: R) -> IoResult<RgbImage> {
    let decoder = Decoder::new(reader);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let info = reader.info();
    let width = info.width;
    let height = info.height;
    if info.color_type != ColorType::Rgb || info.bit_depth != BitDepth::Eight {
        return Err(IoError::UnsupportedFormat(format!(
            "expected 8-bit RGB, got {:?} {:?}",
            info.color_type, info.bit_depth
        )));
    }

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let bytes_per_row = output_info.line_size;
    let mut data = Vec::with_capacity(width as usize * height as usize * 3);
    for y in 0..height as usize {
        data.extend_from_slice(&buf[y * bytes_per_row..y * bytes_per_row + width as usize * 3]);
    }

    Ok(RgbImage::from_raw(width, height, data)?)
}

/// Read an 8-bit RGB PNG file
pub fn read_rgb_file<P: AsRef<Path>>(path: P) -> IoResult<RgbImage> {
    let file = File::open(path)?;
    read_rgb(BufReader::new(file))
}

fn write_channels<W: Write>(
    writer: W,
    width: u32,
    height: u32,
    color_type: ColorType,
    data: &[u8],
) -> IoResult<()> {
    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(color_type);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;
    writer
        .write_image_data(data)
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;
    Ok(())
}

/// Write an 8-bit grayscale image as PNG
pub fn write_gray<W: Write>(gray: &Grid<u8>, writer: W) -> IoResult<()> {
    write_channels(
        writer,
        gray.width(),
        gray.height(),
        ColorType::Grayscale,
        gray.as_slice(),
    )
}

/// Write an 8-bit grayscale image to a PNG file
pub fn write_gray_file<P: AsRef<Path>>(gray: &Grid<u8>, path: P) -> IoResult<()> {
    let file = File::create(path)?;
    write_gray(gray, BufWriter::new(file))
}

/// Write an RGB image as PNG
pub fn write_rgb<W: Write>(image: &RgbImage, writer: W) -> IoResult<()> {
    write_channels(
        writer,
        image.width(),
        image.height(),
        ColorType::Rgb,
        image.as_bytes(),
    )
}

/// Write an RGB image to a PNG file
pub fn write_rgb_file<P: AsRef<Path>>(image: &RgbImage, path: P) -> IoResult<()> {
    let file = File::create(path)?;
    write_rgb(image, BufWriter::new(file))
}

/// Write an RGBA image as PNG
pub fn write_rgba<W: Write>(image: &RgbaImage, writer: W) -> IoResult<()> {
    write_channels(
        writer,
        image.width(),
        image.height(),
        ColorType::Rgba,
        image.as_bytes(),
    )
}

/// Write an RGBA image to a PNG file
pub fn write_rgba_file<P: AsRef<Path>>(image: &RgbaImage, path: P) -> IoResult<()> {
    let file = File::create(path)?;
    write_rgba(image, BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn encode_png(width: u32, height: u32, color: ColorType, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        write_channels(Cursor::new(&mut out), width, height, color, data).unwrap();
        out
    }

    #[test]
    fn test_gray_roundtrip() {
        let data: Vec<u8> = (0..16).map(|v| v * 16).collect();
        let bytes = encode_png(4, 4, ColorType::Grayscale, &data);
        let gray = read_gray(Cursor::new(bytes)).unwrap();
        assert_eq!(gray.dimensions(), (4, 4));
        assert_eq!(gray.as_slice(), data.as_slice());
    }

    #[test]
    fn test_rgb_reduces_to_luma() {
        // Pure red, green, blue, white
        let data = vec![255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255];
        let bytes = encode_png(4, 1, ColorType::Rgb, &data);
        let gray = read_gray(Cursor::new(bytes)).unwrap();
        assert_eq!(gray.as_slice(), &[76, 149, 29, 255]);
    }

    #[test]
    fn test_rgb_roundtrip() {
        let image = RgbImage::from_raw(2, 2, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]).unwrap();
        let mut bytes = Vec::new();
        write_rgb(&image, Cursor::new(&mut bytes)).unwrap();
        let back = read_rgb(Cursor::new(bytes)).unwrap();
        assert_eq!(back, image);
    }

    #[test]
    fn test_read_rgb_rejects_gray() {
        let bytes = encode_png(2, 2, ColorType::Grayscale, &[0, 1, 2, 3]);
        assert!(matches!(
            read_rgb(Cursor::new(bytes)),
            Err(IoError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(read_gray_file("/nonexistent/input.png").is_err());
    }
}
