/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Per-format pixel decoding and encoding
//!
//! Decoding unpacks a pixel into a [`RgbaF32`], encoding packs one back.
//! Every uncompressed format is handled by a single exhaustive match, so adding
//! a format means the compiler points at every place needing an update.
//!
//! # Precision
//! Integer fields are scaled by the maximum value of the field, not by 255,
//! i.e a 5 bit red channel decodes as `r / 31`. This keeps the full precision
//! of the field until it's encoded again.
//!
//! # Rounding
//!
//!|channel                         | encode policy                                |
//!|--------------------------------|----------------------------------------------|
//!| 8, 6, 5 and 4 bit channels     | clamp, then `round(value * max)`             |
//!| `R5G5B5A1` alpha bit           | `1` if `alpha > 50/255` else `0`             |
//!| luminance (gray formats, `R32`)| `0.299 r + 0.587 g + 0.114 b`                |
//!| float channels                 | stored as is, no clamping                    |
//!
//! Multi-byte words and floats are little endian.
use core::fmt::{Debug, Display, Formatter};
use core::ops::Range;

use crate::color::{quantize, RgbaF32};
use crate::pixel_format::PixelFormat;

/// Alpha threshold used when packing into the single alpha bit of
/// [`PixelFormat::R5G5B5A1`], in 8 bit units
pub const R5G5B5A1_ALPHA_THRESHOLD: u8 = 50;

/// Errors possible when decoding or encoding pixels
#[derive(Copy, Clone, Eq, PartialEq)]
pub enum CodecErrors {
    /// The format cannot be decoded or encoded, it's compressed or
    /// has a caller defined layout
    UnsupportedFormat(PixelFormat),
    /// The pixel index lies past the end of the buffer
    OutOfBounds { index: usize, len: usize },
    /// Input and output slices disagree on the number of pixels
    LengthMismatch { expected: usize, found: usize }
}

impl Debug for CodecErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnsupportedFormat(format) => {
                writeln!(f, "Format {format:?} cannot be decoded or encoded per pixel")
            }
            Self::OutOfBounds { index, len } => {
                writeln!(f, "Pixel {index} lies outside a buffer of {len} bytes")
            }
            Self::LengthMismatch { expected, found } => {
                writeln!(f, "Length mismatch, expected {expected} but found {found}")
            }
        }
    }
}

impl Display for CodecErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{self:?}")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CodecErrors {}

fn pixel_bytes(format: PixelFormat) -> Result<usize, CodecErrors> {
    if !format.is_decodable() {
        return Err(CodecErrors::UnsupportedFormat(format));
    }
    // decodable formats always occupy whole bytes
    format
        .bytes_per_pixel()
        .ok_or(CodecErrors::UnsupportedFormat(format))
}

/// Byte range of pixel `index`, `None` if it is not addressable
fn pixel_range(index: usize, size: usize) -> Option<Range<usize>> {
    let start = index.checked_mul(size)?;
    Some(start..start.checked_add(size)?)
}

/// Decode pixel number `index` of `buffer`
///
/// # Errors
/// - [`CodecErrors::UnsupportedFormat`] for compressed formats and
///   [`PixelFormat::Generic16`]
/// - [`CodecErrors::OutOfBounds`] if the pixel lies past the end of `buffer`
///
/// ```
/// use texel_core::codec::decode_pixel;
/// use texel_core::pixel_format::PixelFormat;
/// // pure green in R5G6B5
/// let pixel = decode_pixel(&0x07E0_u16.to_le_bytes(), PixelFormat::R5G6B5, 0).unwrap();
/// assert_eq!((pixel.r, pixel.g, pixel.b, pixel.a), (0.0, 1.0, 0.0, 1.0));
/// ```
pub fn decode_pixel(buffer: &[u8], format: PixelFormat, index: usize) -> Result<RgbaF32, CodecErrors> {
    let size = pixel_bytes(format)?;

    match pixel_range(index, size).and_then(|range| buffer.get(range)) {
        Some(bytes) => Ok(decode_bytes(bytes, format)),
        None => Err(CodecErrors::OutOfBounds {
            index,
            len: buffer.len()
        })
    }
}

/// Encode `color` as pixel number `index` of `buffer`
///
/// # Errors
/// Same as [`decode_pixel`]
pub fn encode_pixel(
    color: RgbaF32, format: PixelFormat, buffer: &mut [u8], index: usize
) -> Result<(), CodecErrors> {
    let size = pixel_bytes(format)?;
    let len = buffer.len();

    match pixel_range(index, size).and_then(|range| buffer.get_mut(range)) {
        Some(bytes) => {
            encode_bytes(color, format, bytes);
            Ok(())
        }
        None => Err(CodecErrors::OutOfBounds { index, len })
    }
}

/// Decode every pixel of `buffer` into `out`
///
/// # Errors
/// - [`CodecErrors::UnsupportedFormat`] for formats that cannot be decoded
/// - [`CodecErrors::LengthMismatch`] if `buffer` holds fewer pixels than `out`
pub fn decode_into(buffer: &[u8], format: PixelFormat, out: &mut [RgbaF32]) -> Result<(), CodecErrors> {
    let size = pixel_bytes(format)?;
    let expected = out.len() * size;

    if buffer.len() < expected {
        return Err(CodecErrors::LengthMismatch {
            expected,
            found: buffer.len()
        });
    }
    for (bytes, pixel) in buffer.chunks_exact(size).zip(out.iter_mut()) {
        *pixel = decode_bytes(bytes, format);
    }
    Ok(())
}

/// Encode every color of `colors` into `buffer`
///
/// # Errors
/// - [`CodecErrors::UnsupportedFormat`] for formats that cannot be encoded
/// - [`CodecErrors::LengthMismatch`] if `buffer` is too small for `colors`
pub fn encode_from(colors: &[RgbaF32], format: PixelFormat, buffer: &mut [u8]) -> Result<(), CodecErrors> {
    let size = pixel_bytes(format)?;
    let expected = colors.len() * size;

    if buffer.len() < expected {
        return Err(CodecErrors::LengthMismatch {
            expected,
            found: buffer.len()
        });
    }
    for (bytes, color) in buffer.chunks_exact_mut(size).zip(colors.iter()) {
        encode_bytes(*color, format, bytes);
    }
    Ok(())
}

#[inline]
fn read_u16(bytes: &[u8]) -> u16 {
    u16::from_le_bytes([bytes[0], bytes[1]])
}

#[inline]
fn read_f32(bytes: &[u8], channel: usize) -> f32 {
    let start = channel * 4;
    f32::from_le_bytes([
        bytes[start],
        bytes[start + 1],
        bytes[start + 2],
        bytes[start + 3]
    ])
}

#[inline]
fn write_f32(bytes: &mut [u8], channel: usize, value: f32) {
    let start = channel * 4;
    bytes[start..start + 4].copy_from_slice(&value.to_le_bytes());
}

/// Decode a single pixel, `bytes` must be exactly one pixel long
fn decode_bytes(bytes: &[u8], format: PixelFormat) -> RgbaF32 {
    // divisions rather than reciprocal multiplies, the maximum of a field
    // must decode to exactly 1.0
    const R8: f32 = 255.0;
    const R6: f32 = 63.0;
    const R5: f32 = 31.0;
    const R4: f32 = 15.0;

    match format {
        PixelFormat::Grayscale => {
            let l = f32::from(bytes[0]) / R8;
            RgbaF32::new(l, l, l, 1.0)
        }
        PixelFormat::GrayAlpha => {
            let l = f32::from(bytes[0]) / R8;
            RgbaF32::new(l, l, l, f32::from(bytes[1]) / R8)
        }
        PixelFormat::R5G6B5 => {
            let p = read_u16(bytes);
            RgbaF32::new(
                f32::from(p >> 11) / R5,
                f32::from((p >> 5) & 0x3F) / R6,
                f32::from(p & 0x1F) / R5,
                1.0
            )
        }
        PixelFormat::R5G5B5A1 => {
            let p = read_u16(bytes);
            RgbaF32::new(
                f32::from(p >> 11) / R5,
                f32::from((p >> 6) & 0x1F) / R5,
                f32::from((p >> 1) & 0x1F) / R5,
                if p & 1 == 1 { 1.0 } else { 0.0 }
            )
        }
        PixelFormat::R4G4B4A4 => {
            let p = read_u16(bytes);
            RgbaF32::new(
                f32::from(p >> 12) / R4,
                f32::from((p >> 8) & 0xF) / R4,
                f32::from((p >> 4) & 0xF) / R4,
                f32::from(p & 0xF) / R4
            )
        }
        PixelFormat::R8G8B8 => RgbaF32::new(
            f32::from(bytes[0]) / R8,
            f32::from(bytes[1]) / R8,
            f32::from(bytes[2]) / R8,
            1.0
        ),
        PixelFormat::R8G8B8A8 => RgbaF32::new(
            f32::from(bytes[0]) / R8,
            f32::from(bytes[1]) / R8,
            f32::from(bytes[2]) / R8,
            f32::from(bytes[3]) / R8
        ),
        PixelFormat::R32 => {
            let v = read_f32(bytes, 0);
            RgbaF32::new(v, v, v, 1.0)
        }
        PixelFormat::R32G32B32 => RgbaF32::new(
            read_f32(bytes, 0),
            read_f32(bytes, 1),
            read_f32(bytes, 2),
            1.0
        ),
        PixelFormat::R32G32B32A32 => RgbaF32::new(
            read_f32(bytes, 0),
            read_f32(bytes, 1),
            read_f32(bytes, 2),
            read_f32(bytes, 3)
        ),
        // filtered out by pixel_bytes
        _ => RgbaF32::BLANK
    }
}

/// Encode a single pixel, `bytes` must be exactly one pixel long
#[allow(clippy::cast_possible_truncation)]
fn encode_bytes(color: RgbaF32, format: PixelFormat, bytes: &mut [u8]) {
    match format {
        PixelFormat::Grayscale => {
            bytes[0] = quantize(color.luminance(), 255) as u8;
        }
        PixelFormat::GrayAlpha => {
            bytes[0] = quantize(color.luminance(), 255) as u8;
            bytes[1] = quantize(color.a, 255) as u8;
        }
        PixelFormat::R5G6B5 => {
            let r = quantize(color.r, 31);
            let g = quantize(color.g, 63);
            let b = quantize(color.b, 31);

            let p = (r << 11) | (g << 5) | b;
            bytes.copy_from_slice(&p.to_le_bytes());
        }
        PixelFormat::R5G5B5A1 => {
            let r = quantize(color.r, 31);
            let g = quantize(color.g, 31);
            let b = quantize(color.b, 31);
            let threshold = f32::from(R5G5B5A1_ALPHA_THRESHOLD) / 255.0;
            let a = u16::from(color.a > threshold);

            let p = (r << 11) | (g << 6) | (b << 1) | a;
            bytes.copy_from_slice(&p.to_le_bytes());
        }
        PixelFormat::R4G4B4A4 => {
            let r = quantize(color.r, 15);
            let g = quantize(color.g, 15);
            let b = quantize(color.b, 15);
            let a = quantize(color.a, 15);

            let p = (r << 12) | (g << 8) | (b << 4) | a;
            bytes.copy_from_slice(&p.to_le_bytes());
        }
        PixelFormat::R8G8B8 => {
            bytes[0] = quantize(color.r, 255) as u8;
            bytes[1] = quantize(color.g, 255) as u8;
            bytes[2] = quantize(color.b, 255) as u8;
        }
        PixelFormat::R8G8B8A8 => {
            bytes[0] = quantize(color.r, 255) as u8;
            bytes[1] = quantize(color.g, 255) as u8;
            bytes[2] = quantize(color.b, 255) as u8;
            bytes[3] = quantize(color.a, 255) as u8;
        }
        PixelFormat::R32 => write_f32(bytes, 0, color.luminance()),
        PixelFormat::R32G32B32 => {
            write_f32(bytes, 0, color.r);
            write_f32(bytes, 1, color.g);
            write_f32(bytes, 2, color.b);
        }
        PixelFormat::R32G32B32A32 => {
            write_f32(bytes, 0, color.r);
            write_f32(bytes, 1, color.g);
            write_f32(bytes, 2, color.b);
            write_f32(bytes, 3, color.a);
        }
        // filtered out by pixel_bytes
        _ => ()
    }
}
