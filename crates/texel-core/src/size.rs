/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Buffer size calculation
//!
//! An image with `n` mip levels stores all levels back to back in one buffer,
//! level `i` being `max(1, width >> i)` by `max(1, height >> i)` pixels.
//!
//! ```text
//!  ┌───────────────────────┬───────────┬─────┬──┬─┐
//!  │ level 0 (w x h)       │ w/2 x h/2 │ ... │  │ │
//!  └───────────────────────┴───────────┴─────┴──┴─┘
//! ```
use crate::pixel_format::PixelFormat;

/// Number of bytes needed to store a `width` x `height` image in `format`
///
/// Compressed images smaller than a 4x4 block in both dimensions still take
/// a whole block.
///
/// ```
/// use texel_core::pixel_format::PixelFormat;
/// use texel_core::size::buffer_size;
/// assert_eq!(buffer_size(4, 4, PixelFormat::R8G8B8), 48);
/// assert_eq!(buffer_size(8, 8, PixelFormat::Dxt1Rgb), 32);
/// assert_eq!(buffer_size(2, 2, PixelFormat::Dxt5Rgba), 16);
/// ```
pub const fn buffer_size(width: usize, height: usize, format: PixelFormat) -> usize {
    let size = width * height * format.bits_per_pixel() / 8;

    if width == 0 || height == 0 {
        return 0;
    }
    if width < 4 && height < 4 {
        if let Some(block) = format.block_bytes() {
            if size < block {
                return block;
            }
        }
    }
    size
}

/// Dimensions of mip level `level` of a `width` x `height` image
///
/// Every halving floors, and neither dimension goes below 1
pub const fn mip_dimensions(width: usize, height: usize, level: usize) -> (usize, usize) {
    (halve(width, level), halve(height, level))
}

const fn halve(value: usize, level: usize) -> usize {
    let shifted = if level >= usize::BITS as usize {
        0
    } else {
        value >> level
    };
    if shifted == 0 {
        1
    } else {
        shifted
    }
}

/// Number of levels in a full mip chain of a `width` x `height` image
///
/// Dimensions are halved until both reach 1, so an 8x8 image has 4 levels
/// (8, 4, 2, 1) and a 8x2 image has 4 levels too (8x2, 4x1, 2x1, 1x1)
pub const fn mip_level_count(width: usize, height: usize) -> usize {
    let mut w = width;
    let mut h = height;
    let mut count = 1;

    while w > 1 || h > 1 {
        w = if w > 1 { w / 2 } else { 1 };
        h = if h > 1 { h / 2 } else { 1 };
        count += 1;
    }
    count
}

/// Sum of the buffer sizes of the first `levels` mip levels
///
/// An image with a zero dimension has no pixels at any level
pub const fn mip_chain_size(
    width: usize, height: usize, format: PixelFormat, levels: usize
) -> usize {
    if width == 0 || height == 0 {
        return 0;
    }
    let mut total = 0;
    let mut level = 0;

    while level < levels {
        let (w, h) = mip_dimensions(width, height, level);
        total += buffer_size(w, h, format);
        level += 1;
    }
    total
}

/// Byte offset of mip level `level` inside a chain
pub const fn mip_level_offset(
    width: usize, height: usize, format: PixelFormat, level: usize
) -> usize {
    mip_chain_size(width, height, format, level)
}
