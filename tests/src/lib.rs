/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![allow(unused_imports, unused)]

use nanorand::{Rng, WyRand};
use texel_core::codec::encode_pixel;
use texel_core::color::RgbaF32;
use texel_core::options::ProcessOptions;
use texel_core::pixel_format::PixelFormat;
use texel_core::size::buffer_size;
use texel_image::image::RasterImage;

mod codec;
mod geometry;
mod pipeline;

/// Create an image of random pixels in `format`
///
/// Byte formats get random bytes, float formats get random values in `0.0..=1.0`
pub fn random_image(rng: &mut WyRand, width: usize, height: usize, format: PixelFormat) -> RasterImage {
    let mut pixels = vec![0_u8; buffer_size(width, height, format)];

    if format.is_float() {
        for index in 0..width * height {
            let color = RgbaF32::new(
                rng.generate::<f32>(),
                rng.generate::<f32>(),
                rng.generate::<f32>(),
                rng.generate::<f32>()
            );
            encode_pixel(color, format, &mut pixels, index).unwrap();
        }
    } else {
        rng.fill(&mut pixels);
    }
    RasterImage::from_raw(width, height, format, 1, pixels)
}

/// Largest error allowed between two decodes of the same color in `format`
pub fn tolerance(format: PixelFormat) -> f32 {
    match format {
        PixelFormat::R5G6B5 | PixelFormat::R5G5B5A1 => 0.5 / 31.0 + 1e-4,
        PixelFormat::R4G4B4A4 => 0.5 / 15.0 + 1e-4,
        PixelFormat::R32 | PixelFormat::R32G32B32 | PixelFormat::R32G32B32A32 => 1e-6,
        _ => 0.5 / 255.0 + 1e-4
    }
}
