/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Floyd-Steinberg dithering to 16 bit packed formats
//!
//! Each channel is truncated to the requested number of bits and the
//! truncation error of the color channels is pushed to neighbouring
//! pixels not yet visited
//!
//! ```text
//!            ┌─────┬─────┐
//!            │  *  │ 7/16│
//!      ┌─────┼─────┼─────┤
//!      │ 3/16│ 5/16│ 1/16│
//!      └─────┴─────┴─────┘
//! ```
//!
//! Alpha is truncated without diffusion.
use texel_core::color::Rgba8;
use texel_core::log::warn;
use texel_core::options::ProcessOptions;
use texel_core::pixel_format::PixelFormat;
use texel_image::errors::{report_warning, ImageErrors};
use texel_image::image::RasterImage;
use texel_image::traits::OperationsTrait;

/// Dither an image down to a packed 16 bit format
///
/// Channel bits are packed from the most significant end, red first
/// and alpha in the lowest bits, each pixel stored as a little endian
/// `u16`.
///
/// The result format is the named format matching the bit counts,
/// i.e `(5, 6, 5, 0)` gives [`PixelFormat::R5G6B5`]. Other layouts give
/// [`PixelFormat::Generic16`], which only the caller can interpret.
#[derive(Copy, Clone, Debug)]
pub struct Dither {
    r_bits: u8,
    g_bits: u8,
    b_bits: u8,
    a_bits: u8
}

impl Dither {
    /// Create a new dither operation
    ///
    /// # Arguments
    /// - r_bits, g_bits, b_bits, a_bits: Bits kept per channel, each at most 8
    ///   and at most 16 in total
    #[must_use]
    pub fn new(r_bits: u8, g_bits: u8, b_bits: u8, a_bits: u8) -> Dither {
        Dither {
            r_bits,
            g_bits,
            b_bits,
            a_bits
        }
    }

    fn total_bits(&self) -> u32 {
        u32::from(self.r_bits) + u32::from(self.g_bits) + u32::from(self.b_bits) + u32::from(self.a_bits)
    }
}

impl OperationsTrait for Dither {
    fn name(&self) -> &'static str {
        "Dither"
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn execute_impl(&self, image: &mut RasterImage, options: &ProcessOptions) -> Result<(), ImageErrors> {
        let bits = [self.r_bits, self.g_bits, self.b_bits, self.a_bits];

        if bits.iter().any(|&x| x > 8) {
            return report_warning(
                options,
                ImageErrors::InvalidParameters(format!(
                    "Dither channel bits {bits:?} must each be at most 8"
                ))
            );
        }
        if self.total_bits() > 16 {
            return report_warning(
                options,
                ImageErrors::InvalidParameters(format!(
                    "Dither channel bits {bits:?} do not fit in 16 bits"
                ))
            );
        }
        let format = PixelFormat::from_channel_bits(self.r_bits, self.g_bits, self.b_bits, self.a_bits)
            .unwrap_or_else(|| {
                warn!(
                    "No named format for channel bits {:?}, result is Generic16",
                    bits
                );
                PixelFormat::Generic16
            });

        let (width, height) = image.dimensions();
        let mut pixels = image.to_rgba8(options)?;
        let mut output = options.allocate_bytes(width * height * 2)?;

        let shifts = bits.map(|x| 8 - u32::from(x));

        for y in 0..height {
            for x in 0..width {
                let index = y * width + x;
                let old = pixels[index].to_array();

                let new = [
                    u32::from(old[0]) >> shifts[0],
                    u32::from(old[1]) >> shifts[1],
                    u32::from(old[2]) >> shifts[2],
                    u32::from(old[3]) >> shifts[3]
                ];
                let error = [
                    u32::from(old[0]) - (new[0] << shifts[0]),
                    u32::from(old[1]) - (new[1] << shifts[1]),
                    u32::from(old[2]) - (new[2] << shifts[2])
                ];

                if x + 1 < width {
                    diffuse(&mut pixels[index + 1], error, 7.0);
                }
                if y + 1 < height {
                    let below = index + width;

                    if x > 0 {
                        diffuse(&mut pixels[below - 1], error, 3.0);
                    }
                    diffuse(&mut pixels[below], error, 5.0);

                    if x + 1 < width {
                        diffuse(&mut pixels[below + 1], error, 1.0);
                    }
                }
                let packed = (new[0] << (self.g_bits + self.b_bits + self.a_bits))
                    | (new[1] << (self.b_bits + self.a_bits))
                    | (new[2] << self.a_bits)
                    | new[3];

                output[index * 2..index * 2 + 2].copy_from_slice(&(packed as u16).to_le_bytes());
            }
        }
        image.replace_pixels(output, width, height, format, 1);

        Ok(())
    }
}

/// Add `sixteenths`/16 of the color error to a pixel, saturating at 255
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn diffuse(pixel: &mut Rgba8, error: [u32; 3], sixteenths: f32) {
    let add = |value: u8, error: u32| -> u8 {
        let delta = (error as f32 * sixteenths / 16.0) as u32;
        (u32::from(value) + delta).min(255) as u8
    };
    pixel.r = add(pixel.r, error[0]);
    pixel.g = add(pixel.g, error[1]);
    pixel.b = add(pixel.b, error[2]);
}
