/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Pixel format conversion
//!
//! Converts an image from one uncompressed format to another by decoding
//! every pixel of the first level into a normalized color and encoding it
//! into the target format.
//!
//! The conversion rounds to the nearest representable value, see
//! [`texel_core::codec`] for the rounding rules of each format.
//!
//! Mip levels are not converted, the result always has a single level.
//! To keep a mip chain use `ReformatMipmapped` from the procs crate.
use texel_core::codec::{decode_into, encode_from};
use texel_core::color::RgbaF32;
use texel_core::log::{trace, warn};
use texel_core::options::ProcessOptions;
use texel_core::pixel_format::PixelFormat;
use texel_core::size::buffer_size;

use crate::errors::{report_warning, ImageErrors};
use crate::image::RasterImage;
use crate::traits::OperationsTrait;

/// Convert an image to another pixel format
#[derive(Copy, Clone, Debug)]
pub struct Reformat {
    format: PixelFormat
}

impl Reformat {
    /// Create a new reformat operation
    ///
    /// # Arguments
    /// - format: The format the image will be in after the operation
    pub fn new(format: PixelFormat) -> Reformat {
        Reformat { format }
    }
}

impl OperationsTrait for Reformat {
    fn name(&self) -> &'static str {
        "Reformat"
    }

    fn execute_impl(&self, image: &mut RasterImage, options: &ProcessOptions) -> Result<(), ImageErrors> {
        let source = image.format();

        if source == self.format {
            trace!("Image already in {:?}, no-op", source);
            return Ok(());
        }
        if !source.is_decodable() {
            return report_warning(options, ImageErrors::UnsupportedOperation(self.name(), source));
        }
        if !self.format.is_decodable() {
            return report_warning(
                options,
                ImageErrors::UnsupportedOperation(self.name(), self.format)
            );
        }
        if image.mip_levels() > 1 {
            warn!(
                "Reformat keeps only the first of {} mip levels",
                image.mip_levels()
            );
        }
        let (width, height) = image.dimensions();

        let mut colors = options.allocate(width * height, RgbaF32::BLANK)?;
        decode_into(image.base_level(), source, &mut colors)?;

        let mut pixels = options.allocate_bytes(buffer_size(width, height, self.format))?;
        encode_from(&colors, self.format, &mut pixels)?;

        image.replace_pixels(pixels, width, height, self.format, 1);

        Ok(())
    }

    /// Every format is accepted, compressed ones are reported by the
    /// operation itself
    fn supported_formats(&self) -> &'static [PixelFormat] {
        &PixelFormat::ALL
    }
}
