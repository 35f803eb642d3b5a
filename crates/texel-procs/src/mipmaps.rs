/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Mipmap generation
//!
//! A mip chain holds the image at full size followed by successively
//! halved copies down to 1x1, all in one buffer.
//!
//! Every level is resampled from the full size image rather than from the
//! previous level, so errors do not accumulate down the chain.
use texel_core::log::trace;
use texel_core::options::ProcessOptions;
use texel_core::pixel_format::PixelFormat;
use texel_core::size::{mip_chain_size, mip_dimensions, mip_level_count};
use texel_image::core_filters::reformat::Reformat;
use texel_image::errors::{report_warning, ImageErrors};
use texel_image::image::RasterImage;
use texel_image::traits::OperationsTrait;

use crate::resize::{resize_rgba8, ResizeMethod};

/// Generate the full mip chain of an image
///
/// Images that already have more than one level are left untouched.
#[derive(Copy, Clone, Debug, Default)]
pub struct Mipmaps;

impl Mipmaps {
    #[must_use]
    pub fn new() -> Mipmaps {
        Mipmaps
    }
}

impl OperationsTrait for Mipmaps {
    fn name(&self) -> &'static str {
        "Mipmaps"
    }

    fn execute_impl(&self, image: &mut RasterImage, options: &ProcessOptions) -> Result<(), ImageErrors> {
        if image.mip_levels() > 1 {
            return report_warning(options, ImageErrors::MipmapsPresent(image.mip_levels()));
        }
        let (width, height) = image.dimensions();
        let format = image.format();
        let levels = mip_level_count(width, height);

        if levels == 1 {
            trace!("1x1 image has a single level, no-op");
            return Ok(());
        }
        let mut pixels = options.allocate_bytes(mip_chain_size(width, height, format, levels))?;

        let base = image.base_level();
        pixels[..base.len()].copy_from_slice(base);

        let colors = image.to_rgba8(options)?;
        let mut offset = base.len();

        for level in 1..levels {
            let (level_w, level_h) = mip_dimensions(width, height, level);
            trace!("Generating mip level {} ({}x{})", level, level_w, level_h);

            let resized = resize_rgba8(
                &colors,
                width,
                height,
                level_w,
                level_h,
                ResizeMethod::Bicubic,
                options
            )?;
            let level_image = RasterImage::from_rgba8(&resized, level_w, level_h, format, options)?;
            let data = level_image.pixels();

            pixels[offset..offset + data.len()].copy_from_slice(data);
            offset += data.len();
        }
        image.replace_pixels(pixels, width, height, format, levels);

        Ok(())
    }
}

/// Convert an image to another format, keeping its mip chain
///
/// [`Reformat`] keeps only the first level, this regenerates the chain in
/// the new format when the source had one.
#[derive(Copy, Clone, Debug)]
pub struct ReformatMipmapped {
    format: PixelFormat
}

impl ReformatMipmapped {
    #[must_use]
    pub fn new(format: PixelFormat) -> ReformatMipmapped {
        ReformatMipmapped { format }
    }
}

impl OperationsTrait for ReformatMipmapped {
    fn name(&self) -> &'static str {
        "ReformatMipmapped"
    }

    fn execute_impl(&self, image: &mut RasterImage, options: &ProcessOptions) -> Result<(), ImageErrors> {
        let levels = image.mip_levels();

        Reformat::new(self.format).execute(image, options)?;

        if levels > 1 && image.mip_levels() == 1 && image.format() == self.format {
            Mipmaps::new().execute(image, options)?;
        }
        Ok(())
    }

    fn supported_formats(&self) -> &'static [PixelFormat] {
        &PixelFormat::ALL
    }
}
