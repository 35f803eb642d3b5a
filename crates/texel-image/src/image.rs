/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! This module represents a single image
//!
//! An image is represented as
//!
//! - a single contiguous byte buffer
//!     - holding one or more mip levels
//!         - of pixels packed in a [`PixelFormat`]
//!             - with the same width and height for level 0
//!
//! Levels are stored back to back, see [`texel_core::size`] for the layout.
use texel_core::codec::{decode_into, decode_pixel, encode_from};
use texel_core::color::{Rgba8, RgbaF32};
use texel_core::options::ProcessOptions;
use texel_core::pixel_format::PixelFormat;
use texel_core::size::{buffer_size, mip_chain_size, mip_dimensions, mip_level_offset};

use crate::errors::ImageErrors;

/// Represents a single image
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    pub(crate) width:      usize,
    pub(crate) height:     usize,
    pub(crate) format:     PixelFormat,
    pub(crate) mip_levels: usize,
    pub(crate) pixels:     Vec<u8>
}

impl RasterImage {
    /// Create an image from an existing pixel buffer
    ///
    /// The buffer is trusted to hold `mip_levels` levels of a `width` x `height`
    /// image in `format`, this is only checked in debug builds.
    pub fn from_raw(
        width: usize, height: usize, format: PixelFormat, mip_levels: usize, pixels: Vec<u8>
    ) -> RasterImage {
        debug_assert_eq!(
            pixels.len(),
            mip_chain_size(width, height, format, mip_levels),
            "Pixel buffer does not match image dimensions"
        );
        RasterImage {
            width,
            height,
            format,
            mip_levels,
            pixels
        }
    }

    /// Create a `width` x `height` image where every pixel is `color`
    ///
    /// # Errors
    /// - [`ImageErrors::UnsupportedOperation`] if `format` cannot be encoded
    /// - [`ImageErrors::DimensionsTooLarge`] if dimensions exceed the configured limits
    /// - [`ImageErrors::AllocationErrors`] if the buffer could not be allocated
    pub fn fill(
        color: Rgba8, width: usize, height: usize, format: PixelFormat, options: &ProcessOptions
    ) -> Result<RasterImage, ImageErrors> {
        check_target(width, height, format, options, "fill")?;

        let size = format.bits_per_pixel() / 8;
        // encode once and repeat the bytes
        let mut pixel = [0_u8; 16];
        encode_from(&[color.to_normalized()], format, &mut pixel[..size])?;

        let mut pixels = options.allocate_bytes(buffer_size(width, height, format))?;

        for chunk in pixels.chunks_exact_mut(size) {
            chunk.copy_from_slice(&pixel[..size]);
        }
        Ok(RasterImage::from_raw(width, height, format, 1, pixels))
    }

    /// Create an image by calling `func(x, y)` for every pixel
    ///
    /// # Errors
    /// See [`RasterImage::fill`]
    pub fn from_fn<F>(
        width: usize, height: usize, format: PixelFormat, options: &ProcessOptions, mut func: F
    ) -> Result<RasterImage, ImageErrors>
    where
        F: FnMut(usize, usize) -> RgbaF32
    {
        check_target(width, height, format, options, "from_fn")?;

        let mut colors = options.allocate(width * height, RgbaF32::BLANK)?;

        for (y, row) in colors.chunks_exact_mut(width.max(1)).enumerate() {
            for (x, color) in row.iter_mut().enumerate() {
                *color = func(x, y);
            }
        }
        RasterImage::from_normalized(&colors, width, height, format, options)
    }

    /// Create an image from 8 bit colors, encoding them into `format`
    ///
    /// # Errors
    /// See [`RasterImage::fill`], additionally returns
    /// [`ImageErrors::InvalidGeometry`] if `colors` does not hold `width * height` entries
    pub fn from_rgba8(
        colors: &[Rgba8], width: usize, height: usize, format: PixelFormat, options: &ProcessOptions
    ) -> Result<RasterImage, ImageErrors> {
        check_target(width, height, format, options, "from_rgba8")?;
        check_count(colors.len(), width, height)?;

        if format == PixelFormat::R8G8B8A8 {
            // same memory layout
            let pixels = options.allocate_copy(bytemuck::cast_slice::<Rgba8, u8>(colors))?;
            return Ok(RasterImage::from_raw(width, height, format, 1, pixels));
        }
        let mut normalized = options.allocate(colors.len(), RgbaF32::BLANK)?;

        for (color, out) in colors.iter().zip(normalized.iter_mut()) {
            *out = color.to_normalized();
        }
        RasterImage::from_normalized(&normalized, width, height, format, options)
    }

    /// Create an image from normalized colors, encoding them into `format`
    ///
    /// # Errors
    /// See [`RasterImage::from_rgba8`]
    pub fn from_normalized(
        colors: &[RgbaF32], width: usize, height: usize, format: PixelFormat,
        options: &ProcessOptions
    ) -> Result<RasterImage, ImageErrors> {
        check_target(width, height, format, options, "from_normalized")?;
        check_count(colors.len(), width, height)?;

        let mut pixels = options.allocate_bytes(buffer_size(width, height, format))?;
        encode_from(colors, format, &mut pixels)?;

        Ok(RasterImage::from_raw(width, height, format, 1, pixels))
    }

    /// Copy this image, allocating through `options`
    ///
    /// # Errors
    /// If the copy could not be allocated
    pub fn try_clone(&self, options: &ProcessOptions) -> Result<RasterImage, ImageErrors> {
        Ok(RasterImage {
            width:      self.width,
            height:     self.height,
            format:     self.format,
            mip_levels: self.mip_levels,
            pixels:     options.allocate_copy(&self.pixels)?
        })
    }

    /// Get image dimensions as a tuple of (width,height)
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    pub const fn format(&self) -> PixelFormat {
        self.format
    }

    /// Number of mip levels stored in the pixel buffer, at least 1 for
    /// non-empty images
    pub const fn mip_levels(&self) -> usize {
        self.mip_levels
    }

    /// All pixel data, every mip level included
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Return true if the image has no pixels
    ///
    /// Operations leave empty images untouched
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }

    /// Dimensions of mip level `level`
    pub const fn level_dimensions(&self, level: usize) -> (usize, usize) {
        mip_dimensions(self.width, self.height, level)
    }

    /// Pixel data of mip level `level`, `None` if the image has no such level
    pub fn level_data(&self, level: usize) -> Option<&[u8]> {
        if level >= self.mip_levels {
            return None;
        }
        let (w, h) = self.level_dimensions(level);
        let start = mip_level_offset(self.width, self.height, self.format, level);

        self.pixels.get(start..start + buffer_size(w, h, self.format))
    }

    /// Pixel data of the first mip level
    pub fn base_level(&self) -> &[u8] {
        let end = buffer_size(self.width, self.height, self.format).min(self.pixels.len());
        &self.pixels[..end]
    }

    /// Swap the image contents for a new buffer
    ///
    /// The old buffer is dropped before returning.
    pub fn replace_pixels(
        &mut self, pixels: Vec<u8>, width: usize, height: usize, format: PixelFormat,
        mip_levels: usize
    ) {
        *self = RasterImage::from_raw(width, height, format, mip_levels, pixels);
    }

    /// Decode the pixel at `(x, y)` of the first level
    ///
    /// Returns `None` if the coordinate is outside the image or the format
    /// cannot be decoded
    pub fn get_pixel(&self, x: usize, y: usize) -> Option<RgbaF32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        decode_pixel(&self.pixels, self.format, y * self.width + x).ok()
    }

    /// Decode the first level into normalized colors
    ///
    /// # Errors
    /// - [`ImageErrors::CodecErrors`] if the format cannot be decoded
    /// - [`ImageErrors::AllocationErrors`] if the output could not be allocated
    pub fn to_normalized(&self, options: &ProcessOptions) -> Result<Vec<RgbaF32>, ImageErrors> {
        if !self.format.is_decodable() {
            return Err(ImageErrors::UnsupportedOperation("to_normalized", self.format));
        }
        let mut colors = options.allocate(self.width * self.height, RgbaF32::BLANK)?;
        decode_into(&self.pixels, self.format, &mut colors)?;

        Ok(colors)
    }

    /// Decode the first level into 8 bit colors
    ///
    /// # Errors
    /// See [`RasterImage::to_normalized`]
    pub fn to_rgba8(&self, options: &ProcessOptions) -> Result<Vec<Rgba8>, ImageErrors> {
        if self.format == PixelFormat::R8G8B8A8 {
            let data = bytemuck::cast_slice::<u8, Rgba8>(self.base_level());
            return Ok(options.allocate_copy(data)?);
        }
        if !self.format.is_decodable() {
            return Err(ImageErrors::UnsupportedOperation("to_rgba8", self.format));
        }
        let mut colors = options.allocate(self.width * self.height, Rgba8::BLANK)?;

        for (index, color) in colors.iter_mut().enumerate() {
            *color = decode_pixel(&self.pixels, self.format, index)?.to_rgba8();
        }
        Ok(colors)
    }
}

fn check_target(
    width: usize, height: usize, format: PixelFormat, options: &ProcessOptions, name: &'static str
) -> Result<(), ImageErrors> {
    if !format.is_decodable() {
        return Err(ImageErrors::UnsupportedOperation(name, format));
    }
    if !options.dimensions_allowed(width, height) {
        return Err(ImageErrors::DimensionsTooLarge(width, height));
    }
    Ok(())
}

fn check_count(count: usize, width: usize, height: usize) -> Result<(), ImageErrors> {
    if count != width * height {
        return Err(ImageErrors::InvalidGeometry(format!(
            "Expected {} colors for a {width}x{height} image, found {count}",
            width * height
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use texel_core::color::{Rgba8, RgbaF32};
    use texel_core::options::ProcessOptions;
    use texel_core::pixel_format::PixelFormat;

    use crate::errors::ImageErrors;
    use crate::image::RasterImage;

    #[test]
    fn test_fill_repeats_encoded_pixel() {
        let options = ProcessOptions::default();
        let image =
            RasterImage::fill(Rgba8::new(0, 255, 0, 255), 3, 2, PixelFormat::R5G6B5, &options)
                .unwrap();

        assert_eq!(image.pixels().len(), 12);
        for chunk in image.pixels().chunks_exact(2) {
            assert_eq!(chunk, 0x07E0_u16.to_le_bytes());
        }
    }

    #[test]
    fn test_fill_rejects_compressed() {
        let options = ProcessOptions::default();
        let result = RasterImage::fill(Rgba8::WHITE, 4, 4, PixelFormat::Dxt1Rgb, &options);

        assert!(matches!(
            result,
            Err(ImageErrors::UnsupportedOperation(_, PixelFormat::Dxt1Rgb))
        ));
    }

    #[test]
    fn test_fill_respects_dimension_limits() {
        let options = ProcessOptions::default().set_max_width(8);
        let result = RasterImage::fill(Rgba8::WHITE, 9, 1, PixelFormat::Grayscale, &options);

        assert!(matches!(result, Err(ImageErrors::DimensionsTooLarge(9, 1))));
    }

    #[test]
    fn test_rgba8_fast_path() {
        let options = ProcessOptions::default();
        let colors = [Rgba8::new(1, 2, 3, 4), Rgba8::new(5, 6, 7, 8)];
        let image = RasterImage::from_rgba8(&colors, 2, 1, PixelFormat::R8G8B8A8, &options).unwrap();

        assert_eq!(image.pixels(), &[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(image.to_rgba8(&options).unwrap(), colors);
    }

    #[test]
    fn test_from_fn_and_get_pixel() {
        let options = ProcessOptions::default();
        let image = RasterImage::from_fn(4, 3, PixelFormat::Grayscale, &options, |x, y| {
            let v = (y * 4 + x) as f32 / 255.0;
            RgbaF32::new(v, v, v, 1.0)
        })
        .unwrap();

        assert_eq!(image.pixels()[7], 7);
        assert_eq!(image.get_pixel(3, 1).unwrap().to_rgba8(), Rgba8::new(7, 7, 7, 255));
        assert!(image.get_pixel(4, 0).is_none());
    }

    #[test]
    fn test_color_count_mismatch() {
        let options = ProcessOptions::default();
        let result = RasterImage::from_rgba8(&[Rgba8::WHITE], 2, 1, PixelFormat::R8G8B8, &options);

        assert!(matches!(result, Err(ImageErrors::InvalidGeometry(_))));
    }

    #[test]
    fn test_level_data() {
        let pixels: Vec<u8> = (0..21).collect();
        let image = RasterImage::from_raw(4, 4, PixelFormat::Grayscale, 3, pixels);

        assert_eq!(image.level_data(0).unwrap().len(), 16);
        assert_eq!(image.level_data(1).unwrap(), &[16, 17, 18, 19]);
        assert_eq!(image.level_data(2).unwrap(), &[20]);
        assert!(image.level_data(3).is_none());
        assert_eq!(image.base_level().len(), 16);
    }

    #[test]
    fn test_try_clone_is_exact() {
        let options = ProcessOptions::default();
        let image = RasterImage::fill(Rgba8::new(9, 8, 7, 6), 5, 5, PixelFormat::R4G4B4A4, &options)
            .unwrap();

        assert_eq!(image.try_clone(&options).unwrap(), image);
    }

    #[test]
    fn test_clone_respects_memory_limit() {
        let image = RasterImage::from_raw(4, 4, PixelFormat::R8G8B8A8, 1, vec![0; 64]);
        let options = ProcessOptions::default().set_max_memory(32);

        assert!(matches!(
            image.try_clone(&options),
            Err(ImageErrors::AllocationErrors(_))
        ));
    }

    #[test]
    fn test_empty_image_construction() {
        for format in [PixelFormat::R8G8B8A8, PixelFormat::Grayscale, PixelFormat::Dxt1Rgb] {
            let image = RasterImage::from_raw(0, 0, format, 1, Vec::new());
            assert!(image.is_empty());
            assert!(image.base_level().is_empty());
        }
        let image = RasterImage::from_raw(5, 0, PixelFormat::R5G6B5, 1, Vec::new());
        assert!(image.is_empty());
    }
}
