/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Resize operation
//!
//! Two families of resizing are supported
//!
//! - [`ResizeMethod::Nearest`] copies whole packed pixels, it works in the
//!   image's own format and never changes a pixel value.
//! - Every other method decodes the image to 8 bit RGBA, resamples each
//!   channel with a separable kernel and encodes back to the original format.
use std::ops::Range;

use texel_core::color::Rgba8;
use texel_core::log::{trace, warn};
use texel_core::options::ProcessOptions;
use texel_image::errors::{report_warning, ImageErrors};
use texel_image::image::RasterImage;
use texel_image::traits::OperationsTrait;

use crate::resize::nearest::{resize_nearest, resize_nearest_region};
use crate::resize::seperable_kernel::{resample_separable, PrecomputedKernels};

pub mod nearest;
mod seperable_kernel;

/// Resampling filter used when resizing
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ResizeMethod {
    /// Pick the closest source pixel, no filtering
    Nearest,
    /// Triangle filter
    Bilinear,
    /// Mitchell filter when shrinking, Catmull-Rom when enlarging
    Bicubic,
    /// Mitchell-Netravali filter, B = C = 1/3
    Mitchell,
    /// Catmull-Rom spline, sharper than Mitchell
    CatmullRom,
    /// Lanczos windowed sinc with three lobes
    Lanczos3
}

/// Resize an image to a new width and height
/// using the resize method specified
///
/// Only the first mip level is resized, the result has a single level.
#[derive(Copy, Clone, Debug)]
pub struct Resize {
    new_width:  usize,
    new_height: usize,
    method:     ResizeMethod
}

impl Resize {
    /// Create a new resize operation
    ///
    /// # Argument
    /// - new_width: The new image width
    /// - new_height: The new image height.
    /// - method: The resize method to use
    #[must_use]
    pub fn new(new_width: usize, new_height: usize, method: ResizeMethod) -> Resize {
        Resize {
            new_width,
            new_height,
            method
        }
    }
}

impl OperationsTrait for Resize {
    fn name(&self) -> &'static str {
        "Resize"
    }

    fn execute_impl(&self, image: &mut RasterImage, options: &ProcessOptions) -> Result<(), ImageErrors> {
        let (old_w, old_h) = image.dimensions();

        if self.new_width == 0 || self.new_height == 0 {
            return report_warning(
                options,
                ImageErrors::InvalidGeometry(format!(
                    "Cannot resize to {}x{}",
                    self.new_width, self.new_height
                ))
            );
        }
        if !options.dimensions_allowed(self.new_width, self.new_height) {
            return Err(ImageErrors::DimensionsTooLarge(
                self.new_width,
                self.new_height
            ));
        }
        if (old_w, old_h) == (self.new_width, self.new_height) && image.mip_levels() == 1 {
            trace!("Image already {}x{}, no-op", old_w, old_h);
            return Ok(());
        }
        if image.mip_levels() > 1 {
            warn!(
                "Resize keeps only the first of {} mip levels",
                image.mip_levels()
            );
        }
        let format = image.format();

        match self.method {
            ResizeMethod::Nearest => {
                let Some(bpp) = format.bytes_per_pixel() else {
                    return report_warning(
                        options,
                        ImageErrors::UnsupportedOperation(self.name(), format)
                    );
                };
                let mut new_pixels =
                    options.allocate_bytes(self.new_width * self.new_height * bpp)?;

                resize_nearest::<u8>(
                    image.base_level(),
                    &mut new_pixels,
                    bpp,
                    old_w,
                    old_h,
                    self.new_width,
                    self.new_height
                );
                image.replace_pixels(new_pixels, self.new_width, self.new_height, format, 1);
            }
            method => {
                let colors = image.to_rgba8(options)?;
                let resized = resize_rgba8(
                    &colors,
                    old_w,
                    old_h,
                    self.new_width,
                    self.new_height,
                    method,
                    options
                )?;
                *image = RasterImage::from_rgba8(
                    &resized,
                    self.new_width,
                    self.new_height,
                    format,
                    options
                )?;
            }
        }
        Ok(())
    }
}

/// Resize 8 bit RGBA pixels
///
/// Channels are resampled independently, alpha is not premultiplied.
///
/// # Arguments
/// - colors: `in_width * in_height` pixels
/// - method: The resize method to use
///
/// # Errors
/// - [`ImageErrors::InvalidGeometry`] if `colors` does not match the input dimensions
/// - Allocation errors
pub fn resize_rgba8(
    colors: &[Rgba8], in_width: usize, in_height: usize, out_width: usize, out_height: usize,
    method: ResizeMethod, options: &ProcessOptions
) -> Result<Vec<Rgba8>, ImageErrors> {
    resize_rgba8_region(
        colors,
        (in_width, in_height),
        (out_width, out_height),
        0..out_width,
        0..out_height,
        method,
        options
    )
}

/// Resize 8 bit RGBA pixels, producing only a window of the result
///
/// The output holds the pixels at `x_range` and `y_range` of an `out_dims`
/// sized resize, so a small part of a very large result can be produced
/// without allocating the whole of it.
///
/// # Errors
/// - [`ImageErrors::InvalidGeometry`] if `colors` does not match `in_dims`
///   or a range reaches past `out_dims`
/// - Allocation errors
pub fn resize_rgba8_region(
    colors: &[Rgba8], in_dims: (usize, usize), out_dims: (usize, usize), x_range: Range<usize>,
    y_range: Range<usize>, method: ResizeMethod, options: &ProcessOptions
) -> Result<Vec<Rgba8>, ImageErrors> {
    let ((in_width, in_height), (out_width, out_height)) = (in_dims, out_dims);

    if colors.len() != in_width * in_height {
        return Err(ImageErrors::InvalidGeometry(format!(
            "Expected {} pixels for a {in_width}x{in_height} image, found {}",
            in_width * in_height,
            colors.len()
        )));
    }
    if x_range.end > out_width || y_range.end > out_height {
        return Err(ImageErrors::InvalidGeometry(format!(
            "Window {x_range:?}x{y_range:?} lies outside a {out_width}x{out_height} result"
        )));
    }
    let (window_w, window_h) = (x_range.len(), y_range.len());
    let out_length = window_w * window_h;
    let mut output = options.allocate(out_length, Rgba8::BLANK)?;

    if out_length == 0 || colors.is_empty() {
        return Ok(output);
    }
    if method == ResizeMethod::Nearest {
        resize_nearest_region(colors, &mut output, 1, in_dims, out_dims, x_range, y_range);
        return Ok(output);
    }
    let kernels = PrecomputedKernels::for_region(in_dims, out_dims, x_range, y_range, method);

    let mut in_channel = options.allocate(colors.len(), 0_u8)?;
    let mut out_channel = options.allocate(out_length, 0_u8)?;

    for component in 0..4 {
        for (value, color) in in_channel.iter_mut().zip(colors.iter()) {
            *value = color.to_array()[component];
        }
        resample_separable(
            &in_channel,
            &mut out_channel,
            in_width,
            in_height,
            window_w,
            window_h,
            &kernels,
            options
        )?;
        for (color, &value) in output.iter_mut().zip(out_channel.iter()) {
            match component {
                0 => color.r = value,
                1 => color.g = value,
                2 => color.b = value,
                _ => color.a = value
            }
        }
    }
    Ok(output)
}

/// Resize the first level of `image` into a new image in the same format
///
/// # Errors
/// See [`Resize`]
pub fn resized_copy(
    image: &RasterImage, width: usize, height: usize, method: ResizeMethod,
    options: &ProcessOptions
) -> Result<RasterImage, ImageErrors> {
    Resize::new(width, height, method).clone_and_execute(image, options)
}
