/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Crop an image
//!
//!  # Algorithm
//!
//! A crop is a view into a sub-image
//!
//! ```text
//!    width ──────────────────────────────►
//! │ ┌─────────────────────────────────────┐
//! │ │                                     │
//! │ │   (x,y)     out width               │
//! │ │     ┌────────────────────┐          │
//! │ │   o │                    │          │
//! │ │   u │                    │          │
//! │ │   t │                    │          │
//! │ │     │  CROPPED IMAGE     │          │
//! │ │   h │                    │          │
//! │ │   e │                    │          │
//! │ │   i │                    │          │
//! │ │   g └────────────────────┘          │
//! │ │   h                                 │
//! ▼ │   t                                 │
//!   └─────────────────────────────────────┘
//! ```
//! so it's a row by row memory copy starting from `(x,y)`.
//!
//! Pixels are copied as whole packed units, so a crop never changes a
//! pixel value, whatever the format.
use texel_core::log::{trace, warn};
use texel_core::options::ProcessOptions;
use texel_core::rect::Rect;
use texel_image::errors::{report_warning, ImageErrors};
use texel_image::image::RasterImage;
use texel_image::traits::OperationsTrait;

/// Crop out a part of an image
///
/// The rectangle is clamped to the image, a negative origin shrinks
/// the rectangle and a rectangle overflowing the far edge is truncated.
///
/// # Example
/// Crop out the center of an image
/// ```
/// use texel_core::color::Rgba8;
/// use texel_core::options::ProcessOptions;
/// use texel_core::pixel_format::PixelFormat;
/// use texel_core::rect::Rect;
/// use texel_image::errors::ImageErrors;
/// use texel_image::image::RasterImage;
/// use texel_image::traits::OperationsTrait;
/// use texel_procs::crop::Crop;
///
/// fn main() -> Result<(), ImageErrors> {
///     let options = ProcessOptions::default();
///     let mut image = RasterImage::fill(Rgba8::WHITE, 100, 100, PixelFormat::Grayscale, &options)?;
///
///     Crop::new(Rect::new(25, 25, 50, 50)).execute(&mut image, &options)?;
///     assert_eq!(image.dimensions(), (50, 50));
///     Ok(())
/// }
/// ```
#[derive(Copy, Clone, Debug)]
pub struct Crop {
    rect: Rect
}

impl Crop {
    /// Create a new crop operation
    ///
    /// # Arguments
    /// - rect: The region to keep, origin is the image top left corner.
    #[must_use]
    pub fn new(rect: Rect) -> Crop {
        Crop { rect }
    }
}

impl OperationsTrait for Crop {
    fn name(&self) -> &'static str {
        "Crop"
    }

    fn execute_impl(&self, image: &mut RasterImage, options: &ProcessOptions) -> Result<(), ImageErrors> {
        let (old_width, old_height) = image.dimensions();

        let Some(clamped) = self.rect.clamp_to(old_width, old_height) else {
            return report_warning(
                options,
                ImageErrors::InvalidGeometry(format!(
                    "Crop rectangle {:?} lies outside a {old_width}x{old_height} image",
                    self.rect
                ))
            );
        };
        if clamped != self.rect {
            warn!("Crop rectangle {:?} clamped to {:?}", self.rect, clamped);
        }
        let (x, y, width, height) = clamped.to_usize();

        if (width, height) == (old_width, old_height) && image.mip_levels() == 1 {
            trace!("Crop covers the whole image, no-op");
            return Ok(());
        }
        if image.mip_levels() > 1 {
            warn!(
                "Crop keeps only the first of {} mip levels",
                image.mip_levels()
            );
        }
        let format = image.format();
        let Some(bpp) = format.bytes_per_pixel() else {
            return report_warning(options, ImageErrors::UnsupportedOperation(self.name(), format));
        };

        let mut new_pixels = options.allocate_bytes(width * height * bpp)?;

        crop::<u8>(
            image.base_level(),
            old_width * bpp,
            &mut new_pixels,
            width * bpp,
            height,
            x * bpp,
            y
        );
        image.replace_pixels(new_pixels, width, height, format, 1);

        Ok(())
    }
}

/// Copy the region `rect` of `image` into a new image
///
/// The source is left untouched
///
/// # Errors
/// - Allocation errors
/// - [`ImageErrors::InvalidGeometry`] in strict mode, if `rect` lies outside `image`
pub fn from_image(image: &RasterImage, rect: Rect, options: &ProcessOptions) -> Result<RasterImage, ImageErrors> {
    Crop::new(rect).clone_and_execute(image, options)
}

/// Crop an image channel
///
/// # Arguments
///
/// * `in_image`:   Input image/image channel
/// * `in_width`:   Input width
/// * `out_image`:  Output image/image channel
/// * `out_width`:  Output width
/// * `out_height`: Output height
/// * `x`:  x offset from start(width)
/// * `y`:  y offset from start (height)
///
/// `out_image` will contain cropped image
///
/// # Notes
/// - For packed pixels in bytes, widths and `x` are in bytes,
///   i.e `width * bytes_per_pixel`
///
/// - If `out_image` is smaller than expected, bottom output will be truncated
///
/// - Rows where `x + out_width` passes `in_width` are not copied
pub fn crop<T: Copy>(
    in_image: &[T], in_width: usize, out_image: &mut [T], out_width: usize, out_height: usize,
    x: usize, y: usize
) {
    if in_width == 0 || out_width == 0 {
        // these generate panic paths for chunks_exact so just eliminate them
        return;
    }

    for (single_in_width, single_out_width) in in_image
        .chunks_exact(in_width)
        .skip(y)
        .take(out_height)
        .zip(out_image.chunks_exact_mut(out_width))
    {
        if let Some(v) = single_in_width.get(x..x + out_width) {
            single_out_width.copy_from_slice(v);
        }
    }
}
