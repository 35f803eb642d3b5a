/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Draw one image on top of another
//!
//! A region of a source image is scaled to a destination rectangle and
//! composited over the destination with the Porter-Duff *over* operator.
//!
//! ```text
//!     source                      destination
//!  ┌──────────────┐           ┌────────────────────────┐
//!  │  src_rect    │           │                        │
//!  │  ┌──────┐    │  scale    │     dst_rect           │
//!  │  │      │    │ ───────►  │     ┌────────────┐     │
//!  │  └──────┘    │           │     │            │     │
//!  └──────────────┘           │     └────────────┘     │
//!                             └────────────────────────┘
//! ```
use texel_core::color::{Rgba8, RgbaF32};
use texel_core::log::{trace, warn};
use texel_core::options::ProcessOptions;
use texel_core::rect::Rect;
use texel_image::errors::{report_warning, ImageErrors};
use texel_image::image::RasterImage;
use texel_image::traits::OperationsTrait;

use crate::crop::from_image;
use crate::resize::{resize_rgba8_region, ResizeMethod};

/// Composite `src` over `dst` with the Porter-Duff over operator
///
/// Alpha is straight, not premultiplied. A fully transparent result
/// has black color channels.
#[must_use]
pub fn blend_over(src: RgbaF32, dst: RgbaF32) -> RgbaF32 {
    let alpha = src.a + dst.a * (1.0 - src.a);

    if alpha <= 0.0 {
        return RgbaF32::BLANK;
    }
    let dst_weight = dst.a * (1.0 - src.a);

    RgbaF32 {
        r: (src.r * src.a + dst.r * dst_weight) / alpha,
        g: (src.g * src.a + dst.g * dst_weight) / alpha,
        b: (src.b * src.a + dst.b * dst_weight) / alpha,
        a: alpha
    }
}

/// Draw a region of a source image onto the image the operation is
/// executed on
///
/// The source region is clamped to the source image and scaled to the size
/// of the destination rectangle. Parts of the destination rectangle outside
/// the destination image are dropped. Every source pixel is multiplied by
/// `tint` before compositing.
///
/// The destination keeps its format and loses any mip levels.
///
/// # Example
/// ```
/// use texel_core::color::Rgba8;
/// use texel_core::options::ProcessOptions;
/// use texel_core::pixel_format::PixelFormat;
/// use texel_core::rect::Rect;
/// use texel_image::image::RasterImage;
/// use texel_image::traits::OperationsTrait;
/// use texel_procs::composite::Blit;
///
/// let options = ProcessOptions::default();
/// let logo = RasterImage::fill(Rgba8::BLACK, 4, 4, PixelFormat::R8G8B8A8, &options).unwrap();
/// let mut canvas = RasterImage::fill(Rgba8::WHITE, 16, 16, PixelFormat::R8G8B8, &options).unwrap();
///
/// Blit::new(&logo, Rect::new(0, 0, 4, 4), Rect::new(2, 2, 8, 8), Rgba8::WHITE)
///     .execute(&mut canvas, &options)
///     .unwrap();
/// assert_eq!(canvas.get_pixel(5, 5).unwrap().to_rgba8(), Rgba8::BLACK);
/// ```
#[derive(Copy, Clone)]
pub struct Blit<'a> {
    src:      &'a RasterImage,
    src_rect: Rect,
    dst_rect: Rect,
    tint:     Rgba8
}

impl<'a> Blit<'a> {
    /// Create a new blit operation
    ///
    /// # Arguments
    /// - src: The image to draw
    /// - src_rect: The region of `src` to draw
    /// - dst_rect: Where to draw it on the destination, the region is
    ///   scaled to this size
    /// - tint: Color every source pixel is multiplied with, use
    ///   [`Rgba8::WHITE`] to draw the source unchanged
    #[must_use]
    pub fn new(src: &'a RasterImage, src_rect: Rect, dst_rect: Rect, tint: Rgba8) -> Blit<'a> {
        Blit {
            src,
            src_rect,
            dst_rect,
            tint
        }
    }

    /// Draw the whole of `src` at `(x, y)` without scaling
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn at(src: &'a RasterImage, x: i32, y: i32, tint: Rgba8) -> Blit<'a> {
        let (width, height) = src.dimensions();

        Blit::new(
            src,
            Rect::from_dimensions(width, height),
            Rect::new(x, y, width as i32, height as i32),
            tint
        )
    }
}

impl<'a> OperationsTrait for Blit<'a> {
    fn name(&self) -> &'static str {
        "Blit"
    }

    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    fn execute_impl(&self, image: &mut RasterImage, options: &ProcessOptions) -> Result<(), ImageErrors> {
        if self.src.is_empty() {
            trace!("Blit source is empty, no-op");
            return Ok(());
        }
        if !self.src.format().is_decodable() {
            return report_warning(
                options,
                ImageErrors::UnsupportedOperation(self.name(), self.src.format())
            );
        }
        let (src_w, src_h) = self.src.dimensions();

        let Some(src_rect) = self.src_rect.clamp_to(src_w, src_h) else {
            return report_warning(
                options,
                ImageErrors::InvalidGeometry(format!(
                    "Blit source rectangle {:?} lies outside a {src_w}x{src_h} image",
                    self.src_rect
                ))
            );
        };
        if src_rect != self.src_rect {
            warn!(
                "Blit source rectangle {:?} clamped to {:?}",
                self.src_rect, src_rect
            );
        }
        if self.dst_rect.is_empty() {
            return report_warning(
                options,
                ImageErrors::InvalidGeometry(format!(
                    "Blit destination rectangle {:?} is empty",
                    self.dst_rect
                ))
            );
        }
        let (dst_w, dst_h) = image.dimensions();

        // left, right, top and bottom overhang are cut from the scaled source
        let Some(visible) = self.dst_rect.clamp_to(dst_w, dst_h) else {
            trace!("Blit destination lies outside the image, no-op");
            return Ok(());
        };

        let source = from_image(self.src, src_rect, options)?;

        let (dst_x, dst_y, vis_w, vis_h) = visible.to_usize();
        // where the visible part starts inside the scaled source
        let crop_x = (i64::from(visible.x) - i64::from(self.dst_rect.x)) as usize;
        let crop_y = (i64::from(visible.y) - i64::from(self.dst_rect.y)) as usize;

        let (source_colors, source_w, src_x, src_y) =
            if (src_rect.width, src_rect.height) == (self.dst_rect.width, self.dst_rect.height) {
                (source.to_normalized(options)?, source.width(), crop_x, crop_y)
            } else {
                // only the visible window of the scaled source is resampled
                let window = resize_rgba8_region(
                    &source.to_rgba8(options)?,
                    source.dimensions(),
                    (self.dst_rect.width as usize, self.dst_rect.height as usize),
                    crop_x..crop_x + vis_w,
                    crop_y..crop_y + vis_h,
                    ResizeMethod::Bicubic,
                    options
                )?;
                let scaled =
                    RasterImage::from_rgba8(&window, vis_w, vis_h, source.format(), options)?;
                (scaled.to_normalized(options)?, vis_w, 0, 0)
            };
        let mut colors = image.to_normalized(options)?;
        let tint = self.tint.to_normalized();

        for y in 0..vis_h {
            let src_row = (src_y + y) * source_w + src_x;
            let dst_row = (dst_y + y) * dst_w + dst_x;

            let (Some(src_pixels), Some(dst_pixels)) = (
                source_colors.get(src_row..src_row + vis_w),
                colors.get_mut(dst_row..dst_row + vis_w)
            ) else {
                break;
            };
            for (dst, src) in dst_pixels.iter_mut().zip(src_pixels.iter()) {
                *dst = blend_over(src.modulate(tint), *dst);
            }
        }
        if image.mip_levels() > 1 {
            warn!(
                "Blit keeps only the first of {} mip levels of the destination",
                image.mip_levels()
            );
        }
        let format = image.format();
        *image = RasterImage::from_normalized(&colors, dst_w, dst_h, format, options)?;

        Ok(())
    }
}
