/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Change the canvas size of an image without scaling it
//!
//! The old image is placed on a new canvas with its top left corner at
//! `(offset_x, offset_y)`, offsets may be negative. Canvas pixels not covered
//! by the old image get the fill color.
//!
//! ```text
//!  offset (2,1), growing            offset (-1,-1), shrinking
//! ┌───────────────┐                ┌──────────────┐
//! │ fill          │                │ old  ┌─────┐ │
//! │   ┌───────┐   │                │      │ new │ │
//! │   │  old  │   │                │      └─────┘ │
//! │   └───────┘   │                └──────────────┘
//! └───────────────┘
//! ```
use texel_core::color::Rgba8;
use texel_core::log::trace;
use texel_core::options::ProcessOptions;
use texel_core::rect::Rect;
use texel_image::errors::{report_warning, ImageErrors};
use texel_image::image::RasterImage;
use texel_image::traits::OperationsTrait;

use crate::composite::Blit;
use crate::crop::Crop;

/// Part of one axis of the old image that lands on the new canvas
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct Span {
    /// First visible pixel in the old image
    src: usize,
    /// Where that pixel lands on the canvas
    dst: usize,
    len: usize
}

#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
fn visible_span(old: usize, new: usize, offset: i64) -> Option<Span> {
    let src = if offset < 0 { offset.unsigned_abs() as usize } else { 0 };
    let dst = if offset > 0 { offset as usize } else { 0 };

    if src >= old || dst >= new {
        return None;
    }
    Some(Span {
        src,
        dst,
        len: (old - src).min(new - dst)
    })
}

/// Resize the canvas of an image
///
/// Each axis is handled independently, the part of the old image that
/// fits on the canvas is kept and the remainder filled with `fill`,
/// encoded in the image's format.
///
/// When the old image covers the whole canvas this is a plain crop,
/// otherwise the result has a single mip level.
#[derive(Copy, Clone, Debug)]
pub struct ResizeCanvas {
    width:    usize,
    height:   usize,
    offset_x: i32,
    offset_y: i32,
    fill:     Rgba8
}

impl ResizeCanvas {
    /// Create a new canvas resize operation
    ///
    /// # Arguments
    /// - width, height: The canvas size
    /// - offset_x, offset_y: Where the old top left corner goes on the canvas
    /// - fill: Color of canvas pixels not covered by the old image
    #[must_use]
    pub fn new(width: usize, height: usize, offset_x: i32, offset_y: i32, fill: Rgba8) -> ResizeCanvas {
        ResizeCanvas {
            width,
            height,
            offset_x,
            offset_y,
            fill
        }
    }
}

impl OperationsTrait for ResizeCanvas {
    fn name(&self) -> &'static str {
        "ResizeCanvas"
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn execute_impl(&self, image: &mut RasterImage, options: &ProcessOptions) -> Result<(), ImageErrors> {
        if self.width == 0 || self.height == 0 {
            return report_warning(
                options,
                ImageErrors::InvalidGeometry(format!(
                    "Cannot resize canvas to {}x{}",
                    self.width, self.height
                ))
            );
        }
        if !options.dimensions_allowed(self.width, self.height) {
            return Err(ImageErrors::DimensionsTooLarge(self.width, self.height));
        }
        let (old_w, old_h) = image.dimensions();

        if (old_w, old_h) == (self.width, self.height) && self.offset_x == 0 && self.offset_y == 0 {
            trace!("Canvas size unchanged, no-op");
            return Ok(());
        }
        let format = image.format();
        let x_span = visible_span(old_w, self.width, i64::from(self.offset_x));
        let y_span = visible_span(old_h, self.height, i64::from(self.offset_y));

        let mut canvas = RasterImage::fill(self.fill, self.width, self.height, format, options)?;

        let (Some(x_span), Some(y_span)) = (x_span, y_span) else {
            trace!("Old image lies outside the new canvas");
            *image = canvas;
            return Ok(());
        };

        if x_span.len == self.width && y_span.len == self.height {
            // the old image covers the whole canvas
            let rect = Rect::new(
                x_span.src as i32,
                y_span.src as i32,
                self.width as i32,
                self.height as i32
            );
            return Crop::new(rect).execute(image, options);
        }
        let src_rect = Rect::new(
            x_span.src as i32,
            y_span.src as i32,
            x_span.len as i32,
            y_span.len as i32
        );
        let dst_rect = Rect::new(
            x_span.dst as i32,
            y_span.dst as i32,
            x_span.len as i32,
            y_span.len as i32
        );
        Blit::new(image, src_rect, dst_rect, Rgba8::WHITE).execute(&mut canvas, options)?;

        *image = canvas;
        Ok(())
    }
}

/// Grow the canvas to the next power of two in each dimension
///
/// The old image stays in the top left corner, new pixels get the fill
/// color. Images whose sides are already powers of two are left untouched.
#[derive(Copy, Clone, Debug)]
pub struct ToPowerOfTwo {
    fill: Rgba8
}

impl ToPowerOfTwo {
    #[must_use]
    pub fn new(fill: Rgba8) -> ToPowerOfTwo {
        ToPowerOfTwo { fill }
    }
}

impl OperationsTrait for ToPowerOfTwo {
    fn name(&self) -> &'static str {
        "ToPowerOfTwo"
    }

    fn execute_impl(&self, image: &mut RasterImage, options: &ProcessOptions) -> Result<(), ImageErrors> {
        let (width, height) = image.dimensions();
        let (pot_w, pot_h) = (width.next_power_of_two(), height.next_power_of_two());

        if (pot_w, pot_h) == (width, height) {
            trace!("Image already {}x{}, no-op", width, height);
            return Ok(());
        }
        ResizeCanvas::new(pot_w, pot_h, 0, 0, self.fill).execute(image, options)
    }
}

#[cfg(test)]
mod tests {
    use texel_core::color::Rgba8;
    use texel_core::options::ProcessOptions;
    use texel_core::pixel_format::PixelFormat;
    use texel_image::image::RasterImage;
    use texel_image::traits::OperationsTrait;

    use crate::canvas::{visible_span, ResizeCanvas, Span, ToPowerOfTwo};

    fn gradient(width: usize, height: usize) -> RasterImage {
        let pixels = (1..=width * height).map(|x| x as u8).collect();
        RasterImage::from_raw(width, height, PixelFormat::Grayscale, 1, pixels)
    }

    #[test]
    fn test_visible_span() {
        assert_eq!(visible_span(4, 8, 2), Some(Span { src: 0, dst: 2, len: 4 }));
        assert_eq!(visible_span(4, 2, -1), Some(Span { src: 1, dst: 0, len: 2 }));
        assert_eq!(visible_span(4, 8, 6), Some(Span { src: 0, dst: 6, len: 2 }));
        assert_eq!(visible_span(4, 8, -4), None);
        assert_eq!(visible_span(4, 8, 8), None);
    }

    #[test]
    fn test_grow_with_offset() {
        let options = ProcessOptions::default();
        let mut image = gradient(2, 2);

        ResizeCanvas::new(4, 3, 1, 1, Rgba8::BLACK)
            .execute(&mut image, &options)
            .unwrap();

        assert_eq!(image.dimensions(), (4, 3));
        #[rustfmt::skip]
        let expected = [
            0, 0, 0, 0,
            0, 1, 2, 0,
            0, 3, 4, 0
        ];
        assert_eq!(image.pixels(), &expected);
    }

    #[test]
    fn test_shrink_is_crop() {
        let options = ProcessOptions::default();
        let mut image = gradient(4, 4);

        ResizeCanvas::new(2, 2, -1, -2, Rgba8::BLACK)
            .execute(&mut image, &options)
            .unwrap();

        assert_eq!(image.pixels(), &[10, 11, 14, 15]);
    }

    #[test]
    fn test_mixed_offsets() {
        let options = ProcessOptions::default();
        let mut image = gradient(3, 3);

        // wider and shifted left, shorter and shifted down
        ResizeCanvas::new(4, 2, -1, 1, Rgba8::WHITE)
            .execute(&mut image, &options)
            .unwrap();

        #[rustfmt::skip]
        let expected = [
            255, 255, 255, 255,
            2,   3,   255, 255
        ];
        assert_eq!(image.pixels(), &expected);
    }

    #[test]
    fn test_outside_gives_fill() {
        let options = ProcessOptions::default();
        let mut image = gradient(2, 2);

        ResizeCanvas::new(3, 3, 5, 0, Rgba8::new(9, 9, 9, 255))
            .execute(&mut image, &options)
            .unwrap();

        assert_eq!(image.pixels(), &[9; 9]);
    }

    #[test]
    fn test_power_of_two() {
        let options = ProcessOptions::default();
        let mut image =
            RasterImage::fill(Rgba8::WHITE, 5, 3, PixelFormat::R8G8B8A8, &options).unwrap();

        ToPowerOfTwo::new(Rgba8::BLANK)
            .execute(&mut image, &options)
            .unwrap();

        assert_eq!(image.dimensions(), (8, 4));
        assert_eq!(image.get_pixel(4, 2).unwrap().to_rgba8(), Rgba8::WHITE);
        assert_eq!(image.get_pixel(5, 2).unwrap().to_rgba8(), Rgba8::BLANK);
        assert_eq!(image.get_pixel(0, 3).unwrap().to_rgba8(), Rgba8::BLANK);

        let copy = image.clone();
        ToPowerOfTwo::new(Rgba8::BLANK)
            .execute(&mut image, &options)
            .unwrap();
        assert_eq!(image, copy);
    }
}
