/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Traits shared by all image operations
use texel_core::log::trace;
use texel_core::options::ProcessOptions;
use texel_core::pixel_format::PixelFormat;

use crate::errors::{report_warning, ImageErrors};
use crate::image::RasterImage;

/// An operation that modifies a [`RasterImage`] in place
///
/// Implementors provide [`execute_impl`](Self::execute_impl), callers use
/// [`execute`](Self::execute), which handles empty images and checks the
/// image format against [`supported_formats`](Self::supported_formats)
/// before running the operation.
pub trait OperationsTrait {
    /// Name of the operation, used in logs and errors
    fn name(&self) -> &'static str;

    /// Run the operation
    ///
    /// This is called with a non-empty image whose format is one of
    /// [`supported_formats`](Self::supported_formats).
    ///
    /// # Errors
    /// Any error the operation may encounter, see the implementor
    fn execute_impl(&self, image: &mut RasterImage, options: &ProcessOptions) -> Result<(), ImageErrors>;

    /// Formats this operation can work on
    ///
    /// Defaults to every uncompressed format
    fn supported_formats(&self) -> &'static [PixelFormat] {
        &PixelFormat::UNCOMPRESSED
    }

    /// Run the operation on `image`
    ///
    /// - An empty image (zero width, height or no pixel data) is left untouched.
    /// - An image in a format the operation does not support is left
    ///   untouched and a warning is logged, or an error returned in strict mode.
    ///
    /// # Errors
    /// See [`execute_impl`](Self::execute_impl) and [`ProcessOptions::strict_mode`]
    fn execute(&self, image: &mut RasterImage, options: &ProcessOptions) -> Result<(), ImageErrors> {
        if image.is_empty() {
            trace!("Image is empty, skipping {}", self.name());
            return Ok(());
        }
        let format = image.format();

        if !self.supported_formats().contains(&format) {
            return report_warning(
                options,
                ImageErrors::UnsupportedOperation(self.name(), format)
            );
        }
        trace!("Running {} on {:?} image", self.name(), format);

        self.execute_impl(image, options)
    }

    /// Run the operation on a copy of `image`, returning the copy
    ///
    /// # Errors
    /// See [`execute`](Self::execute)
    fn clone_and_execute(&self, image: &RasterImage, options: &ProcessOptions) -> Result<RasterImage, ImageErrors> {
        let mut copy = image.try_clone(options)?;
        self.execute(&mut copy, options)?;
        Ok(copy)
    }
}
