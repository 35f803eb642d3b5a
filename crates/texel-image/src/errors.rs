/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors possible during image processing
use std::fmt::{Debug, Display, Formatter};

use texel_core::codec::CodecErrors;
use texel_core::log::warn;
use texel_core::options::{AllocationErrors, ProcessOptions};
use texel_core::pixel_format::PixelFormat;

/// All possible image errors that can occur.
pub enum ImageErrors {
    /// A pixel could not be decoded or encoded
    CodecErrors(CodecErrors),
    /// An operation could not get memory
    AllocationErrors(AllocationErrors),
    /// The operation does not support the image's format
    ///
    /// The first field is the operation name
    UnsupportedOperation(&'static str, PixelFormat),
    /// A rectangle, offset or size left nothing to operate on
    InvalidGeometry(String),
    /// The operation would produce an image larger than configured limits
    DimensionsTooLarge(usize, usize),
    /// The image already has mip levels
    MipmapsPresent(usize),
    /// Operation arguments that cannot be honoured
    InvalidParameters(String),
    GenericString(String),
    GenericStr(&'static str)
}

impl Debug for ImageErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CodecErrors(ref error) => {
                writeln!(f, "Pixel codec error: {error:?}")
            }
            Self::AllocationErrors(ref error) => {
                writeln!(f, "Allocation error: {error:?}")
            }
            Self::UnsupportedOperation(operation, format) => {
                writeln!(f, "Operation {operation} not supported for format {format:?}")
            }
            Self::InvalidGeometry(reason) => {
                writeln!(f, "Invalid geometry: {reason}")
            }
            Self::DimensionsTooLarge(width, height) => {
                writeln!(f, "Dimensions {width}x{height} exceed configured limits")
            }
            Self::MipmapsPresent(levels) => {
                writeln!(f, "Image already has {levels} mip levels")
            }
            Self::InvalidParameters(reason) => {
                writeln!(f, "Invalid parameters: {reason}")
            }
            Self::GenericString(err) => writeln!(f, "{err}"),
            Self::GenericStr(err) => writeln!(f, "{err}")
        }
    }
}

impl Display for ImageErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{self:?}")
    }
}

impl std::error::Error for ImageErrors {}

impl From<CodecErrors> for ImageErrors {
    fn from(from: CodecErrors) -> Self {
        ImageErrors::CodecErrors(from)
    }
}

impl From<AllocationErrors> for ImageErrors {
    fn from(from: AllocationErrors) -> Self {
        ImageErrors::AllocationErrors(from)
    }
}

impl From<&'static str> for ImageErrors {
    fn from(value: &'static str) -> Self {
        Self::GenericStr(value)
    }
}

impl From<String> for ImageErrors {
    fn from(value: String) -> Self {
        Self::GenericString(value)
    }
}

/// Report a condition that leaves the image untouched
///
/// In strict mode this is the error itself, otherwise it is logged as a
/// warning and the caller carries on with `Ok(())`
///
/// # Errors
/// Returns `error` when [`ProcessOptions::strict_mode`] is set
pub fn report_warning(options: &ProcessOptions, error: ImageErrors) -> Result<(), ImageErrors> {
    if options.strict_mode() {
        return Err(error);
    }
    warn!("{:?}", error);
    Ok(())
}
