/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Image processing routines for `texel-image`
//!
//! This implements the geometry, mipmap, compositing and dithering
//! operations for [`RasterImage`](texel_image::image::RasterImage)s.
//!
//! Every operation implements the `OperationsTrait` defined by texel-image.
//!
//! # Example
//! - Halve an image and build its mip chain
//! ```
//! use texel_core::color::Rgba8;
//! use texel_core::options::ProcessOptions;
//! use texel_core::pixel_format::PixelFormat;
//! use texel_image::image::RasterImage;
//! use texel_image::traits::OperationsTrait;
//! use texel_procs::mipmaps::Mipmaps;
//! use texel_procs::resize::{Resize, ResizeMethod};
//!
//! let options = ProcessOptions::default();
//! let mut image = RasterImage::fill(Rgba8::WHITE, 64, 64, PixelFormat::R8G8B8A8, &options).unwrap();
//!
//! Resize::new(32, 32, ResizeMethod::Bicubic).execute(&mut image, &options).unwrap();
//! Mipmaps::new().execute(&mut image, &options).unwrap();
//!
//! assert_eq!(image.mip_levels(), 6);
//! ```
#![warn(
    clippy::correctness,
    clippy::perf,
    clippy::pedantic,
    clippy::inline_always,
    clippy::missing_errors_doc,
    clippy::panic
)]
#![allow(
    clippy::needless_return,
    clippy::similar_names,
    clippy::inline_always,
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::wildcard_imports
)]

pub mod canvas;
pub mod composite;
pub mod crop;
pub mod dither;
pub mod mipmaps;
pub mod resize;
pub mod traits;
