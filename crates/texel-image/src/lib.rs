/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Raster images stored in packed pixel formats
//!
//! This crate contains the [`RasterImage`](image::RasterImage) type, the
//! [`OperationsTrait`](traits::OperationsTrait) every transform implements and the
//! [`Reformat`](core_filters::reformat::Reformat) operation which moves an image
//! between uncompressed pixel formats.
//!
//! # Example
//! - Convert an RGBA image to RGB565
//! ```
//! use texel_core::color::Rgba8;
//! use texel_core::options::ProcessOptions;
//! use texel_core::pixel_format::PixelFormat;
//! use texel_image::core_filters::reformat::Reformat;
//! use texel_image::image::RasterImage;
//! use texel_image::traits::OperationsTrait;
//!
//! let options = ProcessOptions::default();
//! let mut image = RasterImage::fill(Rgba8::WHITE, 16, 16, PixelFormat::R8G8B8A8, &options).unwrap();
//! Reformat::new(PixelFormat::R5G6B5).execute(&mut image, &options).unwrap();
//! assert_eq!(image.pixels().len(), 16 * 16 * 2);
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
    clippy::missing_errors_doc
)]

pub use texel_core;

pub mod core_filters;
pub mod errors;
pub mod image;
mod serde;
pub mod traits;
