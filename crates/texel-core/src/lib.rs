/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Core routines shared by the texel crates
//!
//! This crate provides the leaf building blocks used by the
//! image and processing crates
//!
//! It currently contains
//!
//! - The closed set of packed [pixel formats](pixel_format::PixelFormat)
//! - Per-format pixel [decode and encode](codec) routines
//! - Buffer [size calculation](size) for single images and mip chains
//! - [Processing options](options::ProcessOptions), the allocation capability
//!   every operation receives
//! - Logging macros that forward to the `log` crate when enabled
//!
//! This library is `#[no_std]` with `alloc` needed for `Vec`
//!
//! # Features
//!  - `std`: Implements `std::error::Error` for the error types
//!
//!  - `serde`: Enables serializing of some of the data structures
//!     present in the crate
//!
//!  - `log`: Forwards the logging macros to the `log` crate
#![cfg_attr(not(feature = "std"), no_std)]
#![macro_use]
extern crate alloc;

pub mod codec;
pub mod color;
pub mod log;
pub mod options;
pub mod pixel_format;
pub mod rect;
pub mod serde;
pub mod size;
