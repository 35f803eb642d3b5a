/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Transient color representations
//!
//! Two representations exist
//!
//! - [`RgbaF32`]: normalized color, every channel in `0.0..=1.0`. Produced by
//!   the pixel codec and consumed by its encoder and by compositing.
//! - [`Rgba8`]: four bytes, used when a whole image has to be addressed at
//!   byte granularity (resampling, dithering).
//!
//! Neither is ever stored inside an image.
use bytemuck::{Pod, Zeroable};

/// A color with 8 bits per channel
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Pod, Zeroable)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8
}

/// A normalized color, channels are expected to be in `0.0..=1.0`
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct RgbaF32 {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32
}

impl Rgba8 {
    pub const WHITE: Rgba8 = Rgba8::new(255, 255, 255, 255);
    pub const BLACK: Rgba8 = Rgba8::new(0, 0, 0, 255);
    /// Fully transparent black
    pub const BLANK: Rgba8 = Rgba8::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Rgba8 {
        Rgba8 { r, g, b, a }
    }

    /// Convert to a normalized color by dividing every channel by 255
    pub fn to_normalized(self) -> RgbaF32 {
        RgbaF32 {
            r: f32::from(self.r) / 255.0,
            g: f32::from(self.g) / 255.0,
            b: f32::from(self.b) / 255.0,
            a: f32::from(self.a) / 255.0
        }
    }

    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[u8; 4]> for Rgba8 {
    fn from(value: [u8; 4]) -> Self {
        Rgba8::new(value[0], value[1], value[2], value[3])
    }
}

impl RgbaF32 {
    pub const WHITE: RgbaF32 = RgbaF32::new(1.0, 1.0, 1.0, 1.0);
    pub const BLANK: RgbaF32 = RgbaF32::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> RgbaF32 {
        RgbaF32 { r, g, b, a }
    }

    /// Quantize to 8 bits per channel
    ///
    /// Channels are clamped to `0.0..=1.0` and rounded to the nearest integer
    pub fn to_rgba8(self) -> Rgba8 {
        Rgba8 {
            r: quantize(self.r, 255) as u8,
            g: quantize(self.g, 255) as u8,
            b: quantize(self.b, 255) as u8,
            a: quantize(self.a, 255) as u8
        }
    }

    /// Multiply every channel with the matching channel of `other`
    #[must_use]
    pub fn modulate(self, other: RgbaF32) -> RgbaF32 {
        RgbaF32 {
            r: self.r * other.r,
            g: self.g * other.g,
            b: self.b * other.b,
            a: self.a * other.a
        }
    }

    /// Rec. 601 luma of the color channels, alpha is ignored
    pub fn luminance(self) -> f32 {
        self.r * 0.299 + self.g * 0.587 + self.b * 0.114
    }
}

impl From<Rgba8> for RgbaF32 {
    fn from(value: Rgba8) -> Self {
        value.to_normalized()
    }
}

/// Map a normalized value to `0..=max` rounding to nearest
///
/// Values outside `0.0..=1.0` (and NaN) are clamped first, which keeps the
/// `+0.5` truncation a correct round-half-up.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn quantize(value: f32, max: u16) -> u16 {
    let clamped = if value > 0.0 { value.min(1.0) } else { 0.0 };
    (clamped * f32::from(max) + 0.5) as u16
}
