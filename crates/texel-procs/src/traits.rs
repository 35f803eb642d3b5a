/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

/// Sample types the resampler can write
pub trait NumOps<T> {
    /// Convert from a resampled value, rounding and saturating to the
    /// range of `T`
    fn from_f32(value: f32) -> T;
}

impl NumOps<u8> for u8 {
    #[inline(always)]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn from_f32(value: f32) -> u8 {
        value.round().clamp(0.0, 255.0) as u8
    }
}
