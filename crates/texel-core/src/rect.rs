/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Integer rectangles
//!
//! Rectangles are signed since callers routinely describe regions
//! hanging off an image edge, operations clamp them before use.

/// A rectangle with its origin at the top left
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Rect {
    pub x:      i32,
    pub y:      i32,
    pub width:  i32,
    pub height: i32
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Rect {
        Rect {
            x,
            y,
            width,
            height
        }
    }

    /// A rectangle covering a whole `width` x `height` image
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub const fn from_dimensions(width: usize, height: usize) -> Rect {
        Rect::new(0, 0, width as i32, height as i32)
    }

    /// Return true if the rectangle covers no pixels
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Clamp this rectangle into a `width` x `height` image
    ///
    /// A negative origin shrinks the matching dimension and moves the
    /// origin to zero, a rectangle extending past the far edge is truncated
    /// to the remaining extent.
    ///
    /// Returns `None` if nothing of the rectangle lies within the image.
    ///
    /// ```
    /// use texel_core::rect::Rect;
    /// let clamped = Rect::new(-2, 1, 6, 10).clamp_to(4, 4).unwrap();
    /// assert_eq!(clamped, Rect::new(0, 1, 4, 3));
    /// assert!(Rect::new(5, 0, 2, 2).clamp_to(4, 4).is_none());
    /// ```
    pub fn clamp_to(&self, width: usize, height: usize) -> Option<Rect> {
        let (x, w) = clamp_span(self.x, self.width, width)?;
        let (y, h) = clamp_span(self.y, self.height, height)?;

        Some(Rect::new(x, y, w, h))
    }

    /// Return the rect as unsigned `(x, y, width, height)`
    ///
    /// Only meaningful after [`Rect::clamp_to`]
    #[allow(clippy::cast_sign_loss)]
    pub const fn to_usize(&self) -> (usize, usize, usize, usize) {
        (
            self.x as usize,
            self.y as usize,
            self.width as usize,
            self.height as usize
        )
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn clamp_span(start: i32, len: i32, limit: usize) -> Option<(i32, i32)> {
    // i64 holds any sum of two i32 values
    let limit = i64::try_from(limit).unwrap_or(i64::MAX).min(i64::from(i32::MAX));
    let mut start = i64::from(start);
    let mut len = i64::from(len);

    if start < 0 {
        len += start;
        start = 0;
    }
    if start >= limit {
        return None;
    }
    len = len.min(limit - start);

    if len <= 0 {
        return None;
    }
    Some((start as i32, len as i32))
}
