/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::ops::Range;

/// Nearest neighbour resize of interleaved pixels
///
/// Source coordinates are computed in 16.16 fixed point, using a ratio of
/// `(in << 16) / out + 1` per axis. The bias makes downscales by an integer
/// factor land on the first pixel of each group, it is clamped to the last
/// row and column so large upscales never read past the image.
///
/// # Arguments
/// - in_image: Pixels of the source image, `components` elements per pixel
/// - out_image: Output pixels, `out_width * out_height * components` elements
/// - components: Number of elements making up one pixel
pub fn resize_nearest<T: Copy>(
    in_image: &[T], out_image: &mut [T], components: usize, in_width: usize, in_height: usize,
    out_width: usize, out_height: usize
) {
    resize_nearest_region(
        in_image,
        out_image,
        components,
        (in_width, in_height),
        (out_width, out_height),
        0..out_width,
        0..out_height
    );
}

/// Nearest neighbour resize producing only a window of the output
///
/// `out_image` receives the pixels at `x_range` and `y_range` of an
/// `out_dims` sized resize, row by row, `x_range.len()` pixels per row.
/// Ranges must lie inside `out_dims`.
pub fn resize_nearest_region<T: Copy>(
    in_image: &[T], out_image: &mut [T], components: usize, in_dims: (usize, usize),
    out_dims: (usize, usize), x_range: Range<usize>, y_range: Range<usize>
) {
    let ((in_width, in_height), (out_width, out_height)) = (in_dims, out_dims);

    if in_width == 0 || in_height == 0 || out_width == 0 || out_height == 0 || components == 0 {
        return;
    }
    if x_range.is_empty() || x_range.end > out_width || y_range.end > out_height {
        return;
    }
    let x_ratio = ((in_width << 16) / out_width) + 1;
    let y_ratio = ((in_height << 16) / out_height) + 1;

    let in_stride = in_width * components;

    for (y, out_row) in y_range.zip(out_image.chunks_exact_mut(x_range.len() * components)) {
        let src_y = (y.saturating_mul(y_ratio) >> 16).min(in_height - 1);

        let Some(in_row) = in_image.get(src_y * in_stride..(src_y + 1) * in_stride) else {
            return;
        };

        for (x, out_pixel) in x_range.clone().zip(out_row.chunks_exact_mut(components)) {
            let src_x = (x.saturating_mul(x_ratio) >> 16).min(in_width - 1);

            if let Some(pixel) = in_row.get(src_x * components..(src_x + 1) * components) {
                out_pixel.copy_from_slice(pixel);
            }
        }
    }
}
