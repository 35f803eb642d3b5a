/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Separable convolution resampler
//!
//! Resizing runs a horizontal pass into a float scratch buffer followed by
//! a vertical pass into the output. Kernel taps are computed once per
//! output row and column.
//!
//! When minifying, the kernel is stretched by the scale factor so every
//! source pixel contributes to some output pixel.
use std::ops::Range;

use texel_core::options::ProcessOptions;
use texel_image::errors::ImageErrors;

use crate::resize::ResizeMethod;
use crate::traits::NumOps;

fn get_kernel_fn_and_radius(method: ResizeMethod, ratio: f32) -> (fn(f32) -> f32, f32) {
    match method {
        ResizeMethod::Nearest => (box_kernel, 0.5),
        ResizeMethod::Bilinear => (bilinear_kernel, 1.0),
        // Mitchell keeps ringing down when shrinking, Catmull-Rom keeps
        // edges sharp when enlarging
        ResizeMethod::Bicubic if ratio > 1.0 => (mitchell_kernel, 2.0),
        ResizeMethod::Bicubic => (catmull_rom_kernel, 2.0),
        ResizeMethod::Mitchell => (mitchell_kernel, 2.0),
        ResizeMethod::CatmullRom => (catmull_rom_kernel, 2.0),
        ResizeMethod::Lanczos3 => (lanczos_kernel::<3>, 3.0)
    }
}

pub(crate) struct PrecomputedKernels {
    pub horizontal: Option<Vec<ConvKernel>>,
    pub vertical:   Option<Vec<ConvKernel>>
}

impl PrecomputedKernels {
    pub fn new(
        in_width: usize, in_height: usize, out_width: usize, out_height: usize,
        method: ResizeMethod
    ) -> Self {
        Self::for_region(
            (in_width, in_height),
            (out_width, out_height),
            0..out_width,
            0..out_height,
            method
        )
    }

    /// Kernels producing only `x_range` and `y_range` of an `out_dims`
    /// sized resize
    ///
    /// An axis is left as `None` only when it is neither scaled nor windowed.
    pub fn for_region(
        in_dims: (usize, usize), out_dims: (usize, usize), x_range: Range<usize>,
        y_range: Range<usize>, method: ResizeMethod
    ) -> Self {
        PrecomputedKernels {
            horizontal: axis_kernels(in_dims.0, out_dims.0, x_range, method),
            vertical:   axis_kernels(in_dims.1, out_dims.1, y_range, method)
        }
    }
}

fn axis_kernels(
    in_size: usize, out_size: usize, range: Range<usize>, method: ResizeMethod
) -> Option<Vec<ConvKernel>> {
    if in_size != out_size {
        return Some(precompute_kernel_span(in_size, out_size, range, method));
    }
    if range == (0..out_size) {
        return None;
    }
    // same size, the window is a plain copy of the matching pixels
    Some(
        range
            .map(|pos| ConvKernel {
                weights:   vec![1.0],
                start_idx: pos
            })
            .collect()
    )
}

/// Taps for one output pixel
#[derive(Clone, Debug)]
pub(crate) struct ConvKernel {
    weights:   Vec<f32>,
    start_idx: usize
}

impl ConvKernel {
    #[inline]
    fn apply(&self, mut sample: impl FnMut(usize) -> f32) -> f32 {
        self.weights
            .iter()
            .enumerate()
            .map(|(i, &weight)| sample(self.start_idx + i) * weight)
            .sum()
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap
)]
fn precompute_kernel_span(
    in_size: usize, out_size: usize, range: Range<usize>, method: ResizeMethod
) -> Vec<ConvKernel> {
    if in_size == 0 || out_size == 0 {
        return Vec::new();
    }
    let ratio = in_size as f32 / out_size as f32;
    let (kernel_fn, radius) = get_kernel_fn_and_radius(method, ratio);

    let scale = ratio.max(1.0);
    let support = radius * scale;
    let last = in_size as i64 - 1;

    let mut kernels = Vec::with_capacity(range.len());

    for out_pos in range {
        let src_pos = (out_pos as f32 + 0.5) * ratio - 0.5;

        let start = ((src_pos - support).ceil() as i64).clamp(0, last);
        let end = ((src_pos + support).floor() as i64).clamp(start, last);

        let mut weights = Vec::with_capacity((end - start + 1) as usize);
        let mut weight_sum = 0.0;

        for i in start..=end {
            let weight = kernel_fn((i as f32 - src_pos) / scale);
            weights.push(weight);
            weight_sum += weight;
        }

        if weight_sum.abs() > f32::EPSILON {
            let inv_sum = 1.0 / weight_sum;
            weights.iter_mut().for_each(|x| *x *= inv_sum);
        } else {
            // every tap fell on a zero of the kernel, fall back to the closest pixel
            let nearest = (src_pos.round() as i64).clamp(start, end);
            weights.iter_mut().for_each(|x| *x = 0.0);
            weights[(nearest - start) as usize] = 1.0;
        }

        kernels.push(ConvKernel {
            weights,
            start_idx: start as usize
        });
    }

    kernels
}

#[cfg(test)]
fn precompute_kernels(in_size: usize, out_size: usize, method: ResizeMethod) -> Vec<ConvKernel> {
    precompute_kernel_span(in_size, out_size, 0..out_size, method)
}

/// Resample a single channel
///
/// # Arguments
/// - in_channel: `in_width * in_height` samples
/// - out_channel: `out_width * out_height` samples
/// - kernels: taps from [`PrecomputedKernels`] with one kernel per output
///   column and row, for a window these are the window dimensions
///
/// # Errors
/// If the scratch buffer could not be allocated
pub(crate) fn resample_separable<T>(
    in_channel: &[T], out_channel: &mut [T], in_width: usize, in_height: usize, out_width: usize,
    out_height: usize, kernels: &PrecomputedKernels, options: &ProcessOptions
) -> Result<(), ImageErrors>
where
    T: Copy + NumOps<T>,
    f32: From<T>
{
    if kernels.horizontal.is_none() && kernels.vertical.is_none() {
        out_channel.copy_from_slice(in_channel);
        return Ok(());
    }

    // rows into the scratch buffer, widths change here
    let mut temp_buffer = options.allocate(in_height * out_width, 0.0_f32)?;

    for (in_row, out_row) in in_channel
        .chunks_exact(in_width)
        .zip(temp_buffer.chunks_exact_mut(out_width))
    {
        match &kernels.horizontal {
            Some(h_kernels) => {
                for (out_pixel, kernel) in out_row.iter_mut().zip(h_kernels.iter()) {
                    *out_pixel = kernel.apply(|x| in_row.get(x).map_or(0.0, |&p| f32::from(p)));
                }
            }
            None => {
                for (out_pixel, &pixel) in out_row.iter_mut().zip(in_row.iter()) {
                    *out_pixel = f32::from(pixel);
                }
            }
        }
    }

    // columns out of the scratch buffer
    match &kernels.vertical {
        Some(v_kernels) => {
            for (out_row, kernel) in out_channel
                .chunks_exact_mut(out_width)
                .take(out_height)
                .zip(v_kernels.iter())
            {
                for (out_x, out_pixel) in out_row.iter_mut().enumerate() {
                    let sum = kernel.apply(|y| {
                        temp_buffer
                            .get(y * out_width + out_x)
                            .copied()
                            .unwrap_or(0.0)
                    });
                    *out_pixel = T::from_f32(sum);
                }
            }
        }
        None => {
            for (out_pixel, &value) in out_channel.iter_mut().zip(temp_buffer.iter()) {
                *out_pixel = T::from_f32(value);
            }
        }
    }
    Ok(())
}

/// Windowed sinc with `A` lobes
#[inline]
#[allow(clippy::cast_precision_loss)]
fn lanczos_kernel<const A: i32>(x: f32) -> f32 {
    let x = x.abs();

    if x < 1e-6 {
        return 1.0;
    }

    let a = A as f32;

    if x < a {
        let pi_x = std::f32::consts::PI * x;
        let pi_x_a = pi_x / a;
        (pi_x.sin() / pi_x) * (pi_x_a.sin() / pi_x_a)
    } else {
        0.0
    }
}

/// Mitchell-Netravali cubic with parameters `b` and `c`
#[inline]
fn bicubic_kernel(x: f32, b: f32, c: f32) -> f32 {
    let x = x.abs();

    if x < 1.0 {
        let x2 = x * x;
        let x3 = x2 * x;
        ((12.0 - 9.0 * b - 6.0 * c) * x3 + (-18.0 + 12.0 * b + 6.0 * c) * x2 + (6.0 - 2.0 * b))
            / 6.0
    } else if x < 2.0 {
        let x2 = x * x;
        let x3 = x2 * x;
        ((-b - 6.0 * c) * x3
            + (6.0 * b + 30.0 * c) * x2
            + (-12.0 * b - 48.0 * c) * x
            + (8.0 * b + 24.0 * c))
            / 6.0
    } else {
        0.0
    }
}

fn mitchell_kernel(x: f32) -> f32 {
    bicubic_kernel(x, 1.0 / 3.0, 1.0 / 3.0)
}

fn catmull_rom_kernel(x: f32) -> f32 {
    bicubic_kernel(x, 0.0, 0.5)
}

#[inline]
fn bilinear_kernel(x: f32) -> f32 {
    let x = x.abs();

    if x < 1.0 {
        1.0 - x
    } else {
        0.0
    }
}

#[inline]
fn box_kernel(x: f32) -> f32 {
    if x.abs() <= 0.5 {
        1.0
    } else {
        0.0
    }
}
