/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use nanorand::Rng;
use texel_core::options::ProcessOptions;
use texel_core::pixel_format::PixelFormat;
use texel_image::image::RasterImage;

/// Width and height of the benchmark images
pub const BENCH_DIMENSIONS: (usize, usize) = (1920, 1080);

/// Create an RGBA image filled with noise, then convert it to `format`
pub fn noise_image(format: PixelFormat) -> RasterImage {
    let (width, height) = BENCH_DIMENSIONS;
    let mut pixels = vec![0_u8; width * height * 4];
    nanorand::WyRand::new_seed(0xbe4c).fill(&mut pixels);

    let mut image = RasterImage::from_raw(width, height, PixelFormat::R8G8B8A8, 1, pixels);

    if format != PixelFormat::R8G8B8A8 {
        use texel_image::core_filters::reformat::Reformat;
        use texel_image::traits::OperationsTrait;

        Reformat::new(format)
            .execute(&mut image, &ProcessOptions::default())
            .unwrap();
    }
    image
}
