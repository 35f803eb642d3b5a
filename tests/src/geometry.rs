/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use nanorand::{Rng, WyRand};
use texel_core::color::Rgba8;
use texel_core::options::ProcessOptions;
use texel_core::pixel_format::PixelFormat;
use texel_core::rect::Rect;
use texel_image::image::RasterImage;
use texel_image::traits::OperationsTrait;
use texel_procs::canvas::ResizeCanvas;
use texel_procs::crop::Crop;
use texel_procs::resize::{Resize, ResizeMethod};

use crate::random_image;

#[test]
fn test_crop_matches_source_pixels() {
    let options = ProcessOptions::default();
    let mut rng = WyRand::new_seed(0xc409);

    for format in PixelFormat::UNCOMPRESSED {
        let image = random_image(&mut rng, 4, 4, format);
        let cropped = Crop::new(Rect::new(1, 1, 2, 2))
            .clone_and_execute(&image, &options)
            .unwrap();

        assert_eq!(cropped.dimensions(), (2, 2));
        for y in 0..2 {
            for x in 0..2 {
                assert_eq!(cropped.get_pixel(x, y), image.get_pixel(x + 1, y + 1));
            }
        }
    }
}

#[test]
fn test_random_crops_stay_in_bounds() {
    let options = ProcessOptions::default();
    let mut rng = WyRand::new_seed(0x5a1e);
    let image = random_image(&mut rng, 29, 17, PixelFormat::R8G8B8);

    for _ in 0..200 {
        let rect = Rect::new(
            rng.generate_range(-40_i32..40),
            rng.generate_range(-40_i32..40),
            rng.generate_range(-5_i32..60),
            rng.generate_range(-5_i32..60)
        );
        let cropped = Crop::new(rect).clone_and_execute(&image, &options).unwrap();

        match rect.clamp_to(29, 17) {
            Some(clamped) => {
                let (x, y, w, h) = clamped.to_usize();
                assert_eq!(cropped.dimensions(), (w, h));
                assert_eq!(cropped.get_pixel(0, 0), image.get_pixel(x, y));
                assert_eq!(cropped.get_pixel(w - 1, h - 1), image.get_pixel(x + w - 1, y + h - 1));
            }
            None => assert_eq!(cropped, image)
        }
    }
}

#[test]
fn test_nearest_is_deterministic() {
    let options = ProcessOptions::default();
    let pixels = (1..=16).collect();
    let image = RasterImage::from_raw(4, 4, PixelFormat::Grayscale, 1, pixels);

    let first = Resize::new(2, 2, ResizeMethod::Nearest)
        .clone_and_execute(&image, &options)
        .unwrap();
    let second = Resize::new(2, 2, ResizeMethod::Nearest)
        .clone_and_execute(&image, &options)
        .unwrap();

    assert_eq!(first.pixels(), &[1, 3, 9, 11]);
    assert_eq!(first, second);
}

#[test]
fn test_nearest_only_copies_existing_pixels() {
    let options = ProcessOptions::default();
    let mut rng = WyRand::new_seed(0x4ea7);
    let image = random_image(&mut rng, 7, 5, PixelFormat::R5G5B5A1);

    for (w, h) in [(1, 1), (3, 2), (14, 10), (100, 3)] {
        let resized = Resize::new(w, h, ResizeMethod::Nearest)
            .clone_and_execute(&image, &options)
            .unwrap();

        for pixel in resized.pixels().chunks_exact(2) {
            assert!(image.pixels().chunks_exact(2).any(|x| x == pixel));
        }
    }
}

#[test]
fn test_canvas_offset_sign_combinations() {
    let options = ProcessOptions::default();
    let mut rng = WyRand::new_seed(0xca7a5);
    // opaque, so compositing over the fill reproduces the source
    let mut pixels = random_image(&mut rng, 6, 5, PixelFormat::R8G8B8A8).into_pixels();
    pixels.chunks_exact_mut(4).for_each(|x| x[3] = 255);
    let image = RasterImage::from_raw(6, 5, PixelFormat::R8G8B8A8, 1, pixels);
    let fill = Rgba8::new(1, 2, 3, 4);

    for (new_w, new_h) in [(3, 3), (6, 5), (9, 8), (4, 7)] {
        for offset_x in [-4, -1, 0, 2, 5] {
            for offset_y in [-3, 0, 1, 4] {
                let canvas = ResizeCanvas::new(new_w, new_h, offset_x, offset_y, fill)
                    .clone_and_execute(&image, &options)
                    .unwrap();

                assert_eq!(canvas.dimensions(), (new_w, new_h));
                assert_eq!(canvas.mip_levels(), 1);

                for y in 0..new_h {
                    for x in 0..new_w {
                        let src_x = x as i32 - offset_x;
                        let src_y = y as i32 - offset_y;

                        let expected = if (0..6).contains(&src_x) && (0..5).contains(&src_y) {
                            image.get_pixel(src_x as usize, src_y as usize)
                        } else {
                            Some(fill.to_normalized())
                        };
                        assert_eq!(
                            canvas.get_pixel(x, y).map(|c| c.to_rgba8()),
                            expected.map(|c| c.to_rgba8()),
                            "canvas {new_w}x{new_h} offset ({offset_x},{offset_y}) at ({x},{y})"
                        );
                    }
                }
            }
        }
    }
}
