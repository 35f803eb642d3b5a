/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use nanorand::WyRand;
use texel_core::codec::R5G5B5A1_ALPHA_THRESHOLD;
use texel_core::options::ProcessOptions;
use texel_core::pixel_format::PixelFormat;
use texel_core::size::buffer_size;
use texel_image::core_filters::reformat::Reformat;
use texel_image::image::RasterImage;
use texel_image::traits::OperationsTrait;

use crate::{random_image, tolerance};

#[test]
fn test_float_hop_is_stable_for_every_format() {
    let options = ProcessOptions::default();
    let mut rng = WyRand::new_seed(0xc0dec);

    for format in PixelFormat::UNCOMPRESSED {
        let image = random_image(&mut rng, 37, 23, format);

        let mut hopped = Reformat::new(PixelFormat::R32G32B32A32)
            .clone_and_execute(&image, &options)
            .unwrap();
        Reformat::new(format).execute(&mut hopped, &options).unwrap();

        assert_eq!(hopped.format(), format);
        assert_eq!(hopped.pixels().len(), buffer_size(37, 23, format));

        let before = image.to_normalized(&options).unwrap();
        let after = hopped.to_normalized(&options).unwrap();
        let limit = tolerance(format);

        for (a, b) in before.iter().zip(after.iter()) {
            assert!(
                (a.r - b.r).abs() <= limit
                    && (a.g - b.g).abs() <= limit
                    && (a.b - b.b).abs() <= limit
                    && (a.a - b.a).abs() <= limit,
                "{format:?}: {a:?} became {b:?}"
            );
        }
    }
}

#[test]
fn test_rgba8_roundtrip_within_format_rounding() {
    let options = ProcessOptions::default();
    let mut rng = WyRand::new_seed(0x7e57);

    for format in [
        PixelFormat::R8G8B8A8,
        PixelFormat::R8G8B8,
        PixelFormat::R5G6B5,
        PixelFormat::R5G5B5A1,
        PixelFormat::R4G4B4A4,
        PixelFormat::R32G32B32,
        PixelFormat::R32G32B32A32
    ] {
        let image = random_image(&mut rng, 19, 31, PixelFormat::R8G8B8A8);

        let mut converted = Reformat::new(format).clone_and_execute(&image, &options).unwrap();
        Reformat::new(PixelFormat::R8G8B8A8)
            .execute(&mut converted, &options)
            .unwrap();

        // quantizing to the format, then back to 8 bits
        let limit = (tolerance(format) + 0.5 / 255.0) * 255.0;

        for (a, b) in image
            .pixels()
            .chunks_exact(4)
            .zip(converted.pixels().chunks_exact(4))
        {
            for channel in 0..3 {
                let error = f32::from(a[channel].abs_diff(b[channel]));
                assert!(error <= limit, "{format:?}: {a:?} became {b:?}");
            }
            let expected_alpha = match format {
                PixelFormat::R5G5B5A1 if a[3] > R5G5B5A1_ALPHA_THRESHOLD => 255,
                PixelFormat::R5G5B5A1 => 0,
                _ if !format.has_alpha() => 255,
                _ => a[3]
            };
            let error = f32::from(expected_alpha.abs_diff(b[3]));
            assert!(error <= limit, "{format:?}: alpha {a:?} became {b:?}");
        }
    }
}

#[test]
fn test_gray_keeps_luminance() {
    let options = ProcessOptions::default();
    let pixels = vec![255, 0, 0, 255, 0, 255, 0, 255, 0, 0, 255, 255];
    let mut image = RasterImage::from_raw(3, 1, PixelFormat::R8G8B8A8, 1, pixels);

    Reformat::new(PixelFormat::Grayscale)
        .execute(&mut image, &options)
        .unwrap();

    // 0.299, 0.587 and 0.114 of 255
    assert_eq!(image.pixels(), &[76, 150, 29]);
}

#[test]
fn test_compressed_formats_are_sized_not_decoded() {
    let options = ProcessOptions::default();

    for format in PixelFormat::ALL.iter().copied().filter(|x| x.is_compressed()) {
        let size = buffer_size(16, 16, format);
        let image = RasterImage::from_raw(16, 16, format, 1, vec![0xAB; size]);

        assert_eq!(size, 16 * 16 * format.bits_per_pixel() / 8);
        assert!(image.to_normalized(&options).is_err());
        assert!(image.get_pixel(0, 0).is_none());
    }
}
