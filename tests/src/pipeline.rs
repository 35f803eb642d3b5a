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
use texel_core::size::{mip_chain_size, mip_level_count};
use texel_image::core_filters::reformat::Reformat;
use texel_image::image::RasterImage;
use texel_image::traits::OperationsTrait;
use texel_procs::canvas::{ResizeCanvas, ToPowerOfTwo};
use texel_procs::composite::Blit;
use texel_procs::crop::Crop;
use texel_procs::dither::Dither;
use texel_procs::mipmaps::{Mipmaps, ReformatMipmapped};
use texel_procs::resize::{Resize, ResizeMethod};

use crate::random_image;

#[test]
fn test_copy_is_exact() {
    let options = ProcessOptions::default();
    let mut rng = WyRand::new_seed(0xc0b7);

    for format in PixelFormat::UNCOMPRESSED {
        let image = random_image(&mut rng, 11, 9, format);
        let copy = image.try_clone(&options).unwrap();

        assert_eq!(copy.pixels(), image.pixels());
        assert_eq!(copy, image.clone());
    }
}

#[test]
fn test_buffer_size_invariant_holds_after_operations() {
    let options = ProcessOptions::default();
    let mut rng = WyRand::new_seed(0x512e);

    for format in PixelFormat::UNCOMPRESSED {
        let mut image = random_image(&mut rng, 13, 6, format);

        let check = |image: &RasterImage| {
            let (w, h) = image.dimensions();
            assert_eq!(
                image.pixels().len(),
                mip_chain_size(w, h, image.format(), image.mip_levels()),
                "{format:?}"
            );
        };

        Mipmaps::new().execute(&mut image, &options).unwrap();
        check(&image);
        Resize::new(7, 10, ResizeMethod::Bilinear)
            .execute(&mut image, &options)
            .unwrap();
        check(&image);
        Crop::new(Rect::new(1, 2, 5, 5))
            .execute(&mut image, &options)
            .unwrap();
        check(&image);
        ToPowerOfTwo::new(Rgba8::BLANK)
            .execute(&mut image, &options)
            .unwrap();
        check(&image);
        Mipmaps::new().execute(&mut image, &options).unwrap();
        check(&image);
        ReformatMipmapped::new(PixelFormat::R4G4B4A4)
            .execute(&mut image, &options)
            .unwrap();
        check(&image);
        assert_eq!(image.mip_levels(), 4);
    }
}

#[test]
fn test_opaque_blit_reproduces_source() {
    let options = ProcessOptions::default();
    let mut rng = WyRand::new_seed(0xb117);

    for format in [
        PixelFormat::Grayscale,
        PixelFormat::R8G8B8,
        PixelFormat::R5G6B5,
        PixelFormat::R8G8B8A8,
        PixelFormat::R32G32B32
    ] {
        let mut source = random_image(&mut rng, 10, 7, format);

        if format.has_alpha() {
            let mut pixels = source.clone().into_pixels();
            pixels.chunks_exact_mut(4).for_each(|x| x[3] = 255);
            source = RasterImage::from_raw(10, 7, format, 1, pixels);
        }
        let mut destination = random_image(&mut rng, 10, 7, format);

        Blit::new(
            &source,
            Rect::new(0, 0, 10, 7),
            Rect::new(0, 0, 10, 7),
            Rgba8::WHITE
        )
        .execute(&mut destination, &options)
        .unwrap();

        assert_eq!(destination.pixels(), source.pixels(), "{format:?}");
    }
}

#[test]
fn test_mipmap_level_count() {
    let options = ProcessOptions::default();
    let mut rng = WyRand::new_seed(0x317);

    let mut image = random_image(&mut rng, 8, 8, PixelFormat::R8G8B8A8);
    Mipmaps::new().execute(&mut image, &options).unwrap();

    assert_eq!(image.mip_levels(), 4);
    assert_eq!(image.pixels().len(), (64 + 16 + 4 + 1) * 4);

    for _ in 0..20 {
        let w = rng.generate_range(1_usize..70);
        let h = rng.generate_range(1_usize..70);
        let mut image = random_image(&mut rng, w, h, PixelFormat::GrayAlpha);

        Mipmaps::new().execute(&mut image, &options).unwrap();
        assert_eq!(image.mip_levels(), mip_level_count(w, h));
        assert_eq!(image.level_dimensions(image.mip_levels() - 1), (1, 1));
    }
}

#[test]
fn test_dither_result_formats() {
    let options = ProcessOptions::default();
    let mut rng = WyRand::new_seed(0xd17e);

    for (bits, format) in [
        ((5, 6, 5, 0), PixelFormat::R5G6B5),
        ((5, 5, 5, 1), PixelFormat::R5G5B5A1),
        ((4, 4, 4, 4), PixelFormat::R4G4B4A4),
        ((6, 6, 4, 0), PixelFormat::Generic16)
    ] {
        let mut image = random_image(&mut rng, 16, 9, PixelFormat::R8G8B8);
        Dither::new(bits.0, bits.1, bits.2, bits.3)
            .execute(&mut image, &options)
            .unwrap();

        assert_eq!(image.format(), format);
        assert_eq!(image.pixels().len(), 16 * 9 * 2);
    }
}

#[test]
fn test_empty_images_are_left_alone() {
    let options = ProcessOptions::default().set_strict_mode(true);
    let empty = RasterImage::from_raw(0, 0, PixelFormat::R8G8B8A8, 1, Vec::new());
    let source = RasterImage::fill(Rgba8::WHITE, 2, 2, PixelFormat::R8G8B8A8, &options).unwrap();

    let operations: Vec<Box<dyn OperationsTrait + '_>> = vec![
        Box::new(Reformat::new(PixelFormat::R5G6B5)),
        Box::new(Crop::new(Rect::new(0, 0, 1, 1))),
        Box::new(Resize::new(3, 3, ResizeMethod::Bicubic)),
        Box::new(ResizeCanvas::new(3, 3, 1, 1, Rgba8::BLACK)),
        Box::new(ToPowerOfTwo::new(Rgba8::BLACK)),
        Box::new(Mipmaps::new()),
        Box::new(Blit::at(&source, 0, 0, Rgba8::WHITE)),
        Box::new(Dither::new(5, 6, 5, 0))
    ];

    for operation in operations {
        let mut image = empty.clone();
        operation.execute(&mut image, &options).unwrap();
        assert_eq!(image, empty, "{}", operation.name());
    }
}
