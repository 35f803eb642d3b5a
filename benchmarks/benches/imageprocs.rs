/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use texel_benches::noise_image;
use texel_core::color::Rgba8;
use texel_core::options::ProcessOptions;
use texel_core::pixel_format::PixelFormat;
use texel_core::rect::Rect;
use texel_image::image::RasterImage;
use texel_image::traits::OperationsTrait;
use texel_procs::composite::Blit;
use texel_procs::dither::Dither;
use texel_procs::mipmaps::Mipmaps;
use texel_procs::resize::{Resize, ResizeMethod};

fn bench_inner<T>(c: &mut Criterion, name: &str, texel_fn: T)
where
    T: Fn(&RasterImage)
{
    let image = noise_image(PixelFormat::R8G8B8A8);

    let mut group = c.benchmark_group(name);

    group.throughput(Throughput::Bytes(image.pixels().len() as u64));

    group.bench_function("texel", |b| {
        b.iter(|| {
            texel_fn(&image);
            black_box(());
        })
    });
}

fn texel_resize_bench(input: &RasterImage, method: ResizeMethod) {
    let (w, h) = input.dimensions();
    let im = Resize::new(w / 2, h / 2, method)
        .clone_and_execute(input, &ProcessOptions::default())
        .unwrap();
    black_box(im);
}

fn bench_resize_nearest(c: &mut Criterion) {
    bench_inner(c, "imageprocs: resize-nearest", |c| {
        texel_resize_bench(c, ResizeMethod::Nearest)
    });
}

fn bench_resize_bicubic(c: &mut Criterion) {
    bench_inner(c, "imageprocs: resize-cubic-kernel", |c| {
        texel_resize_bench(c, ResizeMethod::Bicubic)
    });
}

fn bench_mipmaps(c: &mut Criterion) {
    bench_inner(c, "imageprocs: mipmaps", |input| {
        let im = Mipmaps::new()
            .clone_and_execute(input, &ProcessOptions::default())
            .unwrap();
        black_box(im);
    });
}

fn bench_dither(c: &mut Criterion) {
    bench_inner(c, "imageprocs: dither-565", |input| {
        let im = Dither::new(5, 6, 5, 0)
            .clone_and_execute(input, &ProcessOptions::default())
            .unwrap();
        black_box(im);
    });
}

fn bench_blit(c: &mut Criterion) {
    let options = ProcessOptions::default();
    let overlay = RasterImage::fill(Rgba8::new(200, 10, 10, 128), 512, 512, PixelFormat::R8G8B8A8, &options).unwrap();

    bench_inner(c, "imageprocs: blit-512", |input| {
        let im = Blit::new(&overlay, Rect::new(0, 0, 512, 512), Rect::new(100, 100, 512, 512), Rgba8::WHITE)
            .clone_and_execute(input, &options)
            .unwrap();
        black_box(im);
    });
}

criterion_group!(name=benches;
      config={
      let c = Criterion::default();
        c.measurement_time(Duration::from_secs(10))
      };
    targets=bench_resize_nearest,bench_resize_bicubic,bench_mipmaps,bench_dither,bench_blit);

criterion_main!(benches);
