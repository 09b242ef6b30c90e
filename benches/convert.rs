#[path = "../util/util.rs"]
mod util;

use util::{bitmaps, grid_sizes};

use std::time::Duration;

use criterion::{
    criterion_group, criterion_main, measurement::WallTime, Bencher, BenchmarkId, Criterion,
    SamplingMode,
};
use pixelette::{
    convert_batch_par, export, resample, Bitmap, ConversionOptions, GridSize, PixelArtPipeline,
};

fn bench(
    c: &mut Criterion,
    group: &str,
    mut f: impl FnMut(&mut Bencher<WallTime>, &(&Bitmap, GridSize)),
) {
    let mut group = c.benchmark_group(group);
    group
        .sample_size(30)
        .noise_threshold(0.05)
        .sampling_mode(SamplingMode::Flat)
        .warm_up_time(Duration::from_millis(500));

    for (path, bitmap) in bitmaps() {
        for size in grid_sizes() {
            group.bench_with_input(
                BenchmarkId::new(path, format!("{size}x{size}")),
                &(bitmap, size),
                &mut f,
            );
        }
    }
}

fn resample_crop(c: &mut Criterion) {
    bench(c, "resample_crop", |b, &(bitmap, size)| {
        let options = ConversionOptions::new(size);
        b.iter(|| resample(bitmap, size, options.aspect_policy()));
    });
}

fn convert_single(c: &mut Criterion) {
    bench(c, "convert_single", |b, &(bitmap, size)| {
        let pipeline = PixelArtPipeline::new(bitmap, ConversionOptions::new(size));
        b.iter(|| pipeline.convert());
    });
}

fn convert_par(c: &mut Criterion) {
    bench(c, "convert_par", |b, &(bitmap, size)| {
        let pipeline = PixelArtPipeline::new(bitmap, ConversionOptions::new(size));
        b.iter(|| pipeline.convert_par());
    });
}

fn convert_presets_par(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert_presets_par");
    group.sample_size(20).sampling_mode(SamplingMode::Flat);

    let options = GridSize::PRESETS.map(ConversionOptions::new);
    for (path, bitmap) in bitmaps() {
        group.bench_with_input(BenchmarkId::from_parameter(path), bitmap, |b, bitmap| {
            b.iter(|| convert_batch_par(bitmap, &options));
        });
    }
}

fn rasterize(c: &mut Criterion) {
    bench(c, "rasterize", |b, &(bitmap, size)| {
        let grid = PixelArtPipeline::new(bitmap, ConversionOptions::new(size)).convert().grid;
        let options = export::ExportOptions::for_grid(size).grid_lines(true);
        b.iter(|| export::rasterize(&grid, &options));
    });
}

fn rasterize_par(c: &mut Criterion) {
    bench(c, "rasterize_par", |b, &(bitmap, size)| {
        let grid = PixelArtPipeline::new(bitmap, ConversionOptions::new(size)).convert().grid;
        let options = export::ExportOptions::for_grid(size).grid_lines(true);
        b.iter(|| export::rasterize_par(&grid, &options));
    });
}

criterion_group!(
    benches,
    resample_crop,
    convert_single,
    convert_par,
    convert_presets_par,
    rasterize,
    rasterize_par,
);
criterion_main!(benches);
