#[path = "../util/util.rs"]
mod util;

use util::{bitmaps, grid_sizes};

use std::time::Duration;

use criterion::{
    criterion_group, criterion_main, measurement::WallTime, Bencher, BenchmarkId, Criterion,
    SamplingMode,
};
use palette::Srgba;
use pixelette::{
    map_to_grid, map_to_grid_par, quantize, resample, AspectPolicy, BucketCounts, GridSize,
    PaletteSize,
};

fn bench(
    c: &mut Criterion,
    group: &str,
    mut f: impl FnMut(&mut Bencher<WallTime>, &(GridSize, Vec<Srgba<u8>>)),
) {
    let mut group = c.benchmark_group(group);
    group
        .sample_size(50)
        .noise_threshold(0.05)
        .sampling_mode(SamplingMode::Flat)
        .warm_up_time(Duration::from_millis(500));

    for (path, bitmap) in bitmaps() {
        for size in grid_sizes() {
            let pixels = resample(bitmap, size, AspectPolicy::CropToFit);
            group.bench_with_input(
                BenchmarkId::new(path, format!("{size}x{size}")),
                &(size, pixels),
                &mut f,
            );
        }
    }
}

fn bucket_counts(c: &mut Criterion) {
    bench(c, "bucket_counts", |b, (_, pixels)| b.iter(|| BucketCounts::new(pixels)));
}

fn quantize_palette(c: &mut Criterion) {
    for k in [4u16, 16, 64] {
        let k = PaletteSize::try_from(k).unwrap();
        bench(c, &format!("quantize_{k}"), |b, (_, pixels)| {
            b.iter(|| quantize(pixels, k));
        });
    }
}

fn remap_single(c: &mut Criterion) {
    bench(c, "remap_single", |b, (size, pixels)| {
        let palette = quantize(pixels, PaletteSize::DEFAULT);
        b.iter(|| map_to_grid(pixels, &palette, *size));
    });
}

fn remap_par(c: &mut Criterion) {
    bench(c, "remap_par", |b, (size, pixels)| {
        let palette = quantize(pixels, PaletteSize::DEFAULT);
        b.iter(|| map_to_grid_par(pixels, &palette, *size));
    });
}

criterion_group!(benches, bucket_counts, quantize_palette, remap_single, remap_par);
criterion_main!(benches);
