//! Benchmarks for the tone-mapping pipeline.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use hdrtone_core::{tonemap, FilterParams, ImageBuffer, KernelType, ToneMapParams};

/// Create a radiance image with a diagonal brightness gradient and a bright
/// spot, so both modes have real structure to work on.
fn create_radiance_image(width: u32, height: u32) -> ImageBuffer {
    let mut img = ImageBuffer::new(width, height, 3).unwrap();
    for y in 0..height {
        for x in 0..width {
            let t = (x + y) as f32 / (width + height - 2).max(1) as f32;
            let spot = if x == width / 2 && y == height / 2 {
                4.0
            } else {
                0.0
            };
            img.set(x, y, 0, t + spot);
            img.set(x, y, 1, t * 0.8 + spot);
            img.set(x, y, 2, t * 0.6 + spot);
        }
    }
    img
}

fn bench_global(c: &mut Criterion) {
    let mut group = c.benchmark_group("global");

    for size in [256u32, 512] {
        let image = create_radiance_image(size, size);
        let params = ToneMapParams {
            gamma: 0.5,
            ..ToneMapParams::default()
        };

        group.throughput(Throughput::Elements(u64::from(size) * u64::from(size)));
        group.bench_with_input(BenchmarkId::from_parameter(size), &image, |b, image| {
            b.iter(|| tonemap(black_box(image), black_box(&params)).unwrap());
        });
    }

    group.finish();
}

fn bench_filtered(c: &mut Criterion) {
    let mut group = c.benchmark_group("filtered");
    group.sample_size(20);

    let image = create_radiance_image(256, 256);
    for radius in [1i32, 2, 4] {
        for (label, kernel, edge_aware) in [
            ("box", KernelType::Box, false),
            ("gaussian", KernelType::Gaussian, false),
            ("edge_aware", KernelType::Gaussian, true),
        ] {
            let params = ToneMapParams {
                gamma: 0.5,
                filter: Some(FilterParams {
                    radius,
                    kernel,
                    edge_aware,
                }),
                ..ToneMapParams::default()
            };

            group.throughput(Throughput::Elements(256 * 256));
            group.bench_with_input(
                BenchmarkId::new(label, radius),
                &image,
                |b, image| {
                    b.iter(|| tonemap(black_box(image), black_box(&params)).unwrap());
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_global, bench_filtered);
criterion_main!(benches);
