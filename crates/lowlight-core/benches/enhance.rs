//! Benchmarks for the enhancement pipeline
//!
//! Run with: cargo bench -p lowlight-core

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lowlight_core::contrast::Clahe;
use lowlight_core::{enhance, ChannelPlane, EnhancementParameters, Image, PlaneTransform, TileGrid};

/// Dark synthetic photo with some texture so tiles differ.
fn generate_dark_image(width: u32, height: u32) -> Image {
    Image::from_fn(width, height, |x, y| {
        let base = (x + y) % 48;
        let noise = (x.wrapping_mul(31) ^ y.wrapping_mul(17)) % 7;
        let v = (8 + base + noise) as u8;
        [v + 6, v, v / 2]
    })
    .expect("non-empty benchmark image")
}

fn bench_clahe(c: &mut Criterion) {
    let mut group = c.benchmark_group("clahe");
    let stage = Clahe::new(2.0, TileGrid::default()).expect("valid clip limit");

    for size in [256u32, 512, 1024, 2048].iter() {
        let plane = ChannelPlane::from_fn(*size, *size, |x, y| ((x * 7 + y * 3) % 64) as u8)
            .expect("non-empty benchmark plane");
        group.throughput(Throughput::Elements(u64::from(*size) * u64::from(*size)));
        group.bench_with_input(
            BenchmarkId::new("apply", format!("{}x{}", size, size)),
            &plane,
            |b, plane| b.iter(|| stage.apply(black_box(plane))),
        );
    }

    group.finish();
}

fn bench_enhance(c: &mut Criterion) {
    let mut group = c.benchmark_group("enhance");
    let params = EnhancementParameters::default();

    for size in [256u32, 512, 1024].iter() {
        let image = generate_dark_image(*size, *size);
        group.throughput(Throughput::Elements(u64::from(*size) * u64::from(*size)));
        group.bench_with_input(
            BenchmarkId::new("default", format!("{}x{}", size, size)),
            &image,
            |b, image| b.iter(|| enhance(black_box(image), black_box(&params))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_clahe, bench_enhance);
criterion_main!(benches);
