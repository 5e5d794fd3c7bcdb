//! Performance benchmarks for the focusstack pipeline
//!
//! Run with: cargo bench --bench stack_benchmarks
//!
//! Measures kernel construction, filtered sampling and whole-image stacking
//! so regressions in the per-pixel convolution show up early.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use focusstack::filter::{log_kernel, FilteredPlane};
use focusstack::plane::{Matrix, Plane};
use focusstack::testing::{split_focus_pair, synthetic_frame};
use focusstack::{FocusStack, StackConfig};
use std::time::Duration;

fn bench_kernel(c: &mut Criterion) {
    let mut group = c.benchmark_group("log_kernel");

    for size in [5usize, 13, 25] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| log_kernel(black_box(1.6), size).unwrap())
        });
    }

    group.finish();
}

fn bench_filtered_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("filtered_plane");
    let kernel = log_kernel(1.6, 13).unwrap();

    for (w, h) in [(64usize, 48usize), (160, 120)] {
        let mut gray = Matrix::<u32>::new(w, h).unwrap();
        for (x, y, _) in gray.clone().iter() {
            gray.set(x, y, ((x * 7 + y * 13) % 256) as u32 * 257);
        }

        group.throughput(Throughput::Elements((w * h) as u64));
        group.bench_with_input(
            BenchmarkId::new("full_pass", format!("{}x{}", w, h)),
            &gray,
            |b, gray| {
                b.iter(|| {
                    let filtered = FilteredPlane::new(&kernel, gray);
                    let mut acc = 0.0f32;
                    for y in 0..h as i32 {
                        for x in 0..w as i32 {
                            acc += filtered.at(x, y);
                        }
                    }
                    black_box(acc)
                })
            },
        );
    }

    group.finish();
}

fn bench_add_image(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_image");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(20);

    let config = StackConfig::default();
    for (w, h) in [(64u32, 48u32), (160, 120)] {
        let frames: Vec<_> = (0..3).map(|i| synthetic_frame(i, w, h)).collect();

        group.throughput(Throughput::Elements(u64::from(w * h) * frames.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("three_frames", format!("{}x{}", w, h)),
            &frames,
            |b, frames| {
                b.iter(|| {
                    let mut stack = FocusStack::for_image(&frames[0], &config).unwrap();
                    for frame in frames {
                        stack.add_dynamic(frame).unwrap();
                    }
                    black_box(stack.num_images())
                })
            },
        );
    }

    let (left, right) = split_focus_pair(128, 64);
    group.bench_function("split_focus_with_depth", |b| {
        b.iter(|| {
            let mut stack = FocusStack::for_image(&left, &config).unwrap();
            stack.add_dynamic(&left).unwrap();
            stack.add_dynamic(&right).unwrap();
            let lut = stack.ordered_depths().unwrap();
            black_box(stack.depth_map(&lut).unwrap())
        })
    });

    group.finish();
}

criterion_group!(benches, bench_kernel, bench_filtered_sampling, bench_add_image);
criterion_main!(benches);
