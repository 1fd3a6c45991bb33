//! Benchmarks for the exponential ramp behind sweeps and gain envelopes.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_sfx::dsp::ExpRamp;

use crate::BLOCK_SIZES;

pub fn bench_ramp(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/ramp");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Mid-ramp: one multiply per sample
        group.bench_with_input(BenchmarkId::new("decay", size), &size, |b, _| {
            b.iter(|| {
                let mut ramp = ExpRamp::new(0.2, 0.01, 1.0, 48_000.0);
                ramp.render(black_box(&mut buffer));
            })
        });

        // Finished ramp holding its target
        let mut held = ExpRamp::constant(0.01);
        group.bench_with_input(BenchmarkId::new("hold", size), &size, |b, _| {
            b.iter(|| {
                held.render(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
