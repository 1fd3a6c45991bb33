//! Benchmarks for oscillator waveform generation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_sfx::dsp::{ExpRamp, OscillatorBlock};

use crate::BLOCK_SIZES;

const SAMPLE_RATE: f32 = 48_000.0;

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];
        let flat = vec![800.0f32; size];

        // Sweeping frequency input, as a sweep tone feeds it
        let mut swept = vec![0.0f32; size];
        ExpRamp::new(200.0, 1200.0, size as f32 / SAMPLE_RATE, SAMPLE_RATE).render(&mut swept);

        // Sine - uses sin() transcendental function
        let mut osc = OscillatorBlock::sine();
        group.bench_with_input(BenchmarkId::new("sine", size), &size, |b, _| {
            b.iter(|| {
                osc.render(black_box(&mut buffer), black_box(&flat), SAMPLE_RATE);
            })
        });

        // Square - branch per sample
        let mut osc = OscillatorBlock::square();
        group.bench_with_input(BenchmarkId::new("square", size), &size, |b, _| {
            b.iter(|| {
                osc.render(black_box(&mut buffer), black_box(&flat), SAMPLE_RATE);
            })
        });

        let mut osc = OscillatorBlock::square();
        group.bench_with_input(BenchmarkId::new("square_swept", size), &size, |b, _| {
            b.iter(|| {
                osc.render(black_box(&mut buffer), black_box(&swept), SAMPLE_RATE);
            })
        });
    }

    group.finish();
}
