//! Benchmarks for mixing the tones of complete cues.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_sfx::{
    context::{ToneSpec, Waveform},
    engine::cue::{Cue, ToneCall},
    graph::{tone::boxed_tone, VoiceMixer},
    ENVELOPE_FLOOR,
};

use crate::BLOCK_SIZES;

const SAMPLE_RATE: f32 = 48_000.0;

/// Tone specs for every step of a cue, all started at time zero so they
/// overlap as much as possible.
fn stacked_tones(cue: Cue) -> Vec<ToneSpec> {
    let mut tones = Vec::new();
    for step in cue.steps() {
        match step.call {
            ToneCall::Sweep {
                start_hz,
                end_hz,
                volume,
                ..
            } => tones.push(spec(Waveform::Square, start_hz, end_hz, volume)),
            ToneCall::Dual {
                square_hz,
                sine_hz,
                volume,
                ..
            } => {
                tones.push(spec(Waveform::Square, square_hz, square_hz, volume * 0.5));
                tones.push(spec(Waveform::Sine, sine_hz, sine_hz, volume * 0.5));
            }
        }
    }
    tones
}

fn spec(waveform: Waveform, from: f32, to: f32, gain: f32) -> ToneSpec {
    ToneSpec {
        waveform,
        freq_start: from,
        freq_end: to,
        gain_start: gain,
        gain_end: ENVELOPE_FLOOR,
        start_time: 0.0,
        // An hour long, so no voice finishes mid-benchmark
        stop_time: 3_600.0,
    }
}

fn mixer_with(tones: &[ToneSpec]) -> VoiceMixer {
    let mut mixer = VoiceMixer::new();
    for tone in tones {
        mixer.add(boxed_tone(tone, SAMPLE_RATE));
    }
    mixer
}

pub fn bench_cues(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/cues");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // === CLICK: single square ===
        let mut click = mixer_with(&stacked_tones(Cue::Click));
        group.bench_with_input(BenchmarkId::new("click", size), &size, |b, _| {
            b.iter(|| click.render(black_box(&mut buffer), SAMPLE_RATE))
        });

        // === SUCCESS: two sweeps + dual pair ===
        let mut success = mixer_with(&stacked_tones(Cue::Success));
        group.bench_with_input(BenchmarkId::new("success", size), &size, |b, _| {
            b.iter(|| success.render(black_box(&mut buffer), SAMPLE_RATE))
        });

        // === BURST: every fixed cue at once ===
        let all: Vec<ToneSpec> = Cue::ALL.into_iter().flat_map(stacked_tones).collect();
        let mut burst = mixer_with(&all);
        group.bench_with_input(BenchmarkId::new("all_cues", size), &size, |b, _| {
            b.iter(|| burst.render(black_box(&mut buffer), SAMPLE_RATE))
        });
    }

    group.finish();
}
