//! The two tone primitives every cue is built from.
//!
//! Both create their node pairs "now" on the context's clock and return
//! immediately; nothing here waits for audio to finish. Callers are expected
//! to have checked the mute flag already.

use crate::{
    context::{AudioContext, ToneSpec, Waveform},
    engine::cue::ToneCall,
    Result, SfxError, ENVELOPE_FLOOR,
};

/// Each oscillator of a dual tone gets half the requested volume.
const DUAL_GAIN: f32 = 0.5;

/// One square oscillator swept exponentially from `start_hz` to `end_hz`,
/// its gain decaying from `volume` to [`ENVELOPE_FLOOR`] over the same time.
pub fn frequency_sweep(
    ctx: &dyn AudioContext,
    start_hz: f32,
    end_hz: f32,
    duration_ms: u32,
    volume: f32,
) -> Result<()> {
    check_request(duration_ms, volume)?;
    let (start_time, stop_time) = window(ctx, duration_ms);

    let tone = ToneSpec {
        waveform: Waveform::Square,
        freq_start: start_hz,
        freq_end: end_hz,
        gain_start: volume,
        gain_end: ENVELOPE_FLOOR,
        start_time,
        stop_time,
    };
    tone.validate()?;
    ctx.start_tone(tone)
}

/// A square at `square_hz` and a sine at `sine_hz`, sharing one start and
/// stop time so they are heard as a single timbre.
pub fn double_frequency(
    ctx: &dyn AudioContext,
    square_hz: f32,
    sine_hz: f32,
    duration_ms: u32,
    volume: f32,
) -> Result<()> {
    check_request(duration_ms, volume)?;
    let (start_time, stop_time) = window(ctx, duration_ms);

    let square = ToneSpec {
        waveform: Waveform::Square,
        freq_start: square_hz,
        freq_end: square_hz,
        gain_start: volume * DUAL_GAIN,
        gain_end: ENVELOPE_FLOOR,
        start_time,
        stop_time,
    };
    let sine = ToneSpec {
        waveform: Waveform::Sine,
        freq_start: sine_hz,
        freq_end: sine_hz,
        ..square
    };

    // Started as one unit so a failure never leaves half the pair playing
    ctx.start_tones(&[square, sine])
}

/// Run a single tone call against the context.
pub fn play(ctx: &dyn AudioContext, call: &ToneCall) -> Result<()> {
    match *call {
        ToneCall::Sweep {
            start_hz,
            end_hz,
            duration_ms,
            volume,
        } => frequency_sweep(ctx, start_hz, end_hz, duration_ms, volume),
        ToneCall::Dual {
            square_hz,
            sine_hz,
            duration_ms,
            volume,
        } => double_frequency(ctx, square_hz, sine_hz, duration_ms, volume),
    }
}

fn check_request(duration_ms: u32, volume: f32) -> Result<()> {
    if duration_ms == 0 {
        return Err(SfxError::InvalidTone("duration must be positive".into()));
    }
    if !(volume > 0.0 && volume <= 1.0) {
        return Err(SfxError::InvalidTone(format!(
            "volume must be in (0, 1], got {volume}"
        )));
    }
    Ok(())
}

fn window(ctx: &dyn AudioContext, duration_ms: u32) -> (f64, f64) {
    let start = ctx.current_time();
    (start, start + duration_ms as f64 / 1000.0)
}
