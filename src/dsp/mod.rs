//! Low-level DSP primitives used by the graph nodes.
//!
//! These components are allocation-free and realtime-safe, so they can live
//! directly inside the tone nodes rendered on the audio thread.

/// Oscillator waveforms driven by a per-sample frequency.
pub mod oscillator;
/// Exponential parameter ramps (frequency sweeps, gain decay).
pub mod ramp;

pub use oscillator::{OscillatorBlock, OscillatorWaveform};
pub use ramp::ExpRamp;
