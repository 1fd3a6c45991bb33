use std::f32::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Phase-Accumulating Oscillator
=============================

The oscillator keeps a normalized phase in [0, 1) and advances it by
`frequency / sample_rate` every sample. The waveform is a pure function of
the phase, so the frequency may change on every sample without clicks: a
sweep just changes how fast the phase moves.

    phase   0.0        0.25       0.5        0.75       1.0
            |----------|----------|----------|----------|
    sine    0    →     1    →     0    →    -1    →     0
    square  1          1         -1         -1          1

Sine:   a single partial; soft and round. Used as the upper voice of the
        dual tone so it blends instead of buzzing.
Square: odd harmonics only; hollow and bright. This is the "beep" of every
        cue, cutting through at very low volumes.

The square is naive (not band-limited). At the frequencies used here
(200 Hz - 1.2 kHz) the aliasing stays well under the envelope.
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OscillatorWaveform {
    Sine,
    Square,
}

#[derive(Debug, Clone)]
pub struct OscillatorBlock {
    waveform: OscillatorWaveform,
    phase: f32,
}

impl OscillatorBlock {
    pub fn new(waveform: OscillatorWaveform) -> Self {
        Self {
            waveform,
            phase: 0.0,
        }
    }

    pub fn sine() -> Self {
        Self::new(OscillatorWaveform::Sine)
    }

    pub fn square() -> Self {
        Self::new(OscillatorWaveform::Square)
    }

    pub fn waveform(&self) -> OscillatorWaveform {
        self.waveform
    }

    /// Produce one sample at `frequency` and advance the phase.
    #[inline]
    pub fn next_sample(&mut self, frequency: f32, sample_rate: f32) -> f32 {
        let value = match self.waveform {
            OscillatorWaveform::Sine => (TAU * self.phase).sin(),
            OscillatorWaveform::Square => {
                if self.phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
        };

        self.phase += frequency / sample_rate;
        self.phase -= self.phase.floor();

        value
    }

    /// Fill `out` with the waveform, reading one frequency per sample.
    pub fn render(&mut self, out: &mut [f32], frequencies: &[f32], sample_rate: f32) {
        for (sample, &freq) in out.iter_mut().zip(frequencies) {
            *sample = self.next_sample(freq, sample_rate);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_sine() {
        let sample_rate = 48_000.0;
        let freq = 440.0;
        let mut osc = OscillatorBlock::sine();

        let freqs = vec![freq; 128];
        let mut buffer = vec![0.0f32; 128];
        osc.render(&mut buffer, &freqs, sample_rate);

        // sample n should be sin(2pi f n / sr)
        let sample_index = 12;
        let expected = (TAU * freq * sample_index as f32 / sample_rate).sin();
        let actual = buffer[sample_index];
        assert!(
            (actual - expected).abs() < 1e-4,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn square_flips_every_half_period() {
        // 1 kHz at 8 kHz: four samples high, four samples low
        let mut osc = OscillatorBlock::square();
        let freqs = [1_000.0; 8];
        let mut buffer = [0.0f32; 8];
        osc.render(&mut buffer, &freqs, 8_000.0);

        assert_eq!(buffer, [1.0, 1.0, 1.0, 1.0, -1.0, -1.0, -1.0, -1.0]);
    }

    #[test]
    fn phase_stays_normalized_at_high_frequency() {
        let mut osc = OscillatorBlock::sine();
        for _ in 0..10_000 {
            let s = osc.next_sample(20_000.0, 44_100.0);
            assert!(s.abs() <= 1.0);
        }
        assert!((0.0..1.0).contains(&osc.phase));
    }
}
