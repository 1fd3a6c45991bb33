use crate::dsp::{ExpRamp, OscillatorBlock, OscillatorWaveform};
use crate::graph::node::{GraphNode, RenderCtx};
use crate::MAX_BLOCK_SIZE;

/*
Swept Oscillator
================

Every tone in this crate has a fixed pitch trajectory decided when it is
created: either a constant frequency or an exponential sweep from one
frequency to another. The node pairs an `OscillatorBlock` with an `ExpRamp`
that supplies one frequency per sample.

  Hz
  1200 ┤              ╭━━━━━━━ (holds end frequency)
       │          ╭───╯
   800 ┤      ╭───╯
       │  ╭───╯
   200 ┼──╯
       └────────────────────→ t
       0          duration

The ramp only advances while the node is rendered, so a tone that starts
late (see `Gate`) begins its sweep at its own start time, not the context's.

Example usage:
  let beep  = OscNode::square(800.0);                  // constant
  let chirp = OscNode::square_sweep(200.0, 800.0, 0.15, 48_000.0);
*/

pub struct OscNode {
    osc: OscillatorBlock,
    frequency: ExpRamp,
    freq_buffer: Vec<f32>,
}

impl OscNode {
    pub fn new(waveform: OscillatorWaveform, frequency: ExpRamp) -> Self {
        Self {
            osc: OscillatorBlock::new(waveform),
            frequency,
            freq_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }

    pub fn sine(freq: f32) -> Self {
        Self::new(OscillatorWaveform::Sine, ExpRamp::constant(freq))
    }

    pub fn square(freq: f32) -> Self {
        Self::new(OscillatorWaveform::Square, ExpRamp::constant(freq))
    }

    /// Square wave swept exponentially from `start` to `end` Hz.
    pub fn square_sweep(start: f32, end: f32, duration: f32, sample_rate: f32) -> Self {
        Self::new(
            OscillatorWaveform::Square,
            ExpRamp::new(start, end, duration, sample_rate),
        )
    }

    pub fn waveform(&self) -> OscillatorWaveform {
        self.osc.waveform()
    }

    /// Frequency the next rendered sample will use.
    pub fn frequency(&self) -> f32 {
        self.frequency.value()
    }
}

impl GraphNode for OscNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        // Slice the scratch buffer to match output size (RT-safe, no allocation)
        let freqs = &mut self.freq_buffer[..out.len()];
        self.frequency.render(freqs);
        self.osc.render(out, freqs, ctx.sample_rate);
    }
}
