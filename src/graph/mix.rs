use crate::{
    graph::node::{GraphNode, RenderCtx},
    MAX_BLOCK_SIZE,
};

/*
Additive Voice Mixing
=====================

Every tone started on a context becomes one voice in the mixer. Voices are
independent: two cues fired 10 ms apart both play in full and their samples
simply add.

  voice A   ▁▃▇▅▃▂▁
  voice B       ▁▃▇▅▃▂▁
  output    ▁▃▇▆▆▇▅▃▂▁      (A + B, sample by sample)

No normalization is applied here. Cue volumes are small (≤ 0.25 per
oscillator) so even the densest overlap stays far below full scale; the
output stage clips as a last resort.

Voices are dropped as soon as they report inactive, which happens when their
gate passes the stop frame. Nothing is ever reused: a new tone is a new voice.

Block size: callers may pass any length; rendering is split into chunks of
at most MAX_BLOCK_SIZE so the per-voice scratch buffers never reallocate.
*/

/// Default voice capacity reserved up front.
const VOICE_CAPACITY: usize = 64;

pub struct VoiceMixer {
    voices: Vec<Box<dyn GraphNode>>,
    temp_buffer: Vec<f32>,
    frame: u64,
}

impl VoiceMixer {
    pub fn new() -> Self {
        Self {
            voices: Vec::with_capacity(VOICE_CAPACITY),
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
            frame: 0,
        }
    }

    pub fn add(&mut self, voice: Box<dyn GraphNode>) {
        self.voices.push(voice);
    }

    /// Number of voices still sounding (or waiting for their start frame).
    pub fn active_voices(&self) -> usize {
        self.voices.len()
    }

    /// Absolute frame index of the next sample to be rendered.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Render the sum of all voices into `out` and advance the clock.
    pub fn render(&mut self, out: &mut [f32], sample_rate: f32) {
        for chunk in out.chunks_mut(MAX_BLOCK_SIZE) {
            self.render_chunk(chunk, sample_rate);
        }
    }

    fn render_chunk(&mut self, out: &mut [f32], sample_rate: f32) {
        out.fill(0.0);
        let ctx = RenderCtx::new(sample_rate, self.frame);

        for voice in self.voices.iter_mut() {
            let frames = &mut self.temp_buffer[..out.len()];
            voice.render_block(frames, &ctx);

            for (o, v) in out.iter_mut().zip(frames.iter()) {
                *o += v;
            }
        }

        self.voices.retain(|v| v.is_active());
        self.frame += out.len() as u64;
    }
}

impl Default for VoiceMixer {
    fn default() -> Self {
        Self::new()
    }
}
