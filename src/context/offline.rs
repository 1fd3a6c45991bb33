use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::{
    context::{AudioContext, ToneSpec},
    graph::{tone::boxed_tone, VoiceMixer},
    Result,
};

/// Context that renders into memory instead of a device.
///
/// Time stands still until [`render`](Self::render) is called, which makes
/// rendered output fully deterministic. Used by tests and benchmarks.
pub struct OfflineContext {
    sample_rate: f32,
    state: Mutex<OfflineState>,
}

struct OfflineState {
    mixer: VoiceMixer,
    tones_started: usize,
}

impl OfflineContext {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            state: Mutex::new(OfflineState {
                mixer: VoiceMixer::new(),
                tones_started: 0,
            }),
        }
    }

    /// Render the next `frames` samples of mixed output.
    pub fn render(&self, frames: usize) -> Vec<f32> {
        let mut out = vec![0.0; frames];
        self.render_into(&mut out);
        out
    }

    pub fn render_into(&self, out: &mut [f32]) {
        let mut state = self.state();
        state.mixer.render(out, self.sample_rate);
    }

    /// Render and discard `seconds` of audio.
    pub fn advance(&self, seconds: f64) {
        let frames = (seconds * self.sample_rate as f64).round() as usize;
        self.render(frames);
    }

    /// Total number of tones ever started on this context.
    pub fn tones_started(&self) -> usize {
        self.state().tones_started
    }

    pub fn active_voices(&self) -> usize {
        self.state().mixer.active_voices()
    }

    fn state(&self) -> MutexGuard<'_, OfflineState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AudioContext for OfflineContext {
    fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    fn current_time(&self) -> f64 {
        self.state().mixer.frame() as f64 / self.sample_rate as f64
    }

    fn start_tone(&self, tone: ToneSpec) -> Result<()> {
        self.start_tones(&[tone])
    }

    fn start_tones(&self, tones: &[ToneSpec]) -> Result<()> {
        for tone in tones {
            tone.validate()?;
        }

        // One lock, so no render can fall between the tones
        let mut state = self.state();
        for tone in tones {
            state.mixer.add(boxed_tone(tone, self.sample_rate));
        }
        state.tones_started += tones.len();
        Ok(())
    }
}
