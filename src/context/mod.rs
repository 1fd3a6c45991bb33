//! Audio output contexts.
//!
//! A context is the single place tones are sent to. It owns the clock that
//! tones are scheduled against and mixes every tone it is given additively.
//! [`CpalContext`] plays through the default output device; [`OfflineContext`]
//! renders into memory and only advances when asked to.

mod realtime;
mod offline;

use std::sync::Arc;

pub use self::realtime::CpalContext;
pub use self::offline::OfflineContext;
pub use crate::dsp::OscillatorWaveform as Waveform;

use crate::{Result, SfxError};

/// One oscillator + gain envelope pair, fully described up front.
///
/// Times are absolute, in seconds of the owning context's clock. Both ramps
/// are exponential and run from `start_time` to `stop_time`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneSpec {
    pub waveform: Waveform,
    pub freq_start: f32,
    pub freq_end: f32,
    pub gain_start: f32,
    pub gain_end: f32,
    pub start_time: f64,
    pub stop_time: f64,
}

impl ToneSpec {
    pub fn duration(&self) -> f64 {
        self.stop_time - self.start_time
    }

    /// Reject tones an exponential ramp cannot represent.
    pub fn validate(&self) -> Result<()> {
        if !(self.freq_start > 0.0 && self.freq_end > 0.0) {
            return Err(SfxError::InvalidTone(format!(
                "frequencies must be positive, got {} -> {}",
                self.freq_start, self.freq_end
            )));
        }
        if !(self.gain_start > 0.0 && self.gain_start <= 1.0 && self.gain_end > 0.0) {
            return Err(SfxError::InvalidTone(format!(
                "gain must be in (0, 1], got {} -> {}",
                self.gain_start, self.gain_end
            )));
        }
        if !(self.duration() > 0.0) {
            return Err(SfxError::InvalidTone(format!(
                "stop time {} is not after start time {}",
                self.stop_time, self.start_time
            )));
        }
        Ok(())
    }
}

/// The shared output every tone attaches to.
pub trait AudioContext: Send + Sync {
    fn sample_rate(&self) -> f32;

    /// Current audio time in seconds.
    fn current_time(&self) -> f64;

    /// Construct and start one tone. Fire-and-forget: the tone frees itself
    /// once its stop time has passed.
    fn start_tone(&self, tone: ToneSpec) -> Result<()>;

    /// Start several tones as one unit: either all of them start or none do.
    ///
    /// The default validates everything first, which is enough for contexts
    /// whose `start_tone` cannot fail on a valid tone. Contexts with bounded
    /// capacity override it.
    fn start_tones(&self, tones: &[ToneSpec]) -> Result<()> {
        for tone in tones {
            tone.validate()?;
        }
        for tone in tones {
            self.start_tone(*tone)?;
        }
        Ok(())
    }
}

/// Builds the context on first use.
///
/// Any `Fn() -> Result<Arc<dyn AudioContext>>` is a factory, so tests can
/// hand in a closure returning a recording double or an error.
pub trait ContextFactory: Send + Sync {
    fn create_context(&self) -> Result<Arc<dyn AudioContext>>;
}

impl<F> ContextFactory for F
where
    F: Fn() -> Result<Arc<dyn AudioContext>> + Send + Sync,
{
    fn create_context(&self) -> Result<Arc<dyn AudioContext>> {
        self()
    }
}

/// Factory for the default output device.
pub struct CpalFactory;

impl ContextFactory for CpalFactory {
    fn create_context(&self) -> Result<Arc<dyn AudioContext>> {
        let context = CpalContext::new()?;
        Ok(Arc::new(context))
    }
}
