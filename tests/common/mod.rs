//! Test doubles shared by the integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use saavy_sfx::{
    context::{AudioContext, ToneSpec},
    engine::clock::{Clock, ManualClock},
    Dispatch, Result, SfxError, SoundEngine,
};

/// Context that records tones instead of playing them. Its audio clock
/// follows the test's manual clock.
pub struct RecordingContext {
    clock: Arc<ManualClock>,
    tones: Mutex<Vec<ToneSpec>>,
}

impl RecordingContext {
    pub fn new(clock: Arc<ManualClock>) -> Self {
        Self {
            clock,
            tones: Mutex::new(Vec::new()),
        }
    }

    pub fn tones(&self) -> Vec<ToneSpec> {
        self.tones.lock().unwrap().clone()
    }

    /// Number of node pairs constructed so far.
    pub fn constructed(&self) -> usize {
        self.tones.lock().unwrap().len()
    }
}

impl AudioContext for RecordingContext {
    fn sample_rate(&self) -> f32 {
        48_000.0
    }

    fn current_time(&self) -> f64 {
        self.clock.now_ms() as f64 / 1000.0
    }

    fn start_tone(&self, tone: ToneSpec) -> Result<()> {
        self.tones.lock().unwrap().push(tone);
        Ok(())
    }
}

pub struct Harness {
    pub engine: SoundEngine,
    pub clock: Arc<ManualClock>,
    pub context: Arc<RecordingContext>,
    /// How many times the engine asked for a context to be built.
    pub builds: Arc<AtomicUsize>,
}

impl Harness {
    pub fn new() -> Self {
        let clock = Arc::new(ManualClock::new(0));
        let context = Arc::new(RecordingContext::new(clock.clone()));
        let builds = Arc::new(AtomicUsize::new(0));

        let ctx = context.clone();
        let counter = builds.clone();
        let engine = SoundEngine::builder()
            .clock(clock.clone())
            .dispatch(Dispatch::Manual)
            .context(move || -> Result<Arc<dyn AudioContext>> {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(ctx.clone() as Arc<dyn AudioContext>)
            })
            .build();

        Self {
            engine,
            clock,
            context,
            builds,
        }
    }

    /// Move the clock to `ms` and run whatever came due.
    pub fn run_until(&self, ms: u64) -> usize {
        self.clock.set(ms);
        self.engine.run_due()
    }

    /// Run every queued step, however far out.
    pub fn drain(&self) {
        self.run_until(self.clock.now_ms() + 10_000);
    }

    pub fn builds(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }
}

/// Engine whose output context can never be built.
pub fn unsupported_engine(builds: Arc<AtomicUsize>) -> (SoundEngine, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(0));
    let engine = SoundEngine::builder()
        .clock(clock.clone())
        .dispatch(Dispatch::Manual)
        .context(move || -> Result<Arc<dyn AudioContext>> {
            builds.fetch_add(1, Ordering::SeqCst);
            Err(SfxError::NoOutputDevice)
        })
        .build();
    (engine, clock)
}
