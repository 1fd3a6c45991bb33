//! The sound feedback service.
//!
//! [`SoundEngine`] is a cheap, cloneable handle. Build one at startup and
//! hand clones to whatever triggers cues; they all share one output context,
//! one mute flag and one rotation state.
//!
//! # Example
//!
//! ```ignore
//! use saavy_sfx::SoundEngine;
//!
//! let sfx = SoundEngine::new();
//! sfx.init();
//! sfx.play_click();
//! sfx.set_muted(true);
//! sfx.play_success(); // silent
//! ```

pub mod clock;
pub mod cue;
pub mod lifecycle;
pub mod primitives;
pub mod rotation;
pub mod scheduler;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, Once, PoisonError, Weak};
use std::thread;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use self::{
    clock::{Clock, SystemClock},
    cue::{Choreography, Cue, ToneCall},
    lifecycle::{ContextManager, ContextState},
    rotation::Rotation,
    scheduler::Scheduler,
};
use crate::context::{AudioContext, ContextFactory, CpalFactory};

/// Longest the timer thread sleeps before checking whether the engine is
/// still alive.
const TIMER_IDLE_WAIT: Duration = Duration::from_millis(250);

/// How deferred cue steps get executed.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dispatch {
    /// A background timer thread runs steps when they come due.
    #[default]
    Thread,
    /// Steps wait until [`SoundEngine::run_due`] is called.
    Manual,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineConfig {
    /// Initial mute state.
    pub muted: bool,
    pub dispatch: Dispatch,
}

/// Builder for [`SoundEngine`].
pub struct EngineBuilder {
    config: EngineConfig,
    factory: Option<Box<dyn ContextFactory>>,
    clock: Option<Arc<dyn Clock>>,
}

impl EngineBuilder {
    fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            factory: None,
            clock: None,
        }
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a custom output context factory instead of the default device.
    pub fn context(mut self, factory: impl ContextFactory + 'static) -> Self {
        self.factory = Some(Box::new(factory));
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn dispatch(mut self, dispatch: Dispatch) -> Self {
        self.config.dispatch = dispatch;
        self
    }

    pub fn muted(mut self, muted: bool) -> Self {
        self.config.muted = muted;
        self
    }

    pub fn build(self) -> SoundEngine {
        let factory = self.factory.unwrap_or_else(|| Box::new(CpalFactory));
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock::new()));

        SoundEngine {
            shared: Arc::new(Shared {
                lifecycle: ContextManager::new(factory),
                muted: AtomicBool::new(self.config.muted),
                rotation: Mutex::new(Rotation::new()),
                scheduler: Mutex::new(Scheduler::new()),
                wakeup: Condvar::new(),
                clock,
                dispatch: self.config.dispatch,
                timer: Once::new(),
            }),
        }
    }
}

/// Handle to the sound feedback service.
#[derive(Clone)]
pub struct SoundEngine {
    shared: Arc<Shared>,
}

struct Shared {
    lifecycle: ContextManager,
    muted: AtomicBool,
    rotation: Mutex<Rotation>,
    scheduler: Mutex<Scheduler>,
    wakeup: Condvar,
    clock: Arc<dyn Clock>,
    dispatch: Dispatch,
    timer: Once,
}

impl SoundEngine {
    /// Engine on the default output device with a background timer.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    /// Open the output context now instead of on the first cue.
    pub fn init(&self) {
        self.shared.lifecycle.ensure_context();
    }

    /// The shared output context, built on first use. `None` once the
    /// environment has turned out not to support audio output.
    pub fn ensure_context(&self) -> Option<Arc<dyn AudioContext>> {
        self.shared.lifecycle.ensure_context()
    }

    pub fn is_available(&self) -> bool {
        self.shared.lifecycle.is_available()
    }

    pub fn context_state(&self) -> ContextState {
        self.shared.lifecycle.state()
    }

    pub fn set_muted(&self, muted: bool) {
        self.shared.muted.store(muted, Ordering::Release);
        debug!(muted, "mute flag set");
    }

    pub fn is_muted(&self) -> bool {
        self.shared.is_muted()
    }

    /// Play a cue.
    ///
    /// Steps at offset zero play right away, later ones are queued. Every
    /// step checks the mute flag again when it runs, so muting in the middle
    /// of a cue silences only the steps that have not started yet.
    pub fn play(&self, cue: Cue) {
        if self.is_muted() {
            return;
        }

        let steps = match cue.choreography() {
            Choreography::Steps(steps) => steps,
            Choreography::Rotating => return self.play_rotating_hacker_sound(),
        };

        if self.ensure_context().is_none() {
            return;
        }

        let now = self.shared.clock.now_ms();
        for step in steps {
            if step.offset_ms == 0 {
                self.shared.execute(&step.call);
            } else {
                self.schedule(now + step.offset_ms, step.call);
            }
        }
    }

    pub fn play_click(&self) {
        self.play(Cue::Click);
    }

    pub fn play_success(&self) {
        self.play(Cue::Success);
    }

    pub fn play_loading_tick(&self) {
        self.play(Cue::LoadingTick);
    }

    pub fn play_chime(&self) {
        self.play(Cue::Chime);
    }

    pub fn play_notification(&self) {
        self.play(Cue::Notification);
    }

    pub fn play_section_transition(&self) {
        self.play(Cue::SectionTransition);
    }

    pub fn play_hacker_access(&self) {
        self.play(Cue::HackerAccess);
    }

    /// Play the next rotating variant, at most once per second.
    pub fn play_rotating_hacker_sound(&self) {
        if self.is_muted() {
            return;
        }

        let now = self.shared.clock.now_ms();
        let accepted = self.shared.rotation().try_advance(now);

        match accepted {
            Some((index, call)) => {
                debug!(index, "rotating cue");
                self.shared.execute(&call);
            }
            None => debug!("rotating cue rate limited"),
        }
    }

    /// Index of the rotating variant that played last.
    pub fn rotation_index(&self) -> usize {
        self.shared.rotation().index()
    }

    /// Number of queued steps that have not run yet.
    pub fn pending(&self) -> usize {
        self.shared.scheduler().len()
    }

    /// Run every queued step that is due; returns how many ran.
    ///
    /// This is how steps execute with [`Dispatch::Manual`]. With the timer
    /// thread it is harmless, the two just share the queue.
    pub fn run_due(&self) -> usize {
        let mut ran = 0;
        loop {
            let now = self.shared.clock.now_ms();
            let Some(call) = self.shared.scheduler().pop_due(now) else {
                return ran;
            };
            self.shared.execute(&call);
            ran += 1;
        }
    }

    fn schedule(&self, due_ms: u64, call: ToneCall) {
        debug!(due_ms, ?call, "step scheduled");
        self.shared.scheduler().enqueue(due_ms, call);
        self.shared.wakeup.notify_one();

        if self.shared.dispatch == Dispatch::Thread {
            self.shared.timer.call_once(|| spawn_timer(&self.shared));
        }
    }
}

impl Default for SoundEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Shared {
    fn is_muted(&self) -> bool {
        self.muted.load(Ordering::Acquire)
    }

    /// Play one tone call, unless muted or without output.
    fn execute(&self, call: &ToneCall) {
        if self.is_muted() {
            return;
        }
        let Some(ctx) = self.lifecycle.ensure_context() else {
            return;
        };

        if let Err(err) = primitives::play(ctx.as_ref(), call) {
            warn!(?call, "failed to play tone: {err}");
        }
    }

    /// Wait up to `max_wait` for the next due step.
    fn next_due_call(&self, max_wait: Duration) -> Option<ToneCall> {
        let mut scheduler = self.scheduler();
        let now = self.clock.now_ms();
        if let Some(call) = scheduler.pop_due(now) {
            return Some(call);
        }

        let wait = scheduler
            .next_due()
            .map(|due| Duration::from_millis(due.saturating_sub(now)))
            .map_or(max_wait, |until_due| until_due.min(max_wait));

        let (mut scheduler, _) = self
            .wakeup
            .wait_timeout(scheduler, wait)
            .unwrap_or_else(PoisonError::into_inner);
        scheduler.pop_due(self.clock.now_ms())
    }

    fn rotation(&self) -> MutexGuard<'_, Rotation> {
        self.rotation.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn scheduler(&self) -> MutexGuard<'_, Scheduler> {
        self.scheduler.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn spawn_timer(shared: &Arc<Shared>) {
    let engine = Arc::downgrade(shared);
    let spawned = thread::Builder::new()
        .name("saavy-sfx-timer".into())
        .spawn(move || timer_loop(engine));

    if let Err(err) = spawned {
        error!("failed to start timer thread, delayed cue steps will not play: {err}");
    }
}

/// Runs queued steps until the last engine handle is gone.
fn timer_loop(engine: Weak<Shared>) {
    while let Some(shared) = engine.upgrade() {
        if let Some(call) = shared.next_due_call(TIMER_IDLE_WAIT) {
            shared.execute(&call);
        }
    }
    debug!("timer thread exiting");
}
