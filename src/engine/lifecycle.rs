use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{info, warn};

use crate::context::{AudioContext, ContextFactory};

/// Where the engine stands with its output context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextState {
    /// Nothing has asked for audio yet.
    Uninitialized,
    Ready,
    /// Construction failed once; every trigger is now a silent no-op.
    Unavailable,
}

enum Slot {
    Uninitialized,
    Ready(Arc<dyn AudioContext>),
    Unavailable,
}

/// Owns the single output context of an engine.
///
/// The context is built on first use. A failed build is logged once and
/// remembered, so later calls return `None` without retrying or logging.
pub struct ContextManager {
    factory: Box<dyn ContextFactory>,
    slot: Mutex<Slot>,
}

impl ContextManager {
    pub fn new(factory: Box<dyn ContextFactory>) -> Self {
        Self {
            factory,
            slot: Mutex::new(Slot::Uninitialized),
        }
    }

    /// The shared context, built on the first call.
    pub fn ensure_context(&self) -> Option<Arc<dyn AudioContext>> {
        let mut slot = self.slot();

        match &*slot {
            Slot::Ready(ctx) => return Some(ctx.clone()),
            Slot::Unavailable => return None,
            Slot::Uninitialized => {}
        }

        match self.factory.create_context() {
            Ok(ctx) => {
                info!(sample_rate = ctx.sample_rate(), "audio context ready");
                *slot = Slot::Ready(ctx.clone());
                Some(ctx)
            }
            Err(err) => {
                warn!("audio output unavailable, sound feedback disabled: {err}");
                *slot = Slot::Unavailable;
                None
            }
        }
    }

    pub fn state(&self) -> ContextState {
        match &*self.slot() {
            Slot::Uninitialized => ContextState::Uninitialized,
            Slot::Ready(_) => ContextState::Ready,
            Slot::Unavailable => ContextState::Unavailable,
        }
    }

    pub fn is_available(&self) -> bool {
        self.state() == ContextState::Ready
    }

    fn slot(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
