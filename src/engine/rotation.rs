use crate::engine::cue::{ToneCall, ROTATION_VARIANTS};

/// Minimum time between two accepted rotating cues.
pub const ROTATION_INTERVAL_MS: u64 = 1_000;

/// Which rotating variant plays next, and when the last one played.
///
/// An accepted trigger always moves exactly one step forward, no matter how
/// long the caller waited; the index never resets.
#[derive(Debug, Default)]
pub struct Rotation {
    index: usize,
    last_trigger_ms: Option<u64>,
}

impl Rotation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept or reject a trigger at `now_ms`.
    ///
    /// Rejected triggers leave the state untouched. Accepted ones advance the
    /// index, record the time and return the variant to play.
    pub fn try_advance(&mut self, now_ms: u64) -> Option<(usize, ToneCall)> {
        if let Some(last) = self.last_trigger_ms {
            if now_ms.saturating_sub(last) < ROTATION_INTERVAL_MS {
                return None;
            }
        }

        self.last_trigger_ms = Some(now_ms);
        self.index = (self.index + 1) % ROTATION_VARIANTS.len();
        Some((self.index, ROTATION_VARIANTS[self.index]))
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn last_trigger_ms(&self) -> Option<u64> {
        self.last_trigger_ms
    }
}
