//! Procedural UI feedback sounds.
//!
//! Every cue (clicks, chimes, the "access granted" sequence, ...) is built from
//! two tone primitives rendered straight from oscillators, so the crate ships
//! no audio assets. See [`engine::SoundEngine`] for the entry point.

pub mod context; // Output contexts: realtime (cpal) and offline
pub mod dsp;
pub mod engine; // Lifecycle, primitives, choreographies, scheduling
pub mod error;
pub mod graph; // Renderable tone nodes and the voice mixer

pub use engine::{cue::Cue, Dispatch, EngineConfig, SoundEngine};
pub use error::{Result, SfxError};

pub const MAX_BLOCK_SIZE: usize = 2048;
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;

/// Level every gain envelope decays to, whatever the starting volume.
pub const ENVELOPE_FLOOR: f32 = 0.01;
