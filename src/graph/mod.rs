//! Renderable building blocks for tones.
//!
//! Graph nodes wrap the low-level DSP primitives with block-based rendering
//! and timing. A tone is always the same small graph: a (possibly swept)
//! oscillator, amplified by an exponential gain envelope, gated to a start
//! and stop frame. The mixer sums every live tone.

/// Multiply a signal by a gain signal.
pub mod amplify;
/// Exponential gain envelope decaying to the fixed floor.
pub mod envelope;
/// Fluent combinators (`.amplify()`, `.gate()`).
pub mod extensions;
/// Absolute start/stop window for a node.
pub mod gate;
/// Additive mixing of independent tone voices.
pub mod mix;
/// Core traits shared by all graph nodes.
pub mod node;
/// Swept audio-band oscillators.
pub mod oscillator;
/// Tone description → node pair.
pub mod tone;

pub use mix::VoiceMixer;
pub use node::{GraphNode, RenderCtx};
pub use tone::{build_tone, ToneNode};
