//! Real-world scenario benchmarks.
//!
//! These render whole cues through the mixer, the same way the audio
//! callback does.

mod cues;

pub use cues::bench_cues;
