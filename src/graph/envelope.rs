use crate::dsp::ExpRamp;
use crate::graph::node::{GraphNode, RenderCtx};
use crate::ENVELOPE_FLOOR;

/// Gain envelope: starts at the requested volume and decays exponentially
/// to [`ENVELOPE_FLOOR`] over the tone's duration.
///
/// The floor is not a parameter. A louder tone decays faster in absolute
/// terms but always ends on the same level, which keeps overlapping cues
/// from leaving a tail of uneven loudness.
pub struct EnvNode {
    gain: ExpRamp,
}

impl EnvNode {
    pub fn decay(volume: f32, duration: f32, sample_rate: f32) -> Self {
        Self::ramp(volume, ENVELOPE_FLOOR, duration, sample_rate)
    }

    /// Exponential gain ramp between two explicit levels.
    pub fn ramp(start: f32, end: f32, duration: f32, sample_rate: f32) -> Self {
        Self {
            gain: ExpRamp::new(start, end, duration, sample_rate),
        }
    }

    /// Current gain level.
    pub fn level(&self) -> f32 {
        self.gain.value()
    }

    pub fn is_finished(&self) -> bool {
        self.gain.is_finished()
    }
}

impl GraphNode for EnvNode {
    fn render_block(&mut self, out: &mut [f32], _ctx: &RenderCtx) {
        self.gain.render(out);
    }

    fn is_active(&self) -> bool {
        !self.gain.is_finished()
    }
}
