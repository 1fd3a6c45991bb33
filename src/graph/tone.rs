use crate::{
    context::ToneSpec,
    dsp::ExpRamp,
    graph::{
        amplify::Amplify, envelope::EnvNode, extensions::NodeExt, gate::Gate,
        node::GraphNode, oscillator::OscNode,
    },
};

/// The node pair behind a single tone: oscillator × gain, gated in time.
pub type ToneNode = Gate<Amplify<OscNode, EnvNode>>;

/// Build the renderable node for a tone description.
///
/// Frequency and gain ramps both span exactly the start/stop window, so the
/// oscillator and its envelope finish on the same frame.
pub fn build_tone(spec: &ToneSpec, sample_rate: f32) -> ToneNode {
    let duration = spec.duration() as f32;

    let frequency = if spec.freq_start == spec.freq_end {
        ExpRamp::constant(spec.freq_start)
    } else {
        ExpRamp::new(spec.freq_start, spec.freq_end, duration, sample_rate)
    };

    let start_frame = (spec.start_time * sample_rate as f64).round() as u64;
    let stop_frame = (spec.stop_time * sample_rate as f64).round() as u64;

    OscNode::new(spec.waveform, frequency)
        .amplify(EnvNode::ramp(spec.gain_start, spec.gain_end, duration, sample_rate))
        .gate(start_frame, stop_frame)
}

/// Boxed form handed across threads to the mixer.
pub fn boxed_tone(spec: &ToneSpec, sample_rate: f32) -> Box<dyn GraphNode> {
    Box::new(build_tone(spec, sample_rate))
}
