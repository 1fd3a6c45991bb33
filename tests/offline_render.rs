use std::sync::Arc;

use saavy_sfx::{
    context::{AudioContext, OfflineContext},
    engine::clock::ManualClock,
    Dispatch, Result, SoundEngine,
};

const SAMPLE_RATE: f32 = 8_000.0;

fn frames(ms: u64) -> usize {
    (ms as f32 * SAMPLE_RATE / 1000.0) as usize
}

/// Engine rendering into memory, with the step clock moved in lockstep with
/// the rendered audio.
struct Offline {
    engine: SoundEngine,
    clock: Arc<ManualClock>,
    ctx: Arc<OfflineContext>,
    audio: Vec<f32>,
}

impl Offline {
    fn new() -> Self {
        let clock = Arc::new(ManualClock::new(0));
        let ctx = Arc::new(OfflineContext::new(SAMPLE_RATE));
        let shared = ctx.clone();
        let engine = SoundEngine::builder()
            .clock(clock.clone())
            .dispatch(Dispatch::Manual)
            .context(move || -> Result<Arc<dyn AudioContext>> {
                Ok(shared.clone() as Arc<dyn AudioContext>)
            })
            .build();

        Self {
            engine,
            clock,
            ctx,
            audio: Vec::new(),
        }
    }

    /// Render up to `ms`, running due steps at each of `marks` on the way.
    fn render_until(&mut self, ms: u64, marks: &[u64]) {
        for &mark in marks.iter().chain(std::iter::once(&ms)) {
            let rendered = self.audio.len();
            let target = frames(mark);
            if target > rendered {
                self.audio.extend(self.ctx.render(target - rendered));
            }
            self.clock.set(mark);
            self.engine.run_due();
        }
    }
}

#[test]
fn hacker_access_renders_and_falls_silent() {
    let mut off = Offline::new();
    off.engine.play_hacker_access();
    off.render_until(600, &[180, 320]);

    assert_eq!(off.ctx.tones_started(), 4);
    assert_eq!(off.ctx.active_voices(), 0);

    // first sample: square at +1 times the first step's volume
    assert!((off.audio[0] - 0.2).abs() < 1e-6);

    // the dual pair ends 440 ms in; nothing after that
    assert!(off.audio[frames(440)..].iter().all(|s| *s == 0.0));

    // overlap never exceeds the sum of the loudest concurrent gains
    let peak = off.audio.iter().fold(0.0f32, |acc, s| acc.max(s.abs()));
    assert!(peak <= 0.2 + 0.15 + 1e-6, "peak {peak}");
}

#[test]
fn envelope_tail_ends_on_the_floor() {
    let mut off = Offline::new();
    off.engine.play_click();
    off.render_until(100, &[]);

    // 50 ms click: the last sounding sample sits just above the floor
    let last = off.audio[frames(50) - 1].abs();
    assert!(last > 0.0099 && last < 0.0105, "last sample {last}");
    assert_eq!(off.audio[frames(50)], 0.0);
}

#[test]
fn muted_engine_renders_silence() {
    let mut off = Offline::new();
    off.engine.set_muted(true);
    off.engine.play_chime();
    off.render_until(500, &[150]);

    assert_eq!(off.ctx.tones_started(), 0);
    assert!(off.audio.iter().all(|s| *s == 0.0));
}
