use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use saavy_sfx::{
    context::{AudioContext, OfflineContext},
    Dispatch, Result, SoundEngine,
};

fn engine_on(ctx: Arc<OfflineContext>) -> SoundEngine {
    SoundEngine::builder()
        .dispatch(Dispatch::Thread)
        .context(move || -> Result<Arc<dyn AudioContext>> {
            Ok(ctx.clone() as Arc<dyn AudioContext>)
        })
        .build()
}

fn wait_for(mut done: impl FnMut() -> bool, timeout: Duration) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if done() {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    done()
}

#[test]
fn timer_thread_plays_delayed_steps() {
    let ctx = Arc::new(OfflineContext::new(8_000.0));
    let engine = engine_on(ctx.clone());

    let started = Instant::now();
    engine.play_success();
    assert_eq!(ctx.tones_started(), 1);

    // two sweeps and the dual pair
    assert!(wait_for(|| ctx.tones_started() == 4, Duration::from_secs(5)));
    assert!(started.elapsed() >= Duration::from_millis(280));
    assert_eq!(engine.pending(), 0);
}

#[test]
fn dropping_the_engine_with_steps_queued_does_not_hang() {
    let ctx = Arc::new(OfflineContext::new(8_000.0));
    let engine = engine_on(ctx.clone());

    engine.play_hacker_access();
    drop(engine);

    // The timer may still fire what it already picked up, but never panics
    thread::sleep(Duration::from_millis(400));
    assert!(ctx.tones_started() >= 1);
}
