//! saavy-sfx - terminal sound board for the UI feedback cues
//!
//! Run with: cargo run
//! Logs go to the file named by SAAVY_SFX_LOG (filter with RUST_LOG).

mod app;
mod logging;

use app::SoundBoard;
use saavy_sfx::SoundEngine;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    logging::init()?;

    let engine = SoundEngine::new();
    engine.init();

    let mut terminal = ratatui::init();
    let result = SoundBoard::new(engine).run(&mut terminal);
    ratatui::restore();

    result
}
