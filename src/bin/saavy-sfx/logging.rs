//! Tracing setup for the sound board.
//!
//! The TUI owns the terminal, so log lines go to a file or nowhere.

use std::fs::File;
use std::sync::Mutex;

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use tracing_subscriber::EnvFilter;

const LOG_PATH_VAR: &str = "SAAVY_SFX_LOG";

pub fn init() -> EyreResult<()> {
    let Some(path) = std::env::var_os(LOG_PATH_VAR) else {
        return Ok(());
    };

    let file = File::create(&path)
        .wrap_err_with(|| format!("failed to create log file {}", path.to_string_lossy()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
