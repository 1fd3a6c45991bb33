use thiserror::Error;

pub type Result<T> = std::result::Result<T, SfxError>;

#[derive(Error, Debug)]
pub enum SfxError {
    #[error("no default output device available")]
    NoOutputDevice,

    #[error("failed to fetch default output config: {0}")]
    DefaultConfig(#[from] cpal::DefaultStreamConfigError),

    #[error("failed to build output stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("failed to start output stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),

    #[error("unsupported sample format: {0}")]
    UnsupportedSampleFormat(String),

    /// The thread owning the output stream died before reporting back.
    #[error("audio output thread failed: {0}")]
    OutputThread(String),

    /// The audio callback has not drained earlier tones yet.
    #[error("tone queue is full")]
    QueueFull,

    #[error("invalid tone: {0}")]
    InvalidTone(String),
}
