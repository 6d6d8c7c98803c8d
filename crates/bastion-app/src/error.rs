//! Host-level errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("simulation already running")]
    AlreadyRunning,
    #[error("simulation not started")]
    NotRunning,
    #[error("game loop channel closed")]
    ChannelClosed,
    #[error("shared state lock poisoned: {0}")]
    LockPoisoned(String),
    #[error("failed to spawn game loop thread: {0}")]
    Thread(#[source] std::io::Error),
    #[error("game loop thread panicked")]
    LoopPanicked,
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl<T> From<std::sync::PoisonError<T>> for AppError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        AppError::LockPoisoned(e.to_string())
    }
}
