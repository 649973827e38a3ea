use thiserror::Error;
use tokio::sync::mpsc;

/// TUI-specific errors
#[derive(Error, Debug)]
pub enum TuiError {
    #[error("Terminal error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to send refresh signal")]
    RefreshSignalFailed(#[from] mpsc::error::TrySendError<()>),

    #[error("Favorites are unavailable")]
    NoFavoriteStore,
}

/// Result type for TUI operations
pub type TuiResult<T> = Result<T, TuiError>;
