use crate::clipboard::ClipboardError;
use std::path::PathBuf;
use thiserror::Error;
#[derive(Debug, Error)]
pub enum FilesToPromptError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid ignore pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: globset::Error,
    },
    #[error("Invalid path: {0}")]
    InvalidPath(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] ClipboardError),
    #[cfg(feature = "parallel")]
    #[error("Failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
impl FilesToPromptError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FilesToPromptError::Io {
            path: path.into(),
            source,
        }
    }
}
pub type Result<T> = std::result::Result<T, FilesToPromptError>;
