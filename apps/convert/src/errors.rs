use std::path::PathBuf;

use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Every variant is fatal: the run aborts and `main` exits non-zero.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to extract text from {}: {}", .path.display(), .message)]
    Extract { path: PathBuf, message: String },

    #[error("I/O error on {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Invalid tag pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl AppError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::Io {
            path: path.into(),
            source,
        }
    }
}
