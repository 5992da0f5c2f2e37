use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required setting `{0}`")]
    Missing(&'static str),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("truncation keep length {keep_len} exceeds trigger length {trigger_len}")]
    InvalidLimits { keep_len: usize, trigger_len: usize },

    #[error("`{0}` must be at least 1 second")]
    ZeroTimeout(&'static str),

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unreadable response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("response contained no text")]
    Empty,
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    Status { status: u16, body: String },
}

impl NotifyError {
    /// Response body for the operator log, when the server sent one.
    pub fn response_text(&self) -> &str {
        match self {
            NotifyError::Status { body, .. } => body,
            NotifyError::Http(_) => "No response",
        }
    }
}
