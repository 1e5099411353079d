use std::path::PathBuf;

use chrono::NaiveDate;

/// Process exit codes, one per error category.
pub mod exit_code {
    pub const USAGE: i32 = 2;
    pub const NETWORK: i32 = 3;
    pub const HTTP: i32 = 4;
    pub const MALFORMED_RESPONSE: i32 = 5;
    pub const RENDER: i32 = 6;
    pub const IO: i32 = 7;
}

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Usage error: {0}")]
    Usage(String),

    #[error("Invalid date range: start date {start} is after end date {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("HTTP error: status {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ReportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReportError::Io {
            path: path.into(),
            source,
        }
    }

    /// Exit code for the error's category.
    pub fn exit_code(&self) -> i32 {
        match self {
            ReportError::Usage(_) | ReportError::InvalidRange { .. } | ReportError::Config(_) => {
                exit_code::USAGE
            }
            ReportError::Network(_) => exit_code::NETWORK,
            ReportError::Http { .. } => exit_code::HTTP,
            ReportError::MalformedResponse(_) => exit_code::MALFORMED_RESPONSE,
            ReportError::Render(_) => exit_code::RENDER,
            ReportError::Io { .. } | ReportError::Json(_) => exit_code::IO,
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
