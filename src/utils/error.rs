use reqwest::StatusCode;
use thiserror::Error;

/// Failure while talking to the upstream search API.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Error fetching repositories from GitHub: {source}")]
    Transport {
        /// Set when the response headers arrived but the body could not be read.
        status: Option<StatusCode>,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to fetch repositories. Status: {status}")]
    Status { status: StatusCode },

    #[error("GitHub returned an empty response body. Status: {status}")]
    EmptyBody { status: StatusCode },

    #[error("GitHub returned a malformed response body: {message}")]
    MalformedBody { status: StatusCode, message: String },
}

impl FetchError {
    /// Upstream status code, when the request got far enough to receive one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            FetchError::Transport { status, source } => status.or_else(|| source.status()),
            FetchError::Status { status }
            | FetchError::EmptyBody { status }
            | FetchError::MalformedBody { status, .. } => Some(*status),
        }
    }
}

/// Failure while computing a popularity score. Aborts the whole batch.
#[derive(Error, Debug)]
pub enum ScoringError {
    #[error("Repository {full_name} reports a last update {days_ahead} day(s) in the future")]
    UpdateInFuture { full_name: String, days_ahead: i64 },

    #[error("Repository {full_name} produced a non-finite score")]
    NonFiniteScore { full_name: String },
}

/// Domain-level failure returned by the scoring service.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Failed to fetch repositories from GitHub: {source}")]
    Fetch {
        #[from]
        source: FetchError,
    },

    #[error("Failed to calculate repository scores: {source}")]
    Scoring {
        #[from]
        source: ScoringError,
    },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Repository service error: {0}")]
    ServiceError(#[from] ServiceError),

    #[error("HTTP client setup failed: {0}")]
    ClientError(#[from] reqwest::Error),

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

pub type Result<T> = std::result::Result<T, AppError>;
