use std::fmt;

/// Failure to retrieve one of the remote tables.
///
/// Each variant maps to a distinct user-facing message; callers typically
/// render it next to a retry affordance.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Request timeout - data source is taking too long to respond ({url})")]
    Timeout { url: String },

    #[error("Data not found - CSV file may have moved ({url})")]
    NotFound { url: String },

    #[error("Server error - data source is temporarily unavailable ({url}, status {status})")]
    Server { url: String, status: u16 },

    #[error("Failed to fetch CSV data from {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("CSV parsing failed for {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: csv::Error,
    },
}

impl FetchError {
    /// The URL of the table that failed.
    pub fn url(&self) -> &str {
        match self {
            FetchError::Timeout { url }
            | FetchError::NotFound { url }
            | FetchError::Server { url, .. }
            | FetchError::Network { url, .. }
            | FetchError::Decode { url, .. } => url,
        }
    }
}

/// Structural violation of an input or output contract.
///
/// Raised by the checks in [`crate::validation`]; soft anomalies are never
/// turned into this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Data validation failed: {}", self.message)
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, thiserror::Error)]
pub enum CovidError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, CovidError>;
