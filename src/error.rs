use thiserror::Error;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the library
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Config file error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Directory walk error: {0}")]
    Walk(#[from] jwalk::Error),

    #[error("File path error: {0}")]
    Path(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Classifier returned status {status}: {body}")]
    ClassifierStatus { status: u16, body: String },

    #[error("Unexpected classifier response: {0}")]
    ClassifierResponse(String),
}

impl Error {
    /// Whether the failure came from the external classification service
    /// and may succeed if the caller tries again.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(e) => e.is_timeout() || e.is_connect(),
            Error::ClassifierStatus { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}
