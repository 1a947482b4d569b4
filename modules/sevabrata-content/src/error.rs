use thiserror::Error;

pub type Result<T> = std::result::Result<T, ContentError>;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Content host returned status {status} for {path}")]
    Status { status: u16, path: String },

    #[error("Parse error in {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Unsupported base URL `{0}`: content must be served over HTTP. Run a local web server (e.g. `python3 -m http.server 8000`) instead of opening files directly.")]
    UnsupportedScheme(String),

    #[error("Invalid base URL `{0}`")]
    InvalidBaseUrl(String),
}

impl From<reqwest::Error> for ContentError {
    fn from(err: reqwest::Error) -> Self {
        ContentError::Network(err.to_string())
    }
}
