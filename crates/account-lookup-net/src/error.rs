//! Failures talking to the Web API.

/// Why a search request did not produce records.
#[derive(Debug, Clone, thiserror::Error)]
pub enum NetworkError {
    /// reqwest reported a failure that fits no narrower variant.
    #[error("request failed: {0}")]
    Request(String),
    /// The environment URL or a derived collection URL did not parse.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("request timed out")]
    Timeout,
    /// The environment could not be reached.
    #[error("connection failed: {0}")]
    Connection(String),
    /// The bearer token produced an unusable `Authorization` value.
    #[error("invalid header: {0}")]
    InvalidHeader(String),
    /// The response body was not a `{ "value": [...] }` collection.
    #[error("malformed JSON response: {0}")]
    Json(String),
    /// The server answered with a 4xx or 5xx status.
    #[error("server returned {status}{}", detail(.message))]
    HttpStatus {
        status: u16,
        /// The OData `error.message`, or the raw body when that is absent.
        message: Option<String>,
    },
}

impl NetworkError {
    /// The response status, for [`NetworkError::HttpStatus`] only.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for NetworkError {
    fn from(err: reqwest::Error) -> Self {
        match err {
            err if err.is_timeout() => Self::Timeout,
            err if err.is_connect() => Self::Connection(err.to_string()),
            err if err.is_decode() => Self::Json(err.to_string()),
            err => Self::Request(err.to_string()),
        }
    }
}

impl From<url::ParseError> for NetworkError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

impl From<serde_json::Error> for NetworkError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<http::header::InvalidHeaderValue> for NetworkError {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Self::InvalidHeader(err.to_string())
    }
}

fn detail(message: &Option<String>) -> String {
    match message {
        Some(message) => format!(": {message}"),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, NetworkError>;
