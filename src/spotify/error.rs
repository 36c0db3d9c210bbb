use std::fmt;

use reqwest::StatusCode;

/// Failure of a call against the Spotify Web API.
///
/// Actions never catch or translate these; they reach the invoker as-is.
#[derive(Debug)]
pub enum ApiError {
    /// Transport failure: connect, timeout, or reading the body.
    Http(reqwest::Error),
    /// Spotify answered with a non-success status.
    Status { status: StatusCode, message: String },
    /// Success status, but a body that isn't the expected JSON.
    Decode(String),
    /// No usable access token.
    Auth(String),
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Http(e) => e.status(),
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Decode(_) | ApiError::Auth(_) => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Http(e) => write!(f, "request to Spotify failed: {}", e),
            ApiError::Status { status, message } => {
                write!(f, "Spotify returned {}: {}", status, message)
            }
            ApiError::Decode(msg) => write!(f, "unexpected response from Spotify: {}", msg),
            ApiError::Auth(msg) => write!(f, "not authenticated: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Http(err)
    }
}
