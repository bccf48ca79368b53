//! Error types shared by the API client and the screens

use thiserror::Error;

/// Coarse classification screens use to decide how to react to a failure
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The server answered but refused the request (non-2xx)
    Validation,
    /// The request never produced a usable answer
    Network,
    /// The session was rejected; it has already been torn down
    Unauthorized,
}

/// Failure of a single API call
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("server rejected the request ({status})")]
    Rejected { status: u16 },

    #[error("network error: {0}")]
    Network(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("invalid server response: {0}")]
    InvalidResponse(String),

    #[error("cannot build a request URL from base {0}")]
    InvalidUrl(String),

    #[error("cannot encode request body: {0}")]
    Encode(String),

    #[error("file error: {0}")]
    Io(String),
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Rejected { .. }
            | ApiError::InvalidResponse(_)
            | ApiError::InvalidUrl(_)
            | ApiError::Encode(_) => ErrorKind::Validation,
            ApiError::Network(_) | ApiError::Io(_) => ErrorKind::Network,
            ApiError::Unauthorized => ErrorKind::Unauthorized,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::InvalidResponse(e.to_string())
        } else if e.is_timeout() {
            ApiError::Network("request timed out".to_string())
        } else if e.is_connect() {
            ApiError::Network(format!("connection failed: {}", e))
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(e: std::io::Error) -> Self {
        ApiError::Io(e.to_string())
    }
}

/// Configuration could not be resolved
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("malformed config file {path}: {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },

    #[error("invalid API URL {0:?}")]
    InvalidUrl(String),
}
