//! Error types shared across the suite.

use std::fmt::{Display, Formatter};

use serde_json::Value;

/// Shared suite result type.
pub type Result<T> = std::result::Result<T, AppError>;

/// Suite error enumeration covering all domain failure modes.
#[derive(Debug)]
pub enum AppError {
    /// Configuration parsing or validation failure.
    Config(String),
    /// A response field is missing, mistyped, or a collection-level
    /// invariant (status/shape/size) is violated.
    Validation(String),
    /// The API returned a non-2xx status; carries the status code and the
    /// error body for diagnosis.
    Transport {
        /// HTTP status code returned by the API.
        status: u16,
        /// JSON error body returned by the API.
        body: Value,
    },
    /// The call failed at the network layer (connect error, timeout)
    /// before any response existed.
    Http(String),
    /// An operation expected to fail returned success instead.
    UnexpectedSuccess(String),
}

impl AppError {
    /// HTTP status code carried by a transport failure, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Validation(msg) => write!(f, "validation: {msg}"),
            Self::Transport { status, body } => {
                write!(f, "transport: api returned status {status}: {body}")
            }
            Self::Http(msg) => write!(f, "http: {msg}"),
            Self::UnexpectedSuccess(msg) => write!(f, "unexpected success: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(format!("invalid config: {err}"))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.to_string())
    }
}
