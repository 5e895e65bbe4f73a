//! Unified Error Model
use thiserror::Error;

/// Errors raised at the outer boundaries of the system.
///
/// The analytics core itself never fails: malformed fields degrade to
/// defaults. These variants cover payloads that cannot be read at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DineboardError {
    #[error("PARSE/{0}")]
    ParseError(String),

    #[error("PERIOD/unknown period '{0}' (expected daily, weekly, monthly or total)")]
    InvalidPeriod(String),

    #[error("CONFIG/{0}")]
    ConfigError(String),

    #[error("IO/{0}")]
    IoError(String),
}

impl From<serde_json::Error> for DineboardError {
    fn from(err: serde_json::Error) -> Self {
        DineboardError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for DineboardError {
    fn from(err: std::io::Error) -> Self {
        DineboardError::IoError(err.to_string())
    }
}
