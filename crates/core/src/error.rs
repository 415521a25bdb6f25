//! Unified error types for analytics tracking.
//!
//! Error codes:
//! - ACCESS_001-002: Role-gated access errors
//! - STORE_001-004: First-party store errors

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Access control error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessErrorCode {
    /// ACCESS_001: Role may not view analytics
    ViewDenied,
    /// ACCESS_002: Role may not change integration settings
    ManageDenied,
}

impl AccessErrorCode {
    /// Get the error code string.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ViewDenied => "ACCESS_001",
            Self::ManageDenied => "ACCESS_002",
        }
    }
}

/// Store error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorCode {
    /// STORE_001: Failed to insert an event record
    InsertFailed,
    /// STORE_002: Failed to read rows
    QueryFailed,
    /// STORE_003: Failed to update a row
    UpdateFailed,
    /// STORE_004: Store could not be reached
    Unavailable,
}

impl StoreErrorCode {
    /// Get the error code string.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InsertFailed => "STORE_001",
            Self::QueryFailed => "STORE_002",
            Self::UpdateFailed => "STORE_003",
            Self::Unavailable => "STORE_004",
        }
    }
}

/// Unified error type for analytics tracking.
#[derive(Debug, Error)]
pub enum Error {
    /// Access error with code.
    #[error("[{code}] {message}")]
    Access {
        code: &'static str,
        message: String,
    },

    /// Store error with code and the HTTP status returned by the backend, if any.
    #[error("[{code}] {message}")]
    Store {
        code: &'static str,
        message: String,
        status: Option<u16>,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create an access error.
    pub fn access(code: AccessErrorCode, msg: impl Into<String>) -> Self {
        Self::Access {
            code: code.code(),
            message: msg.into(),
        }
    }

    /// Create a store error without a backend status.
    pub fn store(code: StoreErrorCode, msg: impl Into<String>) -> Self {
        Self::Store {
            code: code.code(),
            message: msg.into(),
            status: None,
        }
    }

    /// Create a store error carrying the backend's HTTP status.
    pub fn store_status(code: StoreErrorCode, status: u16, msg: impl Into<String>) -> Self {
        Self::Store {
            code: code.code(),
            message: msg.into(),
            status: Some(status),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Get the error code if this is a coded error.
    pub fn error_code(&self) -> Option<&'static str> {
        match self {
            Self::Access { code, .. } => Some(code),
            Self::Store { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Whether retrying the same request could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Store { code, status, .. } => {
                *code == StoreErrorCode::Unavailable.code()
                    || status.map(|s| s >= 500 || s == 429).unwrap_or(false)
            }
            _ => false,
        }
    }
}
