#![forbid(unsafe_code)]

//! Error type for the few fallible engine entry points.
//!
//! The scroll flow itself has no fatal conditions: invalid configuration is
//! clamped and programmatic commands report failure through their completion.
//! [`ScrollError`] covers the explicit `try_*` proxy commands and JSON config
//! loading.

use std::fmt;

/// Errors surfaced by fallible engine operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrollError {
    /// The scroll region behind a proxy has been destroyed.
    Detached,
    /// Configuration could not be parsed.
    InvalidConfig(String),
}

impl fmt::Display for ScrollError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScrollError::Detached => write!(f, "scroll region is no longer attached"),
            ScrollError::InvalidConfig(msg) => write!(f, "invalid scroll configuration: {msg}"),
        }
    }
}

impl std::error::Error for ScrollError {}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for ScrollError {
    fn from(e: serde_json::Error) -> Self {
        ScrollError::InvalidConfig(e.to_string())
    }
}

/// Result type for fallible engine operations.
pub type ScrollResult<T> = Result<T, ScrollError>;
