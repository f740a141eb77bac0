//! src/error.rs
//! ============================================================================
//! # `AppError`: Unified Error Type for the Search Client
//!
//! This module defines the error enum used across the application. Each
//! variant carries enough context to be rendered directly in the overlay
//! error banner, and fallible modules return `Result<T, AppError>`.

use std::{io, path::PathBuf};
use thiserror::Error;

/// Unified error type for all search client operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// HTTP transport failure (connection, timeout, undecodable body),
    /// auto-converted from `reqwest::Error`.
    #[error("Request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Service answered with a non-success HTTP status.
    #[error("{operation} failed: HTTP status {status}")]
    HttpStatus { operation: String, status: u16 },

    /// Service answered 2xx but reported a failure in the body.
    #[error("{operation} failed: {message}")]
    Service { operation: String, message: String },

    /// Recent-state file I/O error with path.
    #[error("Recent-state I/O error on {path:?}: {source}")]
    StoreIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Recent-state TOML parsing error.
    #[error("Recent-state parse error: {0}")]
    StoreParse(#[from] toml::de::Error),

    /// Recent-state TOML serialization error.
    #[error("Recent-state serialize error: {0}")]
    StoreSerialize(#[from] toml::ser::Error),

    /// Any other error, with description.
    #[error("Unexpected error: {0}")]
    Other(String),
}

impl AppError {
    /// Create a non-success HTTP status error for a named operation.
    pub fn http_status<S: Into<String>>(operation: S, status: u16) -> Self {
        Self::HttpStatus {
            operation: operation.into(),
            status,
        }
    }

    /// Create a service-reported failure for a named operation.
    pub fn service<S1: Into<String>, S2: Into<String>>(operation: S1, message: S2) -> Self {
        Self::Service {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create a recent-state I/O error.
    pub fn store_io<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        Self::StoreIo {
            path: path.into(),
            source,
        }
    }
}
