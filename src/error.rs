//! Error definitions shared across subsystems.
//!
//! Malformed database rows and address misses are not errors: the former are
//! skipped during the scan, the latter produce an empty `LookupResult`.

use std::io;

use thiserror::Error;

/// Errors raised while reading the range database.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The database could not be opened or read to completion.
    #[error("IP database unavailable ({source_name}): {cause}")]
    DatabaseUnavailable {
        source_name: String,
        #[source]
        cause: io::Error,
    },
}

impl LookupError {
    pub fn unavailable(source_name: impl Into<String>, cause: io::Error) -> Self {
        Self::DatabaseUnavailable {
            source_name: source_name.into(),
            cause,
        }
    }
}

/// Errors that terminate a redirect request with a diagnostic instead of a redirect.
#[derive(Debug, Error)]
pub enum RedirectError {
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// The selected destination is not a usable absolute URL.
    #[error("invalid destination URL {url:?}: {reason}")]
    InvalidDestinationUrl { url: String, reason: String },
}

/// Result type for database lookups.
pub type GeoResult<T> = Result<T, LookupError>;
