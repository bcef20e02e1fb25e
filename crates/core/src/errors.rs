//! Core error types for Coffer.
//!
//! Only two conditions are errors here: upstream fetch failures and
//! snapshot store failures. Schema drift in payloads (empty tables,
//! missing amount columns, missing FX rates, absent PnL inputs) resolves
//! to empty/zero/null values by design and never surfaces as an error.

use thiserror::Error;

pub use coffer_market_data::UpstreamError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the treasury tracker.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Upstream fetch failed: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("Snapshot store error: {0}")]
    Store(#[from] StoreError),

    #[error("Input validation failed: {0}")]
    Validation(String),
}

/// Errors raised by the snapshot store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store file or its parent directory could not be read or written.
    #[error("Snapshot store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The store file exists but a record failed to deserialize.
    /// Fatal: no snapshot history can be established from a corrupt store,
    /// and no partial recovery is attempted.
    #[error("Snapshot store corrupt: {path}: {message}")]
    Corrupt { path: String, message: String },

    /// A snapshot failed to serialize for persistence.
    #[error("Failed to serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
