//! Error taxonomy
//!
//! Errors are split by how far they are allowed to travel:
//! - `ConfigError` / `StoreError` at open: fatal, the process exits before polling
//! - `CycleError`: aborts the current poll cycle only
//! - `DeliveryError` / `StoreError` on upsert: logged per item, the cycle continues

use thiserror::Error;

/// Invalid or missing environment configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variable {0} is missing")]
    Missing(&'static str),

    #[error("invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Seen-notification store failures
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot prepare store directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Failures while fetching notifications from GitHub
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("GitHub request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GitHub API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("cannot decode GitHub notifications: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Failures while pushing a single message
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("push request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("push endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid {name} header: {reason}")]
    Header { name: &'static str, reason: String },
}

/// Anything that aborts the remainder of a poll cycle
#[derive(Debug, Error)]
pub enum CycleError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("seen-store lookup failed: {0}")]
    Store(#[from] StoreError),
}
