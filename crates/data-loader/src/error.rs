//! Error types for the data-loader crate.

use thiserror::Error;

/// Errors that can occur while loading the applist catalog or review files.
///
/// Loading is fail-fast: there is no retry or partial-result path, so every
/// variant is terminal for the operation that produced it.
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// I/O error reading or writing a local file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The one-time applist fetch failed (network error or non-success status)
    #[error("failed to fetch the applist from {url}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The cached applist payload could not be parsed
    #[error("malformed applist payload in {path}")]
    MalformedCatalog {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A review file could not be read or a row failed to deserialize.
    ///
    /// Missing required columns (`appid`, `steamid`, `voted_up`) surface
    /// here on the first row that needs them.
    #[error("CSV error in {path}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
