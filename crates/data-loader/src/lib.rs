//! # Data Loader Crate
//!
//! This crate handles loading the Steam review dataset: the applist catalog
//! (appid → display name) and the per-day review CSV dumps.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (AppEntry, Catalog, Review, ReviewTable)
//! - **catalog**: Fetch-once/cache-forever applist loading
//! - **reviews**: Review file discovery and name-joined table loading
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{CatalogLoader, ReviewLoader};
//! use std::path::Path;
//!
//! // Pulls the applist on the first run, reads the cache afterwards
//! let catalog = CatalogLoader::default().load()?;
//!
//! // First five reviews*.csv files (path-sorted) in the data directory
//! let table = ReviewLoader::default().load_dir(Path::new("data"), &catalog)?;
//!
//! println!("{} reviews over {} apps", table.len(), catalog.len());
//! ```
//!
//! Everything here is synchronous and single-threaded: the only I/O (one
//! HTTP GET, flat-file reads) happens up front, before any analysis runs.

// Public modules
pub mod catalog;
pub mod error;
pub mod reviews;
pub mod types;

// Re-export commonly used types for convenience
pub use catalog::{CatalogLoader, APP_IDS_URL, DEFAULT_CACHE_PATH};
pub use error::{DataLoadError, Result};
pub use reviews::{discover_review_files, ReviewLoader, DEFAULT_TRAINING_FILES};
pub use types::{
    // Type aliases
    AppId,
    SteamId,
    // Core types
    AppEntry,
    Catalog,
    Review,
    ReviewTable,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table() {
        let table = ReviewTable::default();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
        assert_eq!(table.source_files, 0);
    }

    #[test]
    fn test_empty_catalog_still_resolves() {
        let catalog = Catalog::default();
        assert!(catalog.is_empty());
        assert_eq!(catalog.resolve(570), "570");
    }
}
