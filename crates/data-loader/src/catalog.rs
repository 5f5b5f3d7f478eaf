//! Applist catalog loading and caching.
//!
//! The storefront applist is fetched at most once: if the local cache file is
//! missing the raw response body is persisted verbatim before parsing, so
//! repeated runs are idempotent and work offline after the first one.

use crate::error::{DataLoadError, Result};
use crate::types::{AppListPayload, Catalog};
use std::fs;
use std::path::PathBuf;

/// Storefront applist endpoint
pub const APP_IDS_URL: &str = "https://api.steampowered.com/ISteamApps/GetAppList/v2/";

/// Default on-disk location for the cached applist payload
pub const DEFAULT_CACHE_PATH: &str = "data/app_ids.json";

/// Loads the appid→name catalog, pulling from the storefront when the local
/// cache is absent.
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    url: String,
    cache_path: PathBuf,
}

impl CatalogLoader {
    pub fn new(url: impl Into<String>, cache_path: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            cache_path: cache_path.into(),
        }
    }

    /// Load the catalog.
    ///
    /// Steps:
    /// 1. If the cache file does not exist, GET the applist URL and persist
    ///    the raw body.
    /// 2. Parse the now-guaranteed-present cache file.
    /// 3. Build the `Catalog` with its collision and fallback rules.
    ///
    /// Network failure and malformed cache content are both fatal; there is
    /// no retry and no fallback beyond the cache file itself.
    pub fn load(&self) -> Result<Catalog> {
        if !self.cache_path.exists() {
            tracing::info!(
                path = %self.cache_path.display(),
                url = %self.url,
                "applist cache not found, pulling from the storefront"
            );
            self.pull_to_cache()?;
        }

        let raw = fs::read_to_string(&self.cache_path)?;
        let payload: AppListPayload =
            serde_json::from_str(&raw).map_err(|source| DataLoadError::MalformedCatalog {
                path: self.cache_path.display().to_string(),
                source,
            })?;

        let catalog = Catalog::from_entries(payload.applist.apps);
        tracing::info!(
            entries = catalog.len(),
            collisions = catalog.name_collisions(),
            "applist catalog loaded"
        );
        Ok(catalog)
    }

    /// Fetch the applist and persist the raw response body verbatim.
    ///
    /// The body goes to a sibling temp file first and is renamed into place:
    /// an interrupted run never leaves a truncated cache behind.
    fn pull_to_cache(&self) -> Result<()> {
        let body = reqwest::blocking::get(&self.url)
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.text())
            .map_err(|source| DataLoadError::Fetch {
                url: self.url.clone(),
                source,
            })?;

        if let Some(parent) = self.cache_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp_path = self.cache_path.with_extension("json.part");
        fs::write(&tmp_path, &body)?;
        fs::rename(&tmp_path, &self.cache_path)?;
        Ok(())
    }
}

impl Default for CatalogLoader {
    fn default() -> Self {
        Self::new(APP_IDS_URL, DEFAULT_CACHE_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_existing_cache() {
        // With the cache present no fetch happens, so a bogus URL is fine
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("app_ids.json");
        fs::write(
            &cache,
            r#"{"applist": {"apps": [{"appid": 1, "name": "Alpha"}, {"appid": 2, "name": "Beta"}]}}"#,
        )
        .unwrap();

        let loader = CatalogLoader::new("http://invalid.test/applist", &cache);
        let catalog = loader.load().unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.resolve(1), "Alpha");
        assert_eq!(catalog.resolve(2), "Beta");
    }

    #[test]
    fn test_malformed_cache_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("app_ids.json");
        fs::write(&cache, "{ not json").unwrap();

        let loader = CatalogLoader::new("http://invalid.test/applist", &cache);
        let err = loader.load().unwrap_err();

        assert!(matches!(err, DataLoadError::MalformedCatalog { .. }));
    }

    #[test]
    fn test_collision_warning_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("app_ids.json");
        fs::write(
            &cache,
            r#"{"applist": {"apps": [{"appid": 10, "name": "X"}, {"appid": 10, "name": "Y"}]}}"#,
        )
        .unwrap();

        let catalog = CatalogLoader::new("http://invalid.test/applist", &cache)
            .load()
            .unwrap();

        assert_eq!(catalog.resolve(10), "Y");
        assert_eq!(catalog.name_collisions(), 1);
    }
}
