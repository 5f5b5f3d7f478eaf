//! Review table loading.
//!
//! Review dumps arrive as per-day `reviews*.csv` files in a single
//! directory. Discovery sorts paths so the training slice is deterministic
//! regardless of filesystem enumeration order; loading concatenates rows and
//! left-joins display names from the catalog.

use crate::error::{DataLoadError, Result};
use crate::types::{Catalog, Review, ReviewTable};
use std::fs;
use std::path::{Path, PathBuf};

/// How many review files (by path sort order) form the training set by
/// default. Caller-visible and overridable through `ReviewLoader`.
pub const DEFAULT_TRAINING_FILES: usize = 5;

/// Find every `reviews*.csv` directly under `dir`, sorted by path.
pub fn discover_review_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if file_name.starts_with("reviews") && file_name.ends_with(".csv") {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Loads and concatenates review files into a `ReviewTable`.
#[derive(Debug, Clone)]
pub struct ReviewLoader {
    /// How many discovered files (in sort order) to treat as training data
    pub training_files: usize,
}

impl ReviewLoader {
    pub fn new(training_files: usize) -> Self {
        Self { training_files }
    }

    /// Concatenate rows from `paths` in the order given.
    ///
    /// Every row's `name` is left-joined from the catalog; appids the
    /// catalog does not know come back stringified. No deduplication, no
    /// up-front schema validation: a missing required column fails on the
    /// first row that needs it, as a `Csv` error naming the file.
    pub fn load(&self, paths: &[PathBuf], catalog: &Catalog) -> Result<ReviewTable> {
        let mut rows = Vec::new();
        for path in paths {
            let display = path.display().to_string();
            let mut reader =
                csv::Reader::from_path(path).map_err(|source| DataLoadError::Csv {
                    path: display.clone(),
                    source,
                })?;
            for record in reader.deserialize::<Review>() {
                let mut review = record.map_err(|source| DataLoadError::Csv {
                    path: display.clone(),
                    source,
                })?;
                review.name = catalog.resolve(review.appid);
                rows.push(review);
            }
        }

        tracing::info!(rows = rows.len(), files = paths.len(), "review table loaded");
        Ok(ReviewTable {
            rows,
            source_files: paths.len(),
        })
    }

    /// Discover review files in `dir` and load the first `training_files`
    /// of them (path-sorted).
    pub fn load_dir(&self, dir: &Path, catalog: &Catalog) -> Result<ReviewTable> {
        let discovered = discover_review_files(dir)?;
        let take = self.training_files.min(discovered.len());
        self.load(&discovered[..take], catalog)
    }
}

impl Default for ReviewLoader {
    fn default() -> Self {
        Self::new(DEFAULT_TRAINING_FILES)
    }
}
