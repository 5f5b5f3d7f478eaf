//! Core domain types for the Steam review dataset.
//!
//! Type aliases keep appids and steamids from being mixed up; the `Catalog`
//! owns the appid→name mapping and the fallback rules that make name
//! resolution total.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Storefront application identifier (`appid` in the Steam Web API)
pub type AppId = u32;

/// 64-bit Steam account identifier
pub type SteamId = u64;

/// One entry from the storefront applist feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppEntry {
    pub appid: AppId,
    /// Null or absent for some delisted apps; normalized away when the
    /// `Catalog` is built
    #[serde(default)]
    pub name: Option<String>,
}

/// Wire shape of the applist endpoint: `{"applist": {"apps": [...]}}`
#[derive(Debug, Deserialize)]
pub struct AppListPayload {
    pub applist: AppList,
}

#[derive(Debug, Deserialize)]
pub struct AppList {
    pub apps: Vec<AppEntry>,
}

/// The appid→display-name mapping sourced from the storefront applist.
///
/// Immutable once built; `resolve` never fails, falling back to the
/// stringified appid for anything the feed did not name.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    names: HashMap<AppId, String>,
    name_collisions: usize,
}

impl Catalog {
    /// Build the mapping by iterating entries in feed order.
    ///
    /// A repeated appid with a differing name is logged as a warning and the
    /// later entry wins. Null names are replaced with the stringified appid
    /// so every observed appid carries a usable display string.
    pub fn from_entries(entries: Vec<AppEntry>) -> Self {
        let mut names: HashMap<AppId, String> = HashMap::new();
        let mut name_collisions = 0;

        for entry in entries {
            let name = match entry.name {
                Some(name) => name,
                None => entry.appid.to_string(),
            };
            if let Some(previous) = names.get(&entry.appid) {
                if *previous != name {
                    tracing::warn!(
                        appid = entry.appid,
                        previous = %previous,
                        replacement = %name,
                        "applist feed carries two names for the same appid, keeping the later one"
                    );
                    name_collisions += 1;
                }
            }
            names.insert(entry.appid, name);
        }

        Self {
            names,
            name_collisions,
        }
    }

    /// Resolve an appid to a display name.
    ///
    /// Total over all appids: unknown ones come back stringified.
    pub fn resolve(&self, appid: AppId) -> String {
        match self.names.get(&appid) {
            Some(name) => name.clone(),
            None => appid.to_string(),
        }
    }

    /// Name the feed actually carried for an appid, if any.
    pub fn get(&self, appid: AppId) -> Option<&str> {
        self.names.get(&appid).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// How many appids were seen with two differing names while building.
    ///
    /// The warnings themselves go through `tracing`; this counter makes the
    /// condition observable to tests and callers.
    pub fn name_collisions(&self) -> usize {
        self.name_collisions
    }
}

/// A single review row as loaded from a `reviews*.csv` file.
///
/// Columns beyond the ones named here pass through the CSV reader and are
/// dropped; rows are kept in file order and never deduplicated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub steamid: SteamId,
    pub appid: AppId,
    /// Display name left-joined from the catalog; stringified appid when the
    /// catalog has no match. Any `name` column in the file itself is
    /// overwritten by the join.
    #[serde(default)]
    pub name: String,
    #[serde(deserialize_with = "flexible_bool")]
    pub voted_up: bool,
    /// Unix timestamp of the review, when the dump carries one
    #[serde(default)]
    pub timestamp_created: Option<i64>,
}

/// Accept the boolean spellings seen across review dumps ("true"/"True"/"1").
fn flexible_bool<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.as_str() {
        "true" | "True" | "TRUE" | "1" => Ok(true),
        "false" | "False" | "FALSE" | "0" => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "not a boolean: {other:?}"
        ))),
    }
}

/// The concatenated, name-joined review rows for one dataset load.
#[derive(Debug, Default, Clone)]
pub struct ReviewTable {
    /// Rows in file order, duplicates preserved
    pub rows: Vec<Review>,
    /// How many files contributed rows
    pub source_files: usize,
}

impl ReviewTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(appid: AppId, name: Option<&str>) -> AppEntry {
        AppEntry {
            appid,
            name: name.map(str::to_owned),
        }
    }

    #[test]
    fn test_resolve_known_and_unknown() {
        let catalog = Catalog::from_entries(vec![entry(1, Some("Alpha"))]);

        assert_eq!(catalog.resolve(1), "Alpha");
        // Unknown appids resolve to their stringified value, never an error
        assert_eq!(catalog.resolve(99), "99");
        assert_eq!(catalog.get(99), None);
    }

    #[test]
    fn test_null_name_substituted() {
        let catalog = Catalog::from_entries(vec![entry(440, None)]);

        assert_eq!(catalog.resolve(440), "440");
        assert_eq!(catalog.get(440), Some("440"));
    }

    #[test]
    fn test_collision_last_write_wins() {
        let catalog = Catalog::from_entries(vec![
            entry(10, Some("X")),
            entry(10, Some("Y")),
            entry(11, Some("Z")),
            // Same name repeated is not a collision
            entry(11, Some("Z")),
        ]);

        assert_eq!(catalog.resolve(10), "Y");
        assert_eq!(catalog.name_collisions(), 1);
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_payload_shape() {
        let raw = r#"{"applist": {"apps": [{"appid": 1, "name": "Alpha"}, {"appid": 2, "name": null}]}}"#;
        let payload: AppListPayload = serde_json::from_str(raw).unwrap();

        assert_eq!(payload.applist.apps.len(), 2);
        assert_eq!(payload.applist.apps[0].appid, 1);
        assert!(payload.applist.apps[1].name.is_none());
    }
}
