//! Entity-level review counts and vote-ratio rankings.

use data_loader::{Review, ReviewTable};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// One group from `counts_by`: the key, its row count, and its share of all
/// rows.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyCount<K> {
    pub key: K,
    pub count: usize,
    pub proportion: f64,
}

/// Group rows by an arbitrary key and count them.
///
/// Proportions are relative to the whole table and sum to 1.0 across all
/// groups. The result is sorted descending by proportion; ties keep the
/// key-ascending order the grouping produced, so identical input always
/// yields identical output. An empty table yields an empty vec.
pub fn counts_by<K, F>(table: &ReviewTable, key: F) -> Vec<KeyCount<K>>
where
    K: Ord,
    F: Fn(&Review) -> K,
{
    let mut groups: BTreeMap<K, usize> = BTreeMap::new();
    for review in &table.rows {
        *groups.entry(key(review)).or_insert(0) += 1;
    }

    let total = table.len();
    let mut out: Vec<KeyCount<K>> = groups
        .into_iter()
        .map(|(key, count)| KeyCount {
            key,
            count,
            proportion: count as f64 / total as f64,
        })
        .collect();
    // Stable sort over a key-ordered vec keeps ties deterministic
    out.sort_by(|a, b| {
        b.proportion
            .partial_cmp(&a.proportion)
            .unwrap_or(Ordering::Equal)
    });
    out
}

/// Review counts per display name, most-reviewed first.
pub fn counts_by_name(table: &ReviewTable) -> Vec<KeyCount<String>> {
    counts_by(table, |review| review.name.clone())
}

/// One entry of the positive/negative ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct VoteRatio {
    pub name: String,
    pub up: usize,
    pub down: usize,
    /// up / down; always finite because one-sided names are excluded
    pub ratio: f64,
}

/// Rank names by their positive-to-negative vote ratio, descending.
///
/// Names missing either side are dropped: a game with zero negative votes
/// has no finite ratio, so rather than propagate infinity it simply does
/// not rank. (The shared denominator cancels, so the ratio of proportions
/// equals the ratio of raw counts.)
pub fn positive_negative_ratio(table: &ReviewTable) -> Vec<VoteRatio> {
    let mut groups: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for review in &table.rows {
        let entry = groups.entry(review.name.as_str()).or_insert((0, 0));
        if review.voted_up {
            entry.0 += 1;
        } else {
            entry.1 += 1;
        }
    }

    let mut out: Vec<VoteRatio> = groups
        .into_iter()
        .filter(|&(_, (up, down))| up > 0 && down > 0)
        .map(|(name, (up, down))| VoteRatio {
            name: name.to_owned(),
            up,
            down,
            ratio: up as f64 / down as f64,
        })
        .collect();
    out.sort_by(|a, b| b.ratio.partial_cmp(&a.ratio).unwrap_or(Ordering::Equal));
    out
}
