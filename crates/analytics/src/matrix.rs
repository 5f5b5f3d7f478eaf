//! The sparse user×item interaction matrix and its index mappings.
//!
//! This is the center of the crate: it turns the flat review table into a
//! coordinate-compressed sparse matrix plus the four lookup tables needed to
//! move between raw identifiers (steamid, display name) and dense matrix
//! coordinates. The matrix is immutable once built; derived statistics are
//! computed on first access and cached for the lifetime of the instance.

use data_loader::{ReviewTable, SteamId};
use nalgebra_sparse::{CooMatrix, CsrMatrix};
use std::collections::{BTreeSet, HashMap};
use std::io;
use std::sync::OnceLock;

/// Sparse M×N matrix of `voted_up` signals with bidirectional id↔index
/// mappings.
///
/// Index assignment is canonical: user ids ascend numerically over rows,
/// item names ascend lexicographically over columns, so the same input
/// always produces the same coordinates.
///
/// A `voted_up = false` row is stored as an explicit 0.0 entry — it still
/// counts as an observed cell for sparsity and occupancy. Duplicate
/// (user, item) coordinates are summed by the COO→CSR conversion; see
/// `build`.
#[derive(Debug)]
pub struct Interactions {
    matrix: CsrMatrix<f64>,
    user_to_index: HashMap<SteamId, usize>,
    index_to_user: Vec<SteamId>,
    item_to_index: HashMap<String, usize>,
    index_to_item: Vec<String>,

    // Lazily computed, cached for the life of the instance
    sparsity: OnceLock<f64>,
    per_user: OnceLock<Vec<usize>>,
    per_item: OnceLock<Vec<usize>>,
}

impl Interactions {
    /// Build the interaction matrix from a fully loaded review table.
    ///
    /// Steps:
    /// 1. Collect the distinct user ids and item names; sort each
    ///    (numeric / lexicographic) for reproducible index assignment.
    /// 2. Assign dense indices 0..M-1 and 0..N-1 in that order, keeping
    ///    both directions of each mapping.
    /// 3. Push every row into a COO matrix as
    ///    (user_index, item_index, voted_up as 0.0/1.0) and convert to CSR.
    ///
    /// When the same user reviews the same game in more than one row the
    /// CSR conversion sums the values; callers that care can detect it by
    /// a cell value above 1.0.
    ///
    /// An empty table yields a 0×0 matrix; nothing here divides by its
    /// dimensions.
    pub fn build(table: &ReviewTable) -> Self {
        let mut user_ids: BTreeSet<SteamId> = BTreeSet::new();
        let mut item_names: BTreeSet<&str> = BTreeSet::new();
        for review in &table.rows {
            user_ids.insert(review.steamid);
            item_names.insert(review.name.as_str());
        }

        let index_to_user: Vec<SteamId> = user_ids.into_iter().collect();
        let index_to_item: Vec<String> =
            item_names.into_iter().map(str::to_owned).collect();
        let user_to_index: HashMap<SteamId, usize> = index_to_user
            .iter()
            .enumerate()
            .map(|(index, &id)| (id, index))
            .collect();
        let item_to_index: HashMap<String, usize> = index_to_item
            .iter()
            .enumerate()
            .map(|(index, name)| (name.clone(), index))
            .collect();

        let mut coo = CooMatrix::new(index_to_user.len(), index_to_item.len());
        for review in &table.rows {
            // Both lookups are total: the maps were built from these rows
            let row = user_to_index[&review.steamid];
            let col = item_to_index[&review.name];
            coo.push(row, col, if review.voted_up { 1.0 } else { 0.0 });
        }
        let matrix = CsrMatrix::from(&coo);

        tracing::debug!(
            users = matrix.nrows(),
            items = matrix.ncols(),
            stored = matrix.nnz(),
            "interaction matrix built"
        );

        Self {
            matrix,
            user_to_index,
            index_to_user,
            item_to_index,
            index_to_item,
            sparsity: OnceLock::new(),
            per_user: OnceLock::new(),
            per_item: OnceLock::new(),
        }
    }

    /// (M, N): distinct users by distinct item names.
    pub fn shape(&self) -> (usize, usize) {
        (self.matrix.nrows(), self.matrix.ncols())
    }

    /// Number of stored entries (explicit zeros included).
    pub fn nnz(&self) -> usize {
        self.matrix.nnz()
    }

    pub fn matrix(&self) -> &CsrMatrix<f64> {
        &self.matrix
    }

    // The four mappings. `user_index`/`user_id` are mutually inverse over
    // their domains, as are `item_index`/`item_name`.

    pub fn user_index(&self, id: SteamId) -> Option<usize> {
        self.user_to_index.get(&id).copied()
    }

    pub fn user_id(&self, index: usize) -> Option<SteamId> {
        self.index_to_user.get(index).copied()
    }

    pub fn item_index(&self, name: &str) -> Option<usize> {
        self.item_to_index.get(name).copied()
    }

    pub fn item_name(&self, index: usize) -> Option<&str> {
        self.index_to_item.get(index).map(String::as_str)
    }

    /// Stored (item_index, value) pairs for one user row.
    pub fn user_row(&self, user_index: usize) -> Vec<(usize, f64)> {
        match self.matrix.get_row(user_index) {
            Some(row) => row
                .col_indices()
                .iter()
                .copied()
                .zip(row.values().iter().copied())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Fraction of cells that hold a stored entry, in [0, 1].
    ///
    /// Defined as 0.0 for a degenerate (M·N = 0) matrix.
    pub fn sparsity(&self) -> f64 {
        *self.sparsity.get_or_init(|| {
            let cells = self.matrix.nrows() * self.matrix.ncols();
            if cells == 0 {
                0.0
            } else {
                self.matrix.nnz() as f64 / cells as f64
            }
        })
    }

    /// Stored entries per user row, indexed by user index.
    pub fn ratings_per_user(&self) -> &[usize] {
        self.per_user
            .get_or_init(|| self.matrix.row_iter().map(|row| row.nnz()).collect())
    }

    /// Stored entries per item column, indexed by item index.
    pub fn ratings_per_item(&self) -> &[usize] {
        self.per_item.get_or_init(|| {
            let mut counts = vec![0usize; self.matrix.ncols()];
            for &col in self.matrix.col_indices() {
                counts[col] += 1;
            }
            counts
        })
    }

    /// Write the summary statistics to a text sink.
    pub fn report(&self, out: &mut impl io::Write) -> io::Result<()> {
        let (users, items) = self.shape();
        writeln!(
            out,
            "interaction matrix: {users} users x {items} items, {} stored entries",
            self.nnz()
        )?;
        writeln!(out, "sparsity: {:.2}%", self.sparsity() * 100.0)?;
        write_occupancy(out, "ratings per user", self.ratings_per_user())?;
        write_occupancy(out, "ratings per item", self.ratings_per_item())?;
        Ok(())
    }
}

fn write_occupancy(out: &mut impl io::Write, label: &str, counts: &[usize]) -> io::Result<()> {
    match (counts.iter().min(), counts.iter().max()) {
        (Some(min), Some(max)) => writeln!(out, "{label}: min {min}, max {max}"),
        _ => writeln!(out, "{label}: n/a"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::Review;

    fn review(steamid: u64, appid: u32, name: &str, voted_up: bool) -> Review {
        Review {
            steamid,
            appid,
            name: name.to_string(),
            voted_up,
            timestamp_created: None,
        }
    }

    /// Catalog {1: "Alpha", 2: "Beta"}, three reviews from two users.
    fn sample_table() -> ReviewTable {
        ReviewTable {
            rows: vec![
                review(10, 1, "Alpha", true),
                review(11, 1, "Alpha", false),
                review(10, 2, "Beta", true),
            ],
            source_files: 1,
        }
    }

    #[test]
    fn test_sample_shape_and_sparsity() {
        let interactions = Interactions::build(&sample_table());

        assert_eq!(interactions.shape(), (2, 2));
        assert_eq!(interactions.nnz(), 3);
        // 3 observed cells out of 4
        assert!((interactions.sparsity() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_sample_occupancy() {
        let interactions = Interactions::build(&sample_table());

        let alpha = interactions.item_index("Alpha").unwrap();
        let beta = interactions.item_index("Beta").unwrap();
        assert_eq!(interactions.ratings_per_item()[alpha], 2);
        assert_eq!(interactions.ratings_per_item()[beta], 1);

        // User 10 reviewed both games, the false vote included counts as
        // an observed cell for user 11
        let u10 = interactions.user_index(10).unwrap();
        let u11 = interactions.user_index(11).unwrap();
        assert_eq!(interactions.ratings_per_user()[u10], 2);
        assert_eq!(interactions.ratings_per_user()[u11], 1);

        let row: Vec<usize> = interactions
            .user_row(u10)
            .into_iter()
            .map(|(col, _)| col)
            .collect();
        assert!(row.contains(&alpha));
        assert!(row.contains(&beta));
    }

    #[test]
    fn test_canonical_index_order() {
        let interactions = Interactions::build(&sample_table());

        // Users ascend numerically, items lexicographically
        assert_eq!(interactions.user_index(10), Some(0));
        assert_eq!(interactions.user_index(11), Some(1));
        assert_eq!(interactions.item_index("Alpha"), Some(0));
        assert_eq!(interactions.item_index("Beta"), Some(1));
    }

    #[test]
    fn test_mappings_mutually_inverse() {
        let interactions = Interactions::build(&sample_table());
        let (users, items) = interactions.shape();

        for index in 0..users {
            let id = interactions.user_id(index).unwrap();
            assert_eq!(interactions.user_index(id), Some(index));
        }
        for index in 0..items {
            let name = interactions.item_name(index).unwrap().to_owned();
            assert_eq!(interactions.item_index(&name), Some(index));
        }
        assert_eq!(interactions.user_id(users), None);
        assert_eq!(interactions.item_name(items), None);
    }

    #[test]
    fn test_occupancy_sums_match_nnz() {
        let interactions = Interactions::build(&sample_table());

        let per_user: usize = interactions.ratings_per_user().iter().sum();
        let per_item: usize = interactions.ratings_per_item().iter().sum();
        assert_eq!(per_user, interactions.nnz());
        assert_eq!(per_item, interactions.nnz());
    }

    #[test]
    fn test_duplicate_coordinates_sum() {
        let table = ReviewTable {
            rows: vec![
                review(10, 1, "Alpha", true),
                review(10, 1, "Alpha", true),
            ],
            source_files: 1,
        };
        let interactions = Interactions::build(&table);

        // Two pushes to the same cell collapse into one stored entry whose
        // values are summed
        assert_eq!(interactions.shape(), (1, 1));
        assert_eq!(interactions.nnz(), 1);
        let row = interactions.user_row(0);
        assert_eq!(row, vec![(0, 2.0)]);
    }

    #[test]
    fn test_empty_table() {
        let interactions = Interactions::build(&ReviewTable::default());

        assert_eq!(interactions.shape(), (0, 0));
        assert_eq!(interactions.nnz(), 0);
        // Degenerate matrix: sparsity defined as 0.0, no division by zero
        assert_eq!(interactions.sparsity(), 0.0);
        assert!(interactions.ratings_per_user().is_empty());
        assert!(interactions.ratings_per_item().is_empty());

        let mut buf = Vec::new();
        interactions.report(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("0 users x 0 items"));
        assert!(text.contains("ratings per user: n/a"));
    }

    #[test]
    fn test_report_format() {
        let interactions = Interactions::build(&sample_table());

        let mut buf = Vec::new();
        interactions.report(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("2 users x 2 items, 3 stored entries"));
        assert!(text.contains("sparsity: 75.00%"));
        assert!(text.contains("ratings per user: min 1, max 2"));
        assert!(text.contains("ratings per item: min 1, max 2"));
    }

    #[test]
    fn test_sparsity_within_bounds() {
        let interactions = Interactions::build(&sample_table());
        let sparsity = interactions.sparsity();
        assert!((0.0..=1.0).contains(&sparsity));
    }
}
