//! Descriptive statistics over a loaded review table.
//!
//! This crate provides:
//! - Aggregate counts and vote-ratio rankings (`counts`)
//! - The sparse user×item interaction matrix with id↔index mappings
//!   (`matrix`)
//! - Text histograms for occupancy distributions (`report`)
//!
//! ## Architecture
//! Everything operates on a fully materialized `ReviewTable` from the
//! data-loader crate. Nothing here touches the network or the filesystem;
//! all functions are pure transformations, and the `Interactions` matrix is
//! immutable once built with its statistics lazily cached.
//!
//! ## Example Usage
//! ```ignore
//! use analytics::{counts_by_name, Histogram, Interactions};
//!
//! let interactions = Interactions::build(&table);
//! interactions.report(&mut std::io::stdout())?;
//!
//! let top = counts_by_name(&table);
//! println!("most reviewed: {} ({:.1}%)", top[0].key, top[0].proportion * 100.0);
//!
//! let hist = Histogram::log10(interactions.ratings_per_item(), 10);
//! print!("{}", hist.render());
//! ```

pub mod counts;
pub mod matrix;
pub mod report;

// Re-export main types
pub use counts::{counts_by, counts_by_name, positive_negative_ratio, KeyCount, VoteRatio};
pub use matrix::Interactions;
pub use report::{Bucket, Histogram};
