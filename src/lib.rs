//! Embedded hypergraph store for a small retail schema.
//!
//! A [`Hypergraph`] snapshot holds every declared table at once. It is loaded
//! from and committed to a SQLite file by [`HypergraphStore`], queried with the
//! relational operators in [`query`] and [`join`], and modified through the
//! referentially checked writes in [`write`].
//! Run Criterion benchmarks with `cargo bench` to inspect reports under `target/criterion`.

pub mod address;
pub mod client;
pub mod config;
pub mod errors;
pub mod flatten;
pub mod graph;
pub mod join;
pub mod key;
pub mod predicate;
pub mod query;
pub mod recovery;
pub mod registry;
pub mod safety;
pub mod schema;
pub mod store;
pub mod write;

pub use crate::address::Address;
pub use crate::config::StoreConfig;
pub use crate::errors::{HypergraphError, Result};
pub use crate::flatten::{flatten, flatten_with};
pub use crate::graph::{Hypergraph, Record, Table, record};
pub use crate::join::{
    JoinKind, cartesian_join, inner_join, join, left_join, natural_join, outer_join, right_join,
};
pub use crate::key::{PrimaryKey, Scalar};
pub use crate::predicate::{Comparator, Predicate};
pub use crate::query::{TableQuery, project, rename, select, select_where};
pub use crate::registry::{KeyShape, TableName};
pub use crate::safety::{SafetyError, SafetyReport};
pub use crate::store::HypergraphStore;
