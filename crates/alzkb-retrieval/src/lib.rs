//! AlzKB Retrieval
//!
//! Read-side helpers over a curated graph.
//!
//! - [`prune`] keeps the neighbours of a query node that are rare and
//!   strongly linked, so a visualization is not swamped by hub genes
//! - [`rank`] fuses dense retrieval hits with reciprocal rank fusion and
//!   lifts exact keyword matches to the top
//!
//! Both are pure functions; the graph and the retrieval hits come from the
//! caller.
//!
//! # Examples
//!
//! ```
//! use alzkb_domain::{Edge, GraphSnapshot};
//! use alzkb_retrieval::{prune, rank, PruneStrategy, VectorHit};
//!
//! let mut graph = GraphSnapshot::new();
//! graph.add_edge(Edge::new("HGNC:APOE", "biolink:interacts_with", "HGNC:CLU"));
//! let kept = prune(&graph, "HGNC:APOE", 10, PruneStrategy::WeightedNovelty);
//! assert_eq!(kept[0].node.id, "HGNC:CLU");
//!
//! let hits = vec![VectorHit::new("HGNC:CLU", "CLU"), VectorHit::new("HGNC:APOE", "APOE")];
//! let ranked = rank("APOE", &hits, &["HGNC:APOE"]);
//! assert_eq!(ranked[0].id, "HGNC:APOE");
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod pruning;
pub mod ranking;

pub use config::RetrievalConfig;
pub use pruning::{prune, PruneStrategy, ScoredNode};
pub use ranking::{rank, rank_with, RankParams, RankedResult, VectorHit};
