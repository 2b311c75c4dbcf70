//! Relevance pruning
//!
//! Picks the neighbourhood of a query node worth drawing. Each candidate is
//! scored as
//!
//! ```text
//! score = rarity * edge_weight(center, node) * novelty
//! ```
//!
//! where rarity is the node's precomputed inverse frequency (generic hubs
//! score low) and novelty boosts rare nodes that are strongly tied to the
//! center.

use alzkb_domain::{GraphSnapshot, Node, PropertyValue};
use std::fmt;

/// Node attribute holding the precomputed inverse frequency
pub const RARITY_KEY: &str = "inverse_node_freq";

/// Rarity used when a node has none
pub const DEFAULT_RARITY: f64 = 0.1;

/// Multiplier applied to rare, strongly-linked nodes
pub const NOVELTY_BOOST: f64 = 5.0;

/// Nodes below this degree count as rare
pub const NOVELTY_MAX_DEGREE: usize = 5;

/// Edges above this weight count as strong
pub const NOVELTY_MIN_EDGE_WEIGHT: f64 = 0.9;

/// Pruning strategy
///
/// Strategy labels come from upstream configuration. Unknown labels map to
/// [`PruneStrategy::Plain`] instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PruneStrategy {
    /// Rarity times edge weight, with the novelty boost
    #[default]
    WeightedNovelty,

    /// Rarity times edge weight only
    Plain,
}

impl PruneStrategy {
    /// Get the strategy label as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            PruneStrategy::WeightedNovelty => "weighted_novelty",
            PruneStrategy::Plain => "plain",
        }
    }

    /// Parse a strategy label; unknown labels give `Plain`
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "weighted_novelty" => PruneStrategy::WeightedNovelty,
            _ => PruneStrategy::Plain,
        }
    }

    fn novelty(&self, degree: usize, edge_weight: f64) -> f64 {
        match self {
            PruneStrategy::WeightedNovelty
                if degree < NOVELTY_MAX_DEGREE && edge_weight > NOVELTY_MIN_EDGE_WEIGHT =>
            {
                NOVELTY_BOOST
            }
            _ => 1.0,
        }
    }
}

impl fmt::Display for PruneStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for PruneStrategy {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<PruneStrategy> for String {
    fn from(strategy: PruneStrategy) -> Self {
        strategy.as_str().to_string()
    }
}

impl std::str::FromStr for PruneStrategy {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// A candidate and its relevance score
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredNode<'a> {
    /// The candidate node
    pub node: &'a Node,

    /// Relevance score
    pub score: f64,
}

fn rarity(node: &Node) -> f64 {
    node.properties
        .get(RARITY_KEY)
        .and_then(PropertyValue::as_f64)
        .unwrap_or(DEFAULT_RARITY)
}

/// Score every node except `center` and keep the best `limit`
///
/// Ties keep graph insertion order. Nodes without an edge to the center
/// score zero and only appear when fewer than `limit` nodes score higher.
/// Degrees and center weights come from one pass over the edges.
///
/// # Arguments
/// * `graph` - Graph to prune
/// * `center` - Query node id
/// * `limit` - Maximum number of nodes returned
/// * `strategy` - Scoring strategy
pub fn prune<'a>(
    graph: &'a GraphSnapshot,
    center: &str,
    limit: usize,
    strategy: PruneStrategy,
) -> Vec<ScoredNode<'a>> {
    let degrees = graph.degrees();
    let weights = graph.neighbour_weights(center);

    let mut scored: Vec<ScoredNode<'a>> = graph
        .nodes()
        .iter()
        .filter(|n| n.id != center)
        .map(|node| {
            let id = node.id.as_str();
            let edge_weight = weights.get(id).copied().unwrap_or(0.0);
            let degree = degrees.get(id).copied().unwrap_or(0);
            let novelty = strategy.novelty(degree, edge_weight);
            ScoredNode {
                node,
                score: rarity(node) * edge_weight * novelty,
            }
        })
        .collect();

    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(limit);

    tracing::debug!(
        center,
        strategy = %strategy,
        kept = scored.len(),
        "Pruned neighbourhood"
    );
    scored
}
