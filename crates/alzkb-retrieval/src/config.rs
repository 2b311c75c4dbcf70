//! Configuration for retrieval
//!
//! Neighbourhood size and scoring strategy for pruning, and the fusion
//! constants for hybrid ranking.

use crate::pruning::PruneStrategy;
use crate::ranking::{RankParams, EXACT_MATCH_BOOST, RRF_K};
use serde::{Deserialize, Serialize};

/// Configuration for pruning and ranking
///
/// # Examples
///
/// ```
/// use alzkb_retrieval::{PruneStrategy, RetrievalConfig};
///
/// let config = RetrievalConfig::default();
/// assert_eq!(config.prune_limit, 20);
/// assert_eq!(config.prune_strategy, PruneStrategy::WeightedNovelty);
///
/// let wide = RetrievalConfig::wide();
/// assert_eq!(wide.prune_limit, 100);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Maximum neighbours returned by pruning
    /// Default: 20
    #[serde(default = "default_prune_limit")]
    pub prune_limit: usize,

    /// Pruning strategy label
    /// Default: weighted_novelty
    #[serde(default)]
    pub prune_strategy: PruneStrategy,

    /// RRF smoothing constant
    /// Default: 60
    #[serde(default = "default_rrf_k")]
    pub rrf_k: f64,

    /// Multiplier for exact keyword+label matches
    /// Default: 3.0
    #[serde(default = "default_exact_match_boost")]
    pub exact_match_boost: f64,
}

fn default_prune_limit() -> usize {
    20
}

fn default_rrf_k() -> f64 {
    RRF_K
}

fn default_exact_match_boost() -> f64 {
    EXACT_MATCH_BOOST
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            prune_limit: default_prune_limit(),
            prune_strategy: PruneStrategy::WeightedNovelty,
            rrf_k: RRF_K,
            exact_match_boost: EXACT_MATCH_BOOST,
        }
    }
}

impl RetrievalConfig {
    /// Larger neighbourhoods for exploratory views
    pub fn wide() -> Self {
        Self {
            prune_limit: 100,
            ..Self::default()
        }
    }

    /// Ranking parameters derived from this configuration
    pub fn rank_params(&self) -> RankParams {
        RankParams {
            rrf_k: self.rrf_k,
            boost: self.exact_match_boost,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.prune_limit == 0 {
            return Err("prune_limit must be greater than 0".to_string());
        }
        if !(self.rrf_k >= 0.0 && self.rrf_k.is_finite()) {
            return Err("rrf_k must be a non-negative number".to_string());
        }
        if !(self.exact_match_boost >= 1.0 && self.exact_match_boost.is_finite()) {
            return Err("exact_match_boost must be at least 1.0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
