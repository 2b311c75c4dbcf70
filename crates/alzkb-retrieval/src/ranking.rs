//! Hybrid re-ranking
//!
//! Dense retrieval hits are fused with reciprocal rank fusion, then
//! entities that were also exact keyword matches get a multiplicative boost
//! when their label is the query itself.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// RRF smoothing constant
pub const RRF_K: f64 = 60.0;

/// Multiplier for exact keyword+label matches
pub const EXACT_MATCH_BOOST: f64 = 3.0;

/// One dense-retrieval hit, in rank order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorHit {
    /// Entity identifier
    #[serde(alias = "uri")]
    pub id: String,

    /// Stored label of the entity
    #[serde(default)]
    pub label: Option<String>,

    /// Raw similarity reported by the vector index (informational)
    #[serde(default)]
    pub score: Option<f64>,
}

impl VectorHit {
    /// Create a hit with a label
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: Some(label.into()),
            score: None,
        }
    }
}

/// A re-ranked entity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedResult {
    /// Entity identifier
    pub id: String,

    /// Stored label
    pub label: Option<String>,

    /// Accumulated RRF score before boosting
    pub fused_score: f64,

    /// Score used for ordering
    pub final_score: f64,

    /// Whether the exact-match boost applied
    pub boosted: bool,
}

/// Tunables for [`rank_with`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankParams {
    /// RRF smoothing constant
    pub rrf_k: f64,

    /// Exact-match multiplier
    pub boost: f64,
}

impl Default for RankParams {
    fn default() -> Self {
        Self {
            rrf_k: RRF_K,
            boost: EXACT_MATCH_BOOST,
        }
    }
}

/// Re-rank with the standard constants (k = 60, boost = 3.0)
pub fn rank<S: AsRef<str>>(
    query: &str,
    vector_results: &[VectorHit],
    keyword_matches: &[S],
) -> Vec<RankedResult> {
    rank_with(query, vector_results, keyword_matches, RankParams::default())
}

/// Re-rank dense hits, boosting exact keyword matches
///
/// Each hit at 0-based position `rank` contributes `1 / (k + rank + 1)` to
/// its entity. Entities listed in `keyword_matches` whose label equals the
/// trimmed query (ignoring case) are multiplied by the boost. The result
/// is sorted by final score, descending; ties keep first-seen order.
pub fn rank_with<S: AsRef<str>>(
    query: &str,
    vector_results: &[VectorHit],
    keyword_matches: &[S],
    params: RankParams,
) -> Vec<RankedResult> {
    let mut slot_of: HashMap<&str, usize> = HashMap::new();
    let mut results: Vec<RankedResult> = Vec::new();

    for (rank, hit) in vector_results.iter().enumerate() {
        let contribution = 1.0 / (params.rrf_k + rank as f64 + 1.0);
        match slot_of.get(hit.id.as_str()) {
            Some(&slot) => results[slot].fused_score += contribution,
            None => {
                slot_of.insert(hit.id.as_str(), results.len());
                results.push(RankedResult {
                    id: hit.id.clone(),
                    label: hit.label.clone(),
                    fused_score: contribution,
                    final_score: 0.0,
                    boosted: false,
                });
            }
        }
    }

    let keywords: HashSet<&str> = keyword_matches.iter().map(AsRef::as_ref).collect();
    let wanted = query.trim().to_uppercase();

    for result in &mut results {
        result.final_score = result.fused_score;
        let label_matches = result
            .label
            .as_deref()
            .is_some_and(|label| label.to_uppercase() == wanted);
        if keywords.contains(result.id.as_str()) && label_matches {
            result.final_score *= params.boost;
            result.boosted = true;
        }
    }

    results.sort_by(|a, b| b.final_score.total_cmp(&a.final_score));

    tracing::debug!(
        candidates = results.len(),
        boosted = results.iter().filter(|r| r.boosted).count(),
        "Hybrid ranking complete"
    );
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hits() -> Vec<VectorHit> {
        vec![
            VectorHit::new("HGNC:CLU", "CLU"),
            VectorHit::new("HGNC:BIN1", "BIN1"),
            VectorHit::new("HGNC:APOE", "APOE"),
        ]
    }

    #[test]
    fn test_rrf_scores_follow_rank() {
        let ranked = rank("unrelated", &hits(), &[] as &[&str]);
        assert_eq!(ranked[0].id, "HGNC:CLU");
        assert!((ranked[0].final_score - 1.0 / 61.0).abs() < 1e-12);
        assert!((ranked[2].final_score - 1.0 / 63.0).abs() < 1e-12);
    }

    #[test]
    fn test_exact_match_outranks_everything() {
        let ranked = rank("  apoe ", &hits(), &["HGNC:APOE"]);
        assert_eq!(ranked[0].id, "HGNC:APOE");
        assert!(ranked[0].boosted);
        assert!((ranked[0].final_score - 3.0 / 63.0).abs() < 1e-12);
    }

    #[test]
    fn test_keyword_without_label_match_not_boosted() {
        let ranked = rank("APOE4", &hits(), &["HGNC:APOE"]);
        assert!(ranked.iter().all(|r| !r.boosted));
        assert_eq!(ranked[2].id, "HGNC:APOE");
    }

    #[test]
    fn test_label_match_without_keyword_not_boosted() {
        let ranked = rank("APOE", &hits(), &["HGNC:CLU"]);
        assert!(ranked.iter().all(|r| !r.boosted));
    }

    #[test]
    fn test_duplicate_hits_accumulate() {
        let mut results = hits();
        results.push(VectorHit::new("HGNC:APOE", "APOE"));
        let ranked = rank("none", &results, &[] as &[&str]);

        let apoe = ranked.iter().find(|r| r.id == "HGNC:APOE").unwrap();
        assert!((apoe.fused_score - (1.0 / 63.0 + 1.0 / 64.0)).abs() < 1e-12);
        assert_eq!(ranked.len(), 3);
    }

    #[test]
    fn test_hits_deserialize_from_uri_field() {
        let json = r#"[{"uri": "HGNC:APOE", "label": "APOE", "score": 0.91}, {"id": "HGNC:CLU"}]"#;
        let parsed: Vec<VectorHit> = serde_json::from_str(json).unwrap();
        assert_eq!(parsed[0].id, "HGNC:APOE");
        assert_eq!(parsed[0].score, Some(0.91));
        assert_eq!(parsed[1].label, None);
    }

    #[test]
    fn test_empty_input() {
        assert!(rank("x", &[], &["a"]).is_empty());
    }
}
