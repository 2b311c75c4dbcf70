//! Scientific integrity check
//!
//! A positive control (a gene with a well-established disease signal) must
//! be linked to the disease strongly enough, and a negative control (a gene
//! known to be unrelated) must not be linked at genome-wide significance.
//!
//! Both controls follow the path `gene <- variant -> disease`.

use crate::{GatekeeperError, IntegrityConfig};
use alzkb_domain::identifier::matches_gene_alias;
use alzkb_domain::GraphSnapshot;

/// What the integrity check found
#[derive(Debug, Clone, PartialEq)]
pub struct IntegrityReport {
    /// Strongest p-value seen on the positive-control path
    pub positive_control_p: Option<f64>,

    /// Whether the positive control met its threshold
    pub positive_control_found: bool,

    /// Non-fatal findings
    pub warnings: Vec<String>,
}

/// Smallest p-value on any `variant -> disease` edge where the variant is
/// linked to a gene matching `aliases`, together with that variant
fn strongest_signal<'a>(
    graph: &'a GraphSnapshot,
    aliases: &[String],
    disease_node_id: &str,
) -> Option<(&'a str, f64)> {
    let mut best: Option<(&str, f64)> = None;

    let genes = graph
        .nodes()
        .iter()
        .filter(|n| matches_gene_alias(&n.id, aliases));

    for gene in genes {
        for variant in graph.predecessors(&gene.id) {
            let p_values = graph
                .edges()
                .iter()
                .filter(|e| e.subject == variant && e.object == disease_node_id)
                .map(|e| e.properties.get("p_value").and_then(|v| v.as_f64()).unwrap_or(1.0));

            for p in p_values {
                if best.map_or(true, |(_, b)| p < b) {
                    best = Some((variant, p));
                }
            }
        }
    }

    best
}

/// Run the positive and negative control checks
///
/// A missing or weak positive control is a warning unless
/// `require_positive_control` is set. A significant negative control is
/// always a [`GatekeeperError::ScientificIntegrity`] error.
pub fn check_integrity(
    graph: &GraphSnapshot,
    config: &IntegrityConfig,
) -> Result<IntegrityReport, GatekeeperError> {
    let mut warnings = Vec::new();

    let positive = strongest_signal(graph, &config.positive_control_aliases, &config.disease_node_id);
    let positive_control_p = positive.map(|(_, p)| p);
    let positive_control_found =
        positive_control_p.is_some_and(|p| p < config.positive_control_threshold);

    if !positive_control_found {
        let message = match positive_control_p {
            Some(p) => format!(
                "Positive control signal too weak: best p = {:e} (need < {:e})",
                p, config.positive_control_threshold
            ),
            None => "Positive control signal missing".to_string(),
        };
        if config.require_positive_control {
            return Err(GatekeeperError::ScientificIntegrity(message));
        }
        tracing::warn!("{}", message);
        warnings.push(message);
    }

    if let Some((variant, p)) =
        strongest_signal(graph, &config.negative_control_aliases, &config.disease_node_id)
    {
        if p < config.negative_control_threshold {
            return Err(GatekeeperError::ScientificIntegrity(format!(
                "False positive link between negative control and {} via {} (p = {:e})",
                config.disease_node_id, variant, p
            )));
        }
    }

    tracing::info!(
        positive_control_found,
        warnings = warnings.len(),
        "Integrity check complete"
    );

    Ok(IntegrityReport {
        positive_control_p,
        positive_control_found,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alzkb_domain::Edge;

    const AD: &str = "MONDO:0004975";

    fn link(graph: &mut GraphSnapshot, rs: &str, gene: &str, p: f64) {
        let variant = format!("dbSNP:{}", rs);
        graph.add_edge(
            Edge::new(&variant, "biolink:condition_associated_with_sequence_variant", AD)
                .with_property("p_value", p),
        );
        graph.add_edge(Edge::new(&variant, "biolink:is_sequence_variant_of", gene));
    }

    #[test]
    fn test_positive_control_found() {
        let mut graph = GraphSnapshot::new();
        link(&mut graph, "rs429358", "HGNC:APOE", 1e-300);

        let report = check_integrity(&graph, &IntegrityConfig::default()).unwrap();
        assert!(report.positive_control_found);
        assert_eq!(report.positive_control_p, Some(1e-300));
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_weak_positive_control_is_warning() {
        let mut graph = GraphSnapshot::new();
        link(&mut graph, "rs429358", "HGNC:APOE", 1e-10);

        let report = check_integrity(&graph, &IntegrityConfig::default()).unwrap();
        assert!(!report.positive_control_found);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_missing_positive_control_strict_is_error() {
        let graph = GraphSnapshot::new();
        let err = check_integrity(&graph, &IntegrityConfig::strict()).unwrap_err();
        assert!(matches!(err, GatekeeperError::ScientificIntegrity(_)));
    }

    #[test]
    fn test_significant_negative_control_is_error() {
        let mut graph = GraphSnapshot::new();
        link(&mut graph, "rs429358", "HGNC:APOE", 1e-300);
        link(&mut graph, "rs80357906", "HGNC:BRCA1", 1e-9);

        let err = check_integrity(&graph, &IntegrityConfig::default()).unwrap_err();
        match err {
            GatekeeperError::ScientificIntegrity(msg) => assert!(msg.contains("dbSNP:rs80357906")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_weak_negative_control_passes() {
        let mut graph = GraphSnapshot::new();
        link(&mut graph, "rs429358", "HGNC:APOE", 1e-300);
        link(&mut graph, "rs80357906", "HGNC:BRCA1", 0.2);

        assert!(check_integrity(&graph, &IntegrityConfig::default()).is_ok());
    }

    #[test]
    fn test_edge_without_p_value_counts_as_insignificant() {
        let mut graph = GraphSnapshot::new();
        graph.add_edge(Edge::new("dbSNP:rs1", "assoc", AD));
        graph.add_edge(Edge::new("dbSNP:rs1", "variant_of", "HGNC:BRCA1"));

        assert!(check_integrity(&graph, &IntegrityConfig::default()).is_ok());
    }
}
