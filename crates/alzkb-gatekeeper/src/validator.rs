//! Release gate for assembled graphs

use crate::{GatekeeperError, ValidationConfig};
use alzkb_domain::identifier::matches_gene_alias;
use alzkb_domain::traits::GraphGate;
use alzkb_domain::GraphSnapshot;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::fmt;

/// The individual release checks, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckKind {
    /// Largest weakly connected component covers enough of the graph
    Connectivity,

    /// The gold-standard entity is present
    GoldStandard,

    /// Sampled edges carry a predicate
    SchemaCompliance,
}

impl CheckKind {
    /// Get the check name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckKind::Connectivity => "connectivity",
            CheckKind::GoldStandard => "gold_standard",
            CheckKind::SchemaCompliance => "schema_compliance",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one check
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutcome {
    /// Which check ran
    pub check: CheckKind,

    /// Whether it passed
    pub passed: bool,

    /// Human-readable detail
    pub message: String,
}

impl CheckOutcome {
    fn pass(check: CheckKind, message: impl Into<String>) -> Self {
        Self {
            check,
            passed: true,
            message: message.into(),
        }
    }

    fn fail(check: CheckKind, message: impl Into<String>) -> Self {
        Self {
            check,
            passed: false,
            message: message.into(),
        }
    }
}

/// Aggregate result of the gate
///
/// Holds every check that ran. Evaluation stops at the first failure, so a
/// failing verdict ends with the failing check.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationVerdict {
    /// Outcomes in evaluation order
    pub checks: Vec<CheckOutcome>,
}

impl ValidationVerdict {
    /// Logical AND of all checks that ran
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    /// The failing check, if any
    pub fn failure(&self) -> Option<&CheckOutcome> {
        self.checks.iter().find(|c| !c.passed)
    }

    /// Turn a failing verdict into an abort signal
    pub fn into_result(self) -> Result<Self, GatekeeperError> {
        match self.failure() {
            Some(failed) => Err(GatekeeperError::ValidationFailed {
                check: failed.check.to_string(),
                reason: failed.message.clone(),
            }),
            None => Ok(self),
        }
    }
}

/// The Gatekeeper decides whether a graph may be persisted
pub struct Gatekeeper {
    config: ValidationConfig,
}

impl Gatekeeper {
    /// Create a new Gatekeeper with the given configuration
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Create a Gatekeeper with default configuration
    pub fn default_config() -> Self {
        Self::new(ValidationConfig::default())
    }

    /// Current configuration
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Run the checks in fixed order, stopping at the first failure
    ///
    /// Order: connectivity (only when enabled), gold standard, schema
    /// compliance.
    pub fn validate(&self, graph: &GraphSnapshot) -> ValidationVerdict {
        let mut verdict = ValidationVerdict::default();

        let mut checks: Vec<fn(&Self, &GraphSnapshot) -> CheckOutcome> = Vec::new();
        if self.config.check_connectivity {
            checks.push(Self::check_connectivity);
        }
        checks.push(Self::check_gold_standard);
        checks.push(Self::check_schema);

        for check in checks {
            let outcome = check(self, graph);
            tracing::info!(
                check = %outcome.check,
                passed = outcome.passed,
                "{}",
                outcome.message
            );
            let failed = !outcome.passed;
            verdict.checks.push(outcome);
            if failed {
                break;
            }
        }

        verdict
    }

    fn check_connectivity(&self, graph: &GraphSnapshot) -> CheckOutcome {
        if graph.is_empty() {
            return CheckOutcome::fail(CheckKind::Connectivity, "Graph is empty.");
        }

        let ratio = graph.largest_component_size() as f64 / graph.node_count() as f64;
        if ratio < self.config.connectivity_threshold {
            CheckOutcome::fail(
                CheckKind::Connectivity,
                format!(
                    "FRAGMENTATION: Giant Component only {:.1}% (<{:.0}%).",
                    ratio * 100.0,
                    self.config.connectivity_threshold * 100.0
                ),
            )
        } else {
            CheckOutcome::pass(
                CheckKind::Connectivity,
                format!("Topology OK (GCC: {:.1}%).", ratio * 100.0),
            )
        }
    }

    fn check_gold_standard(&self, graph: &GraphSnapshot) -> CheckOutcome {
        let aliases = &self.config.gold_standard_aliases;
        let target = aliases.first().map(String::as_str).unwrap_or_default();

        if graph.nodes().iter().any(|n| matches_gene_alias(&n.id, aliases)) {
            CheckOutcome::pass(
                CheckKind::GoldStandard,
                format!("Gold Standard {} verified.", target),
            )
        } else {
            CheckOutcome::fail(
                CheckKind::GoldStandard,
                format!("MISSING GOLD STANDARD: {} not found.", target),
            )
        }
    }

    fn check_schema(&self, graph: &GraphSnapshot) -> CheckOutcome {
        let edges = graph.edges();
        if edges.is_empty() {
            return CheckOutcome::fail(CheckKind::SchemaCompliance, "Graph has no edges.");
        }

        let mut rng = match self.config.sample_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let amount = self.config.schema_sample_size.min(edges.len());

        for edge in edges.choose_multiple(&mut rng, amount) {
            if edge.predicate.trim().is_empty() {
                return CheckOutcome::fail(
                    CheckKind::SchemaCompliance,
                    format!(
                        "SCHEMA VIOLATION: Edge {}->{} missing 'predicate'.",
                        edge.subject, edge.object
                    ),
                );
            }
        }

        CheckOutcome::pass(CheckKind::SchemaCompliance, "Schema Compliance Verified.")
    }
}

impl GraphGate for Gatekeeper {
    type Error = GatekeeperError;

    fn check(&self, graph: &GraphSnapshot) -> Result<(), Self::Error> {
        self.validate(graph).into_result().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alzkb_domain::{Edge, Node};

    fn apoe_graph() -> GraphSnapshot {
        let mut graph = GraphSnapshot::new();
        graph.add_edge(Edge::new(
            "dbSNP:rs429358",
            "biolink:condition_associated_with_sequence_variant",
            "MONDO:0004975",
        ));
        graph.add_edge(Edge::new(
            "dbSNP:rs429358",
            "biolink:is_sequence_variant_of",
            "HGNC:APOE",
        ));
        graph
    }

    fn seeded() -> ValidationConfig {
        ValidationConfig {
            sample_seed: Some(42),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_graph_passes() {
        let verdict = Gatekeeper::new(seeded()).validate(&apoe_graph());
        assert!(verdict.passed());
        assert_eq!(verdict.checks.len(), 2);
        assert_eq!(verdict.checks[0].check, CheckKind::GoldStandard);
        assert_eq!(verdict.checks[1].check, CheckKind::SchemaCompliance);
    }

    #[test]
    fn test_missing_gold_standard_short_circuits() {
        let mut graph = GraphSnapshot::new();
        graph.add_edge(Edge::new("dbSNP:rs1", "", "HGNC:BIN1"));

        let verdict = Gatekeeper::new(seeded()).validate(&graph);
        assert!(!verdict.passed());
        assert_eq!(verdict.checks.len(), 1);
        assert_eq!(verdict.checks[0].check, CheckKind::GoldStandard);
        assert!(verdict.checks[0].message.contains("MISSING GOLD STANDARD"));
        assert!(verdict
            .checks
            .iter()
            .all(|c| c.check != CheckKind::SchemaCompliance));
    }

    #[test]
    fn test_genotype_node_is_not_gold_standard() {
        let mut graph = GraphSnapshot::new();
        graph.add_edge(Edge::new(
            "dbSNP:rs6733839",
            "biolink:condition_associated_with_sequence_variant",
            "MONDO:0004975",
        ));
        graph.add_edge(Edge::new(
            "dbSNP:rs6733839",
            "biolink:is_sequence_variant_of",
            "HGNC:BIN1",
        ));
        graph.add_edge(Edge::new("sample:S1", "biolink:has_genotype", "alzkb:APOE_e3e4"));

        let verdict = Gatekeeper::new(seeded()).validate(&graph);
        assert!(!verdict.passed());
        assert_eq!(verdict.failure().map(|f| f.check), Some(CheckKind::GoldStandard));
    }

    #[test]
    fn test_lookalike_gene_ids_are_not_gold_standard() {
        for id in ["HGNC:6130", "HGNC:APOER2", "sample:APOE"] {
            let mut graph = GraphSnapshot::new();
            graph.add_edge(Edge::new("dbSNP:rs1", "rel", id));
            assert!(!Gatekeeper::new(seeded()).validate(&graph).passed(), "{id}");
        }
    }

    #[test]
    fn test_connectivity_runs_before_gold_standard() {
        let config = ValidationConfig {
            check_connectivity: true,
            ..seeded()
        };
        let mut graph = GraphSnapshot::new();
        graph.add_edge(Edge::new("dbSNP:rs1", "rel", "HGNC:BIN1"));
        for i in 0..5 {
            graph.add_node(Node::new(format!("island:{}", i)));
        }

        let verdict = Gatekeeper::new(config).validate(&graph);
        assert_eq!(verdict.checks.len(), 1);
        assert_eq!(verdict.checks[0].check, CheckKind::Connectivity);
    }

    #[test]
    fn test_gold_standard_matches_case_insensitively() {
        let mut graph = GraphSnapshot::new();
        graph.add_edge(Edge::new("dbSNP:rs1", "rel", "hgnc:613"));
        assert!(Gatekeeper::new(seeded()).validate(&graph).passed());
    }

    #[test]
    fn test_schema_violation_names_edge() {
        let mut graph = apoe_graph();
        graph.add_edge(Edge::new("dbSNP:rs7412", " ", "HGNC:APOE"));

        let config = ValidationConfig {
            schema_sample_size: 1_000,
            ..seeded()
        };
        let verdict = Gatekeeper::new(config).validate(&graph);
        let failure = verdict.failure().unwrap();
        assert_eq!(failure.check, CheckKind::SchemaCompliance);
        assert!(failure.message.contains("dbSNP:rs7412->HGNC:APOE"));
    }

    #[test]
    fn test_no_edges_fails_schema() {
        let mut graph = GraphSnapshot::new();
        graph.add_node(Node::new("HGNC:613"));

        let verdict = Gatekeeper::new(seeded()).validate(&graph);
        assert_eq!(verdict.failure().map(|f| f.check), Some(CheckKind::SchemaCompliance));
    }

    #[test]
    fn test_connectivity_off_by_default() {
        let mut graph = apoe_graph();
        for i in 0..10 {
            graph.add_node(Node::new(format!("island:{}", i)));
        }
        assert!(Gatekeeper::new(seeded()).validate(&graph).passed());
    }

    #[test]
    fn test_connectivity_when_enabled() {
        let mut graph = apoe_graph();
        for i in 0..10 {
            graph.add_node(Node::new(format!("island:{}", i)));
        }
        let config = ValidationConfig {
            check_connectivity: true,
            ..seeded()
        };
        let verdict = Gatekeeper::new(config).validate(&graph);
        assert_eq!(verdict.checks.len(), 1);
        assert_eq!(verdict.checks[0].check, CheckKind::Connectivity);
        assert!(verdict.checks[0].message.contains("FRAGMENTATION"));

        let config = ValidationConfig {
            check_connectivity: true,
            ..seeded()
        };
        assert!(Gatekeeper::new(config).validate(&apoe_graph()).passed());
    }

    #[test]
    fn test_empty_graph_fails_connectivity() {
        let config = ValidationConfig {
            check_connectivity: true,
            ..seeded()
        };
        let verdict = Gatekeeper::new(config).validate(&GraphSnapshot::new());
        assert_eq!(verdict.checks[0].message, "Graph is empty.");
    }

    #[test]
    fn test_gate_trait_returns_abort_signal() {
        let gate = Gatekeeper::new(seeded());
        assert!(gate.check(&apoe_graph()).is_ok());

        let err = gate.check(&GraphSnapshot::new()).unwrap_err();
        assert!(matches!(
            err,
            GatekeeperError::ValidationFailed { ref check, .. } if check == "gold_standard"
        ));
    }
}
