//! Graph assembly
//!
//! Turns sentinels and genotype classifications into nodes and edges.
//! Nodes are created on first reference and categorised by role.

use crate::IngestConfig;
use alzkb_domain::confidence_computation::score;
use alzkb_domain::identifier::curie;
use alzkb_domain::vocabulary::{
    CATEGORY_DISEASE, CATEGORY_GENE, CATEGORY_GENOTYPE, CATEGORY_SAMPLE, CATEGORY_VARIANT,
    PREDICATE_HAS_GENOTYPE, PREDICATE_VARIANT_DISEASE, PREDICATE_VARIANT_GENE,
    SOURCE_GENE_MAPPING, SOURCE_GENOTYPE_CALL, SOURCE_GWAS_CATALOG,
};
use alzkb_domain::{AssociationRecord, Edge, GenotypeClassification, GraphSnapshot, Modality, Node};

/// Label written on the disease node
pub const DISEASE_LABEL: &str = "Alzheimer disease";

/// Edges contributed by one sentinel: variant to disease, plus variant to
/// gene when a gene is mapped
///
/// When `sample_size` is given the association edge also carries the
/// evidence confidence, mirrored into its `weight`.
pub fn association_edges(
    record: &AssociationRecord,
    disease_node_id: &str,
    sample_size: Option<u64>,
) -> Vec<Edge> {
    let variant = record.variant_node_id();

    let mut association = Edge::new(&variant, PREDICATE_VARIANT_DISEASE, disease_node_id)
        .with_source(SOURCE_GWAS_CATALOG)
        .with_property(
            "risk_allele",
            record.risk_allele.clone().unwrap_or_else(|| "Unknown".to_string()),
        )
        .with_property("pubmed_id", record.pubmed_id.clone().unwrap_or_default());

    if let Some(p) = record.p_value {
        association = association.with_property("p_value", p);
    }
    if let Some(effect) = record.effect_size {
        association = association.with_property("effect_size", effect);
    }
    if let Some(n) = sample_size {
        let source_id = record.pubmed_id.as_deref().unwrap_or(SOURCE_GWAS_CATALOG);
        let result = score(record.p_value, n, &Modality::GenomicStudy, source_id);
        association = association
            .with_property("confidence", result.final_confidence_score)
            .with_property("weight", result.final_confidence_score);
    }

    let mut edges = vec![association];
    if let Some(gene) = record.gene_node_id() {
        edges.push(Edge::new(&variant, PREDICATE_VARIANT_GENE, gene).with_source(SOURCE_GENE_MAPPING));
    }
    edges
}

/// Add one sentinel and its endpoints to the graph
pub fn add_association(
    graph: &mut GraphSnapshot,
    record: &AssociationRecord,
    disease_node_id: &str,
    sample_size: Option<u64>,
) {
    if !graph.contains_node(&record.variant_node_id()) {
        graph.add_node(
            Node::new(record.variant_node_id())
                .with_category(CATEGORY_VARIANT)
                .with_property("name", record.variant_id.as_str()),
        );
    }
    if let (Some(gene_id), Some(symbol)) = (record.gene_node_id(), record.gene_symbol.as_deref()) {
        if !graph.contains_node(&gene_id) {
            graph.add_node(
                Node::new(gene_id)
                    .with_category(CATEGORY_GENE)
                    .with_property("name", symbol),
            );
        }
    }
    if let Some(chr) = &record.chromosome {
        if let Some(node) = graph.node_mut(&record.variant_node_id()) {
            node.properties.insert("chromosome".into(), chr.as_str().into());
        }
    }

    for edge in association_edges(record, disease_node_id, sample_size) {
        graph.add_edge(edge);
    }
}

/// Build a graph from selected sentinels
///
/// The disease node is always present, even with no sentinels.
pub fn assemble(
    sentinels: &[AssociationRecord],
    config: &IngestConfig,
    sample_size: Option<u64>,
) -> GraphSnapshot {
    let mut graph = GraphSnapshot::new();
    graph.add_node(
        Node::new(&config.disease_node_id)
            .with_category(CATEGORY_DISEASE)
            .with_property("name", DISEASE_LABEL),
    );

    for record in sentinels {
        add_association(&mut graph, record, &config.disease_node_id, sample_size);
    }

    tracing::info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "Assembled association graph"
    );
    graph
}

/// Link a sample to its resolved genotype
///
/// The genotype node is shared by all samples with the same diplotype; the
/// per-call confidence and rationale live on the linking edge.
pub fn attach_genotype(
    graph: &mut GraphSnapshot,
    sample_id: &str,
    classification: &GenotypeClassification,
) {
    let sample_node = curie("sample", sample_id);
    graph.add_node(Node::new(&sample_node).with_category(CATEGORY_SAMPLE));
    graph.add_node(
        Node::new(&classification.canonical_id)
            .with_category(CATEGORY_GENOTYPE)
            .with_property("name", classification.display_label.as_str())
            .with_property("risk_category", classification.risk_category.as_uri()),
    );

    let mut edge = Edge::new(sample_node, PREDICATE_HAS_GENOTYPE, &classification.canonical_id)
        .with_source(SOURCE_GENOTYPE_CALL);
    edge.properties.extend(classification.to_properties());
    graph.add_edge(edge);
}
