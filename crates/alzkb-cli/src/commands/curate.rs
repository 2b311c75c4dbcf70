//! Curate command implementation.
//!
//! parse -> select -> assemble -> attach genotypes and CSF observations ->
//! gate -> persist.
//! A graph that fails the gate is never written.

use crate::cli::CurateArgs;
use crate::commands::genotype::resolve_call;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use alzkb_domain::GenotypeClassification;
use alzkb_gatekeeper::{check_integrity, Gatekeeper, IntegrityReport, ValidationVerdict};
use alzkb_ingest::{
    assemble, attach_genotype, ingest_csf, read_associations, read_csf_rows, read_genotype_calls,
    select, BatchAccumulator, SentinelSelection,
};
use alzkb_store::persist_graph;

/// What a curation run produced.
#[derive(Debug)]
pub struct CurateSummary {
    /// Sentinel selection with discard counts
    pub selection: SentinelSelection,
    /// Genotype calls attached
    pub genotypes_attached: usize,
    /// Genotype batches handed to the graph
    pub genotype_batches: usize,
    /// CSF observations folded in
    pub csf_observations: usize,
    /// Nodes in the persisted graph
    pub nodes: usize,
    /// Edges in the persisted graph
    pub edges: usize,
    /// Release gate verdict
    pub verdict: ValidationVerdict,
    /// Integrity report, when requested
    pub integrity: Option<IntegrityReport>,
}

/// Run the full pipeline and persist the graph.
pub fn run_pipeline(args: &CurateArgs, config: &Config) -> Result<CurateSummary> {
    let records = read_associations(&args.input)?;
    let selection = select(&records, &config.ingest.trait_allowlist);
    let mut graph = assemble(&selection.sentinels, &config.ingest, args.sample_size);

    let mut genotypes_attached = 0;
    let mut genotype_batches = 0;
    if let Some(path) = &args.genotypes {
        let calls = read_genotype_calls(path)?;
        let mut batches = BatchAccumulator::new(config.ingest.batch_size);
        let mut attach = |batch: Vec<(String, GenotypeClassification)>| {
            for (sample, classification) in &batch {
                attach_genotype(&mut graph, sample, classification);
            }
            genotypes_attached += batch.len();
            genotype_batches += 1;
            tracing::debug!(attached = genotypes_attached, "Attached genotype batch");
        };

        for call in &calls {
            if let Some(batch) = batches.push((call.sample_id.clone(), resolve_call(call))) {
                attach(batch);
            }
        }
        if let Some(rest) = batches.flush() {
            attach(rest);
        }
    }

    let mut csf_observations = 0;
    if let Some(path) = &args.csf {
        let rows = read_csf_rows(path, &config.csf.analyte_column)?;
        let csf = ingest_csf(&rows, &config.csf, config.ingest.batch_size);
        csf_observations = csf.accepted;
        graph.merge(csf.graph);
    }

    let verdict = Gatekeeper::new(config.validation.clone())
        .validate(&graph)
        .into_result()?;

    let integrity = if args.integrity {
        let report = check_integrity(&graph, &config.integrity)?;
        for warning in &report.warnings {
            tracing::warn!("{}", warning);
        }
        Some(report)
    } else {
        None
    };

    persist_graph(&graph, &args.output)?;

    Ok(CurateSummary {
        selection,
        genotypes_attached,
        genotype_batches,
        csf_observations,
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        verdict,
        integrity,
    })
}

/// Execute the curate command.
pub fn execute_curate(args: CurateArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let summary = run_pipeline(&args, config)?;

    if formatter.is_json() {
        let value = serde_json::json!({
            "output": args.output.display().to_string(),
            "sentinels": summary.selection.sentinels.len(),
            "discarded": summary.selection.discarded(),
            "genotypes_attached": summary.genotypes_attached,
            "csf_observations": summary.csf_observations,
            "nodes": summary.nodes,
            "edges": summary.edges,
            "positive_control_found": summary.integrity.as_ref().map(|r| r.positive_control_found),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{}", formatter.format_verdict(&summary.verdict)?);
    if let Some(report) = &summary.integrity {
        println!("{}", formatter.format_integrity(report)?);
    }
    println!(
        "{}",
        formatter.info(&format!(
            "{} sentinel(s) kept, {} row(s) discarded, {} genotype call(s) attached, {} CSF observation(s)",
            summary.selection.sentinels.len(),
            summary.selection.discarded(),
            summary.genotypes_attached,
            summary.csf_observations
        ))
    );
    println!(
        "{}",
        formatter.success(&format!(
            "Graph persisted to {} ({} nodes, {} edges)",
            args.output.display(),
            summary.nodes,
            summary.edges
        ))
    );
    Ok(())
}
