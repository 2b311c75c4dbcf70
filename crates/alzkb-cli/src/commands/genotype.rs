//! Genotype command implementation.

use crate::cli::GenotypeArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use alzkb_domain::{resolve, GenotypeClassification};
use alzkb_ingest::{read_genotype_calls, GenotypeCall};

/// Resolve one call from a genotype table.
pub fn resolve_call(call: &GenotypeCall) -> GenotypeClassification {
    let classification = resolve(&call.rs429358, &call.rs7412, call.quality_a, call.quality_b);
    if !classification.is_mapped() {
        tracing::debug!(
            sample = %call.sample_id,
            outcome = %classification.display_label,
            note = %classification.note,
            "Genotype call not mapped to a standard diplotype"
        );
    }
    classification
}

/// Resolve every call in a genotype table, keyed by sample id.
pub fn resolve_calls(calls: &[GenotypeCall]) -> Vec<(String, GenotypeClassification)> {
    let resolved: Vec<_> = calls
        .iter()
        .map(|call| (call.sample_id.clone(), resolve_call(call)))
        .collect();

    tracing::info!(
        calls = resolved.len(),
        mapped = resolved.iter().filter(|(_, c)| c.is_mapped()).count(),
        "Resolved genotype calls"
    );
    resolved
}

/// Execute the genotype command.
pub fn execute_genotype(args: GenotypeArgs, formatter: &Formatter) -> Result<()> {
    let resolved = match (&args.file, &args.locus_a, &args.locus_b) {
        (Some(path), _, _) => resolve_calls(&read_genotype_calls(path)?),
        (None, Some(a), Some(b)) => {
            vec![("-".to_string(), resolve(a, b, args.quality_a, args.quality_b))]
        }
        _ => {
            return Err(CliError::InvalidInput(
                "Provide both loci or --file".to_string(),
            ))
        }
    };

    println!("{}", formatter.format_genotypes(&resolved)?);
    Ok(())
}
