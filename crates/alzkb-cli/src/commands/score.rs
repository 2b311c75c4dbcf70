//! Score command implementation.

use crate::cli::ScoreArgs;
use crate::error::Result;
use crate::output::Formatter;
use alzkb_domain::{score, ConfidenceResult, Modality};

/// Score the evidence described by `args`.
///
/// Odd input is scored the way the domain clamps it; it only draws a warning.
pub fn score_args(args: &ScoreArgs) -> ConfidenceResult {
    if let Some(p) = args.p_value {
        if p.is_nan() || !(0.0..=1.0).contains(&p) {
            tracing::warn!(p_value = p, "p-value outside [0, 1], clamping");
        }
    }

    let modality = Modality::parse(&args.modality);
    if !modality.is_recognized() {
        tracing::warn!(modality = %modality, "Unrecognized modality, using fallback baseline");
    }

    score(args.p_value, args.sample_size, &modality, &args.source_id)
}

/// Execute the score command.
pub fn execute_score(args: ScoreArgs, formatter: &Formatter) -> Result<()> {
    let result = score_args(&args);
    println!("{}", formatter.format_confidence(&result)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    fn args(p_value: Option<f64>) -> ScoreArgs {
        ScoreArgs {
            p_value,
            sample_size: 1000,
            modality: "clinical".to_string(),
            source_id: "ADNI".to_string(),
        }
    }

    #[test]
    fn test_out_of_range_p_value_is_clamped() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert!(execute_score(args(Some(1.5)), &formatter).is_ok());

        let high = score_args(&args(Some(1.5)));
        assert_eq!(high.normalized_significance, 0.0);
        assert_eq!(high.raw_p_value, Some(1.5));

        let negative = score_args(&args(Some(-0.2)));
        assert_eq!(negative.normalized_significance, 1.0);
    }

    #[test]
    fn test_missing_p_value_accepted() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        assert!(execute_score(args(None), &formatter).is_ok());
    }
}
