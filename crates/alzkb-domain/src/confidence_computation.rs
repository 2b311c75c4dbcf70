//! Confidence computation module
//!
//! Implements the deterministic evidence scoring formula:
//!
//! ```text
//! confidence = 0.6 * significance + 0.4 * power
//! ```
//!
//! where significance is the p-value on a -log10 scale relative to the
//! genome-wide threshold, and power is the sample size on a log10 scale
//! relative to a modality-specific baseline.

use crate::{round_to, ConfidenceResult, EvidenceRecord, Modality};

/// Genome-wide significance threshold (maps to significance 1.0)
pub const GENOME_WIDE_SIGNIFICANCE: f64 = 5e-8;

/// p-values at or above this carry no significance at all
pub const NOMINAL_SIGNIFICANCE: f64 = 0.05;

/// Floor applied to p-values before taking the logarithm
pub const MIN_P_VALUE_CLAMP: f64 = 1e-100;

/// Weight of the significance term
pub const SIGNIFICANCE_WEIGHT: f64 = 0.6;

/// Weight of the power term
pub const POWER_WEIGHT: f64 = 0.4;

/// Decimal places kept on every reported score
pub const SCORE_DECIMALS: i32 = 4;

/// Score one piece of evidence
///
/// Pure function. Out-of-range input is clamped, never rejected: a missing
/// or NaN p-value scores zero significance, a zero or negative p-value is
/// treated as the strongest representable signal.
///
/// # Arguments
/// * `p_value` - Reported significance (`None` if the source had none)
/// * `sample_size` - Number of subjects
/// * `modality` - Measurement category, selects the power baseline
/// * `source_id` - Provenance tag copied onto the result
pub fn score(
    p_value: Option<f64>,
    sample_size: u64,
    modality: &Modality,
    source_id: &str,
) -> ConfidenceResult {
    let significance = normalize_significance(p_value);
    let power = normalize_power(sample_size, modality);

    let confidence = SIGNIFICANCE_WEIGHT * significance + POWER_WEIGHT * power;

    ConfidenceResult {
        source_id: source_id.to_string(),
        modality: modality.as_str().to_string(),
        raw_p_value: p_value,
        raw_sample_size: sample_size,
        normalized_significance: round_to(significance, SCORE_DECIMALS),
        normalized_power: round_to(power, SCORE_DECIMALS),
        final_confidence_score: round_to(confidence, SCORE_DECIMALS),
    }
}

/// Score an [`EvidenceRecord`]
pub fn score_record(record: &EvidenceRecord) -> ConfidenceResult {
    score(
        record.p_value,
        record.sample_size,
        &record.modality,
        &record.source_id,
    )
}

/// Normalize a p-value to [0, 1] relative to the genome-wide threshold
pub fn normalize_significance(p_value: Option<f64>) -> f64 {
    let Some(p) = p_value else {
        return 0.0;
    };

    if p.is_nan() || p >= NOMINAL_SIGNIFICANCE {
        return 0.0;
    }

    let p = p.max(MIN_P_VALUE_CLAMP);
    let score = -p.log10() / -GENOME_WIDE_SIGNIFICANCE.log10();

    score.clamp(0.0, 1.0)
}

/// Normalize a sample size to [0, 1] relative to the modality baseline
pub fn normalize_power(sample_size: u64, modality: &Modality) -> f64 {
    if sample_size == 0 {
        return 0.0;
    }

    let score = (sample_size as f64).log10() / (modality.baseline() as f64).log10();

    score.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_significant_p_value_scores_zero() {
        assert_eq!(normalize_significance(Some(0.05)), 0.0);
        assert_eq!(normalize_significance(Some(0.5)), 0.0);
        assert_eq!(normalize_significance(None), 0.0);
        assert_eq!(normalize_significance(Some(f64::NAN)), 0.0);
    }

    #[test]
    fn test_genome_wide_threshold_is_full_significance() {
        assert_eq!(normalize_significance(Some(GENOME_WIDE_SIGNIFICANCE)), 1.0);
        assert_eq!(normalize_significance(Some(1e-300)), 1.0);
    }

    #[test]
    fn test_zero_p_value_is_clamped() {
        assert_eq!(normalize_significance(Some(0.0)), 1.0);
        assert_eq!(normalize_significance(Some(-1.0)), 1.0);
    }

    #[test]
    fn test_power_uses_modality_baseline() {
        assert_eq!(normalize_power(0, &Modality::GenomicStudy), 0.0);
        assert_eq!(normalize_power(500, &Modality::MolecularAssay), 1.0);
        assert_eq!(normalize_power(50_000, &Modality::GenomicStudy), 1.0);

        // N=600 is excellent for CSF but weak for GWAS
        let csf = normalize_power(600, &Modality::MolecularAssay);
        let gwas = normalize_power(600, &Modality::GenomicStudy);
        assert!(csf > gwas);
    }

    #[test]
    fn test_unrecognized_modality_uses_fallback_baseline() {
        let other = Modality::Other("imaging".to_string());
        assert_eq!(normalize_power(10_000, &other), 1.0);
        assert!((normalize_power(100, &other) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_strong_molecular_evidence() {
        let result = score(Some(1e-10), 1000, &Modality::MolecularAssay, "ADNI_CSF");
        assert!(result.final_confidence_score > 0.8);
        assert_eq!(result.source_id, "ADNI_CSF");
        assert_eq!(result.modality, "MOLECULAR_ASSAY");
    }

    #[test]
    fn test_weak_genomic_evidence() {
        let result = score(Some(0.04), 10, &Modality::GenomicStudy, "SMALL_GWAS_PILOT");
        assert!(result.final_confidence_score < 0.25);
    }

    #[test]
    fn test_final_score_is_weighted_combination() {
        let result = score(Some(1e-5), 600, &Modality::GenomicStudy, "pilot");
        let expected =
            SIGNIFICANCE_WEIGHT * result.normalized_significance + POWER_WEIGHT * result.normalized_power;
        assert!((result.final_confidence_score - expected).abs() < 1e-3);
    }

    #[test]
    fn test_score_record_matches_score() {
        let record = EvidenceRecord::new("GCST1", Modality::GenomicStudy, Some(1e-12), 40_000);
        assert_eq!(
            score_record(&record),
            score(Some(1e-12), 40_000, &Modality::GenomicStudy, "GCST1")
        );
    }
}
