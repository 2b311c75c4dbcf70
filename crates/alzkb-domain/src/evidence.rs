//! Evidence records and their scored form (the evidence ledger)

use crate::Modality;

/// One statistical or clinical claim about a variant/gene/disease relationship
///
/// Built from a single row of ingested tabular data and immutable afterwards.
/// Consumed by [`crate::confidence_computation::score_record`].
#[derive(Debug, Clone, PartialEq)]
pub struct EvidenceRecord {
    /// Source identifier (study accession, cohort name, ...)
    pub source_id: String,

    /// Category of measurement
    pub modality: Modality,

    /// Significance statistic; `None` when the source did not report one
    pub p_value: Option<f64>,

    /// Number of subjects behind the claim
    pub sample_size: u64,
}

impl EvidenceRecord {
    /// Create a new evidence record
    pub fn new(
        source_id: impl Into<String>,
        modality: Modality,
        p_value: Option<f64>,
        sample_size: u64,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            modality,
            p_value,
            sample_size,
        }
    }
}

/// Scored evidence: one entry of the evidence ledger
///
/// Keeps the raw inputs next to the normalized terms so every score can be
/// audited after the fact.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfidenceResult {
    /// Source identifier copied from the evidence
    pub source_id: String,

    /// Modality label the score was computed under
    pub modality: String,

    /// Raw significance value as supplied
    pub raw_p_value: Option<f64>,

    /// Raw sample size as supplied
    pub raw_sample_size: u64,

    /// Significance relative to genome-wide threshold [0.0, 1.0]
    pub normalized_significance: f64,

    /// Sample size relative to modality baseline [0.0, 1.0]
    pub normalized_power: f64,

    /// Weighted combination [0.0, 1.0], rounded to 4 decimals
    pub final_confidence_score: f64,
}

/// Clinical fields of one ETL row that are checked before ingestion
///
/// Values are kept as read from the source; absent fields are not checked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClinicalRow {
    /// Subject identifier
    pub subject_id: Option<String>,

    /// Birth date, `YYYY-MM-DD`
    pub birth_date: Option<String>,

    /// Diagnosis date, `YYYY-MM-DD`
    pub diagnosis_date: Option<String>,

    /// Mini-Mental State Examination score
    pub mmse_score: Option<String>,
}
