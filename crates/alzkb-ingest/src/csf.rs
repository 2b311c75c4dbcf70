//! CSF biomarker ingestion
//!
//! ADNI CSF rows become subject, visit and observation nodes. Every row is
//! classified first: rows from another sample matrix and ADNI null codes
//! are skipped, impossible values are quarantined with a reason, and the
//! rest are standardized to pg/mL and placed against the cognitively
//! normal control group with a z-score.

use crate::parser::CsfRow;
use crate::BatchAccumulator;
use alzkb_domain::confidence_computation::score;
use alzkb_domain::identifier::curie;
use alzkb_domain::vocabulary::{
    AMYLOID_BETA_42_ID, CATEGORY_CHEMICAL, CATEGORY_MEASUREMENT, CATEGORY_SUBJECT, CATEGORY_VISIT,
    CN_CONTROL_COHORT, PREDICATE_AT_VISIT, PREDICATE_HAS_OBSERVATION, PREDICATE_MEASUREMENT_OF,
    SOURCE_ADNI_CSF,
};
use alzkb_domain::{ConfidenceResult, Edge, GraphSnapshot, Modality, Node};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Matrix accepted by the ingester
pub const MATRIX_CSF: &str = "CSF";

/// ADNI codes meaning "not measured"; a blank cell means the same
pub const NULL_CODES: [&str; 3] = ["-1", "-4", "NaN"];

/// Concentration unit of a source table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConcentrationUnit {
    /// pg/mL, the standard unit
    #[default]
    #[serde(rename = "pg/mL")]
    PicogramsPerMilliliter,

    /// ng/L, numerically equal to pg/mL
    #[serde(rename = "ng/L")]
    NanogramsPerLiter,

    /// ng/mL
    #[serde(rename = "ng/mL")]
    NanogramsPerMilliliter,
}

impl ConcentrationUnit {
    /// Get the unit label as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ConcentrationUnit::PicogramsPerMilliliter => "pg/mL",
            ConcentrationUnit::NanogramsPerLiter => "ng/L",
            ConcentrationUnit::NanogramsPerMilliliter => "ng/mL",
        }
    }

    /// Convert a value in this unit to pg/mL
    pub fn to_pg_per_ml(&self, value: f64) -> f64 {
        match self {
            ConcentrationUnit::PicogramsPerMilliliter | ConcentrationUnit::NanogramsPerLiter => value,
            ConcentrationUnit::NanogramsPerMilliliter => value * 1_000.0,
        }
    }
}

impl fmt::Display for ConcentrationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mean and standard deviation of the control group, in pg/mL
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CnControlStats {
    /// Control mean
    pub mean: f64,

    /// Control standard deviation
    pub std: f64,
}

impl CnControlStats {
    /// Create control statistics
    pub fn new(mean: f64, std: f64) -> Self {
        Self { mean, std }
    }

    /// Mean and sample standard deviation; `None` below two values
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.len() < 2 {
            return None;
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
        Some(Self::new(mean, variance.sqrt()))
    }

    /// Distance from the control mean in standard deviations
    ///
    /// A zero spread gives 0.0.
    pub fn z_score(&self, value: f64) -> f64 {
        if self.std == 0.0 {
            0.0
        } else {
            (value - self.mean) / self.std
        }
    }
}

/// Configuration for CSF ingestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsfConfig {
    /// Table column holding the analyte
    pub analyte_column: String,

    /// Node id of the measured analyte
    pub analyte_id: String,

    /// Human-readable analyte name used in observation labels
    pub analyte_label: String,

    /// Unit the table reports in
    pub source_unit: ConcentrationUnit,

    /// Dataset tag written on edges and used as the evidence source
    pub dataset_id: String,

    /// `DX` value marking control subjects
    pub control_group: String,

    /// Fixed control statistics; derived from control rows when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_stats: Option<CnControlStats>,
}

impl Default for CsfConfig {
    fn default() -> Self {
        Self {
            analyte_column: "AB42".to_string(),
            analyte_id: AMYLOID_BETA_42_ID.to_string(),
            analyte_label: "CSF Amyloid Beta 42".to_string(),
            source_unit: ConcentrationUnit::default(),
            dataset_id: SOURCE_ADNI_CSF.to_string(),
            control_group: "CN".to_string(),
            control_stats: None,
        }
    }
}

impl CsfConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        let required = [
            ("analyte_column", &self.analyte_column),
            ("analyte_id", &self.analyte_id),
            ("dataset_id", &self.dataset_id),
            ("control_group", &self.control_group),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(format!("{} must not be empty", name));
            }
        }
        if let Some(stats) = &self.control_stats {
            if !stats.mean.is_finite() {
                return Err("control_stats.mean must be finite".to_string());
            }
            if !stats.std.is_finite() || stats.std < 0.0 {
                return Err("control_stats.std must be a non-negative number".to_string());
            }
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

/// An accepted CSF measurement
#[derive(Debug, Clone, PartialEq)]
pub struct CsfMeasurement {
    /// 1-based data row number
    pub row: usize,
    /// Roster id
    pub rid: String,
    /// Visit code
    pub viscode: String,
    /// Value as reported
    pub raw_value: f64,
    /// Value in pg/mL
    pub standardized_value: f64,
    /// Diagnostic group, when reported
    pub diagnosis: Option<String>,
}

/// Why a row was skipped without complaint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Sample came from another matrix (plasma, serum, ...)
    OtherMatrix,

    /// Cell held an ADNI null code or nothing
    NullCode,
}

/// Classification of one CSF row
#[derive(Debug, Clone, PartialEq)]
pub enum CsfOutcome {
    /// Row becomes an observation
    Accepted(CsfMeasurement),

    /// Row is silently dropped
    Skipped(SkipReason),

    /// Row is set aside with a reason
    Quarantined(String),
}

/// Classify one row
///
/// Checks run in order: matrix, null codes, numeric value, sign, identity
/// keys. The first failing check decides the outcome.
pub fn classify(row: &CsfRow, unit: ConcentrationUnit) -> CsfOutcome {
    let matrix = row.matrix.as_deref().unwrap_or(MATRIX_CSF);
    if !matrix.eq_ignore_ascii_case(MATRIX_CSF) {
        return CsfOutcome::Skipped(SkipReason::OtherMatrix);
    }

    let Some(raw) = row.value.as_deref().filter(|v| !NULL_CODES.contains(v)) else {
        return CsfOutcome::Skipped(SkipReason::NullCode);
    };

    let raw_value = match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => return CsfOutcome::Quarantined("Type Error: Non-numeric Biomarker".to_string()),
    };

    if raw_value < 0.0 {
        return CsfOutcome::Quarantined(
            "Biological Impossibility: Negative Protein Concentration".to_string(),
        );
    }

    let (Some(rid), Some(viscode)) = (&row.rid, &row.viscode) else {
        return CsfOutcome::Quarantined("Missing Identity/Temporal Key".to_string());
    };

    CsfOutcome::Accepted(CsfMeasurement {
        row: row.row,
        rid: rid.clone(),
        viscode: viscode.clone(),
        raw_value,
        standardized_value: unit.to_pg_per_ml(raw_value),
        diagnosis: row.diagnosis.clone(),
    })
}

/// Result of ingesting one CSF table
#[derive(Debug, Clone)]
pub struct CsfIngestion {
    /// Subject, visit, observation and analyte nodes
    pub graph: GraphSnapshot,
    /// Rows turned into observations
    pub accepted: usize,
    /// Rows from another matrix
    pub other_matrix: usize,
    /// Rows holding a null code
    pub null_codes: usize,
    /// Quarantined rows as (row number, reason)
    pub quarantined: Vec<(usize, String)>,
    /// Control statistics the z-scores were computed against
    pub control: Option<CnControlStats>,
    /// Dataset-level evidence, scored as a molecular assay
    pub evidence: ConfidenceResult,
    /// Observation batches written to the graph
    pub batches: usize,
}

/// Ingest a CSF table into a fresh graph
///
/// Control statistics come from the configuration, or from accepted rows of
/// the control group when unset. Without either, z-scores are omitted.
pub fn ingest_csf(rows: &[CsfRow], config: &CsfConfig, batch_size: usize) -> CsfIngestion {
    let mut measurements = Vec::new();
    let mut other_matrix = 0;
    let mut null_codes = 0;
    let mut quarantined = Vec::new();

    for row in rows {
        match classify(row, config.source_unit) {
            CsfOutcome::Accepted(m) => measurements.push(m),
            CsfOutcome::Skipped(SkipReason::OtherMatrix) => other_matrix += 1,
            CsfOutcome::Skipped(SkipReason::NullCode) => null_codes += 1,
            CsfOutcome::Quarantined(reason) => {
                tracing::warn!(row = row.row, rid = ?row.rid, %reason, "CSF row quarantined");
                quarantined.push((row.row, reason));
            }
        }
    }

    let control = config.control_stats.or_else(|| {
        let values: Vec<f64> = measurements
            .iter()
            .filter(|m| {
                m.diagnosis
                    .as_deref()
                    .is_some_and(|dx| dx.eq_ignore_ascii_case(&config.control_group))
            })
            .map(|m| m.standardized_value)
            .collect();
        CnControlStats::from_values(&values)
    });
    if control.is_none() {
        tracing::warn!(group = %config.control_group, "No control statistics, z-scores omitted");
    }

    let accepted = measurements.len();
    let evidence = score(None, accepted as u64, &Modality::MolecularAssay, &config.dataset_id);

    let mut graph = GraphSnapshot::new();
    graph.add_node(
        Node::new(&config.analyte_id)
            .with_category(CATEGORY_CHEMICAL)
            .with_property("name", config.analyte_label.as_str()),
    );

    let mut batches = 0;
    let mut attach = |batch: Vec<CsfMeasurement>| {
        for m in &batch {
            attach_measurement(&mut graph, m, config, control.as_ref(), &evidence);
        }
        batches += 1;
    };

    let mut accumulator = BatchAccumulator::new(batch_size);
    for m in measurements {
        if let Some(batch) = accumulator.push(m) {
            attach(batch);
        }
    }
    if let Some(rest) = accumulator.flush() {
        attach(rest);
    }

    tracing::info!(
        accepted,
        other_matrix,
        null_codes,
        quarantined = quarantined.len(),
        confidence = evidence.final_confidence_score,
        "Ingested CSF table"
    );

    CsfIngestion {
        graph,
        accepted,
        other_matrix,
        null_codes,
        quarantined,
        control,
        evidence,
        batches,
    }
}

/// Add one measurement: subject -> observation -> visit, observation -> analyte
pub fn attach_measurement(
    graph: &mut GraphSnapshot,
    m: &CsfMeasurement,
    config: &CsfConfig,
    control: Option<&CnControlStats>,
    evidence: &ConfidenceResult,
) {
    let subject = curie("subject", &m.rid);
    let visit = curie("visit", &format!("{}_{}", m.rid, m.viscode));
    let observation = curie("obs", &format!("{}_{}_{}", m.rid, m.viscode, config.analyte_column));
    let confidence = evidence.final_confidence_score;

    let mut subject_node = Node::new(&subject).with_category(CATEGORY_SUBJECT);
    if let Some(dx) = &m.diagnosis {
        subject_node = subject_node.with_property("diagnosis", dx.as_str());
    }
    graph.add_node(subject_node);
    graph.add_node(
        Node::new(&visit)
            .with_category(CATEGORY_VISIT)
            .with_property("viscode", m.viscode.as_str()),
    );

    let mut obs_node = Node::new(&observation)
        .with_category(CATEGORY_MEASUREMENT)
        .with_property(
            "name",
            format!(
                "{} measurement for Subject {} at Visit {}",
                config.analyte_label, m.rid, m.viscode
            ),
        )
        .with_property("raw_value", m.raw_value)
        .with_property("source_unit", config.source_unit.as_str())
        .with_property("standardized_value", m.standardized_value)
        .with_property("unit", ConcentrationUnit::PicogramsPerMilliliter.as_str())
        .with_property("confidence", confidence);
    if let Some(stats) = control {
        obs_node = obs_node
            .with_property("z_score", stats.z_score(m.standardized_value))
            .with_property("reference_cohort", CN_CONTROL_COHORT);
    }
    graph.add_node(obs_node);

    graph.add_edge(
        Edge::new(&subject, PREDICATE_HAS_OBSERVATION, &observation)
            .with_source(config.dataset_id.as_str())
            .with_property("confidence", confidence)
            .with_property("weight", confidence),
    );
    graph.add_edge(Edge::new(&observation, PREDICATE_AT_VISIT, &visit));
    graph.add_edge(Edge::new(&observation, PREDICATE_MEASUREMENT_OF, &config.analyte_id));
}

#[cfg(test)]
mod tests {
    use super::*;
    use alzkb_domain::PropertyValue;

    fn row(matrix: Option<&str>, value: Option<&str>) -> CsfRow {
        CsfRow {
            row: 1,
            rid: Some("21".to_string()),
            viscode: Some("bl".to_string()),
            matrix: matrix.map(str::to_string),
            value: value.map(str::to_string),
            diagnosis: None,
        }
    }

    fn measured(rid: &str, value: &str, dx: &str) -> CsfRow {
        CsfRow {
            row: 1,
            rid: Some(rid.to_string()),
            viscode: Some("bl".to_string()),
            matrix: Some("CSF".to_string()),
            value: Some(value.to_string()),
            diagnosis: Some(dx.to_string()),
        }
    }

    fn number(graph: &GraphSnapshot, id: &str, key: &str) -> Option<f64> {
        graph
            .node(id)
            .and_then(|n| n.properties.get(key))
            .and_then(PropertyValue::as_f64)
    }

    #[test]
    fn test_other_matrix_skipped() {
        let outcome = classify(&row(Some("PLASMA"), Some("900")), ConcentrationUnit::default());
        assert_eq!(outcome, CsfOutcome::Skipped(SkipReason::OtherMatrix));

        let lowercase = classify(&row(Some("csf"), Some("900")), ConcentrationUnit::default());
        assert!(matches!(lowercase, CsfOutcome::Accepted(_)));

        let missing = classify(&row(None, Some("900")), ConcentrationUnit::default());
        assert!(matches!(missing, CsfOutcome::Accepted(_)));
    }

    #[test]
    fn test_null_codes_skipped() {
        for value in [Some("-1"), Some("-4"), Some("NaN"), None] {
            assert_eq!(
                classify(&row(None, value), ConcentrationUnit::default()),
                CsfOutcome::Skipped(SkipReason::NullCode),
                "{value:?}"
            );
        }
    }

    #[test]
    fn test_bad_values_quarantined() {
        let cases = [
            ("<200", "Non-numeric"),
            ("inf", "Non-numeric"),
            ("-2", "Negative Protein Concentration"),
        ];
        for (value, reason) in cases {
            match classify(&row(None, Some(value)), ConcentrationUnit::default()) {
                CsfOutcome::Quarantined(msg) => assert!(msg.contains(reason), "{value}: {msg}"),
                other => panic!("{value}: unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn test_missing_identity_quarantined() {
        let mut no_visit = row(None, Some("900"));
        no_visit.viscode = None;
        assert_eq!(
            classify(&no_visit, ConcentrationUnit::default()),
            CsfOutcome::Quarantined("Missing Identity/Temporal Key".to_string())
        );

        // null codes win over identity checks
        no_visit.value = Some("-4".to_string());
        assert_eq!(
            classify(&no_visit, ConcentrationUnit::default()),
            CsfOutcome::Skipped(SkipReason::NullCode)
        );
    }

    #[test]
    fn test_unit_conversion() {
        assert_eq!(ConcentrationUnit::NanogramsPerLiter.to_pg_per_ml(812.0), 812.0);
        assert_eq!(ConcentrationUnit::NanogramsPerMilliliter.to_pg_per_ml(0.8), 800.0);

        let outcome = classify(&row(None, Some("0.8")), ConcentrationUnit::NanogramsPerMilliliter);
        match outcome {
            CsfOutcome::Accepted(m) => {
                assert_eq!(m.raw_value, 0.8);
                assert_eq!(m.standardized_value, 800.0);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_control_stats() {
        let stats = CnControlStats::from_values(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(stats.mean, 2.0);
        assert_eq!(stats.std, 1.0);
        assert_eq!(stats.z_score(4.0), 2.0);

        assert_eq!(CnControlStats::new(5.0, 0.0).z_score(9.0), 0.0);
        assert!(CnControlStats::from_values(&[1.0]).is_none());
    }

    #[test]
    fn test_ingest_derives_control_stats() {
        let rows = vec![
            measured("1", "1000", "CN"),
            measured("2", "1200", "CN"),
            measured("3", "500", "AD"),
            measured("4", "-1", "AD"),
            measured("5", "-3", "AD"),
        ];

        let result = ingest_csf(&rows, &CsfConfig::default(), 2);
        assert_eq!(result.accepted, 3);
        assert_eq!(result.null_codes, 1);
        assert_eq!(result.quarantined.len(), 1);
        assert_eq!(result.batches, 2);

        let control = result.control.unwrap();
        assert_eq!(control.mean, 1100.0);
        let z = number(&result.graph, "obs:3_bl_AB42", "z_score").unwrap();
        assert!((z - control.z_score(500.0)).abs() < 1e-12);
        assert!(z < 0.0);

        // analyte + 3 x (subject, visit, observation)
        assert_eq!(result.graph.node_count(), 10);
        assert_eq!(result.graph.edge_count(), 9);
        assert_eq!(
            result.graph.successors("obs:3_bl_AB42"),
            vec!["visit:3_bl", AMYLOID_BETA_42_ID]
        );
    }

    #[test]
    fn test_evidence_scored_as_molecular_assay() {
        let rows = vec![measured("1", "1000", "CN"), measured("2", "900", "MCI")];
        let result = ingest_csf(&rows, &CsfConfig::default(), 100);

        assert_eq!(result.evidence.modality, "MOLECULAR_ASSAY");
        assert_eq!(result.evidence.raw_sample_size, 2);
        assert_eq!(result.evidence.source_id, SOURCE_ADNI_CSF);
        assert_eq!(
            number(&result.graph, "obs:1_bl_AB42", "confidence"),
            Some(result.evidence.final_confidence_score)
        );
    }

    #[test]
    fn test_configured_control_stats_win() {
        let config = CsfConfig {
            control_stats: Some(CnControlStats::new(800.0, 100.0)),
            ..Default::default()
        };
        let rows = vec![measured("1", "1000", "CN"), measured("2", "1200", "CN")];
        let result = ingest_csf(&rows, &config, 100);

        assert_eq!(result.control, config.control_stats);
        assert_eq!(number(&result.graph, "obs:1_bl_AB42", "z_score"), Some(2.0));
    }

    #[test]
    fn test_no_controls_omits_z_score() {
        let rows = vec![measured("1", "1000", "AD")];
        let result = ingest_csf(&rows, &CsfConfig::default(), 100);
        assert!(result.control.is_none());
        assert_eq!(number(&result.graph, "obs:1_bl_AB42", "z_score"), None);
        assert_eq!(number(&result.graph, "obs:1_bl_AB42", "standardized_value"), Some(1000.0));
    }

    #[test]
    fn test_config_validation_and_toml() {
        assert!(CsfConfig::default().validate().is_ok());

        let bad = CsfConfig {
            control_stats: Some(CnControlStats::new(1.0, -1.0)),
            ..Default::default()
        };
        assert!(bad.validate().is_err());

        let parsed = CsfConfig::from_toml("source_unit = \"ng/mL\"\n[control_stats]\nmean = 1.0\nstd = 2.0\n")
            .unwrap();
        assert_eq!(parsed.source_unit, ConcentrationUnit::NanogramsPerMilliliter);
        assert_eq!(parsed.control_stats, Some(CnControlStats::new(1.0, 2.0)));
        assert_eq!(CsfConfig::from_toml(&parsed.to_toml().unwrap()).unwrap(), parsed);

        assert!(CsfConfig::from_toml("source_unit = \"mg/dL\"").is_err());
    }
}
