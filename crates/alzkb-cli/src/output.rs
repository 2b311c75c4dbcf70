//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use alzkb_domain::{ClinicalRow, ConfidenceResult, GenotypeClassification, Node, PropertyValue};
use alzkb_gatekeeper::{IntegrityReport, RowVerdict, ValidationVerdict};
use alzkb_ingest::{CsfIngestion, SentinelSelection};
use alzkb_retrieval::{RankedResult, ScoredNode};
use colored::*;
use serde_json::{json, Value};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

fn opt(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

fn opt_f64(value: Option<f64>) -> String {
    value.map(|v| format!("{:e}", v)).unwrap_or_else(|| "-".to_string())
}

fn node_name(node: &Node) -> String {
    node.properties
        .get("name")
        .and_then(PropertyValue::as_str)
        .unwrap_or("")
        .to_string()
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Whether output is JSON.
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Format one evidence ledger entry.
    pub fn format_confidence(&self, result: &ConfidenceResult) -> Result<String> {
        if self.is_json() {
            return Ok(serde_json::to_string_pretty(&json!({
                "source_id": result.source_id,
                "modality": result.modality,
                "raw_p_value": result.raw_p_value,
                "raw_sample_size": result.raw_sample_size,
                "normalized_significance": result.normalized_significance,
                "normalized_power": result.normalized_power,
                "final_confidence_score": result.final_confidence_score,
            }))?);
        }

        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        builder.push_record(["Source", result.source_id.as_str()]);
        builder.push_record(["Modality", result.modality.as_str()]);
        builder.push_record(["p-value", &opt_f64(result.raw_p_value)]);
        builder.push_record(["Sample size", &result.raw_sample_size.to_string()]);
        builder.push_record(["Significance", &format!("{:.4}", result.normalized_significance)]);
        builder.push_record(["Power", &format!("{:.4}", result.normalized_power)]);
        builder.push_record(["Confidence", &format!("{:.4}", result.final_confidence_score)]);
        Ok(self.render(builder))
    }

    /// Format genotype classifications keyed by sample.
    pub fn format_genotypes(&self, calls: &[(String, GenotypeClassification)]) -> Result<String> {
        if self.is_json() {
            let values: Vec<Value> = calls
                .iter()
                .map(|(sample, c)| {
                    json!({
                        "sample_id": sample,
                        "canonical_id": c.canonical_id,
                        "display_label": c.display_label,
                        "risk_category": c.risk_category.as_uri(),
                        "confidence": c.confidence,
                        "note": c.note,
                    })
                })
                .collect();
            return Ok(serde_json::to_string_pretty(&values)?);
        }

        if calls.is_empty() {
            return Ok(self.colorize("No genotype calls found.", "yellow"));
        }

        let mut builder = Builder::default();
        builder.push_record(["Sample", "Genotype", "Label", "Risk", "Confidence", "Note"]);
        for (sample, c) in calls {
            let label = if c.is_mapped() {
                c.display_label.clone()
            } else {
                self.colorize(&c.display_label, "yellow")
            };
            builder.push_record([
                sample.as_str(),
                c.canonical_id.as_str(),
                label.as_str(),
                c.risk_category.as_uri(),
                &format!("{:.3}", c.confidence),
                c.note.as_str(),
            ]);
        }
        Ok(self.render(builder))
    }

    /// Format the outcome of sentinel selection.
    pub fn format_sentinels(&self, selection: &SentinelSelection) -> Result<String> {
        if self.is_json() {
            let sentinels: Vec<Value> = selection
                .sentinels
                .iter()
                .map(|s| {
                    json!({
                        "row": s.row,
                        "variant_id": s.variant_id,
                        "trait_id": s.trait_id(),
                        "gene_symbol": s.gene_symbol,
                        "chromosome": s.chromosome,
                        "p_value": s.p_value,
                        "effect_size": s.effect_size,
                        "risk_allele": s.risk_allele,
                        "pubmed_id": s.pubmed_id,
                    })
                })
                .collect();
            return Ok(serde_json::to_string_pretty(&json!({
                "sentinels": sentinels,
                "discarded": {
                    "off_allowlist": selection.off_allowlist,
                    "non_numeric": selection.non_numeric,
                    "redundant": selection.redundant,
                },
            }))?);
        }

        if selection.sentinels.is_empty() {
            return Ok(self.colorize("No sentinels selected.", "yellow"));
        }

        let mut builder = Builder::default();
        builder.push_record(["Variant", "Gene", "Chr", "Trait", "p-value", "Risk allele"]);
        for s in &selection.sentinels {
            builder.push_record([
                s.variant_id.clone(),
                opt(s.gene_symbol.as_deref()),
                opt(s.chromosome.as_deref()),
                opt(s.trait_id()),
                opt_f64(s.p_value),
                opt(s.risk_allele.as_deref()),
            ]);
        }
        let summary = format!(
            "{} sentinel(s); discarded {} off-allowlist, {} non-numeric, {} redundant",
            selection.sentinels.len(),
            selection.off_allowlist,
            selection.non_numeric,
            selection.redundant
        );
        Ok(format!("{}\n{}", self.render(builder), self.info(&summary)))
    }

    /// Format a release gate verdict.
    pub fn format_verdict(&self, verdict: &ValidationVerdict) -> Result<String> {
        if self.is_json() {
            let checks: Vec<Value> = verdict
                .checks
                .iter()
                .map(|c| json!({"check": c.check.as_str(), "passed": c.passed, "message": c.message}))
                .collect();
            return Ok(serde_json::to_string_pretty(&json!({
                "passed": verdict.passed(),
                "checks": checks,
            }))?);
        }

        let mut builder = Builder::default();
        builder.push_record(["Check", "Result", "Message"]);
        for c in &verdict.checks {
            let result = if c.passed {
                self.colorize("PASS", "green")
            } else {
                self.colorize("FAIL", "red")
            };
            builder.push_record([c.check.as_str(), result.as_str(), c.message.as_str()]);
        }
        Ok(self.render(builder))
    }

    /// Format an integrity report.
    pub fn format_integrity(&self, report: &IntegrityReport) -> Result<String> {
        if self.is_json() {
            return Ok(serde_json::to_string_pretty(&json!({
                "positive_control_found": report.positive_control_found,
                "positive_control_p": report.positive_control_p,
                "warnings": report.warnings,
            }))?);
        }

        let mut lines = Vec::new();
        if report.positive_control_found {
            lines.push(self.success(&format!(
                "Positive control confirmed (p = {})",
                opt_f64(report.positive_control_p)
            )));
        }
        lines.extend(report.warnings.iter().map(|w| self.warning(w)));
        lines.push(self.success("Negative control clean"));
        Ok(lines.join("\n"))
    }

    /// Format clinical row verdicts.
    pub fn format_row_verdicts(&self, rows: &[(usize, ClinicalRow, RowVerdict)]) -> Result<String> {
        if self.is_json() {
            let values: Vec<Value> = rows
                .iter()
                .map(|(line, row, verdict)| {
                    let reasons: &[String] = match verdict {
                        RowVerdict::Accepted => &[],
                        RowVerdict::Quarantined(reasons) => reasons,
                    };
                    json!({
                        "row": line,
                        "subject_id": row.subject_id,
                        "accepted": verdict.is_accepted(),
                        "reasons": reasons,
                    })
                })
                .collect();
            return Ok(serde_json::to_string_pretty(&values)?);
        }

        if rows.is_empty() {
            return Ok(self.colorize("No rows to show.", "yellow"));
        }

        let mut builder = Builder::default();
        builder.push_record(["Row", "Subject", "Verdict", "Reasons"]);
        for (line, row, verdict) in rows {
            let (status, reasons) = match verdict {
                RowVerdict::Accepted => (self.colorize("accepted", "green"), String::new()),
                RowVerdict::Quarantined(reasons) => {
                    (self.colorize("quarantined", "red"), reasons.join("\n"))
                }
            };
            builder.push_record([
                line.to_string(),
                opt(row.subject_id.as_deref()),
                status,
                reasons,
            ]);
        }
        Ok(self.render(builder))
    }

    /// Format a CSF ingestion summary.
    pub fn format_csf(&self, result: &CsfIngestion) -> Result<String> {
        if self.is_json() {
            let quarantined: Vec<Value> = result
                .quarantined
                .iter()
                .map(|(row, reason)| json!({ "row": row, "reason": reason }))
                .collect();
            return Ok(serde_json::to_string_pretty(&json!({
                "accepted": result.accepted,
                "other_matrix": result.other_matrix,
                "null_codes": result.null_codes,
                "quarantined": quarantined,
                "control_mean": result.control.map(|c| c.mean),
                "control_std": result.control.map(|c| c.std),
                "confidence": result.evidence.final_confidence_score,
                "nodes": result.graph.node_count(),
                "edges": result.graph.edge_count(),
            }))?);
        }

        let control = match result.control {
            Some(c) => format!("mean {:.2}, sd {:.2}", c.mean, c.std),
            None => "-".to_string(),
        };

        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        builder.push_record(["Accepted".to_string(), result.accepted.to_string()]);
        builder.push_record(["Other matrix".to_string(), result.other_matrix.to_string()]);
        builder.push_record(["Null codes".to_string(), result.null_codes.to_string()]);
        builder.push_record(["Quarantined".to_string(), result.quarantined.len().to_string()]);
        builder.push_record(["Control group".to_string(), control]);
        builder.push_record([
            "Confidence".to_string(),
            format!("{:.4}", result.evidence.final_confidence_score),
        ]);
        let mut text = self.render(builder);

        if !result.quarantined.is_empty() {
            let mut rows = Builder::default();
            rows.push_record(["Row", "Reason"]);
            for (row, reason) in &result.quarantined {
                rows.push_record([row.to_string(), self.colorize(reason, "red")]);
            }
            text.push('\n');
            text.push_str(&self.render(rows));
        }
        Ok(text)
    }

    /// Format pruned neighbours.
    pub fn format_pruned(&self, scored: &[ScoredNode<'_>]) -> Result<String> {
        if self.is_json() {
            let values: Vec<Value> = scored
                .iter()
                .map(|s| {
                    json!({
                        "id": s.node.id,
                        "category": s.node.category,
                        "name": node_name(s.node),
                        "score": s.score,
                    })
                })
                .collect();
            return Ok(serde_json::to_string_pretty(&values)?);
        }

        if scored.is_empty() {
            return Ok(self.colorize("No neighbours found.", "yellow"));
        }

        let mut builder = Builder::default();
        builder.push_record(["#", "Node", "Category", "Name", "Score"]);
        for (i, s) in scored.iter().enumerate() {
            builder.push_record([
                (i + 1).to_string(),
                s.node.id.clone(),
                opt(s.node.category.as_deref()),
                node_name(s.node),
                format!("{:.4}", s.score),
            ]);
        }
        Ok(self.render(builder))
    }

    /// Format re-ranked retrieval results.
    pub fn format_ranked(&self, ranked: &[RankedResult]) -> Result<String> {
        if self.is_json() {
            return Ok(serde_json::to_string_pretty(ranked)?);
        }

        if ranked.is_empty() {
            return Ok(self.colorize("No results.", "yellow"));
        }

        let mut builder = Builder::default();
        builder.push_record(["#", "Entity", "Label", "Score", "Exact match"]);
        for (i, r) in ranked.iter().enumerate() {
            let boosted = if r.boosted {
                self.colorize("yes", "green")
            } else {
                String::new()
            };
            builder.push_record([
                (i + 1).to_string(),
                r.id.clone(),
                opt(r.label.as_deref()),
                format!("{:.5}", r.final_score),
                boosted,
            ]);
        }
        Ok(self.render(builder))
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn render(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}
