//! Clinical row validation
//!
//! Individual ETL rows are checked for temporal causality and clinical
//! ranges. A failing row is quarantined with its reasons; nothing here is
//! fatal to the run.

use alzkb_domain::ClinicalRow;
use chrono::NaiveDate;

/// Date format accepted for birth and diagnosis dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Valid MMSE range (inclusive)
pub const MMSE_RANGE: (f64, f64) = (0.0, 30.0);

/// Verdict for one row
#[derive(Debug, Clone, PartialEq)]
pub enum RowVerdict {
    /// Row passed every check
    Accepted,

    /// Row failed; reasons in check order
    Quarantined(Vec<String>),
}

impl RowVerdict {
    /// Whether the row was accepted
    pub fn is_accepted(&self) -> bool {
        matches!(self, RowVerdict::Accepted)
    }
}

/// Check one clinical row
pub fn validate_row(row: &ClinicalRow) -> RowVerdict {
    let mut reasons = Vec::new();

    if let (Some(birth), Some(diagnosis)) = (&row.birth_date, &row.diagnosis_date) {
        let parsed = NaiveDate::parse_from_str(birth.trim(), DATE_FORMAT)
            .and_then(|b| NaiveDate::parse_from_str(diagnosis.trim(), DATE_FORMAT).map(|d| (b, d)));

        match parsed {
            Ok((birth_date, diagnosis_date)) if diagnosis_date <= birth_date => {
                reasons.push(format!(
                    "Temporal Causality Error: Diagnosis ({}) precedes or equals Birth ({}).",
                    diagnosis, birth
                ));
            }
            Ok(_) => {}
            Err(e) => reasons.push(format!("Date Parsing Error: {}", e)),
        }
    }

    if let Some(raw) = &row.mmse_score {
        match raw.trim().parse::<f64>() {
            Ok(score) if !(MMSE_RANGE.0..=MMSE_RANGE.1).contains(&score) => {
                reasons.push(format!("Range Error: MMSE {} out of bounds [0,30].", score));
            }
            Ok(_) => {}
            Err(_) => reasons.push(format!("Type Error: MMSE '{}' is not numeric.", raw)),
        }
    }

    if reasons.is_empty() {
        RowVerdict::Accepted
    } else {
        tracing::debug!(reasons = reasons.len(), "Row quarantined");
        RowVerdict::Quarantined(reasons)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(birth: &str, diagnosis: &str, mmse: Option<&str>) -> ClinicalRow {
        ClinicalRow {
            subject_id: Some("P001".to_string()),
            birth_date: Some(birth.to_string()),
            diagnosis_date: Some(diagnosis.to_string()),
            mmse_score: mmse.map(str::to_string),
        }
    }

    #[test]
    fn test_valid_row_accepted() {
        assert!(validate_row(&row("1940-05-01", "2015-03-12", Some("24"))).is_accepted());
    }

    #[test]
    fn test_diagnosis_before_birth_quarantined() {
        let verdict = validate_row(&row("1990-01-01", "1980-01-01", None));
        let RowVerdict::Quarantined(reasons) = verdict else {
            panic!("expected quarantine");
        };
        assert!(reasons[0].starts_with("Temporal Causality Error"));
    }

    #[test]
    fn test_same_day_is_quarantined() {
        assert!(!validate_row(&row("1990-01-01", "1990-01-01", None)).is_accepted());
    }

    #[test]
    fn test_unparseable_date_quarantined() {
        let verdict = validate_row(&row("01/05/1940", "2015-03-12", None));
        assert!(matches!(verdict, RowVerdict::Quarantined(ref r) if r[0].starts_with("Date Parsing Error")));
    }

    #[test]
    fn test_mmse_bounds() {
        assert!(validate_row(&ClinicalRow { mmse_score: Some("0".into()), ..Default::default() }).is_accepted());
        assert!(validate_row(&ClinicalRow { mmse_score: Some("30".into()), ..Default::default() }).is_accepted());
        assert!(!validate_row(&ClinicalRow { mmse_score: Some("31".into()), ..Default::default() }).is_accepted());
        assert!(!validate_row(&ClinicalRow { mmse_score: Some("-1".into()), ..Default::default() }).is_accepted());
    }

    #[test]
    fn test_non_numeric_mmse_quarantined() {
        let verdict = validate_row(&ClinicalRow {
            mmse_score: Some("n/a".into()),
            ..Default::default()
        });
        assert_eq!(
            verdict,
            RowVerdict::Quarantined(vec!["Type Error: MMSE 'n/a' is not numeric.".to_string()])
        );
    }

    #[test]
    fn test_reasons_accumulate() {
        let verdict = validate_row(&row("2000-01-01", "1999-01-01", Some("45")));
        assert!(matches!(verdict, RowVerdict::Quarantined(ref r) if r.len() == 2));
    }

    #[test]
    fn test_missing_fields_are_not_checked() {
        let partial = ClinicalRow {
            birth_date: Some("not a date".into()),
            ..Default::default()
        };
        assert!(validate_row(&partial).is_accepted());
    }
}
