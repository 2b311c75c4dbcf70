//! Check-rows command implementation.

use crate::cli::CheckRowsArgs;
use crate::error::Result;
use crate::output::Formatter;
use alzkb_domain::ClinicalRow;
use alzkb_gatekeeper::{validate_row, RowVerdict};
use alzkb_ingest::read_clinical_rows;

/// Validate every row, numbering rows from 1.
pub fn check_rows(rows: Vec<ClinicalRow>) -> Vec<(usize, ClinicalRow, RowVerdict)> {
    let checked: Vec<_> = rows
        .into_iter()
        .enumerate()
        .map(|(i, row)| {
            let verdict = validate_row(&row);
            if let RowVerdict::Quarantined(reasons) = &verdict {
                tracing::debug!(row = i + 1, reasons = ?reasons, "Row quarantined");
            }
            (i + 1, row, verdict)
        })
        .collect();

    let quarantined = checked.iter().filter(|(_, _, v)| !v.is_accepted()).count();
    tracing::info!(
        rows = checked.len(),
        quarantined,
        "Clinical rows checked"
    );
    checked
}

/// Execute the check-rows command.
pub fn execute_check_rows(args: CheckRowsArgs, formatter: &Formatter) -> Result<()> {
    let mut checked = check_rows(read_clinical_rows(&args.input)?);
    let total = checked.len();
    let quarantined = checked.iter().filter(|(_, _, v)| !v.is_accepted()).count();

    if args.quarantined_only {
        checked.retain(|(_, _, v)| !v.is_accepted());
    }

    println!("{}", formatter.format_row_verdicts(&checked)?);
    if !formatter.is_json() {
        let summary = format!("{} of {} row(s) quarantined", quarantined, total);
        if quarantined == 0 {
            println!("{}", formatter.success(&summary));
        } else {
            println!("{}", formatter.warning(&summary));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(birth: &str, diagnosis: &str, mmse: &str) -> ClinicalRow {
        ClinicalRow {
            subject_id: Some("P".to_string()),
            birth_date: Some(birth.to_string()),
            diagnosis_date: Some(diagnosis.to_string()),
            mmse_score: Some(mmse.to_string()),
        }
    }

    #[test]
    fn test_rows_numbered_and_verdicts_kept() {
        let checked = check_rows(vec![
            row("1940-01-01", "2010-05-05", "24"),
            row("1950-01-01", "1949-12-31", "24"),
            row("1950-01-01", "2001-01-01", "31"),
        ]);

        assert_eq!(checked.len(), 3);
        assert_eq!(checked[0].0, 1);
        assert!(checked[0].2.is_accepted());
        assert!(!checked[1].2.is_accepted());
        match &checked[2].2 {
            RowVerdict::Quarantined(reasons) => assert!(reasons[0].starts_with("Range Error")),
            RowVerdict::Accepted => panic!("MMSE 31 should be quarantined"),
        }
    }
}
