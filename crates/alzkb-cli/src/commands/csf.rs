//! CSF command implementation.

use crate::cli::CsfArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use alzkb_ingest::{ingest_csf, read_csf_rows};

/// Execute the csf command.
///
/// Reports accepted, skipped and quarantined rows. Nothing is persisted;
/// `curate --csf` folds the observations into a release graph.
pub fn execute_csf(args: CsfArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let rows = read_csf_rows(&args.input, &config.csf.analyte_column)?;
    let result = ingest_csf(&rows, &config.csf, config.ingest.batch_size);
    println!("{}", formatter.format_csf(&result)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::error::CliError;
    use alzkb_ingest::IngestError;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_csf_table_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("csf.csv");
        fs::write(&path, "RID,VISCODE,AB42,DX\n1,bl,1000,CN\n2,bl,-1,AD\n").unwrap();

        let args = CsfArgs { input: path };
        let formatter = Formatter::new(OutputFormat::Json, false);
        assert!(execute_csf(args, &Config::default(), &formatter).is_ok());
    }

    #[test]
    fn test_missing_analyte_column() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("csf.csv");
        fs::write(&path, "RID,VISCODE,TAU\n1,bl,300\n").unwrap();

        let formatter = Formatter::new(OutputFormat::Table, false);
        let err = execute_csf(CsfArgs { input: path }, &Config::default(), &formatter).unwrap_err();
        assert!(matches!(err, CliError::Ingest(IngestError::MissingColumn { .. })));
    }
}
