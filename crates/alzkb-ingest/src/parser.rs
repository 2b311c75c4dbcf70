//! Tabular input parsing
//!
//! Reads GWAS Catalog style association tables, genotype-call tables,
//! clinical tables and ADNI CSF biomarker tables.
//! Cell-level problems (blank cells, `NR` in a numeric column) become `None`;
//! only structural problems are errors.

use crate::IngestError;
use alzkb_domain::genotype::DEFAULT_GENOTYPE_QUALITY;
use alzkb_domain::{AssociationRecord, ClinicalRow};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::io::Read;
use std::path::Path;

/// Association table column holding the variant id
pub const COL_SNPS: &str = "SNPS";
/// Association table column holding the trait ontology URI
pub const COL_TRAIT_URI: &str = "MAPPED_TRAIT_URI";
/// Association table column holding the mapped gene
pub const COL_GENE: &str = "MAPPED_GENE";
/// Association table column holding the chromosome
pub const COL_CHROMOSOME: &str = "CHR_ID";
/// Association table column holding the p-value
pub const COL_P_VALUE: &str = "P-VALUE";
/// Association table column holding the effect size
pub const COL_EFFECT: &str = "OR or BETA";
/// Association table column holding the risk allele
pub const COL_RISK_ALLELE: &str = "STRONGEST SNP-RISK ALLELE";
/// Association table column holding the PubMed id
pub const COL_PUBMED: &str = "PUBMEDID";

/// One row of a genotype-call table
#[derive(Debug, Clone, PartialEq)]
pub struct GenotypeCall {
    /// Sample identifier
    pub sample_id: String,
    /// Raw rs429358 call
    pub rs429358: String,
    /// Raw rs7412 call
    pub rs7412: String,
    /// rs429358 genotype quality (0-99)
    pub quality_a: f64,
    /// rs7412 genotype quality (0-99)
    pub quality_b: f64,
}

/// One row of an ADNI CSF biomarker table, cells kept as text
///
/// Null codes and bad numbers are judged later by
/// [`crate::csf::classify`], which needs the raw cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CsfRow {
    /// 1-based data row number
    pub row: usize,
    /// Roster id (`RID`)
    pub rid: Option<String>,
    /// Visit code (`VISCODE`)
    pub viscode: Option<String>,
    /// Sample matrix (`MATRIX`); absent means CSF
    pub matrix: Option<String>,
    /// Raw analyte cell
    pub value: Option<String>,
    /// Diagnostic group (`DX`), e.g. `CN`
    pub diagnosis: Option<String>,
}

/// Pick the delimiter from a header line, preferring tab
pub fn detect_delimiter(header_line: &str) -> u8 {
    if header_line.contains('\t') {
        b'\t'
    } else if header_line.contains(',') {
        b','
    } else {
        b'\t'
    }
}

struct Columns {
    index: Vec<String>,
}

impl Columns {
    fn new(headers: &StringRecord) -> Self {
        Self {
            index: headers.iter().map(|h| h.trim().to_string()).collect(),
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.index.iter().position(|h| h.eq_ignore_ascii_case(name))
    }

    fn require(&self, table: &'static str, name: &str) -> Result<usize, IngestError> {
        self.position(name).ok_or_else(|| IngestError::MissingColumn {
            table,
            column: name.to_string(),
        })
    }
}

fn cell(record: &StringRecord, idx: Option<usize>) -> Option<String> {
    idx.and_then(|i| record.get(i))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn numeric(record: &StringRecord, idx: Option<usize>) -> Option<f64> {
    cell(record, idx).and_then(|s| s.parse::<f64>().ok())
}

/// Parse an association table from a reader
///
/// # Arguments
/// * `reader` - Table contents including the header row
/// * `delimiter` - Field separator (see [`detect_delimiter`])
pub fn parse_associations<R: Read>(
    reader: R,
    delimiter: u8,
) -> Result<Vec<AssociationRecord>, IngestError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let columns = Columns::new(rdr.headers()?);
    let snps = columns.require("association", COL_SNPS)?;
    let trait_uri = Some(columns.require("association", COL_TRAIT_URI)?);
    let p_value = Some(columns.require("association", COL_P_VALUE)?);
    let gene = columns.position(COL_GENE);
    let chromosome = columns.position(COL_CHROMOSOME);
    let effect = columns.position(COL_EFFECT);
    let risk_allele = columns.position(COL_RISK_ALLELE);
    let pubmed = columns.position(COL_PUBMED);

    let mut records = Vec::new();
    for (i, row) in rdr.records().enumerate() {
        let row = row?;
        let line = i + 1;

        let Some(variant_id) = cell(&row, Some(snps)) else {
            tracing::debug!(row = line, "Skipping association row without a variant id");
            continue;
        };

        records.push(AssociationRecord {
            row: line,
            variant_id,
            trait_uri: cell(&row, trait_uri),
            gene_symbol: cell(&row, gene),
            chromosome: cell(&row, chromosome),
            p_value: numeric(&row, p_value),
            effect_size: numeric(&row, effect),
            risk_allele: cell(&row, risk_allele),
            pubmed_id: cell(&row, pubmed),
        });
    }

    tracing::debug!(rows = records.len(), "Parsed association table");
    Ok(records)
}

/// Read an association table from disk, detecting the delimiter
pub fn read_associations(path: &Path) -> Result<Vec<AssociationRecord>, IngestError> {
    let text = std::fs::read_to_string(path)?;
    let delimiter = detect_delimiter(text.lines().next().unwrap_or_default());
    parse_associations(text.as_bytes(), delimiter)
}

/// Parse a genotype-call table from a reader
///
/// Columns `sample_id`, `rs429358` and `rs7412` are required. Quality
/// columns `rs429358_gq` and `rs7412_gq` are optional; blank or
/// non-numeric qualities fall back to the default of 99.
pub fn parse_genotype_calls<R: Read>(
    reader: R,
    delimiter: u8,
) -> Result<Vec<GenotypeCall>, IngestError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let columns = Columns::new(rdr.headers()?);
    let sample = Some(columns.require("genotype", "sample_id")?);
    let locus_a = Some(columns.require("genotype", "rs429358")?);
    let locus_b = Some(columns.require("genotype", "rs7412")?);
    let quality_a = columns.position("rs429358_gq");
    let quality_b = columns.position("rs7412_gq");

    let mut calls = Vec::new();
    for (i, row) in rdr.records().enumerate() {
        let row = row?;
        let sample_id = cell(&row, sample).unwrap_or_else(|| format!("row_{}", i + 1));

        calls.push(GenotypeCall {
            sample_id,
            rs429358: cell(&row, locus_a).unwrap_or_default(),
            rs7412: cell(&row, locus_b).unwrap_or_default(),
            quality_a: numeric(&row, quality_a).unwrap_or(DEFAULT_GENOTYPE_QUALITY),
            quality_b: numeric(&row, quality_b).unwrap_or(DEFAULT_GENOTYPE_QUALITY),
        });
    }

    Ok(calls)
}

/// Read a genotype-call table from disk, detecting the delimiter
pub fn read_genotype_calls(path: &Path) -> Result<Vec<GenotypeCall>, IngestError> {
    let text = std::fs::read_to_string(path)?;
    let delimiter = detect_delimiter(text.lines().next().unwrap_or_default());
    parse_genotype_calls(text.as_bytes(), delimiter)
}

/// Parse a clinical table from a reader
///
/// Recognised columns are `subject_id`, `birth_date`, `diagnosis_date` and
/// `mmse_score`; all are optional and blank cells stay `None`.
pub fn parse_clinical_rows<R: Read>(reader: R, delimiter: u8) -> Result<Vec<ClinicalRow>, IngestError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let columns = Columns::new(rdr.headers()?);
    let subject = columns.position("subject_id");
    let birth = columns.position("birth_date");
    let diagnosis = columns.position("diagnosis_date");
    let mmse = columns.position("mmse_score");

    let mut rows = Vec::new();
    for row in rdr.records() {
        let row = row?;
        rows.push(ClinicalRow {
            subject_id: cell(&row, subject),
            birth_date: cell(&row, birth),
            diagnosis_date: cell(&row, diagnosis),
            mmse_score: cell(&row, mmse),
        });
    }
    Ok(rows)
}

/// Read a clinical table from disk, detecting the delimiter
pub fn read_clinical_rows(path: &Path) -> Result<Vec<ClinicalRow>, IngestError> {
    let text = std::fs::read_to_string(path)?;
    let delimiter = detect_delimiter(text.lines().next().unwrap_or_default());
    parse_clinical_rows(text.as_bytes(), delimiter)
}

/// Parse an ADNI CSF table from a reader
///
/// `analyte_column` (e.g. `AB42`) is required. `RID`, `VISCODE`, `MATRIX`
/// and `DX` are read when present.
pub fn parse_csf_rows<R: Read>(
    reader: R,
    delimiter: u8,
    analyte_column: &str,
) -> Result<Vec<CsfRow>, IngestError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let columns = Columns::new(rdr.headers()?);
    let value = Some(columns.require("csf", analyte_column)?);
    let rid = columns.position("RID");
    let viscode = columns.position("VISCODE");
    let matrix = columns.position("MATRIX");
    let diagnosis = columns.position("DX");

    let mut rows = Vec::new();
    for (i, row) in rdr.records().enumerate() {
        let row = row?;
        rows.push(CsfRow {
            row: i + 1,
            rid: cell(&row, rid),
            viscode: cell(&row, viscode),
            matrix: cell(&row, matrix),
            value: cell(&row, value),
            diagnosis: cell(&row, diagnosis),
        });
    }

    tracing::debug!(rows = rows.len(), analyte = analyte_column, "Parsed CSF table");
    Ok(rows)
}

/// Read an ADNI CSF table from disk, detecting the delimiter
pub fn read_csf_rows(path: &Path, analyte_column: &str) -> Result<Vec<CsfRow>, IngestError> {
    let text = std::fs::read_to_string(path)?;
    let delimiter = detect_delimiter(text.lines().next().unwrap_or_default());
    parse_csf_rows(text.as_bytes(), delimiter, analyte_column)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GWAS_TSV: &str = "SNPS\tMAPPED_TRAIT_URI\tMAPPED_GENE\tCHR_ID\tP-VALUE\tOR or BETA\tSTRONGEST SNP-RISK ALLELE\tPUBMEDID\n\
rs429358\thttp://www.ebi.ac.uk/efo/EFO_0000249\tAPOE\t19\t1e-300\t3.7\trs429358-C\t24162737\n\
rs6733839\thttp://www.ebi.ac.uk/efo/EFO_0000249\tBIN1\t2\tNR\t\trs6733839-T\t\n";

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(detect_delimiter("a\tb"), b'\t');
        assert_eq!(detect_delimiter("a,b"), b',');
        assert_eq!(detect_delimiter("a,b\tc"), b'\t');
        assert_eq!(detect_delimiter("single"), b'\t');
    }

    #[test]
    fn test_parse_associations() {
        let records = parse_associations(GWAS_TSV.as_bytes(), b'\t').unwrap();
        assert_eq!(records.len(), 2);

        let apoe = &records[0];
        assert_eq!(apoe.row, 1);
        assert_eq!(apoe.variant_id, "rs429358");
        assert_eq!(apoe.trait_id(), Some("EFO_0000249"));
        assert_eq!(apoe.gene_symbol.as_deref(), Some("APOE"));
        assert_eq!(apoe.chromosome.as_deref(), Some("19"));
        assert_eq!(apoe.p_value, Some(1e-300));
        assert_eq!(apoe.effect_size, Some(3.7));
        assert_eq!(apoe.pubmed_id.as_deref(), Some("24162737"));
    }

    #[test]
    fn test_non_numeric_cells_become_missing() {
        let records = parse_associations(GWAS_TSV.as_bytes(), b'\t').unwrap();
        let bin1 = &records[1];
        assert_eq!(bin1.p_value, None);
        assert_eq!(bin1.effect_size, None);
        assert_eq!(bin1.pubmed_id, None);
    }

    #[test]
    fn test_missing_required_column() {
        let table = "SNPS\tMAPPED_GENE\nrs1\tAPOE\n";
        let err = parse_associations(table.as_bytes(), b'\t').unwrap_err();
        assert!(matches!(err, IngestError::MissingColumn { column, .. } if column == COL_TRAIT_URI));
    }

    #[test]
    fn test_optional_columns_may_be_absent() {
        let table = "SNPS,MAPPED_TRAIT_URI,P-VALUE\nrs1,http://x/EFO_0000249,1e-9\n";
        let records = parse_associations(table.as_bytes(), b',').unwrap();
        assert_eq!(records[0].gene_symbol, None);
        assert_eq!(records[0].chromosome, None);
    }

    #[test]
    fn test_parse_genotype_calls_with_default_quality() {
        let table = "sample_id,rs429358,rs7412,rs429358_gq\nS1,C/T,C/C,45\nS2,T/T,C/T,\n";
        let calls = parse_genotype_calls(table.as_bytes(), b',').unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].quality_a, 45.0);
        assert_eq!(calls[0].quality_b, DEFAULT_GENOTYPE_QUALITY);
        assert_eq!(calls[1].quality_a, DEFAULT_GENOTYPE_QUALITY);
        assert_eq!(calls[1].rs7412, "C/T");
    }

    #[test]
    fn test_parse_clinical_rows() {
        let table = "subject_id,birth_date,diagnosis_date,mmse_score\nP1,1940-01-01,2010-06-01,22\nP2,,,\n";
        let rows = parse_clinical_rows(table.as_bytes(), b',').unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].mmse_score.as_deref(), Some("22"));
        assert_eq!(rows[1].birth_date, None);
        assert_eq!(rows[1].subject_id.as_deref(), Some("P2"));
    }

    #[test]
    fn test_parse_csf_rows() {
        let table = "RID,VISCODE,MATRIX,AB42,DX\n2,bl,CSF,1012.5,CN\n3,m12,,-4,\n";
        let rows = parse_csf_rows(table.as_bytes(), b',', "ab42").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].rid.as_deref(), Some("2"));
        assert_eq!(rows[0].value.as_deref(), Some("1012.5"));
        assert_eq!(rows[0].diagnosis.as_deref(), Some("CN"));
        assert_eq!(rows[1].row, 2);
        assert_eq!(rows[1].matrix, None);
        assert_eq!(rows[1].value.as_deref(), Some("-4"));
    }

    #[test]
    fn test_csf_table_requires_analyte_column() {
        let table = "RID,VISCODE,TAU\n2,bl,300\n";
        let err = parse_csf_rows(table.as_bytes(), b',', "AB42").unwrap_err();
        assert!(matches!(err, IngestError::MissingColumn { table: "csf", .. }));
    }

    #[test]
    fn test_read_associations_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gwas.tsv");
        std::fs::write(&path, GWAS_TSV).unwrap();

        let records = read_associations(&path).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_associations(&dir.path().join("absent.tsv")).unwrap_err();
        assert!(matches!(err, IngestError::Io(_)));
    }
}
