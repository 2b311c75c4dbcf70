//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// AlzKB - curate the Alzheimer's knowledge graph.
#[derive(Debug, Parser)]
#[command(name = "alzkb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path (default: ~/.alzkb/config.toml)
    #[arg(long, global = true, env = "ALZKB_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log at debug level (RUST_LOG still wins when set)
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Score one piece of evidence
    Score(ScoreArgs),

    /// Resolve APOE genotypes from rs429358/rs7412 calls
    Genotype(GenotypeArgs),

    /// Pick the strongest variant per gene and chromosome
    Sentinels(SentinelsArgs),

    /// Parse, select, assemble, validate and persist a graph
    Curate(CurateArgs),

    /// Run the release gate on a persisted graph
    Validate(ValidateArgs),

    /// Quarantine clinical rows that fail temporal or range checks
    CheckRows(CheckRowsArgs),

    /// Ingest an ADNI CSF biomarker table and report what was kept
    Csf(CsfArgs),

    /// Keep the most relevant neighbours of a node
    Prune(PruneArgs),

    /// Re-rank dense retrieval hits with keyword boosting
    Rank(RankArgs),
}

/// Arguments for the score command.
#[derive(Debug, Parser)]
pub struct ScoreArgs {
    /// Reported p-value (omit when the source had none)
    #[arg(short, long)]
    pub p_value: Option<f64>,

    /// Number of subjects
    #[arg(short = 'n', long)]
    pub sample_size: u64,

    /// Modality label (GENOMIC_STUDY, CLINICAL_OBSERVATION, MOLECULAR_ASSAY, ...)
    #[arg(short, long, default_value = "GENOMIC_STUDY")]
    pub modality: String,

    /// Source identifier copied onto the result
    #[arg(short, long, default_value = "cli")]
    pub source_id: String,
}

/// Arguments for the genotype command.
#[derive(Debug, Parser)]
pub struct GenotypeArgs {
    /// Raw rs429358 call, e.g. T/C
    #[arg(required_unless_present = "file")]
    pub locus_a: Option<String>,

    /// Raw rs7412 call, e.g. C/C
    #[arg(required_unless_present = "file")]
    pub locus_b: Option<String>,

    /// rs429358 genotype quality (0-99)
    #[arg(long, default_value = "99")]
    pub quality_a: f64,

    /// rs7412 genotype quality (0-99)
    #[arg(long, default_value = "99")]
    pub quality_b: f64,

    /// Genotype-call table (sample_id, rs429358, rs7412[, rs429358_gq, rs7412_gq])
    #[arg(long, conflicts_with_all = ["locus_a", "locus_b"])]
    pub file: Option<PathBuf>,
}

/// Arguments for the sentinels command.
#[derive(Debug, Parser)]
pub struct SentinelsArgs {
    /// GWAS association table (TSV or CSV)
    #[arg(short, long)]
    pub input: PathBuf,
}

/// Arguments for the curate command.
#[derive(Debug, Parser)]
pub struct CurateArgs {
    /// GWAS association table (TSV or CSV)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Destination graph snapshot
    #[arg(short, long)]
    pub output: PathBuf,

    /// Genotype-call table to attach
    #[arg(short, long)]
    pub genotypes: Option<PathBuf>,

    /// Study sample size; attaches evidence confidence to association edges
    #[arg(short = 'n', long)]
    pub sample_size: Option<u64>,

    /// ADNI CSF biomarker table to fold into the graph
    #[arg(long)]
    pub csf: Option<PathBuf>,

    /// Also run the positive/negative control check before persisting
    #[arg(long)]
    pub integrity: bool,
}

/// Arguments for the validate command.
#[derive(Debug, Parser)]
pub struct ValidateArgs {
    /// Persisted graph snapshot
    #[arg(short, long)]
    pub graph: PathBuf,

    /// Also run the positive/negative control check
    #[arg(long)]
    pub integrity: bool,

    /// Also run the connectivity check, keeping configured thresholds
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the check-rows command.
#[derive(Debug, Parser)]
pub struct CheckRowsArgs {
    /// Clinical table (subject_id, birth_date, diagnosis_date, mmse_score)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Only print quarantined rows
    #[arg(short, long)]
    pub quarantined_only: bool,
}

/// Arguments for the csf command.
#[derive(Debug, Parser)]
pub struct CsfArgs {
    /// CSF table (RID, VISCODE, MATRIX, DX and the analyte column)
    #[arg(short, long)]
    pub input: PathBuf,
}

/// Arguments for the prune command.
#[derive(Debug, Parser)]
pub struct PruneArgs {
    /// Persisted graph snapshot
    #[arg(short, long)]
    pub graph: PathBuf,

    /// Query node id
    #[arg(short, long)]
    pub center: String,

    /// Maximum neighbours (default from config)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Strategy label (default from config)
    #[arg(short, long)]
    pub strategy: Option<String>,
}

/// Arguments for the rank command.
#[derive(Debug, Parser)]
pub struct RankArgs {
    /// Query text
    #[arg(short, long)]
    pub query: String,

    /// JSON array of dense hits in rank order ({"id"|"uri", "label", "score"})
    #[arg(short, long)]
    pub vector_results: PathBuf,

    /// Entity ids returned by the keyword index
    #[arg(short, long, num_args = 0.., value_delimiter = ',')]
    pub keyword_matches: Vec<String>,

    /// Maximum results shown
    #[arg(short, long)]
    pub limit: Option<usize>,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_command() {
        let cli = Cli::parse_from(["alzkb", "score", "-p", "1e-10", "-n", "25000"]);
        match cli.command {
            Command::Score(args) => {
                assert_eq!(args.p_value, Some(1e-10));
                assert_eq!(args.sample_size, 25_000);
                assert_eq!(args.modality, "GENOMIC_STUDY");
            }
            _ => panic!("Expected Score command"),
        }
    }

    #[test]
    fn test_genotype_positional() {
        let cli = Cli::parse_from(["alzkb", "genotype", "T/C", "C/C", "--quality-a", "80"]);
        match cli.command {
            Command::Genotype(args) => {
                assert_eq!(args.locus_a.as_deref(), Some("T/C"));
                assert_eq!(args.quality_a, 80.0);
                assert_eq!(args.quality_b, 99.0);
                assert!(args.file.is_none());
            }
            _ => panic!("Expected Genotype command"),
        }
    }

    #[test]
    fn test_genotype_file() {
        let cli = Cli::parse_from(["alzkb", "genotype", "--file", "calls.csv"]);
        assert!(matches!(cli.command, Command::Genotype(GenotypeArgs { file: Some(_), .. })));
    }

    #[test]
    fn test_genotype_requires_loci_or_file() {
        assert!(Cli::try_parse_from(["alzkb", "genotype"]).is_err());
    }

    #[test]
    fn test_rank_keyword_list() {
        let cli = Cli::parse_from([
            "alzkb", "rank", "-q", "APOE", "-v", "hits.json", "-k", "HGNC:613,HGNC:APOE",
        ]);
        match cli.command {
            Command::Rank(args) => assert_eq!(args.keyword_matches, vec!["HGNC:613", "HGNC:APOE"]),
            _ => panic!("Expected Rank command"),
        }
    }

    #[test]
    fn test_csf_command_and_curate_flag() {
        let cli = Cli::parse_from(["alzkb", "csf", "-i", "upenn.csv"]);
        assert!(matches!(cli.command, Command::Csf(_)));

        let cli = Cli::parse_from([
            "alzkb", "curate", "-i", "gwas.tsv", "-o", "graph.json", "--csf", "upenn.csv",
        ]);
        match cli.command {
            Command::Curate(args) => assert_eq!(args.csf, Some(PathBuf::from("upenn.csv"))),
            _ => panic!("Expected Curate command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from([
            "alzkb", "validate", "-g", "graph.json", "--format", "json", "--verbose", "--no-color",
        ]);
        assert!(cli.verbose);
        assert!(cli.no_color);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
    }
}
