//! AlzKB Ingest
//!
//! Turns source tables into graph fragments.
//!
//! # Architecture
//!
//! ```text
//! association table → parser → sentinel selector → assembly → GraphSnapshot
//! genotype table    → parser → genotype resolver ↗
//! CSF table         → parser → classify → z-score → GraphSnapshot
//! ```
//!
//! Every stage is a batch transform over in-memory data. Noisy rows are
//! counted and dropped, never fatal.
//!
//! # Example Usage
//!
//! ```no_run
//! use alzkb_ingest::{assemble, read_associations, select, IngestConfig};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = IngestConfig::default();
//! let records = read_associations(Path::new("gwas_catalog.tsv"))?;
//! let selection = select(&records, &config.trait_allowlist);
//! let graph = assemble(&selection.sentinels, &config, Some(50_000));
//!
//! println!("{} nodes, {} edges", graph.node_count(), graph.edge_count());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod assembly;
mod batch;
mod config;
pub mod csf;
mod error;
mod parser;
mod sentinel;

pub use assembly::{add_association, assemble, association_edges, attach_genotype, DISEASE_LABEL};
pub use batch::BatchAccumulator;
pub use config::IngestConfig;
pub use csf::{ingest_csf, CnControlStats, ConcentrationUnit, CsfConfig, CsfIngestion};
pub use error::IngestError;
pub use parser::{
    detect_delimiter, parse_associations, parse_clinical_rows, parse_genotype_calls,
    parse_csf_rows, read_associations, read_clinical_rows, read_csf_rows, read_genotype_calls,
    CsfRow, GenotypeCall,
};
pub use sentinel::{select, SentinelSelection};
