//! AlzKB Domain Layer
//!
//! This crate contains the core curation logic and domain model for AlzKB.
//! It has ZERO external dependencies and defines the fundamental concepts,
//! scoring rules, and trait interfaces that all other layers depend upon.
//!
//! ## Key Concepts
//!
//! - **Evidence record**: one statistical or clinical claim with a modality
//! - **Confidence result**: significance and power normalized into one score
//! - **Genotype classification**: canonical APOE diplotype from two loci
//! - **Association record**: one variant-trait row from a GWAS table
//! - **Graph snapshot**: the attributed knowledge graph handed between stages
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture:
//! - No external crate dependencies
//! - Pure functions only (no I/O, no logging)
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod association;
pub mod confidence_computation;
pub mod evidence;
pub mod genotype;
pub mod graph;
pub mod identifier;
pub mod modality;
pub mod traits;
pub mod vocabulary;

// Re-exports for convenience
pub use association::AssociationRecord;
pub use confidence_computation::score;
pub use evidence::{ClinicalRow, ConfidenceResult, EvidenceRecord};
pub use genotype::{resolve, AllelePair, Diplotype, GenotypeClassification, GenotypeOutcome, RiskCategory};
pub use graph::{Edge, GraphSnapshot, Node, Properties, PropertyValue};
pub use modality::Modality;

/// Round a value to a fixed number of decimal places.
///
/// Scores are rounded so downstream comparisons are deterministic.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
