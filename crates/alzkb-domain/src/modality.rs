//! Evidence modality - the category of measurement behind a claim

use std::fmt;

/// Category of measurement that produced a piece of evidence
///
/// The modality decides which sample size counts as "full power":
/// - GenomicStudy: meta-analysis scale GWAS
/// - ClinicalObservation: observational cohorts, cognitive scores
/// - MolecularAssay: CSF, PET and fluid biomarkers (invasive, small N)
///
/// Unknown labels are kept as `Other` rather than rejected so that schema
/// drift upstream never stops a curation run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Modality {
    /// Large scale genomic studies
    GenomicStudy,

    /// Cognitive scores and observational cohorts
    ClinicalObservation,

    /// CSF, PET and fluid biomarkers
    MolecularAssay,

    /// Unrecognized modality label (falls back to the generic baseline)
    Other(String),
}

/// Sample size treated as full power for genomic studies
pub const GENOMIC_STUDY_BASELINE: u64 = 50_000;

/// Sample size treated as full power for clinical observations
pub const CLINICAL_OBSERVATION_BASELINE: u64 = 2_000;

/// Sample size treated as full power for molecular assays
pub const MOLECULAR_ASSAY_BASELINE: u64 = 500;

/// Baseline used when the modality is not recognized
pub const FALLBACK_BASELINE: u64 = 10_000;

impl Modality {
    /// Get the modality name as a string
    pub fn as_str(&self) -> &str {
        match self {
            Modality::GenomicStudy => "GENOMIC_STUDY",
            Modality::ClinicalObservation => "CLINICAL_OBSERVATION",
            Modality::MolecularAssay => "MOLECULAR_ASSAY",
            Modality::Other(label) => label.as_str(),
        }
    }

    /// Parse a modality label leniently
    ///
    /// Accepts the canonical names plus the short source labels
    /// (`GWAS`, `CLINICAL`, `MOLECULAR`), case-insensitively.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "GENOMIC_STUDY" | "GENOMIC" | "GWAS" => Modality::GenomicStudy,
            "CLINICAL_OBSERVATION" | "CLINICAL" => Modality::ClinicalObservation,
            "MOLECULAR_ASSAY" | "MOLECULAR" => Modality::MolecularAssay,
            _ => Modality::Other(s.trim().to_string()),
        }
    }

    /// Sample size considered full statistical power for this modality
    pub fn baseline(&self) -> u64 {
        match self {
            Modality::GenomicStudy => GENOMIC_STUDY_BASELINE,
            Modality::ClinicalObservation => CLINICAL_OBSERVATION_BASELINE,
            Modality::MolecularAssay => MOLECULAR_ASSAY_BASELINE,
            Modality::Other(_) => FALLBACK_BASELINE,
        }
    }

    /// Whether this is one of the recognized modalities
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Modality::Other(_))
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Modality {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}
