//! Genotype resolution module
//!
//! Maps raw allele calls at the two APOE loci (rs429358 and rs7412) to one of
//! the six canonical diplotypes. Calls may arrive on either strand, with any
//! separator and in any allele order; all of that is normalized away before
//! the lookup.
//!
//! Resolution never fails: malformed input produces an `Indeterminate`
//! classification carrying the reason in its note.

use crate::{round_to, Properties, PropertyValue};
use std::fmt;

/// Default genotype quality when the caller has none (VCF GQ scale 0-99)
pub const DEFAULT_GENOTYPE_QUALITY: f64 = 99.0;

/// Confidence assigned to valid but unmapped combinations.
///
/// Fixed policy value, not derived from the input qualities.
pub const RARE_VARIANT_CONFIDENCE: f64 = 0.5;

/// Penalty for the double heterozygote, which is ambiguous without phasing
pub const PHASING_PENALTY: f64 = 0.05;

/// Decimal places kept on genotype confidence
pub const GENOTYPE_CONFIDENCE_DECIMALS: i32 = 3;

/// A canonical base on the reporting strand
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Base {
    /// Cytosine
    C,
    /// Thymine
    T,
}

impl Base {
    fn as_char(self) -> char {
        match self {
            Base::C => 'C',
            Base::T => 'T',
        }
    }
}

/// Why a raw allele string could not be normalized
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlleleError {
    /// Nothing to parse
    Empty,

    /// Not exactly two alleles
    Ploidy {
        /// Raw input
        raw: String,
        /// Number of alleles found
        found: usize,
    },

    /// Bases outside {C, T} after strand correction
    NonCanonical {
        /// Raw input
        raw: String,
    },
}

impl fmt::Display for AlleleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlleleError::Empty => write!(f, "Empty allele string"),
            AlleleError::Ploidy { raw, found } => {
                write!(f, "Ploidy error: expected 2 alleles, got {} in '{}'", found, raw)
            }
            AlleleError::NonCanonical { raw } => {
                write!(f, "Non-canonical bases detected in '{}'", raw)
            }
        }
    }
}

impl std::error::Error for AlleleError {}

/// Two alleles at one locus, strand-corrected and sorted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AllelePair {
    first: Base,
    second: Base,
}

impl AllelePair {
    /// Create a pair; order of the arguments does not matter
    pub fn new(a: Base, b: Base) -> Self {
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    /// Parse a raw call such as `"T/C"`, `"a|g"` or `"C:C"`
    ///
    /// APOE is reported on the strand carrying C/T. Any A or G in the call
    /// means the other strand was reported, so the whole call is
    /// complemented before validation.
    pub fn parse(raw: &str) -> Result<Self, AlleleError> {
        let clean = raw.trim().replace(['|', ':'], "/").to_uppercase();
        if clean.is_empty() {
            return Err(AlleleError::Empty);
        }

        let parts: Vec<&str> = clean.split('/').map(str::trim).collect();
        if parts.len() != 2 {
            return Err(AlleleError::Ploidy {
                raw: raw.to_string(),
                found: parts.len(),
            });
        }

        let flip = parts.iter().any(|p| p.contains(['A', 'G']));

        let mut bases = [Base::C; 2];
        for (slot, part) in bases.iter_mut().zip(&parts) {
            let mut chars = part.chars().map(|c| if flip { complement(c) } else { c });
            *slot = match (chars.next(), chars.next()) {
                (Some('C'), None) => Base::C,
                (Some('T'), None) => Base::T,
                _ => {
                    return Err(AlleleError::NonCanonical {
                        raw: raw.to_string(),
                    })
                }
            };
        }

        Ok(Self::new(bases[0], bases[1]))
    }

    /// Whether both alleles are the same base
    pub fn is_homozygous(&self) -> bool {
        self.first == self.second
    }
}

impl fmt::Display for AllelePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.first.as_char(), self.second.as_char())
    }
}

fn complement(base: char) -> char {
    match base {
        'A' => 'T',
        'T' => 'A',
        'C' => 'G',
        'G' => 'C',
        other => other,
    }
}

/// Risk category attached to a genotype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskCategory {
    /// e2/e2
    Protective,
    /// e2/e3
    NeutralProtective,
    /// e3/e3 (population reference)
    Neutral,
    /// e2/e4
    Intermediate,
    /// e3/e4
    High,
    /// e4/e4
    VeryHigh,
    /// Rare or indeterminate genotypes
    Unknown,
}

impl RiskCategory {
    /// Graph identifier for this category
    pub fn as_uri(&self) -> &'static str {
        match self {
            RiskCategory::Protective => "alzkb:Risk_Protective",
            RiskCategory::NeutralProtective => "alzkb:Risk_NeutralProtective",
            RiskCategory::Neutral => "alzkb:Risk_Neutral",
            RiskCategory::Intermediate => "alzkb:Risk_Intermediate",
            RiskCategory::High => "alzkb:Risk_High",
            RiskCategory::VeryHigh => "alzkb:Risk_VeryHigh",
            RiskCategory::Unknown => "alzkb:Risk_Unknown",
        }
    }
}

/// The six canonical APOE diplotypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Diplotype {
    /// e2/e2
    E2E2,
    /// e2/e3
    E2E3,
    /// e3/e3
    E3E3,
    /// e2/e4 (double heterozygote)
    E2E4,
    /// e3/e4
    E3E4,
    /// e4/e4
    E4E4,
}

impl Diplotype {
    /// Look up the diplotype for normalized calls at (rs429358, rs7412)
    pub fn from_loci(rs429358: AllelePair, rs7412: AllelePair) -> Option<Self> {
        use Base::{C, T};

        let key = (
            (rs429358.first, rs429358.second),
            (rs7412.first, rs7412.second),
        );
        match key {
            ((T, T), (T, T)) => Some(Diplotype::E2E2),
            ((T, T), (C, T)) => Some(Diplotype::E2E3),
            ((T, T), (C, C)) => Some(Diplotype::E3E3),
            ((C, T), (C, T)) => Some(Diplotype::E2E4),
            ((C, T), (C, C)) => Some(Diplotype::E3E4),
            ((C, C), (C, C)) => Some(Diplotype::E4E4),
            _ => None,
        }
    }

    /// Canonical graph identifier
    pub fn canonical_id(&self) -> &'static str {
        match self {
            Diplotype::E2E2 => "alzkb:APOE_e2e2",
            Diplotype::E2E3 => "alzkb:APOE_e2e3",
            Diplotype::E3E3 => "alzkb:APOE_e3e3",
            Diplotype::E2E4 => "alzkb:APOE_e2e4",
            Diplotype::E3E4 => "alzkb:APOE_e3e4",
            Diplotype::E4E4 => "alzkb:APOE_e4e4",
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            Diplotype::E2E2 => "e2/e2",
            Diplotype::E2E3 => "e2/e3",
            Diplotype::E3E3 => "e3/e3",
            Diplotype::E2E4 => "e2/e4",
            Diplotype::E3E4 => "e3/e4",
            Diplotype::E4E4 => "e4/e4",
        }
    }

    /// Associated risk category
    pub fn risk(&self) -> RiskCategory {
        match self {
            Diplotype::E2E2 => RiskCategory::Protective,
            Diplotype::E2E3 => RiskCategory::NeutralProtective,
            Diplotype::E3E3 => RiskCategory::Neutral,
            Diplotype::E2E4 => RiskCategory::Intermediate,
            Diplotype::E3E4 => RiskCategory::High,
            Diplotype::E4E4 => RiskCategory::VeryHigh,
        }
    }

    /// Whether the call cannot be told apart from e1/e3 without phasing
    pub fn is_phase_ambiguous(&self) -> bool {
        matches!(self, Diplotype::E2E4)
    }
}

/// Which of the seven outcomes a classification represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenotypeOutcome {
    /// One of the six known diplotypes
    Mapped(Diplotype),
    /// Valid alleles, unmapped combination
    RareVariant,
    /// Malformed input
    Indeterminate,
}

/// Result of resolving one genotype call
#[derive(Debug, Clone, PartialEq)]
pub struct GenotypeClassification {
    /// Which outcome this is
    pub outcome: GenotypeOutcome,

    /// Canonical graph identifier
    pub canonical_id: String,

    /// Human readable label
    pub display_label: String,

    /// Risk category
    pub risk_category: RiskCategory,

    /// Quality-weighted confidence [0.0, 1.0]
    pub confidence: f64,

    /// Free-text rationale
    pub note: String,
}

impl GenotypeClassification {
    fn indeterminate(error: &AlleleError) -> Self {
        Self {
            outcome: GenotypeOutcome::Indeterminate,
            canonical_id: "alzkb:Genotype_Indeterminate".to_string(),
            display_label: "Indeterminate".to_string(),
            risk_category: RiskCategory::Unknown,
            confidence: 0.0,
            note: error.to_string(),
        }
    }

    fn rare_variant(rs429358: AllelePair, rs7412: AllelePair) -> Self {
        Self {
            outcome: GenotypeOutcome::RareVariant,
            canonical_id: "alzkb:APOE_RareVariant".to_string(),
            display_label: "Rare/Unknown Combination".to_string(),
            risk_category: RiskCategory::Unknown,
            confidence: RARE_VARIANT_CONFIDENCE,
            note: format!(
                "Valid alleles rs429358 {} + rs7412 {} do not map to a standard isoform",
                rs429358, rs7412
            ),
        }
    }

    /// Whether the input resolved to one of the six known diplotypes
    pub fn is_mapped(&self) -> bool {
        matches!(self.outcome, GenotypeOutcome::Mapped(_))
    }

    /// Node attributes for attaching this call to the graph
    pub fn to_properties(&self) -> Properties {
        let mut props = Properties::new();
        props.insert("name".into(), PropertyValue::from(self.display_label.as_str()));
        props.insert("risk_category".into(), PropertyValue::from(self.risk_category.as_uri()));
        props.insert("confidence".into(), PropertyValue::Float(self.confidence));
        props.insert("provenance".into(), PropertyValue::from(self.note.as_str()));
        props
    }
}

/// Resolve raw calls at rs429358 (locus A) and rs7412 (locus B)
///
/// # Arguments
/// * `locus_a_raw` - Raw rs429358 call, e.g. `"T/C"`
/// * `locus_b_raw` - Raw rs7412 call, e.g. `"C/C"`
/// * `quality_a`, `quality_b` - Genotype qualities on the 0-99 scale
pub fn resolve(
    locus_a_raw: &str,
    locus_b_raw: &str,
    quality_a: f64,
    quality_b: f64,
) -> GenotypeClassification {
    let pairs = AllelePair::parse(locus_a_raw)
        .and_then(|a| AllelePair::parse(locus_b_raw).map(|b| (a, b)));

    let (rs429358, rs7412) = match pairs {
        Ok(pairs) => pairs,
        Err(e) => return GenotypeClassification::indeterminate(&e),
    };

    let Some(diplotype) = Diplotype::from_loci(rs429358, rs7412) else {
        return GenotypeClassification::rare_variant(rs429358, rs7412);
    };

    let base = quality_a.min(quality_b) / 100.0;
    let penalty = if diplotype.is_phase_ambiguous() {
        PHASING_PENALTY
    } else {
        0.0
    };
    let confidence = round_to((base - penalty).max(0.0), GENOTYPE_CONFIDENCE_DECIMALS);

    GenotypeClassification {
        outcome: GenotypeOutcome::Mapped(diplotype),
        canonical_id: diplotype.canonical_id().to_string(),
        display_label: diplotype.label().to_string(),
        risk_category: diplotype.risk(),
        confidence,
        note: format!(
            "Derived from rs429358(GQ:{}) + rs7412(GQ:{})",
            quality_a, quality_b
        ),
    }
}

/// Resolve with the default quality on both loci
pub fn resolve_default(locus_a_raw: &str, locus_b_raw: &str) -> GenotypeClassification {
    resolve(
        locus_a_raw,
        locus_b_raw,
        DEFAULT_GENOTYPE_QUALITY,
        DEFAULT_GENOTYPE_QUALITY,
    )
}
