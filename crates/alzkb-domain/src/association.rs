//! Variant-trait association rows

use crate::identifier::{curie, trait_id_from_uri};

/// One row of a GWAS association table
///
/// Optional fields stay `None` when the source cell was empty or could not be
/// read; the sentinel selector decides what to do with them.
#[derive(Debug, Clone, PartialEq)]
pub struct AssociationRecord {
    /// 1-based data row in the source file
    pub row: usize,

    /// Variant identifier, usually an rsID
    pub variant_id: String,

    /// Ontology URI of the mapped trait
    pub trait_uri: Option<String>,

    /// Mapped gene symbol
    pub gene_symbol: Option<String>,

    /// Chromosome label
    pub chromosome: Option<String>,

    /// Reported p-value
    pub p_value: Option<f64>,

    /// Odds ratio or beta
    pub effect_size: Option<f64>,

    /// Strongest risk allele, e.g. `rs429358-C`
    pub risk_allele: Option<String>,

    /// PubMed identifier of the reporting study
    pub pubmed_id: Option<String>,
}

impl AssociationRecord {
    /// Create a record with only the variant filled in
    pub fn new(row: usize, variant_id: impl Into<String>) -> Self {
        Self {
            row,
            variant_id: variant_id.into(),
            trait_uri: None,
            gene_symbol: None,
            chromosome: None,
            p_value: None,
            effect_size: None,
            risk_allele: None,
            pubmed_id: None,
        }
    }

    /// Short trait id taken from the last segment of the trait URI
    pub fn trait_id(&self) -> Option<&str> {
        self.trait_uri.as_deref().map(trait_id_from_uri)
    }

    /// Locus grouping key: (gene, chromosome), either part may be absent
    pub fn group_key(&self) -> (Option<String>, Option<String>) {
        (self.gene_symbol.clone(), self.chromosome.clone())
    }

    /// Whether a usable numeric p-value is present
    pub fn has_numeric_p_value(&self) -> bool {
        self.p_value.is_some_and(|p| !p.is_nan())
    }

    /// Graph id of the variant node
    pub fn variant_node_id(&self) -> String {
        curie("dbSNP", &self.variant_id)
    }

    /// Graph id of the gene node, when a gene is mapped
    pub fn gene_node_id(&self) -> Option<String> {
        self.gene_symbol.as_deref().map(|g| curie("HGNC", g))
    }
}
