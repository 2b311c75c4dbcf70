//! Fixed vocabulary: predicates, categories, sources and reference ids

/// Graph schema version written into persisted snapshots
pub const SCHEMA_VERSION: &str = "1.0";

/// Variant to disease predicate
pub const PREDICATE_VARIANT_DISEASE: &str = "biolink:condition_associated_with_sequence_variant";

/// Variant to gene predicate
pub const PREDICATE_VARIANT_GENE: &str = "biolink:is_sequence_variant_of";

/// Sample to genotype predicate
pub const PREDICATE_HAS_GENOTYPE: &str = "biolink:has_genotype";

/// Subject to biomarker observation predicate
pub const PREDICATE_HAS_OBSERVATION: &str = "alzkb:has_observation";

/// Observation to visit predicate
pub const PREDICATE_AT_VISIT: &str = "alzkb:occurred_at_visit";

/// Observation to measured analyte predicate
pub const PREDICATE_MEASUREMENT_OF: &str = "alzkb:is_measurement_of";

/// Category of variant nodes
pub const CATEGORY_VARIANT: &str = "biolink:SequenceVariant";

/// Category of gene nodes
pub const CATEGORY_GENE: &str = "biolink:Gene";

/// Category of disease nodes
pub const CATEGORY_DISEASE: &str = "biolink:Disease";

/// Category of genotype nodes
pub const CATEGORY_GENOTYPE: &str = "biolink:Genotype";

/// Category of sample nodes
pub const CATEGORY_SAMPLE: &str = "biolink:MaterialSample";

/// Category of study subject nodes
pub const CATEGORY_SUBJECT: &str = "biolink:Case";

/// Category of study visit nodes
pub const CATEGORY_VISIT: &str = "biolink:ClinicalEntity";

/// Category of biomarker observation nodes
pub const CATEGORY_MEASUREMENT: &str = "biolink:ClinicalMeasurement";

/// Category of measured analyte nodes
pub const CATEGORY_CHEMICAL: &str = "biolink:ChemicalEntity";

/// Source tag for association edges
pub const SOURCE_GWAS_CATALOG: &str = "GWAS_Catalog";

/// Source tag for variant-gene mapping edges
pub const SOURCE_GENE_MAPPING: &str = "Entrez/Ensembl_Mapping";

/// Source tag for genotype edges
pub const SOURCE_GENOTYPE_CALL: &str = "APOE_Genotype_Resolver";

/// Source tag for CSF biomarker edges
pub const SOURCE_ADNI_CSF: &str = "ADNI_CSF";

/// Node id of amyloid beta 42
pub const AMYLOID_BETA_42_ID: &str = "CHEBI:80696";

/// Reference cohort tag written next to CSF z-scores
pub const CN_CONTROL_COHORT: &str = "ADNI_CN_Control_Baseline";

/// Node id of Alzheimer disease
pub const ALZHEIMER_DISEASE_ID: &str = "MONDO:0004975";

/// Traits accepted as Alzheimer disease or a close phenotype
pub const DEFAULT_TRAIT_ALLOWLIST: [&str; 5] = [
    "EFO_0000249",
    "MONDO_0004975",
    "EFO_0000732",
    "EFO_0000253",
    "HP_0002511",
];

/// Namespaces whose local part is a gene symbol
pub const GENE_ID_PREFIXES: [&str; 1] = ["HGNC"];

/// Aliases of the gold-standard gene (APOE)
pub const GOLD_STANDARD_ALIASES: [&str; 2] = ["HGNC:613", "APOE"];

/// Aliases of the negative-control gene (BRCA1)
pub const NEGATIVE_CONTROL_ALIASES: [&str; 2] = ["HGNC:1100", "BRCA1"];

/// The positive control must reach at least this significance
pub const POSITIVE_CONTROL_P_THRESHOLD: f64 = 1e-40;

/// The negative control must not reach this significance
pub const NEGATIVE_CONTROL_P_THRESHOLD: f64 = 5e-8;

/// Rows handed downstream per batch
pub const DEFAULT_BATCH_SIZE: usize = 5_000;

/// Edges sampled by the schema check
pub const DEFAULT_SCHEMA_SAMPLE_SIZE: usize = 100;

/// Minimum share of nodes in the largest component
pub const DEFAULT_CONNECTIVITY_THRESHOLD: f64 = 0.5;
