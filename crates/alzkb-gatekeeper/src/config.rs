//! Gatekeeper configuration

use alzkb_domain::vocabulary::{
    ALZHEIMER_DISEASE_ID, DEFAULT_CONNECTIVITY_THRESHOLD, DEFAULT_SCHEMA_SAMPLE_SIZE,
    GOLD_STANDARD_ALIASES, NEGATIVE_CONTROL_ALIASES, NEGATIVE_CONTROL_P_THRESHOLD,
    POSITIVE_CONTROL_P_THRESHOLD,
};
use serde::{Deserialize, Serialize};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

/// Configuration for the release gate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Run the giant-component check
    ///
    /// Off by default: graphs built from GWAS snippets are disconnected
    /// until they are expanded, and would always fail.
    pub check_connectivity: bool,

    /// Minimum share of nodes in the largest weakly connected component
    pub connectivity_threshold: f64,

    /// Gene CURIEs or symbols that satisfy the gold-standard check
    pub gold_standard_aliases: Vec<String>,

    /// Edges sampled by the schema check
    pub schema_sample_size: usize,

    /// Fixed seed for edge sampling; random when unset
    pub sample_seed: Option<u64>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            check_connectivity: false,
            connectivity_threshold: DEFAULT_CONNECTIVITY_THRESHOLD,
            gold_standard_aliases: strings(&GOLD_STANDARD_ALIASES),
            schema_sample_size: DEFAULT_SCHEMA_SAMPLE_SIZE,
            sample_seed: None,
        }
    }
}

impl ValidationConfig {
    /// Create a permissive configuration (gold standard and a small schema sample)
    pub fn permissive() -> Self {
        Self {
            schema_sample_size: 10,
            ..Self::default()
        }
    }

    /// Create a strict configuration (connectivity on, large schema sample)
    pub fn strict() -> Self {
        Self {
            check_connectivity: true,
            schema_sample_size: 100_000,
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.connectivity_threshold) {
            return Err("connectivity_threshold must be between 0.0 and 1.0".to_string());
        }
        if self.gold_standard_aliases.iter().all(|a| a.trim().is_empty()) {
            return Err("gold_standard_aliases must name at least one identifier".to_string());
        }
        if self.schema_sample_size == 0 {
            return Err("schema_sample_size must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

/// Configuration for the positive/negative control check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrityConfig {
    /// Disease node the controls are measured against
    pub disease_node_id: String,

    /// Aliases of the gene that must carry a strong signal
    pub positive_control_aliases: Vec<String>,

    /// The positive control must reach p below this
    pub positive_control_threshold: f64,

    /// Fail instead of warn when the positive control is missing
    pub require_positive_control: bool,

    /// Aliases of the gene that must not be associated
    pub negative_control_aliases: Vec<String>,

    /// The negative control must not reach p below this
    pub negative_control_threshold: f64,
}

impl Default for IntegrityConfig {
    fn default() -> Self {
        Self {
            disease_node_id: ALZHEIMER_DISEASE_ID.to_string(),
            positive_control_aliases: strings(&GOLD_STANDARD_ALIASES),
            positive_control_threshold: POSITIVE_CONTROL_P_THRESHOLD,
            require_positive_control: false,
            negative_control_aliases: strings(&NEGATIVE_CONTROL_ALIASES),
            negative_control_threshold: NEGATIVE_CONTROL_P_THRESHOLD,
        }
    }
}

impl IntegrityConfig {
    /// Create a strict configuration (missing positive control is an error)
    pub fn strict() -> Self {
        Self {
            require_positive_control: true,
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.disease_node_id.trim().is_empty() {
            return Err("disease_node_id must not be empty".to_string());
        }
        for (name, value) in [
            ("positive_control_threshold", self.positive_control_threshold),
            ("negative_control_threshold", self.negative_control_threshold),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(format!("{} must be in (0.0, 1.0]", name));
            }
        }
        Ok(())
    }
}
