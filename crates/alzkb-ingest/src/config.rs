//! Configuration for ingestion

use alzkb_domain::vocabulary::{ALZHEIMER_DISEASE_ID, DEFAULT_BATCH_SIZE, DEFAULT_TRAIT_ALLOWLIST};
use serde::{Deserialize, Serialize};

/// Configuration for parsing, sentinel selection and graph assembly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Trait ids (last URI segment) accepted by the selector
    pub trait_allowlist: Vec<String>,

    /// Node every accepted association points at
    pub disease_node_id: String,

    /// Rows per batch handed downstream
    pub batch_size: usize,
}

impl IngestConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.trait_allowlist.is_empty() {
            return Err("trait_allowlist must not be empty".to_string());
        }
        if self.trait_allowlist.iter().any(|t| t.trim().is_empty()) {
            return Err("trait_allowlist must not contain blank entries".to_string());
        }
        if self.disease_node_id.trim().is_empty() {
            return Err("disease_node_id must not be empty".to_string());
        }
        if self.batch_size == 0 {
            return Err("batch_size must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Whether a trait id is on the allowlist
    pub fn allows(&self, trait_id: &str) -> bool {
        self.trait_allowlist.iter().any(|t| t == trait_id)
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

impl Default for IngestConfig {
    /// Alzheimer disease and its close phenotypes
    fn default() -> Self {
        Self {
            trait_allowlist: DEFAULT_TRAIT_ALLOWLIST.iter().map(|s| s.to_string()).collect(),
            disease_node_id: ALZHEIMER_DISEASE_ID.to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = IngestConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.allows("EFO_0000249"));
        assert!(!config.allows("EFO_0001360"));
    }

    #[test]
    fn test_empty_allowlist_is_invalid() {
        let config = IngestConfig {
            trait_allowlist: vec![],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_batch_size_is_invalid() {
        let config = IngestConfig {
            batch_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = IngestConfig::default();
        let toml_str = config.to_toml().unwrap();
        let parsed = IngestConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let parsed = IngestConfig::from_toml("batch_size = 10").unwrap();
        assert_eq!(parsed.batch_size, 10);
        assert_eq!(parsed.disease_node_id, ALZHEIMER_DISEASE_ID);
    }
}
