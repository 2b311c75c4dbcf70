//! Configuration management for the CLI.
//!
//! One TOML file carries a section per component:
//!
//! ```toml
//! [ingest]
//! batch_size = 5000
//!
//! [csf]
//! source_unit = "ng/L"
//!
//! [validation]
//! check_connectivity = true
//!
//! [retrieval]
//! prune_limit = 50
//!
//! [output]
//! format = "json"
//! ```
//!
//! Missing sections and keys fall back to the component defaults.

use crate::error::{CliError, Result};
use alzkb_gatekeeper::{IntegrityConfig, ValidationConfig};
use alzkb_ingest::{CsfConfig, IngestConfig};
use alzkb_retrieval::RetrievalConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Table parsing and graph assembly
    #[serde(default)]
    pub ingest: IngestConfig,

    /// CSF biomarker ingestion
    #[serde(default)]
    pub csf: CsfConfig,

    /// Release gate
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Positive/negative control check
    #[serde(default)]
    pub integrity: IntegrityConfig,

    /// Pruning and ranking
    #[serde(default)]
    pub retrieval: RetrievalConfig,

    /// Terminal output
    #[serde(default)]
    pub output: Settings,
}

/// Output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
}

impl Config {
    /// Get the default configuration file path (`~/.alzkb/config.toml`).
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".alzkb").join("config.toml"))
    }

    /// Load configuration from `path`, or the default path when `None`.
    ///
    /// A missing file yields the defaults. Every section is validated.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::path()?,
        };

        let config = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&contents)?;
            tracing::debug!(path = %path.display(), "Loaded configuration");
            config
        } else {
            Self::default()
        };

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("ingest", self.ingest.validate()),
            ("csf", self.csf.validate()),
            ("validation", self.validation.validate()),
            ("integrity", self.integrity.validate()),
            ("retrieval", self.retrieval.validate()),
        ];
        for (section, result) in checks {
            result.map_err(|e| CliError::Config(format!("[{}] {}", section, e)))?;
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}
