//! AlzKB Gatekeeper
//!
//! Decides whether data may enter the knowledge graph.
//!
//! The Gatekeeper provides:
//! - A release gate run over a whole graph before it is persisted
//!   (connectivity, gold standard, schema compliance)
//! - A scientific integrity check with positive and negative controls
//! - Per-row clinical validation with quarantine verdicts
//!
//! # Examples
//!
//! ```no_run
//! use alzkb_gatekeeper::{Gatekeeper, ValidationConfig};
//! use alzkb_domain::GraphSnapshot;
//!
//! let gatekeeper = Gatekeeper::new(ValidationConfig::default());
//! let graph = GraphSnapshot::new();
//!
//! let verdict = gatekeeper.validate(&graph);
//! if !verdict.passed() {
//!     // do not persist
//! }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod integrity;
mod row;
mod validator;

pub use config::{IntegrityConfig, ValidationConfig};
pub use error::GatekeeperError;
pub use integrity::{check_integrity, IntegrityReport};
pub use row::{validate_row, RowVerdict};
pub use validator::{CheckKind, CheckOutcome, Gatekeeper, ValidationVerdict};
