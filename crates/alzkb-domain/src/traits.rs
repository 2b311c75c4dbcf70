//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::GraphSnapshot;

/// Trait for persisting and restoring a graph snapshot
///
/// Implemented by the infrastructure layer (alzkb-store)
pub trait GraphStore {
    /// Error type for store operations
    type Error;

    /// Write the snapshot; a reader must never observe a partial write
    fn persist(&self, graph: &GraphSnapshot) -> Result<(), Self::Error>;

    /// Read the last persisted snapshot
    fn load(&self) -> Result<GraphSnapshot, Self::Error>;
}

/// Trait for release gates run before a graph is persisted
///
/// Implemented by the application layer (alzkb-gatekeeper)
pub trait GraphGate {
    /// Error type describing why the gate refused the graph
    type Error;

    /// Accept or refuse the graph
    fn check(&self, graph: &GraphSnapshot) -> Result<(), Self::Error>;
}
