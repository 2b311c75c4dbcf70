//! AlzKB Storage Layer
//!
//! Atomic persistence for [`GraphSnapshot`]s.
//!
//! # Architecture
//!
//! - One JSON document per snapshot: graph attributes (including
//!   `export_timestamp` and `schema_version`), nodes and edges
//! - Composite attributes are stored as JSON text (see [`encoding`])
//! - Writes go to a temp file in the destination directory which is then
//!   renamed over the destination; a failed write leaves the destination
//!   untouched and removes the temp file
//!
//! The caller must serialize writers to the same path.
//!
//! # Examples
//!
//! ```no_run
//! use alzkb_store::FileGraphStore;
//! use alzkb_domain::traits::GraphStore;
//! use alzkb_domain::GraphSnapshot;
//!
//! let store = FileGraphStore::new("data/alzkb_graph.json");
//! store.persist(&GraphSnapshot::new()).unwrap();
//! let graph = store.load().unwrap();
//! ```

#![warn(missing_docs)]

pub mod encoding;

use alzkb_domain::traits::GraphStore;
use alzkb_domain::vocabulary::SCHEMA_VERSION;
use alzkb_domain::{Edge, GraphSnapshot, Node, PropertyValue};
use encoding::{decode_properties, encode_node_properties, encode_properties};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Graph attribute holding the export time (RFC 3339)
pub const EXPORT_TIMESTAMP_KEY: &str = "export_timestamp";

/// Graph attribute holding the schema version
pub const SCHEMA_VERSION_KEY: &str = "schema_version";

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Snapshot file does not exist
    #[error("Graph file not found at {0}")]
    NotFound(String),

    /// Snapshot file exists but is not a valid snapshot
    #[error("Corrupt graph file: {0}")]
    Corrupt(String),

    /// Atomic write failed; the destination was left untouched
    #[error("Atomic export failed: {0}")]
    Persist(String),

    /// I/O error while reading
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(String),
}

#[derive(Debug, Serialize, Deserialize)]
struct NodeDocument {
    id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    #[serde(default)]
    properties: BTreeMap<String, Value>,
}

#[derive(Debug, Serialize, Deserialize)]
struct EdgeDocument {
    subject: String,
    object: String,
    predicate: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source: Option<String>,
    #[serde(default)]
    properties: BTreeMap<String, Value>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GraphDocument {
    #[serde(default)]
    graph: BTreeMap<String, Value>,
    nodes: Vec<NodeDocument>,
    edges: Vec<EdgeDocument>,
}

impl GraphDocument {
    fn from_graph(graph: &GraphSnapshot) -> Self {
        let mut attributes = graph.attributes.clone();
        attributes.insert(
            EXPORT_TIMESTAMP_KEY.to_string(),
            PropertyValue::from(chrono::Utc::now().to_rfc3339()),
        );
        attributes.insert(SCHEMA_VERSION_KEY.to_string(), PropertyValue::from(SCHEMA_VERSION));

        Self {
            graph: encode_properties(&attributes),
            nodes: graph
                .nodes()
                .iter()
                .map(|n| NodeDocument {
                    id: n.id.clone(),
                    category: n.category.clone(),
                    properties: encode_node_properties(&n.properties),
                })
                .collect(),
            edges: graph
                .edges()
                .iter()
                .map(|e| EdgeDocument {
                    subject: e.subject.clone(),
                    object: e.object.clone(),
                    predicate: e.predicate.clone(),
                    source: e.source.clone(),
                    properties: encode_properties(&e.properties),
                })
                .collect(),
        }
    }

    fn into_graph(self) -> GraphSnapshot {
        let mut graph = GraphSnapshot::new();
        graph.attributes = decode_properties(&self.graph);

        for node in self.nodes {
            graph.add_node(Node {
                properties: decode_properties(&node.properties),
                id: node.id,
                category: node.category,
            });
        }
        for edge in self.edges {
            graph.add_edge(Edge {
                properties: decode_properties(&edge.properties),
                subject: edge.subject,
                object: edge.object,
                predicate: edge.predicate,
                source: edge.source,
            });
        }
        graph
    }
}

/// Persist a graph to `path` atomically
///
/// The destination directory is created if missing. The snapshot is written
/// to a temp file next to the destination, flushed to disk, then renamed
/// into place.
pub fn persist_graph(graph: &GraphSnapshot, path: &Path) -> Result<(), StoreError> {
    tracing::info!(
        path = %path.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "Initiating atomic export"
    );

    let bytes = serde_json::to_vec_pretty(&GraphDocument::from_graph(graph))
        .map_err(|e| StoreError::Serialization(e.to_string()))?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir).map_err(|e| {
        StoreError::Persist(format!("Could not create directory '{}': {}", dir.display(), e))
    })?;

    // Dropping the temp file on any early return removes it.
    let mut tmp = tempfile::Builder::new()
        .suffix(".tmp")
        .tempfile_in(&dir)
        .map_err(|e| StoreError::Persist(format!("Could not create temp file: {}", e)))?;

    tmp.write_all(&bytes)
        .and_then(|_| tmp.flush())
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| StoreError::Persist(format!("Could not write snapshot: {}", e)))?;

    tmp.persist(path).map_err(|e| {
        StoreError::Persist(format!("Could not replace '{}': {}", path.display(), e.error))
    })?;

    tracing::info!(path = %path.display(), "Graph persisted");
    Ok(())
}

/// Load a graph persisted by [`persist_graph`]
///
/// Missing files are [`StoreError::NotFound`]; unreadable documents are
/// [`StoreError::Corrupt`].
pub fn load_graph(path: &Path) -> Result<GraphSnapshot, StoreError> {
    if !path.exists() {
        return Err(StoreError::NotFound(path.display().to_string()));
    }

    let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::InvalidData => StoreError::Corrupt(e.to_string()),
        _ => StoreError::Io(e),
    })?;
    let document: GraphDocument =
        serde_json::from_str(&text).map_err(|e| StoreError::Corrupt(e.to_string()))?;
    let graph = document.into_graph();

    tracing::debug!(
        path = %path.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "Graph loaded"
    );
    Ok(graph)
}

/// File-backed implementation of [`GraphStore`]
#[derive(Debug, Clone)]
pub struct FileGraphStore {
    path: PathBuf,
}

impl FileGraphStore {
    /// Create a store bound to one snapshot path
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Snapshot path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl GraphStore for FileGraphStore {
    type Error = StoreError;

    fn persist(&self, graph: &GraphSnapshot) -> Result<(), Self::Error> {
        persist_graph(graph, &self.path)
    }

    fn load(&self) -> Result<GraphSnapshot, Self::Error> {
        load_graph(&self.path)
    }
}
