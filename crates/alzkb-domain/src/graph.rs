//! Attributed directed multigraph
//!
//! `GraphSnapshot` is the unit handed between pipeline stages: assembly
//! builds it, the gatekeeper inspects it, the store persists it and the
//! retrieval layer ranks its neighbourhoods.
//!
//! Nodes are kept in insertion order so every traversal is deterministic.

use std::collections::{BTreeMap, HashMap};

/// Attribute map for nodes, edges and the graph itself
pub type Properties = BTreeMap<String, PropertyValue>;

/// An attribute value
///
/// `List` and `Map` are the composite values; the persistence layer has to
/// encode them before writing.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// Explicit absence
    Null,
    /// Boolean flag
    Bool(bool),
    /// Integer value
    Integer(i64),
    /// Floating point value
    Float(f64),
    /// Text value
    Text(String),
    /// Ordered sequence
    List(Vec<PropertyValue>),
    /// Nested mapping
    Map(BTreeMap<String, PropertyValue>),
}

impl PropertyValue {
    /// Numeric view; integers widen to floats
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropertyValue::Float(v) => Some(*v),
            PropertyValue::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Text view
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Whether this is a list or map
    pub fn is_composite(&self) -> bool {
        matches!(self, PropertyValue::List(_) | PropertyValue::Map(_))
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Text(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Text(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Float(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        PropertyValue::Integer(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

impl<T: Into<PropertyValue>> From<Vec<T>> for PropertyValue {
    fn from(values: Vec<T>) -> Self {
        PropertyValue::List(values.into_iter().map(Into::into).collect())
    }
}

/// A graph node
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Unique identifier (CURIE)
    pub id: String,

    /// Biolink category, when known
    pub category: Option<String>,

    /// Free-form attributes
    pub properties: Properties,
}

impl Node {
    /// Create a bare node
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            category: None,
            properties: Properties::new(),
        }
    }

    /// Set the category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Add one attribute
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

/// A directed, attributed edge
///
/// Parallel edges between the same pair are allowed.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    /// Source node id
    pub subject: String,

    /// Target node id
    pub object: String,

    /// Biolink predicate
    pub predicate: String,

    /// Originating data source
    pub source: Option<String>,

    /// Free-form attributes
    pub properties: Properties,
}

impl Edge {
    /// Create an edge without attributes
    pub fn new(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            object: object.into(),
            predicate: predicate.into(),
            source: None,
            properties: Properties::new(),
        }
    }

    /// Set the data source
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Add one attribute
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Numeric `weight` attribute; 1.0 when absent or non-numeric
    pub fn weight(&self) -> f64 {
        self.properties
            .get("weight")
            .and_then(PropertyValue::as_f64)
            .unwrap_or(1.0)
    }
}

/// Directed multigraph with attributes on nodes, edges and the graph
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphSnapshot {
    /// Graph level attributes
    pub attributes: Properties,
    nodes: Vec<Node>,
    node_index: HashMap<String, usize>,
    edges: Vec<Edge>,
}

impl GraphSnapshot {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node, merging into an existing node with the same id
    ///
    /// Attributes of the incoming node overwrite existing keys; an existing
    /// category is kept unless the incoming node supplies one.
    pub fn add_node(&mut self, node: Node) {
        match self.node_index.get(&node.id) {
            Some(&idx) => {
                let existing = &mut self.nodes[idx];
                if node.category.is_some() {
                    existing.category = node.category;
                }
                existing.properties.extend(node.properties);
            }
            None => {
                self.node_index.insert(node.id.clone(), self.nodes.len());
                self.nodes.push(node);
            }
        }
    }

    /// Make sure a node with this id exists
    pub fn ensure_node(&mut self, id: &str) {
        if !self.node_index.contains_key(id) {
            self.add_node(Node::new(id));
        }
    }

    /// Append an edge, creating missing endpoints as bare nodes
    pub fn add_edge(&mut self, edge: Edge) {
        self.ensure_node(&edge.subject);
        self.ensure_node(&edge.object);
        self.edges.push(edge);
    }

    /// Fold another graph into this one
    ///
    /// Nodes merge as in [`GraphSnapshot::add_node`]; edges are appended.
    /// Graph attributes of `other` are dropped.
    pub fn merge(&mut self, other: GraphSnapshot) {
        for node in other.nodes {
            self.add_node(node);
        }
        for edge in other.edges {
            self.add_edge(edge);
        }
    }

    /// Look up a node
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.node_index.get(id).map(|&idx| &self.nodes[idx])
    }

    /// Look up a node mutably
    pub fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        match self.node_index.get(id) {
            Some(&idx) => self.nodes.get_mut(idx),
            None => None,
        }
    }

    /// Whether a node exists
    pub fn contains_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    /// All nodes in insertion order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All edges in insertion order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// In-degree plus out-degree, counting parallel edges
    pub fn degree(&self, id: &str) -> usize {
        self.edges
            .iter()
            .map(|e| usize::from(e.subject == id) + usize::from(e.object == id))
            .sum()
    }

    /// Strongest edge weight between two nodes, in either direction
    ///
    /// 0.0 when the nodes are not adjacent.
    pub fn edge_weight(&self, a: &str, b: &str) -> f64 {
        self.edges
            .iter()
            .filter(|e| (e.subject == a && e.object == b) || (e.subject == b && e.object == a))
            .map(Edge::weight)
            .fold(0.0, f64::max)
    }

    /// Degree of every node with at least one edge, in one pass
    pub fn degrees(&self) -> HashMap<&str, usize> {
        let mut degrees: HashMap<&str, usize> = HashMap::new();
        for edge in &self.edges {
            *degrees.entry(edge.subject.as_str()).or_default() += 1;
            *degrees.entry(edge.object.as_str()).or_default() += 1;
        }
        degrees
    }

    /// Strongest edge weight from `id` to each adjacent node, in one pass
    pub fn neighbour_weights(&self, id: &str) -> HashMap<&str, f64> {
        let mut weights: HashMap<&str, f64> = HashMap::new();
        for edge in &self.edges {
            let other = if edge.subject == id {
                edge.object.as_str()
            } else if edge.object == id {
                edge.subject.as_str()
            } else {
                continue;
            };
            let weight = weights.entry(other).or_insert(0.0);
            *weight = weight.max(edge.weight());
        }
        weights
    }

    /// Distinct nodes with an edge into `id`, in first-seen order
    pub fn predecessors(&self, id: &str) -> Vec<&str> {
        let mut seen = Vec::new();
        for edge in self.edges.iter().filter(|e| e.object == id) {
            if !seen.contains(&edge.subject.as_str()) {
                seen.push(edge.subject.as_str());
            }
        }
        seen
    }

    /// Distinct nodes `id` has an edge to, in first-seen order
    pub fn successors(&self, id: &str) -> Vec<&str> {
        let mut seen = Vec::new();
        for edge in self.edges.iter().filter(|e| e.subject == id) {
            if !seen.contains(&edge.object.as_str()) {
                seen.push(edge.object.as_str());
            }
        }
        seen
    }

    /// Size of the largest weakly connected component
    pub fn largest_component_size(&self) -> usize {
        if self.nodes.is_empty() {
            return 0;
        }

        let mut parent: Vec<usize> = (0..self.nodes.len()).collect();

        fn find(parent: &mut [usize], mut x: usize) -> usize {
            while parent[x] != x {
                parent[x] = parent[parent[x]];
                x = parent[x];
            }
            x
        }

        for edge in &self.edges {
            let (Some(&a), Some(&b)) = (
                self.node_index.get(&edge.subject),
                self.node_index.get(&edge.object),
            ) else {
                continue;
            };
            let (ra, rb) = (find(&mut parent, a), find(&mut parent, b));
            if ra != rb {
                parent[ra] = rb;
            }
        }

        let mut sizes: HashMap<usize, usize> = HashMap::new();
        for idx in 0..self.nodes.len() {
            let root = find(&mut parent, idx);
            *sizes.entry(root).or_insert(0) += 1;
        }
        sizes.into_values().max().unwrap_or(0)
    }
}
