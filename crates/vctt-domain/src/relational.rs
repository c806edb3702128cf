//! Concepts and relationships produced by the relational agent
//!
//! Relationships are directed and not deduplicated: several relationships
//! between the same ordered pair are allowed, and conflicting types between
//! them are exactly what contradiction analysis looks for.

use crate::score::clamp_unit;
use serde::{Deserialize, Serialize};

fn default_category() -> String {
    "concept".to_string()
}

/// An extracted concept (graph node)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Concept {
    /// Identifier, unique within a run
    #[serde(default)]
    pub id: String,

    /// Display name
    #[serde(default)]
    pub name: String,

    /// Category tag
    #[serde(rename = "type", alias = "category", default = "default_category")]
    pub category: String,

    /// Importance in [0, 1]
    #[serde(default)]
    pub importance: f64,
}

impl Concept {
    /// Create a concept in the default category
    pub fn new(id: impl Into<String>, name: impl Into<String>, importance: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: default_category(),
            importance: clamp_unit(importance),
        }
    }

    /// Set the category tag
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }
}

/// A directed relationship between two concepts (graph edge)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    /// Source concept id
    #[serde(default)]
    pub source: String,

    /// Target concept id
    #[serde(default)]
    pub target: String,

    /// Relationship type tag
    #[serde(rename = "type", default)]
    pub kind: String,

    /// Free-text description
    #[serde(default)]
    pub description: String,

    /// Optional strength in [0, 1]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strength: Option<f64>,
}

impl Relationship {
    /// Create a relationship without description or strength
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            kind: kind.into(),
            description: String::new(),
            strength: None,
        }
    }

    /// Attach a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Attach a strength, clamped to [0, 1]
    pub fn with_strength(mut self, strength: f64) -> Self {
        self.strength = Some(clamp_unit(strength));
        self
    }
}

/// A candidate relationship between concepts with no explicit edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImplicitRelationship {
    /// Source concept id
    pub source: String,

    /// Target concept id
    pub target: String,

    /// Always "implicit"
    #[serde(rename = "type")]
    pub kind: String,

    /// Confidence in [0, 1]
    pub confidence: f64,

    /// Free-text description
    pub description: String,
}

/// Size and density of the extracted graph
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphMetrics {
    /// Number of concepts
    pub node_count: usize,

    /// Number of explicit relationships
    pub edge_count: usize,

    /// Edges over the undirected maximum `n(n-1)/2`
    pub density: f64,
}

impl GraphMetrics {
    /// Compute metrics from node and edge counts
    ///
    /// Density is 0.0 below two nodes. It is not clamped: multi-edges can push
    /// it past 1.0, which is itself a signal for the trust aggregator.
    pub fn from_counts(node_count: usize, edge_count: usize) -> Self {
        let density = if node_count < 2 {
            0.0
        } else {
            let max_edges = (node_count * (node_count - 1)) as f64 / 2.0;
            edge_count as f64 / max_edges
        };

        Self {
            node_count,
            edge_count,
            density,
        }
    }
}

/// Full relational record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelationalResult {
    /// Extracted concepts
    pub concepts: Vec<Concept>,

    /// Explicit relationships
    pub relationships: Vec<Relationship>,

    /// Candidate implicit relationships
    pub implicit_relationships: Vec<ImplicitRelationship>,

    /// Graph metrics
    pub graph_metrics: GraphMetrics,
}
