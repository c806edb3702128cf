//! Relational inference over the concept graph
//!
//! Builds a directed graph from the relational producer's concepts and
//! relationships, then derives:
//!
//! - transitive relationships (`A -> B -> C` without a direct `A -> C`)
//! - bounded breadth-first reasoning paths between leading concepts
//! - key concepts ranked by total degree
//!
//! The graph is rebuilt on every call; the engine itself is stateless.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::{debug, info};
use vctt_domain::{AnalysisResult, Concept, Relationship};

/// Maximum number of inferred relationships returned
pub const MAX_INFERRED: usize = 10;

/// Confidence assigned to every transitive inference
pub const TRANSITIVE_CONFIDENCE: f64 = 0.6;

/// Longest partial path the search will extend
pub const MAX_PATH_DEPTH: usize = 3;

/// Number of leading concepts used as path starts
pub const PATH_START_CONCEPTS: usize = 3;

/// Number of following concepts paired with each start
pub const PATH_PAIRS_PER_START: usize = 2;

/// Number of key concepts returned
pub const MAX_KEY_CONCEPTS: usize = 5;

const DEGREE_NORMALIZER: f64 = 5.0;

/// A relationship implied by a two-step chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferredRelationship {
    /// Chain start
    pub source: String,

    /// Chain end
    pub target: String,

    /// Always "transitive"
    #[serde(rename = "type")]
    pub kind: String,

    /// `[source, intermediate, target]`
    pub path: Vec<String>,

    /// Fixed confidence
    pub confidence: f64,
}

/// A path found between two leading concepts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasoningPath {
    /// Start concept name
    pub start: String,

    /// End concept name
    pub end: String,

    /// Concept ids along the path
    pub path: Vec<String>,

    /// Number of ids in the path
    pub length: usize,
}

/// A well-connected concept
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyConcept {
    /// Concept id
    pub id: String,

    /// Concept name
    pub name: String,

    /// In-degree plus out-degree
    pub degree: usize,

    /// `min(degree / 5, 1)`
    pub importance: f64,
}

/// Graph size summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStructure {
    /// Concept count
    pub nodes: usize,

    /// Explicit relationship count
    pub edges: usize,

    /// Inferred relationship count
    pub inferred_edges: usize,
}

/// Output of one inference call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InferenceResult {
    /// Transitive relationships, at most [`MAX_INFERRED`]
    pub inferred_relationships: Vec<InferredRelationship>,

    /// Paths between leading concepts
    pub reasoning_paths: Vec<ReasoningPath>,

    /// Most connected concepts, at most [`MAX_KEY_CONCEPTS`]
    pub key_concepts: Vec<KeyConcept>,

    /// Size summary
    pub graph_structure: GraphStructure,
}

/// Adjacency view over borrowed concepts and relationships
struct InferenceGraph<'a> {
    concepts: &'a [Concept],
    nodes: HashMap<&'a str, &'a Concept>,
    node_order: Vec<&'a str>,
    sources: Vec<&'a str>,
    forward: HashMap<&'a str, Vec<&'a Relationship>>,
    reverse: HashMap<&'a str, Vec<&'a Relationship>>,
}

impl<'a> InferenceGraph<'a> {
    fn build(concepts: &'a [Concept], relationships: &'a [Relationship]) -> Self {
        let mut nodes = HashMap::new();
        let mut node_order = Vec::new();
        for concept in concepts {
            // A repeated id keeps its first position and its latest record
            if nodes.insert(concept.id.as_str(), concept).is_none() {
                node_order.push(concept.id.as_str());
            }
        }

        let mut sources = Vec::new();
        let mut forward: HashMap<&str, Vec<&Relationship>> = HashMap::new();
        let mut reverse: HashMap<&str, Vec<&Relationship>> = HashMap::new();
        for rel in relationships {
            let outgoing = forward.entry(rel.source.as_str()).or_default();
            if outgoing.is_empty() {
                sources.push(rel.source.as_str());
            }
            outgoing.push(rel);
            reverse.entry(rel.target.as_str()).or_default().push(rel);
        }

        Self {
            concepts,
            nodes,
            node_order,
            sources,
            forward,
            reverse,
        }
    }

    fn outgoing(&self, node: &str) -> &[&'a Relationship] {
        self.forward.get(node).map(Vec::as_slice).unwrap_or_default()
    }

    fn incoming(&self, node: &str) -> &[&'a Relationship] {
        self.reverse.get(node).map(Vec::as_slice).unwrap_or_default()
    }

    fn transitive(&self) -> Vec<InferredRelationship> {
        let mut inferred = Vec::new();

        for &source in &self.sources {
            let direct = self.outgoing(source);
            for first in direct {
                let intermediate = first.target.as_str();
                for second in self.outgoing(intermediate) {
                    let target = second.target.as_str();
                    if target == source || direct.iter().any(|r| r.target == target) {
                        continue;
                    }

                    inferred.push(InferredRelationship {
                        source: source.to_string(),
                        target: target.to_string(),
                        kind: "transitive".to_string(),
                        path: vec![
                            source.to_string(),
                            intermediate.to_string(),
                            target.to_string(),
                        ],
                        confidence: TRANSITIVE_CONFIDENCE,
                    });
                    if inferred.len() == MAX_INFERRED {
                        return inferred;
                    }
                }
            }
        }

        inferred
    }

    /// Breadth-first search from `start` to `end`
    ///
    /// Partial paths longer than [`MAX_PATH_DEPTH`] are dropped, so a found
    /// path holds at most `MAX_PATH_DEPTH + 1` ids.
    fn find_path(&self, start: &'a str, end: &str) -> Option<Vec<&'a str>> {
        if start == end {
            return Some(vec![start]);
        }

        let mut visited: HashSet<&str> = HashSet::new();
        let mut queue: VecDeque<(&str, Vec<&str>)> = VecDeque::new();
        queue.push_back((start, vec![start]));

        while let Some((node, path)) = queue.pop_front() {
            if path.len() > MAX_PATH_DEPTH || !visited.insert(node) {
                continue;
            }

            for rel in self.outgoing(node) {
                let target = rel.target.as_str();
                if target == end {
                    let mut found = path.clone();
                    found.push(target);
                    return Some(found);
                }
                if !visited.contains(target) {
                    let mut next = path.clone();
                    next.push(target);
                    queue.push_back((target, next));
                }
            }
        }

        None
    }

    fn reasoning_paths(&self) -> Vec<ReasoningPath> {
        let mut paths = Vec::new();
        if self.concepts.len() < 2 {
            return paths;
        }

        for (i, start) in self.concepts.iter().take(PATH_START_CONCEPTS).enumerate() {
            for end in self.concepts.iter().skip(i + 1).take(PATH_PAIRS_PER_START) {
                if let Some(path) = self.find_path(start.id.as_str(), &end.id) {
                    paths.push(ReasoningPath {
                        start: start.name.clone(),
                        end: end.name.clone(),
                        length: path.len(),
                        path: path.into_iter().map(str::to_string).collect(),
                    });
                }
            }
        }

        paths
    }

    fn key_concepts(&self) -> Vec<KeyConcept> {
        let mut ranked: Vec<KeyConcept> = self
            .node_order
            .iter()
            .filter_map(|&id| {
                let degree = self.outgoing(id).len() + self.incoming(id).len();
                let concept = self.nodes.get(id)?;
                (degree > 0).then(|| KeyConcept {
                    id: id.to_string(),
                    name: concept.name.clone(),
                    degree,
                    importance: (degree as f64 / DEGREE_NORMALIZER).min(1.0),
                })
            })
            .collect();

        // Stable: equal degrees keep concept order
        ranked.sort_by(|a, b| b.degree.cmp(&a.degree));
        ranked.truncate(MAX_KEY_CONCEPTS);
        ranked
    }
}

/// Stateless relational inference engine
#[derive(Debug, Clone, Copy, Default)]
pub struct InferenceEngine;

impl InferenceEngine {
    /// Create an engine
    pub fn new() -> Self {
        Self
    }

    /// Infer transitive relationships, reasoning paths and key concepts
    ///
    /// `context` is accepted for callers that have an analysis at hand; it
    /// does not change the result.
    pub fn infer(
        &self,
        concepts: &[Concept],
        relationships: &[Relationship],
        context: Option<&AnalysisResult>,
    ) -> InferenceResult {
        info!("Performing relational inference");
        if context.is_some() {
            debug!("Inference called with analysis context");
        }

        let graph = InferenceGraph::build(concepts, relationships);
        let inferred_relationships = graph.transitive();
        let reasoning_paths = graph.reasoning_paths();
        let key_concepts = graph.key_concepts();

        info!("Inferred {} relationships", inferred_relationships.len());
        debug!(
            "{} reasoning paths, {} key concepts",
            reasoning_paths.len(),
            key_concepts.len()
        );

        InferenceResult {
            graph_structure: GraphStructure {
                nodes: concepts.len(),
                edges: relationships.len(),
                inferred_edges: inferred_relationships.len(),
            },
            inferred_relationships,
            reasoning_paths,
            key_concepts,
        }
    }
}
