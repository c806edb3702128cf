//! Parse LLM replies into analyst and relational records
//!
//! Parsing is lenient: unknown enum strings degrade to their "unknown"
//! variants and malformed entries are skipped with a warning. Only a reply
//! that is not a JSON object at all is an error.

use crate::error::AgentError;
use serde_json::{Map, Value};
use tracing::warn;
use vctt_domain::{ArgumentStructure, Concept, Fallacy, Relationship};

/// Importance assumed when the LLM omits it
const DEFAULT_IMPORTANCE: f64 = 0.5;

/// Relationship type assumed when the LLM omits it
const DEFAULT_RELATIONSHIP_TYPE: &str = "related_to";

/// Parsed analyst reply
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalystReply {
    /// Argument structure
    pub structure: ArgumentStructure,

    /// Fallacies that carry a type
    pub fallacies: Vec<Fallacy>,

    /// Non-empty premises
    pub premises: Vec<String>,

    /// Non-empty conclusions
    pub conclusions: Vec<String>,
}

/// Parsed relational reply
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelationalReply {
    /// Concepts with unique ids
    pub concepts: Vec<Concept>,

    /// Relationships with both endpoints set (not yet checked against concepts)
    pub relationships: Vec<Relationship>,
}

/// Extract JSON from a reply, handling markdown code blocks and surrounding prose
pub fn extract_json(response: &str) -> Result<String, AgentError> {
    let trimmed = response.trim();

    if trimmed.starts_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() < 2 {
            return Err(AgentError::InvalidFormat("Empty code block".to_string()));
        }

        // Skip the opening fence line and a closing fence if present
        let end = if lines[lines.len() - 1].trim_start().starts_with("```") {
            lines.len() - 1
        } else {
            lines.len()
        };
        return Ok(lines[1..end].join("\n"));
    }

    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return Ok(trimmed.to_string());
    }

    // Prose around an object: take the outermost braces
    match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => Ok(trimmed[start..=end].to_string()),
        _ => Err(AgentError::InvalidFormat("No JSON object in reply".to_string())),
    }
}

fn parse_object(response: &str) -> Result<Map<String, Value>, AgentError> {
    let json_str = extract_json(response)?;
    let json: Value = serde_json::from_str(&json_str)?;

    match json {
        Value::Object(map) => Ok(map),
        _ => Err(AgentError::InvalidFormat("Expected JSON object".to_string())),
    }
}

/// Parse the analyst's JSON reply
pub fn parse_analyst_reply(response: &str) -> Result<AnalystReply, AgentError> {
    let obj = parse_object(response)?;

    let structure = match obj.get("structure") {
        Some(value) => serde_json::from_value(value.clone()).unwrap_or_else(|e| {
            warn!("Ignoring malformed argument structure: {}", e);
            ArgumentStructure::default()
        }),
        None => ArgumentStructure::default(),
    };

    let fallacies = array(&obj, "fallacies")
        .iter()
        .enumerate()
        .filter_map(|(idx, entry)| {
            let fallacy = parse_fallacy(entry);
            if fallacy.is_none() {
                warn!("Skipping fallacy {} without a type", idx);
            }
            fallacy
        })
        .collect();

    Ok(AnalystReply {
        structure,
        fallacies,
        premises: strings(&obj, "premises"),
        conclusions: strings(&obj, "conclusions"),
    })
}

fn parse_fallacy(entry: &Value) -> Option<Fallacy> {
    match entry {
        Value::String(kind) => non_empty(kind).map(Fallacy::new),
        Value::Object(fields) => {
            let kind = fields.get("type").and_then(Value::as_str).and_then(non_empty)?;
            let mut fallacy = Fallacy::new(kind);
            if let Some(description) = fields
                .get("description")
                .and_then(Value::as_str)
                .and_then(non_empty)
            {
                fallacy.description = description;
            }
            Some(fallacy)
        }
        _ => None,
    }
}

/// Parse the relational agent's JSON reply
///
/// Concepts without a name are skipped, a missing id becomes `c_<index>` and
/// a repeated id keeps its first concept.
pub fn parse_relational_reply(response: &str) -> Result<RelationalReply, AgentError> {
    let obj = parse_object(response)?;

    let mut concepts: Vec<Concept> = Vec::new();
    for (idx, entry) in array(&obj, "concepts").iter().enumerate() {
        match parse_concept(entry, idx) {
            Some(concept) if concepts.iter().any(|c| c.id == concept.id) => {
                warn!("Skipping concept with duplicate id '{}'", concept.id);
            }
            Some(concept) => concepts.push(concept),
            None => warn!("Skipping concept {} without a name", idx),
        }
    }

    let relationships = array(&obj, "relationships")
        .iter()
        .enumerate()
        .filter_map(|(idx, entry)| {
            let relationship = parse_relationship(entry);
            if relationship.is_none() {
                warn!("Skipping relationship {} without both endpoints", idx);
            }
            relationship
        })
        .collect();

    Ok(RelationalReply {
        concepts,
        relationships,
    })
}

fn parse_concept(entry: &Value, idx: usize) -> Option<Concept> {
    let fields = entry.as_object()?;
    let name = fields.get("name").and_then(Value::as_str).and_then(non_empty)?;
    let id = fields
        .get("id")
        .and_then(Value::as_str)
        .and_then(non_empty)
        .unwrap_or_else(|| format!("c_{}", idx));
    let importance = fields
        .get("importance")
        .and_then(Value::as_f64)
        .unwrap_or(DEFAULT_IMPORTANCE);

    let mut concept = Concept::new(id, name, importance);
    if let Some(category) = fields
        .get("type")
        .or_else(|| fields.get("category"))
        .and_then(Value::as_str)
        .and_then(non_empty)
    {
        concept = concept.with_category(category);
    }
    Some(concept)
}

fn parse_relationship(entry: &Value) -> Option<Relationship> {
    let fields = entry.as_object()?;
    let field = |key: &str| fields.get(key).and_then(Value::as_str).and_then(non_empty);

    let source = field("source")?;
    let target = field("target")?;
    let kind = field("type").unwrap_or_else(|| DEFAULT_RELATIONSHIP_TYPE.to_string());

    let mut relationship = Relationship::new(source, target, kind);
    if let Some(description) = field("description") {
        relationship = relationship.with_description(description);
    }
    if let Some(strength) = fields.get("strength").and_then(Value::as_f64) {
        relationship = relationship.with_strength(strength);
    }
    Some(relationship)
}

fn array<'a>(obj: &'a Map<String, Value>, key: &str) -> &'a [Value] {
    obj.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn strings(obj: &Map<String, Value>, key: &str) -> Vec<String> {
    array(obj, key)
        .iter()
        .filter_map(Value::as_str)
        .filter_map(non_empty)
        .collect()
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
