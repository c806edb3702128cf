//! Analysis record produced by the analyst agent
//!
//! Every field carries a serde default: downstream scorers read this record
//! defensively, so a missing or unrecognised value degrades to "no signal"
//! instead of a parse failure.

use crate::score::clamp_unit;
use serde::{Deserialize, Serialize};

/// Rating threshold above which an argument counts as strong
pub const STRONG_THRESHOLD: f64 = 0.7;

/// Rating threshold above which an argument counts as moderate
pub const MODERATE_THRESHOLD: f64 = 0.4;

/// Kind of inference an argument uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgumentType {
    /// Conclusion follows necessarily from the premises
    Deductive,
    /// Conclusion generalises from observations
    Inductive,
    /// Conclusion is the best available explanation
    Abductive,
    /// Not determined
    #[default]
    #[serde(other)]
    Unknown,
}

/// Structural validity of an argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Validity {
    /// Conclusion follows from the premises
    Valid,
    /// Conclusion does not follow from the premises
    Invalid,
    /// Not determined
    #[default]
    #[serde(other)]
    Uncertain,
}

/// Soundness of an argument (valid and with true premises)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Soundness {
    /// Valid with acceptable premises
    Sound,
    /// Invalid or with false premises
    Unsound,
    /// Not determined
    #[default]
    #[serde(other)]
    Uncertain,
}

/// Qualitative argument strength
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrengthRating {
    /// Score above 0.7
    Strong,
    /// Score above 0.4
    Moderate,
    /// Score at or below 0.4
    Weak,
    /// No rating supplied
    #[default]
    #[serde(other)]
    Unrated,
}

impl StrengthRating {
    /// Derive the rating from a strength score
    pub fn from_score(score: f64) -> Self {
        if score > STRONG_THRESHOLD {
            StrengthRating::Strong
        } else if score > MODERATE_THRESHOLD {
            StrengthRating::Moderate
        } else {
            StrengthRating::Weak
        }
    }
}

/// Argument structure assessment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArgumentStructure {
    /// Kind of argument
    #[serde(rename = "type")]
    pub kind: ArgumentType,

    /// Structural validity
    pub validity: Validity,

    /// Soundness
    pub soundness: Soundness,
}

/// A detected logical fallacy
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fallacy {
    /// Fallacy name, e.g. "circular reasoning"
    #[serde(rename = "type")]
    pub kind: String,

    /// Free-text explanation
    pub description: String,
}

impl Fallacy {
    /// Create a fallacy with a generated description
    pub fn new(kind: impl Into<String>) -> Self {
        let kind = kind.into();
        let description = format!("Detected {} in text", kind);
        Self { kind, description }
    }
}

/// Argument strength score and rating
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArgumentStrength {
    /// Strength score in [0, 1]
    pub score: f64,

    /// Qualitative rating
    pub rating: StrengthRating,
}

impl Default for ArgumentStrength {
    fn default() -> Self {
        Self {
            score: 0.5,
            rating: StrengthRating::Unrated,
        }
    }
}

impl ArgumentStrength {
    /// Build a strength record from a raw score, clamping it and deriving the rating
    pub fn from_score(score: f64) -> Self {
        let score = clamp_unit(score);
        Self {
            score,
            rating: StrengthRating::from_score(score),
        }
    }
}

/// Surface statistics of the analysed text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStats {
    /// Whitespace-separated word count
    pub word_count: usize,

    /// Sentence count (split on `.`, `!`, `?`)
    pub sentence_count: usize,
}

impl TextStats {
    /// Compute statistics for a block of text
    pub fn from_text(text: &str) -> Self {
        Self {
            word_count: text.split_whitespace().count(),
            sentence_count: text
                .split(['.', '!', '?'])
                .filter(|s| !s.trim().is_empty())
                .count(),
        }
    }
}

/// Full analysis record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisResult {
    /// Argument structure
    pub structure: ArgumentStructure,

    /// Detected fallacies
    pub fallacies: Vec<Fallacy>,

    /// Extracted premises
    pub premises: Vec<String>,

    /// Extracted conclusions
    pub conclusions: Vec<String>,

    /// Argument strength
    pub strength: ArgumentStrength,

    /// Text statistics
    pub text_analysis: TextStats,
}
