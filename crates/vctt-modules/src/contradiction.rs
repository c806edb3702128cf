//! Contradiction detection and scoring
//!
//! Three independent passes feed one record list:
//! 1. Textual: negation/affirmation pairs and repeated contrast
//! 2. Logical: invalid or unsound structure, contradiction-type fallacies
//! 3. Relational: the same ordered concept pair typed two different ways
//!
//! The aggregate score is the mean severity scaled by a count bonus of up to 50%.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};
use vctt_domain::{clamp_unit, AnalysisResult, RelationalResult, Soundness, Validity};

/// Word pairs whose co-occurrence suggests a contradiction
pub const OPPOSING_PAIRS: &[(&str, &str)] = &[
    ("not", "but"),
    ("never", "always"),
    ("none", "all"),
    ("impossible", "possible"),
];

/// Fallacy names (lowercase fragments) that indicate a contradiction
pub const CONTRADICTION_FALLACIES: &[&str] = &["circular reasoning", "contradiction", "inconsistent"];

const PAIR_SEVERITY: f64 = 0.5;
const CONTRAST_STEP: f64 = 0.15;
const CONTRAST_CAP: f64 = 0.8;
const INVALID_SEVERITY: f64 = 0.7;
const UNSOUND_SEVERITY: f64 = 0.6;
const FALLACY_SEVERITY: f64 = 0.65;
const RELATIONAL_SEVERITY: f64 = 0.5;

/// Category of a detected contradiction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContradictionKind {
    /// Found in the raw text
    Textual,
    /// Invalid or unsound argument structure
    Logical,
    /// A fallacy that implies inconsistency
    LogicalFallacy,
    /// Conflicting relationship types
    Relational,
}

/// A single detected contradiction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContradictionRecord {
    /// Category
    #[serde(rename = "type")]
    pub kind: ContradictionKind,

    /// What was detected
    pub description: String,

    /// Severity in [0, 1]
    pub severity: f64,
}

impl ContradictionRecord {
    fn new(kind: ContradictionKind, description: String, severity: f64) -> Self {
        Self {
            kind,
            description,
            severity: clamp_unit(severity),
        }
    }
}

/// Result of one contradiction analysis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContradictionAnalysis {
    /// Aggregate score in [0, 1]
    pub contradiction_score: f64,

    /// Detected contradictions, in pass order
    pub contradictions: Vec<ContradictionRecord>,
}

/// Detects contradictions and keeps the latest batch
#[derive(Debug, Clone, Default)]
pub struct ContradictionScorer {
    score: f64,
    contradictions: Vec<ContradictionRecord>,
}

impl ContradictionScorer {
    /// Create a scorer with no recorded contradictions
    pub fn new() -> Self {
        Self::default()
    }

    /// Run all detection passes and replace the latest batch
    pub fn analyze(
        &mut self,
        text: &str,
        analysis: Option<&AnalysisResult>,
        relational: Option<&RelationalResult>,
    ) -> ContradictionAnalysis {
        info!("Analyzing contradictions");

        let mut records = detect_textual(text);
        if let Some(analysis) = analysis {
            records.extend(detect_logical(analysis));
        }
        if let Some(relational) = relational {
            records.extend(detect_relational(relational));
        }

        self.score = aggregate_score(&records);
        self.contradictions = records;

        info!(
            "Found {} contradictions, score: {:.2}",
            self.contradictions.len(),
            self.score
        );

        ContradictionAnalysis {
            contradiction_score: self.score,
            contradictions: self.contradictions.clone(),
        }
    }

    /// Last computed score (0.0 before the first call)
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Copy of the last detected contradictions
    pub fn contradictions(&self) -> Vec<ContradictionRecord> {
        self.contradictions.clone()
    }
}

fn detect_textual(text: &str) -> Vec<ContradictionRecord> {
    let lower = text.to_lowercase();
    let mut records = Vec::new();

    for (negation, affirmation) in OPPOSING_PAIRS {
        if lower.contains(negation) && lower.contains(affirmation) {
            records.push(ContradictionRecord::new(
                ContradictionKind::Textual,
                format!(
                    "Text contains both '{}' and '{}'",
                    negation, affirmation
                ),
                PAIR_SEVERITY,
            ));
        }
    }

    let contrasts = lower.matches(" but ").count();
    if contrasts > 2 {
        records.push(ContradictionRecord::new(
            ContradictionKind::Textual,
            format!("Repeated contrasting statements ({} instances)", contrasts),
            (contrasts as f64 * CONTRAST_STEP).min(CONTRAST_CAP),
        ));
    }

    debug!("Textual pass: {} records", records.len());
    records
}

fn detect_logical(analysis: &AnalysisResult) -> Vec<ContradictionRecord> {
    let mut records = Vec::new();

    if analysis.structure.validity == Validity::Invalid {
        records.push(ContradictionRecord::new(
            ContradictionKind::Logical,
            "Invalid argument structure".to_string(),
            INVALID_SEVERITY,
        ));
    }

    if analysis.structure.soundness == Soundness::Unsound {
        records.push(ContradictionRecord::new(
            ContradictionKind::Logical,
            "Unsound argument".to_string(),
            UNSOUND_SEVERITY,
        ));
    }

    for fallacy in &analysis.fallacies {
        let kind = fallacy.kind.to_lowercase();
        if CONTRADICTION_FALLACIES.iter().any(|f| kind.contains(f)) {
            records.push(ContradictionRecord::new(
                ContradictionKind::LogicalFallacy,
                format!("Contradiction-related fallacy: {}", fallacy.kind),
                FALLACY_SEVERITY,
            ));
        }
    }

    debug!("Logical pass: {} records", records.len());
    records
}

fn detect_relational(relational: &RelationalResult) -> Vec<ContradictionRecord> {
    let mut first_seen: HashMap<(&str, &str), &str> = HashMap::new();
    let mut records = Vec::new();

    for rel in &relational.relationships {
        let pair = (rel.source.as_str(), rel.target.as_str());
        let first_kind = *first_seen.entry(pair).or_insert(rel.kind.as_str());
        if first_kind != rel.kind {
            records.push(ContradictionRecord::new(
                ContradictionKind::Relational,
                format!(
                    "Conflicting relationship types for {} -> {}: '{}' vs '{}'",
                    rel.source, rel.target, first_kind, rel.kind
                ),
                RELATIONAL_SEVERITY,
            ));
        }
    }

    debug!("Relational pass: {} records", records.len());
    records
}

/// Mean severity times `min(1 + 0.1 * (n - 1), 1.5)`, clamped; 0.0 when empty
fn aggregate_score(records: &[ContradictionRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }

    let count = records.len() as f64;
    let mean = records.iter().map(|r| r.severity).sum::<f64>() / count;
    let multiplier = (1.0 + (count - 1.0) * 0.1).min(1.5);

    clamp_unit(mean * multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use vctt_domain::{Fallacy, Relationship};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_not_but_yields_textual_record() {
        let result = ContradictionScorer::new().analyze("It is NOT cheap, But it works.", None, None);
        assert!(result
            .contradictions
            .iter()
            .any(|c| c.kind == ContradictionKind::Textual && c.severity == 0.5));
    }

    #[test]
    fn test_clean_text_scores_exactly_zero() {
        let result = ContradictionScorer::new().analyze("The sky is blue today.", None, None);
        assert!(result.contradictions.is_empty());
        assert_eq!(result.contradiction_score, 0.0);
    }

    #[test]
    fn test_repeated_but() {
        let text = "x but y but z but w";
        let result = ContradictionScorer::new().analyze(text, None, None);
        let contrast = result
            .contradictions
            .iter()
            .find(|c| c.description.contains("3 instances"))
            .expect("contrast record");
        assert!(approx(contrast.severity, 0.45));
    }

    #[test]
    fn test_contrast_severity_caps() {
        let text = "a but ".repeat(10);
        let result = ContradictionScorer::new().analyze(&text, None, None);
        assert!(result
            .contradictions
            .iter()
            .any(|c| c.severity == CONTRAST_CAP));
    }

    #[test]
    fn test_logical_records() {
        let mut analysis = AnalysisResult::default();
        analysis.structure.validity = Validity::Invalid;
        analysis.structure.soundness = Soundness::Unsound;
        analysis.fallacies = vec![
            Fallacy::new("Circular Reasoning"),
            Fallacy::new("strawman"),
            Fallacy::new("inconsistent premises"),
        ];

        let result = ContradictionScorer::new().analyze("Plain text.", Some(&analysis), None);
        let kinds: Vec<_> = result.contradictions.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ContradictionKind::Logical,
                ContradictionKind::Logical,
                ContradictionKind::LogicalFallacy,
                ContradictionKind::LogicalFallacy,
            ]
        );

        // mean (0.7 + 0.6 + 0.65 + 0.65) / 4 = 0.65, multiplier 1.3
        assert!(approx(result.contradiction_score, 0.845));
    }

    #[test]
    fn test_relational_conflict_against_first_seen_type() {
        let relational = RelationalResult {
            relationships: vec![
                Relationship::new("a", "b", "supports"),
                Relationship::new("a", "b", "refutes"),
                Relationship::new("a", "b", "refutes"),
                Relationship::new("b", "a", "refutes"),
            ],
            ..Default::default()
        };

        let result = ContradictionScorer::new().analyze("Plain.", None, Some(&relational));
        assert_eq!(result.contradictions.len(), 2);
        assert!(result
            .contradictions
            .iter()
            .all(|c| c.kind == ContradictionKind::Relational));
        // mean 0.5, multiplier 1.1
        assert!(approx(result.contradiction_score, 0.55));
    }

    #[test]
    fn test_count_bonus_caps_at_half() {
        let mut analysis = AnalysisResult::default();
        analysis.structure.validity = Validity::Invalid;
        analysis.fallacies = (0..8).map(|_| Fallacy::new("contradiction")).collect();

        let result = ContradictionScorer::new().analyze("never always", Some(&analysis), None);
        assert_eq!(result.contradictions.len(), 10);
        // mean (0.5 + 0.7 + 8 * 0.65) / 10 = 0.64, multiplier capped at 1.5
        assert!(approx(result.contradiction_score, 0.96));
    }

    #[test]
    fn test_accessors_return_latest_batch() {
        let mut scorer = ContradictionScorer::new();
        scorer.analyze("never always", None, None);
        assert_eq!(scorer.contradictions().len(), 1);
        assert_eq!(scorer.score(), 0.5);

        scorer.analyze("calm text", None, None);
        assert!(scorer.contradictions().is_empty());
        assert_eq!(scorer.score(), 0.0);
    }

    #[test]
    fn test_idempotent() {
        let mut scorer = ContradictionScorer::new();
        let text = "It is not possible but it is impossible, but never always.";
        let first = scorer.analyze(text, None, None);
        let second = scorer.analyze(text, None, None);
        assert_eq!(first, second);
    }

    #[test]
    fn test_record_wire_shape() {
        let result = ContradictionScorer::new().analyze("not but", None, None);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["contradictions"][0]["type"], "textual");
    }

    proptest! {
        #[test]
        fn prop_score_bounded(text in ".{0,200}") {
            let result = ContradictionScorer::new().analyze(&text, None, None);
            prop_assert!((0.0..=1.0).contains(&result.contradiction_score));
        }
    }
}
