//! Situational scoring: tension, uncertainty and emotional intensity
//!
//! Scores are literal keyword and punctuation heuristics. Lexicon matching is
//! case-insensitive substring containment, so each lexicon word counts at most
//! once however often it appears.

use tracing::{debug, info};
use vctt_domain::{clamp_unit, AnalysisResult, SituationalMetrics, StrengthRating};

/// Words signalling conflict
pub const CONFLICT_WORDS: &[&str] = &[
    "but", "however", "conflict", "disagree", "oppose", "against", "dispute",
];

/// Words signalling hedging
pub const HEDGING_WORDS: &[&str] = &[
    "maybe",
    "perhaps",
    "possibly",
    "might",
    "could",
    "uncertain",
    "unclear",
    "ambiguous",
    "questionable",
    "doubt",
];

/// Words signalling emotion
pub const EMOTION_WORDS: &[&str] = &[
    "love", "hate", "fear", "anger", "joy", "sad", "happy", "terrible", "wonderful", "awful",
    "amazing", "horrific", "fantastic",
];

/// Scores text along three situational axes
///
/// Holds only the last computed metrics; [`SituationScorer::analyze`] is a
/// pure function of its arguments.
#[derive(Debug, Clone, Default)]
pub struct SituationScorer {
    metrics: SituationalMetrics,
}

impl SituationScorer {
    /// Create a scorer with zeroed metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Score `text`, optionally using the analyst's fallacies and strength rating
    pub fn analyze(&mut self, text: &str, analysis: Option<&AnalysisResult>) -> SituationalMetrics {
        info!("Analyzing situational metrics");

        let lower = text.to_lowercase();
        self.metrics = SituationalMetrics {
            tension: tension(text, &lower, analysis),
            uncertainty: uncertainty(text, &lower, analysis),
            emotional_intensity: emotional_intensity(text, &lower),
        };

        debug!(
            "Situational metrics: tension={:.2}, uncertainty={:.2}, emotional_intensity={:.2}",
            self.metrics.tension, self.metrics.uncertainty, self.metrics.emotional_intensity
        );
        self.metrics
    }

    /// Last computed metrics (zeros before the first call)
    pub fn metrics(&self) -> SituationalMetrics {
        self.metrics
    }
}

/// Number of lexicon words contained in already-lowercased text
fn lexicon_hits(lower: &str, lexicon: &[&str]) -> usize {
    lexicon.iter().filter(|word| lower.contains(*word)).count()
}

/// Bounded contribution `min(count * step, cap)`
fn capped(count: usize, step: f64, cap: f64) -> f64 {
    (count as f64 * step).min(cap)
}

fn tension(text: &str, lower: &str, analysis: Option<&AnalysisResult>) -> f64 {
    let mut score = capped(lexicon_hits(lower, CONFLICT_WORDS), 0.1, 0.5);

    if let Some(analysis) = analysis {
        score += capped(analysis.fallacies.len(), 0.15, 0.4);
    }

    score += capped(text.matches('!').count(), 0.05, 0.1);
    clamp_unit(score)
}

fn uncertainty(text: &str, lower: &str, analysis: Option<&AnalysisResult>) -> f64 {
    let mut score = capped(lexicon_hits(lower, HEDGING_WORDS), 0.1, 0.5);

    score += match analysis.map(|a| a.strength.rating) {
        Some(StrengthRating::Weak) => 0.3,
        Some(StrengthRating::Moderate) => 0.15,
        _ => 0.0,
    };

    score += capped(text.matches('?').count(), 0.08, 0.2);
    clamp_unit(score)
}

fn emotional_intensity(text: &str, lower: &str) -> f64 {
    let mut score = capped(lexicon_hits(lower, EMOTION_WORDS), 0.15, 0.6);

    let shouted = text.split_whitespace().filter(|w| is_shouted(w)).count();
    score += capped(shouted, 0.1, 0.2);

    let repeated = text.matches("!!!").count() + text.matches("???").count();
    score += capped(repeated, 0.1, 0.2);

    clamp_unit(score)
}

/// A token longer than one character whose cased letters are all uppercase
fn is_shouted(word: &str) -> bool {
    word.chars().count() > 1
        && word.chars().any(char::is_uppercase)
        && !word.chars().any(char::is_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use vctt_domain::{ArgumentStrength, Fallacy};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_initial_metrics_are_zero() {
        let scorer = SituationScorer::new();
        assert_eq!(scorer.metrics(), SituationalMetrics::default());
    }

    #[test]
    fn test_neutral_text() {
        let metrics = SituationScorer::new().analyze("The report is on the desk.", None);
        assert_eq!(metrics, SituationalMetrics::default());
    }

    #[test]
    fn test_tension_from_conflict_words_and_fallacies() {
        let analysis = AnalysisResult {
            fallacies: vec![Fallacy::new("strawman"), Fallacy::new("ad hominem")],
            ..Default::default()
        };
        let metrics = SituationScorer::new().analyze(
            "However, we disagree and oppose it!",
            Some(&analysis),
        );
        // 3 conflict words, 2 fallacies, 1 exclamation
        assert!(approx(metrics.tension, 0.3 + 0.3 + 0.05));
    }

    #[test]
    fn test_tension_caps() {
        let analysis = AnalysisResult {
            fallacies: (0..10).map(|_| Fallacy::new("strawman")).collect(),
            ..Default::default()
        };
        let text = "but however conflict disagree oppose against dispute !!!!!!";
        let metrics = SituationScorer::new().analyze(text, Some(&analysis));
        assert!(approx(metrics.tension, 1.0));
    }

    #[test]
    fn test_uncertainty_rating_bonus() {
        let mut analysis = AnalysisResult::default();
        analysis.strength = ArgumentStrength::from_score(0.2);
        let weak = SituationScorer::new().analyze("Plain text", Some(&analysis));
        assert!(approx(weak.uncertainty, 0.3));

        analysis.strength = ArgumentStrength::from_score(0.5);
        let moderate = SituationScorer::new().analyze("Plain text", Some(&analysis));
        assert!(approx(moderate.uncertainty, 0.15));

        analysis.strength = ArgumentStrength::from_score(0.9);
        let strong = SituationScorer::new().analyze("Plain text", Some(&analysis));
        assert_eq!(strong.uncertainty, 0.0);
    }

    #[test]
    fn test_uncertainty_questions() {
        let metrics = SituationScorer::new().analyze("Maybe? Perhaps? Really? Sure? OK?", None);
        // 2 hedges, 5 questions capped at 0.2
        assert!(approx(metrics.uncertainty, 0.2 + 0.2));
    }

    #[test]
    fn test_emotional_intensity() {
        let metrics = SituationScorer::new().analyze("I LOVE this, it is AMAZING!!!", None);
        // love + amazing, two shouted words, one "!!!"
        assert!(approx(metrics.emotional_intensity, 0.3 + 0.2 + 0.1));
    }

    #[test]
    fn test_single_letter_is_not_shouting() {
        assert!(!is_shouted("I"));
        assert!(!is_shouted("123"));
        assert!(is_shouted("NO!"));
        assert!(!is_shouted("No"));
    }

    #[test]
    fn test_metrics_cached() {
        let mut scorer = SituationScorer::new();
        let metrics = scorer.analyze("I hate this!", None);
        assert_eq!(scorer.metrics(), metrics);
    }

    #[test]
    fn test_idempotent() {
        let mut scorer = SituationScorer::new();
        let text = "However, maybe we could fail? I FEAR it!!!";
        let first = scorer.analyze(text, None);
        let second = scorer.analyze(text, None);
        assert_eq!(first, second);
    }

    proptest! {
        #[test]
        fn prop_metrics_bounded(text in ".{0,200}") {
            let metrics = SituationScorer::new().analyze(&text, None);
            prop_assert!((0.0..=1.0).contains(&metrics.tension));
            prop_assert!((0.0..=1.0).contains(&metrics.uncertainty));
            prop_assert!((0.0..=1.0).contains(&metrics.emotional_intensity));
        }
    }
}
