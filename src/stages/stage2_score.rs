use std::collections::HashMap;

use tracing::debug;

use crate::config::ScoringConfig;
use crate::error::AnalysisError;
use crate::heuristics::{Declarations, TextSignals};
use crate::lexicon::CompiledLexicon;
use crate::models::Axis;
use crate::stages::KeywordMatch;

/// Push applied to intensified declarations on the realtime path
#[derive(Debug, Clone, Copy)]
pub struct ExplicitBoost {
    /// Midpoint the value is pushed away from
    pub center: f64,
    pub amount: f64,
}

/// Weighted impact summed over a match set, before baselines
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AxisContributions {
    pub mood: f64,
    pub energy: f64,
    pub anxiety: f64,
    /// Total weighted |impact| across all axes
    pub magnitude: f64,
}

impl AxisContributions {
    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Mood => self.mood,
            Axis::Energy => self.energy,
            Axis::Anxiety => self.anxiety,
        }
    }
}

/// Output of the multi-axis scorer
#[derive(Debug, Clone, PartialEq)]
pub struct AxisScores {
    /// Clamped to the configured axis range
    pub mood: f64,
    pub energy: f64,
    pub anxiety: f64,
    /// Axes replaced by a direct self-report
    pub explicit_axes: Vec<Axis>,
    pub contributions: AxisContributions,
    pub contradiction: bool,
    pub segments: Vec<String>,
}

impl AxisScores {
    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Mood => self.mood,
            Axis::Energy => self.energy,
            Axis::Anxiety => self.anxiety,
        }
    }

    pub fn is_explicit(&self, axis: Axis) -> bool {
        self.explicit_axes.contains(&axis)
    }
}

/// Diminishing weight per match: the n-th hit in a semantic category
/// counts `1 / min(n, cap)`
pub fn saturation_weights(matches: &[KeywordMatch], lexicon: &CompiledLexicon, cap: usize) -> Vec<f64> {
    let cap = cap.max(1);
    let mut seen: HashMap<&str, usize> = HashMap::new();

    matches
        .iter()
        .map(|m| {
            let Some(pattern) = lexicon.pattern(m.pattern_index) else {
                return 0.0;
            };
            let count = seen.entry(pattern.category.as_str()).or_insert(0);
            *count += 1;
            1.0 / (*count).min(cap) as f64
        })
        .collect()
}

/// Sum `impact × intensity × weight × recency × saturation` per axis
pub fn contributions(
    matches: &[KeywordMatch],
    lexicon: &CompiledLexicon,
    config: &ScoringConfig,
) -> AxisContributions {
    let saturation = saturation_weights(matches, lexicon, config.saturation_cap);
    let mut totals = AxisContributions::default();

    for (m, damping) in matches.iter().zip(saturation) {
        let Some(compiled) = lexicon.pattern(m.pattern_index) else {
            continue;
        };
        let pattern = &compiled.pattern;
        let scale = m.intensity * pattern.weight * m.recency * damping;

        totals.mood += pattern.impact.mood * scale;
        totals.energy += pattern.impact.energy * scale;
        totals.anxiety += pattern.impact.anxiety * scale;
        totals.magnitude += pattern.impact.magnitude() * scale;
    }

    totals
}

/// Execute the multi-axis scorer
///
/// 1. Sum weighted, saturation-damped impacts per axis
/// 2. Add to the axis baselines and clamp
/// 3. Replace any axis with a direct self-report by its declared value
/// 4. Carry the contrast segmentation through as a flag
///
/// Batch scoring passes `boost = None` so declared values are used exactly.
pub fn score_axes(
    matches: &[KeywordMatch],
    signals: &TextSignals,
    declarations: &Declarations,
    lexicon: &CompiledLexicon,
    config: &ScoringConfig,
    boost: Option<ExplicitBoost>,
) -> Result<AxisScores, AnalysisError> {
    let totals = contributions(matches, lexicon, config);
    let mut values = [0.0; 3];
    let mut explicit_axes = Vec::new();

    for (slot, axis) in values.iter_mut().zip(Axis::ALL) {
        let raw = config.baselines.get(axis) + totals.get(axis);
        if !raw.is_finite() {
            return Err(AnalysisError::NonFiniteScore { axis });
        }

        *slot = match declarations.latest(axis) {
            Some(declaration) => {
                explicit_axes.push(axis);
                let declared = match boost {
                    Some(b) => declaration.boosted_value(b.center, b.amount, config.axis_min, config.axis_max),
                    None => declaration.value,
                };
                debug!("Explicit {} = {:.1} overrides inferred {:.2}", axis, declared, raw);
                config.clamp_axis(declared)
            }
            None => config.clamp_axis(raw),
        };
    }

    let [mood, energy, anxiety] = values;

    Ok(AxisScores {
        mood,
        energy,
        anxiety,
        explicit_axes,
        contributions: totals,
        contradiction: signals.contrast.is_contradiction(),
        segments: signals.contrast.segments.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristics::collect_text_signals;
    use crate::stages::{find_matches, NormalizedText};

    fn score(text: &str) -> AxisScores {
        let lexicon = CompiledLexicon::builtin().unwrap();
        let config = ScoringConfig::default();
        let text = NormalizedText::new(text);
        let signals = collect_text_signals(&text, &lexicon, &config);
        let matches = find_matches(&text, &lexicon, &config, signals.repetition_multiplier);
        let declarations = lexicon.explicit.detect(text.as_str());
        score_axes(&matches, &signals, &declarations, &lexicon, &config, None).unwrap()
    }

    #[test]
    fn test_no_matches_gives_baselines() {
        let scores = score("bugün markete gittim");
        assert_eq!(scores.mood, 5.0);
        assert_eq!(scores.energy, 5.0);
        assert_eq!(scores.anxiety, 4.0);
        assert!(scores.explicit_axes.is_empty());
    }

    #[test]
    fn test_axes_scored_independently() {
        let scores = score("çok sinirliyim");
        assert!(scores.mood < 5.0);
        assert!(scores.energy > 5.0);
        assert!(scores.anxiety > 4.0);
    }

    #[test]
    fn test_saturation_weights() {
        let lexicon = CompiledLexicon::builtin().unwrap();
        let config = ScoringConfig::default();
        let text = NormalizedText::new("mutlu neşeli sevinçli keyifli memnun");
        let matches = find_matches(&text, &lexicon, &config, 1.0);
        let weights = saturation_weights(&matches, &lexicon, 4);
        assert_eq!(weights, vec![1.0, 0.5, 1.0 / 3.0, 0.25, 0.25]);
    }

    #[test]
    fn test_synonym_repetition_is_damped() {
        let once = score("mutluyum");
        let many = score("mutluyum neşeliyim sevinçliyim keyifliyim");
        let increase_first = once.mood - 5.0;
        let increase_rest = many.mood - once.mood;
        // Three more synonyms add less than the first one did
        assert!(increase_rest < 2.0 * increase_first);
    }

    #[test]
    fn test_explicit_override_beats_inference() {
        let scores = score("çok mutluyum ama modum 3/10");
        assert_eq!(scores.mood, 3.0);
        assert!(scores.is_explicit(Axis::Mood));
        assert!(scores.contradiction);
        assert_eq!(scores.segments.len(), 2);
    }

    #[test]
    fn test_verbal_override_exact_in_batch() {
        let scores = score("üzgünüm ve yorgunum ama enerjim çok yüksek");
        assert_eq!(scores.energy, 8.0);
        assert!(scores.mood < 5.0);
    }

    #[test]
    fn test_boost_pushes_intensified_value() {
        let lexicon = CompiledLexicon::builtin().unwrap();
        let config = ScoringConfig::default();
        let text = NormalizedText::new("enerjim çok yüksek");
        let signals = collect_text_signals(&text, &lexicon, &config);
        let declarations = lexicon.explicit.detect(text.as_str());
        let boost = ExplicitBoost {
            center: 5.5,
            amount: 1.5,
        };
        let scores = score_axes(&[], &signals, &declarations, &lexicon, &config, Some(boost)).unwrap();
        assert_eq!(scores.energy, 9.5);
    }

    #[test]
    fn test_non_finite_is_an_error() {
        let lexicon = CompiledLexicon::builtin().unwrap();
        let config = ScoringConfig::default();
        let text = NormalizedText::new("mutluyum");
        let mut matches = find_matches(&text, &lexicon, &config, 1.0);
        matches[0].intensity = f64::NAN;
        let result = score_axes(
            &matches,
            &TextSignals::default(),
            &Declarations::default(),
            &lexicon,
            &config,
            None,
        );
        assert!(matches!(result, Err(AnalysisError::NonFiniteScore { axis: Axis::Mood })));
    }
}
