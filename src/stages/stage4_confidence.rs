use crate::config::ConfidenceConfig;
use crate::error::AnalysisError;
use crate::lexicon::CompiledLexicon;
use crate::stages::KeywordMatch;

/// Inputs to the confidence estimate for one utterance
#[derive(Debug, Clone)]
pub struct ConfidenceInputs<'a> {
    pub transcription_confidence: f64,
    pub matches: &'a [KeywordMatch],
    pub uncertainty_hits: usize,
    /// Normalized text length in chars
    pub text_chars: usize,
    pub word_count: usize,
}

/// Bonus per tag kind (emotion, trigger, activity) present in the matches
pub fn diversity_bonus(matches: &[KeywordMatch], lexicon: &CompiledLexicon, config: &ConfidenceConfig) -> f64 {
    let patterns: Vec<_> = matches
        .iter()
        .filter_map(|m| lexicon.pattern(m.pattern_index))
        .map(|c| &c.pattern)
        .collect();

    let kinds = [
        patterns.iter().any(|p| p.emotion.is_some()),
        patterns.iter().any(|p| p.trigger.is_some()),
        patterns.iter().any(|p| p.activity.is_some()),
    ]
    .into_iter()
    .filter(|present| *present)
    .count();

    kinds as f64 * config.diversity_bonus_per_kind
}

/// Reward emotion matches that agree in polarity and strong vocabulary
/// backed by a high average intensity
pub fn consistency_bonus(matches: &[KeywordMatch], lexicon: &CompiledLexicon, config: &ConfidenceConfig) -> f64 {
    let mut bonus = 0.0;

    let polarities: Vec<i8> = matches
        .iter()
        .filter_map(|m| lexicon.pattern(m.pattern_index))
        .filter(|c| c.pattern.emotion.is_some())
        .map(|c| c.pattern.polarity())
        .filter(|p| *p != 0)
        .collect();
    if polarities.len() >= 2 {
        let positive = polarities.iter().filter(|p| **p > 0).count();
        let agreeing = positive.max(polarities.len() - positive);
        if agreeing as f64 / polarities.len() as f64 > config.polarity_agreement {
            bonus += config.polarity_bonus;
        }
    }

    if !matches.is_empty() {
        let mean = matches.iter().map(|m| m.intensity).sum::<f64>() / matches.len() as f64;
        let has_strong = matches.iter().any(|m| m.intensity >= config.high_intensity);
        if has_strong && mean >= config.high_mean_intensity {
            bonus += config.intensity_bonus;
        }
    }

    bonus
}

pub fn negation_penalty(matches: &[KeywordMatch], config: &ConfidenceConfig) -> f64 {
    let negated = matches.iter().filter(|m| m.negated).count();
    (negated as f64 * config.negation_penalty_per_match).min(config.max_negation_penalty)
}

/// Hedging penalty, shrinking for longer utterances
pub fn uncertainty_penalty(hits: usize, word_count: usize, config: &ConfidenceConfig) -> f64 {
    if hits == 0 {
        return 0.0;
    }
    let scale = (config.uncertainty_reference_words / word_count.max(1) as f64).min(1.0);
    (hits as f64 * config.uncertainty_penalty_per_hedge * scale).min(config.max_uncertainty_penalty)
}

/// `min(1, sqrt(chars / reference))`
pub fn length_factor(text_chars: usize, config: &ConfidenceConfig) -> f64 {
    (text_chars as f64 / config.length_reference_chars).sqrt().min(1.0)
}

/// Combine the confidence components into one score in the configured bounds
pub fn estimate_confidence(
    inputs: &ConfidenceInputs<'_>,
    lexicon: &CompiledLexicon,
    config: &ConfidenceConfig,
) -> Result<f64, AnalysisError> {
    let base = inputs.transcription_confidence.clamp(0.0, 1.0)
        + diversity_bonus(inputs.matches, lexicon, config)
        + consistency_bonus(inputs.matches, lexicon, config)
        - negation_penalty(inputs.matches, config)
        - uncertainty_penalty(inputs.uncertainty_hits, inputs.word_count, config);

    let confidence = base.clamp(0.0, 1.0) * length_factor(inputs.text_chars, config);
    if !confidence.is_finite() {
        return Err(AnalysisError::NonFiniteConfidence);
    }

    Ok(confidence.clamp(config.min_confidence, config.max_confidence))
}
