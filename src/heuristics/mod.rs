pub mod contrast;
pub mod explicit;
pub mod intensity;
pub mod negation;

pub use contrast::*;
pub use explicit::*;
pub use intensity::*;
pub use negation::*;

use crate::config::ScoringConfig;
use crate::lexicon::CompiledLexicon;
use crate::stages::NormalizedText;

/// Whether `phrase` occurs as a whole-token sequence starting at `at`
pub fn phrase_at(tokens: &[&str], at: usize, phrase: &[String]) -> bool {
    !phrase.is_empty()
        && at + phrase.len() <= tokens.len()
        && phrase.iter().zip(&tokens[at..]).all(|(p, t)| p == t)
}

/// Number of (possibly overlapping) occurrences of `phrase`
pub fn count_phrase(tokens: &[&str], phrase: &[String]) -> usize {
    (0..tokens.len()).filter(|&i| phrase_at(tokens, i, phrase)).count()
}

pub fn contains_phrase(tokens: &[&str], phrase: &[String]) -> bool {
    (0..tokens.len()).any(|i| phrase_at(tokens, i, phrase))
}

/// Utterance-level signals that do not depend on individual matches
#[derive(Debug, Clone, Default)]
pub struct TextSignals {
    /// Repeated intensifier pairs, capped
    pub repetitions: usize,
    /// Global intensity multiplier derived from `repetitions`
    pub repetition_multiplier: f64,
    /// Hedging phrases found
    pub uncertainty_hits: usize,
    pub contrast: ContrastSplit,
}

/// Run the text-wide rules once per utterance
///
/// 1. Count repeated intensifiers ("çok çok") for the global bonus
/// 2. Count hedging phrases for the confidence penalty
/// 3. Split on contrastive conjunctions for the contradiction flag
pub fn collect_text_signals(
    text: &NormalizedText,
    lexicon: &CompiledLexicon,
    config: &ScoringConfig,
) -> TextSignals {
    let tokens = text.tokens();

    let repetitions = count_repetitions(&tokens, &lexicon.modifiers, config.max_repetitions);

    TextSignals {
        repetitions,
        repetition_multiplier: repetition_multiplier(repetitions, config.repetition_bonus),
        uncertainty_hits: count_uncertainty(&tokens, &lexicon.uncertainty_phrases),
        contrast: split_on_contrast(&tokens, &lexicon.contrast_phrases),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phrase(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_phrase_at() {
        let tokens = vec!["emin", "değilim", "ama"];
        assert!(phrase_at(&tokens, 0, &phrase(&["emin", "değilim"])));
        assert!(!phrase_at(&tokens, 1, &phrase(&["emin", "değilim"])));
        assert!(!phrase_at(&tokens, 2, &phrase(&["ama", "yine"])));
        assert!(!phrase_at(&tokens, 0, &[]));
    }

    #[test]
    fn test_collect_text_signals() {
        let lexicon = CompiledLexicon::builtin().unwrap();
        let text = NormalizedText::new("Sanırım çok çok mutluyum, ama biraz yorgunum.");
        let signals = collect_text_signals(&text, &lexicon, &ScoringConfig::default());

        assert_eq!(signals.repetitions, 1);
        assert!((signals.repetition_multiplier - 1.2).abs() < 1e-9);
        assert_eq!(signals.uncertainty_hits, 1);
        assert!(signals.contrast.is_contradiction());
    }
}
