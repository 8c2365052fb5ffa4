use std::cmp::Reverse;
use std::collections::HashSet;

use tracing::debug;

use crate::config::ScoringConfig;
use crate::heuristics::{is_negated, local_intensity};
use crate::lexicon::CompiledLexicon;
use crate::stages::NormalizedText;

/// A single lexicon hit in normalized text
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordMatch {
    /// Index into `CompiledLexicon::patterns`
    pub pattern_index: usize,
    /// Matched text, suffix included
    pub surface: String,
    /// Byte span in the normalized text
    pub start: usize,
    pub end: usize,
    /// Token span (inclusive)
    pub first_token: usize,
    pub last_token: usize,
    /// Local modifier, repetition bonus and negation damping combined
    pub intensity: f64,
    pub negated: bool,
    /// Recency weight; 1.0 outside the realtime path
    pub recency: f64,
}

/// Run every compiled pattern over the whole text
pub fn find_matches(
    text: &NormalizedText,
    lexicon: &CompiledLexicon,
    config: &ScoringConfig,
    repetition_multiplier: f64,
) -> Vec<KeywordMatch> {
    find_matches_from(text, lexicon, config, repetition_multiplier, 0)
}

/// Run every compiled pattern, keeping only matches that end at or after
/// token `from_token`
///
/// The whole text is scanned so modifier and negation windows can reach
/// back into older tokens. Overlapping hits from different patterns are
/// resolved before filtering. Results are ordered by position, then pattern.
pub fn find_matches_from(
    text: &NormalizedText,
    lexicon: &CompiledLexicon,
    config: &ScoringConfig,
    repetition_multiplier: f64,
    from_token: usize,
) -> Vec<KeywordMatch> {
    let tokens = text.tokens();
    let mut matches = Vec::new();

    for span in resolve_overlaps(candidate_spans(text, lexicon)) {
        let first_token = text.token_index_at(span.start);
        let last_token = text.token_index_at(span.end.saturating_sub(1));
        if last_token < from_token {
            continue;
        }

        let negated = is_negated(
            &tokens,
            first_token,
            last_token,
            &lexicon.negation_words,
            config.negation_window_tokens,
        );

        let mut intensity = local_intensity(
            &tokens,
            first_token,
            &lexicon.modifiers,
            config.intensity_window_tokens,
        ) * repetition_multiplier;
        if negated {
            intensity *= config.negation_dampening;
        }

        matches.push(KeywordMatch {
            pattern_index: span.pattern_index,
            surface: text.as_str()[span.start..span.end].to_string(),
            start: span.start,
            end: span.end,
            first_token,
            last_token,
            intensity,
            negated,
            recency: 1.0,
        });
    }

    matches.sort_by_key(|m| (m.start, m.pattern_index));

    for m in &matches {
        debug!(
            "Matched '{}' (pattern {}) intensity {:.2}{}",
            m.surface,
            m.pattern_index,
            m.intensity,
            if m.negated { " [negated]" } else { "" }
        );
    }

    matches
}

#[derive(Debug, Clone, Copy)]
struct Span {
    pattern_index: usize,
    start: usize,
    end: usize,
}

impl Span {
    fn len(&self) -> usize {
        self.end - self.start
    }

    fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

fn candidate_spans(text: &NormalizedText, lexicon: &CompiledLexicon) -> Vec<Span> {
    let mut spans = Vec::new();

    for (pattern_index, compiled) in lexicon.patterns.iter().enumerate() {
        // Direct and synonym matchers can hit the same spot
        let mut starts: HashSet<usize> = HashSet::new();

        for matcher in compiled.matchers() {
            for found in matcher.find_iter(text.as_str()) {
                if starts.insert(found.start()) {
                    spans.push(Span {
                        pattern_index,
                        start: found.start(),
                        end: found.end(),
                    });
                }
            }
        }
    }

    spans
}

/// Keep one pattern per stretch of text: longest span first, earlier
/// pattern on ties
fn resolve_overlaps(mut spans: Vec<Span>) -> Vec<Span> {
    spans.sort_by_key(|s| (Reverse(s.len()), s.pattern_index, s.start));

    let mut kept: Vec<Span> = Vec::with_capacity(spans.len());
    for span in spans {
        if !kept.iter().any(|k| k.overlaps(&span)) {
            kept.push(span);
        }
    }
    kept
}
