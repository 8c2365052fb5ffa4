use std::collections::HashSet;

use regex::Regex;
use tracing::debug;

use crate::error::LexiconError;
use crate::heuristics::ExplicitMatchers;
use crate::models::{Axis, KeywordPattern, Lexicon};
use crate::stages::stage0_normalize::normalize;

/// Word-boundary matcher whose final word accepts an inflectional suffix
///
/// "mutlu" matches "mutlu", "mutluyum" and "mutluluk" but not "umutlu";
/// "keyfim yerinde" matches "keyfim yerindeydi".
#[derive(Debug, Clone)]
pub struct TolerantMatcher {
    phrase: String,
    regex: Regex,
}

impl TolerantMatcher {
    /// Build a matcher for a normalized, non-empty phrase
    pub fn new(phrase: &str) -> Result<Self, LexiconError> {
        let words: Vec<String> = phrase.split_whitespace().map(regex::escape).collect();
        let pattern = format!(r"(?i)\b{}\p{{L}}*", words.join(r"\s+"));
        let regex = Regex::new(&pattern).map_err(|source| LexiconError::InvalidMatcher {
            phrase: phrase.to_string(),
            source,
        })?;

        Ok(Self {
            phrase: phrase.to_string(),
            regex,
        })
    }

    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    pub fn find_iter<'r, 't>(&'r self, text: &'t str) -> regex::Matches<'r, 't> {
        self.regex.find_iter(text)
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// A lexicon row with its matchers built
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pub pattern: KeywordPattern,
    /// Saturation category, resolved once
    pub category: String,
    /// Matchers for the row's own keywords
    pub direct: Vec<TolerantMatcher>,
    /// Matchers for synonyms of each keyword's head word
    pub synonyms: Vec<TolerantMatcher>,
}

impl CompiledPattern {
    pub fn matchers(&self) -> impl Iterator<Item = &TolerantMatcher> {
        self.direct.iter().chain(self.synonyms.iter())
    }
}

/// Intensity modifier split into tokens
#[derive(Debug, Clone)]
pub struct CompiledModifier {
    pub tokens: Vec<String>,
    pub multiplier: f64,
}

impl CompiledModifier {
    pub fn new(phrase: &str, multiplier: f64) -> Self {
        Self {
            tokens: normalize(phrase).split(' ').map(str::to_string).collect(),
            multiplier,
        }
    }
}

/// The lexicon after compilation: built once at startup, read-only after
/// that and safe to share between threads.
#[derive(Debug, Clone)]
pub struct CompiledLexicon {
    pub patterns: Vec<CompiledPattern>,
    pub modifiers: Vec<CompiledModifier>,
    pub negation_words: Vec<String>,
    pub uncertainty_phrases: Vec<Vec<String>>,
    pub contrast_phrases: Vec<Vec<String>>,
    pub crisis_phrases: Vec<String>,
    pub explicit: ExplicitMatchers,
}

fn phrase_tokens(words: &[String]) -> Vec<Vec<String>> {
    words
        .iter()
        .map(|w| normalize(w))
        .filter(|w| !w.is_empty())
        .map(|w| w.split(' ').map(str::to_string).collect())
        .collect()
}

impl CompiledLexicon {
    /// Validate and compile a lexicon
    pub fn compile(lexicon: &Lexicon) -> Result<Self, LexiconError> {
        validate(lexicon)?;

        let patterns = lexicon
            .patterns
            .iter()
            .map(|pattern| compile_pattern(pattern, lexicon))
            .collect::<Result<Vec<_>, _>>()?;

        let modifiers: Vec<CompiledModifier> = lexicon
            .intensity_modifiers
            .iter()
            .map(|m| CompiledModifier::new(&m.phrase, m.multiplier))
            .filter(|m| m.tokens.iter().all(|t| !t.is_empty()))
            .collect();

        let intensifiers: Vec<String> = modifiers
            .iter()
            .filter(|m| m.multiplier > 1.0 && m.tokens.len() == 1)
            .map(|m| m.tokens[0].clone())
            .collect();

        let explicit = ExplicitMatchers::compile(lexicon, intensifiers)?;

        let matcher_count: usize = patterns.iter().map(|p| p.direct.len() + p.synonyms.len()).sum();
        debug!(
            "Compiled {} patterns into {} matchers",
            patterns.len(),
            matcher_count
        );

        Ok(Self {
            patterns,
            modifiers,
            negation_words: lexicon
                .negation_words
                .iter()
                .map(|w| normalize(w))
                .filter(|w| !w.is_empty())
                .collect(),
            uncertainty_phrases: phrase_tokens(&lexicon.uncertainty_words),
            contrast_phrases: phrase_tokens(&lexicon.contrast_words),
            crisis_phrases: lexicon
                .crisis_phrases
                .iter()
                .map(|p| normalize(p))
                .filter(|p| !p.is_empty())
                .collect(),
            explicit,
        })
    }

    /// Compile the built-in Turkish lexicon
    pub fn builtin() -> Result<Self, LexiconError> {
        Self::compile(&Lexicon::default())
    }

    pub fn pattern(&self, index: usize) -> Option<&CompiledPattern> {
        self.patterns.get(index)
    }
}

fn validate(lexicon: &Lexicon) -> Result<(), LexiconError> {
    for (index, pattern) in lexicon.patterns.iter().enumerate() {
        if pattern.keywords.is_empty() {
            return Err(LexiconError::EmptyPattern { index });
        }
        if pattern.keywords.iter().any(|k| normalize(k).is_empty()) {
            return Err(LexiconError::BlankKeyword { index });
        }
        for axis in Axis::ALL {
            let value = pattern.impact.get(axis);
            if !(-5.0..=5.0).contains(&value) {
                return Err(LexiconError::ImpactOutOfRange { index, axis, value });
            }
        }
        if !(pattern.weight > 0.0) {
            return Err(LexiconError::NonPositiveWeight {
                index,
                weight: pattern.weight,
            });
        }
    }

    for modifier in &lexicon.intensity_modifiers {
        if !(modifier.multiplier > 0.0) {
            return Err(LexiconError::InvalidModifier {
                phrase: modifier.phrase.clone(),
                multiplier: modifier.multiplier,
            });
        }
    }

    Ok(())
}

fn compile_pattern(pattern: &KeywordPattern, lexicon: &Lexicon) -> Result<CompiledPattern, LexiconError> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut direct = Vec::new();
    let mut synonyms = Vec::new();

    let keywords: Vec<String> = pattern.keywords.iter().map(|k| normalize(k)).collect();

    for keyword in &keywords {
        if seen.insert(keyword.clone()) {
            direct.push(TolerantMatcher::new(keyword)?);
        }
    }

    for keyword in &keywords {
        let mut words = keyword.split(' ');
        let head = words.next().unwrap_or_default();
        let rest: Vec<&str> = words.collect();

        for group in lexicon.synonyms.iter().filter(|g| g.contains(head)) {
            for alternative in group.alternatives(head) {
                let alternative = normalize(alternative);
                if alternative.is_empty() {
                    continue;
                }
                let phrase = if rest.is_empty() {
                    alternative
                } else {
                    format!("{} {}", alternative, rest.join(" "))
                };
                if seen.insert(phrase.clone()) {
                    synonyms.push(TolerantMatcher::new(&phrase)?);
                }
            }
        }
    }

    Ok(CompiledPattern {
        category: pattern.category(),
        pattern: pattern.clone(),
        direct,
        synonyms,
    })
}
