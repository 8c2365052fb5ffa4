use regex::{Captures, Regex};

use crate::error::LexiconError;
use crate::models::{Axis, DeclaredLevel, Lexicon};
use crate::stages::stage0_normalize::normalize;

/// How a self-report was phrased
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationSource {
    /// "8/10", "%70", "10 üzerinden 8"
    Numeric,
    /// "enerjim yüksek", "modum düşük"
    Verbal,
}

/// A direct self-report of an axis value
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub axis: Axis,
    /// Declared value in [1, 10]
    pub value: f64,
    /// An intensifier sat between the axis term and the level ("çok yüksek")
    pub intensified: bool,
    pub source: DeclarationSource,
    /// Byte span in the scanned text
    pub start: usize,
    pub end: usize,
}

impl Declaration {
    /// Value pushed `boost` further from `center` when intensified
    pub fn boosted_value(&self, center: f64, boost: f64, min: f64, max: f64) -> f64 {
        if !self.intensified {
            return self.value;
        }
        let pushed = if self.value > center {
            self.value + boost
        } else if self.value < center {
            self.value - boost
        } else {
            self.value
        };
        pushed.clamp(min, max)
    }
}

/// All declarations found in one text, in order of appearance
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Declarations {
    items: Vec<Declaration>,
}

impl Declarations {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.items.iter()
    }

    /// The last declaration for `axis`; later statements win
    pub fn latest(&self, axis: Axis) -> Option<&Declaration> {
        self.items.iter().rev().find(|d| d.axis == axis)
    }

    /// Declared axes in canonical order
    pub fn axes(&self) -> Vec<Axis> {
        Axis::ALL
            .into_iter()
            .filter(|a| self.latest(*a).is_some())
            .collect()
    }
}

/// Compiled recognizers for explicit self-reports
#[derive(Debug, Clone)]
pub struct ExplicitMatchers {
    /// axis term, up to two filler words, level term
    verbal_forward: Option<Regex>,
    /// level term directly followed by an axis term
    verbal_reverse: Option<Regex>,
    numeric: Regex,
    /// A single token that is an inflected axis term
    axis_token: Option<Regex>,
    axis_terms: Vec<(String, Axis)>,
    /// (term, (level, evaluative))
    level_terms: Vec<(String, (DeclaredLevel, bool))>,
    /// Single-word intensifiers that mark a declaration as intensified
    intensifiers: Vec<String>,
    /// Words that may not appear between an axis term and its level
    blockers: Vec<String>,
}

/// Plural, possessive and case endings an axis noun may carry ("enerjim",
/// "moralimi", "kaygısı"); derivations like "enerjik" or "modern" fail
const AXIS_SUFFIX: &str =
    r"(?:l[ae]r)?(?:[ıiuü]?m(?:[ıiuü]z)?|[ıiuü]?n(?:[ıiuü]z)?|s?[ıiuü])?(?:n[ıiuü]n|[yn]?[ıiuüae]|n?[dt][ae]n?)?";

/// "-li" adjective plus copula, allowed only after a level term
/// ("yüksek enerjiliyim")
const AXIS_ADJECTIVE_SUFFIX: &str = r"l[ıiuü]\p{L}*";

fn alternation(terms: &[String]) -> String {
    terms
        .iter()
        .map(|t| {
            t.split_whitespace()
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(r"\s+")
        })
        .collect::<Vec<_>>()
        .join("|")
}

fn build(pattern: &str, phrase: &str) -> Result<Regex, LexiconError> {
    Regex::new(pattern).map_err(|source| LexiconError::InvalidMatcher {
        phrase: phrase.to_string(),
        source,
    })
}

/// Normalize and sort longest-first so alternation prefers "çok iyi" over "iyi"
fn prepare_terms<T: Copy>(terms: impl Iterator<Item = (String, T)>) -> Vec<(String, T)> {
    let mut prepared: Vec<(String, T)> = terms
        .map(|(term, tag)| (normalize(&term), tag))
        .filter(|(term, _)| !term.is_empty())
        .collect();
    prepared.sort_by(|a, b| b.0.chars().count().cmp(&a.0.chars().count()));
    prepared
}

impl ExplicitMatchers {
    /// Build the recognizers from the lexicon's axis and level vocabulary
    pub fn compile(lexicon: &Lexicon, intensifiers: Vec<String>) -> Result<Self, LexiconError> {
        let axis_terms = prepare_terms(lexicon.axis_terms.iter().map(|t| (t.term.clone(), t.axis)));
        let level_terms = prepare_terms(
            lexicon
                .level_terms
                .iter()
                .map(|t| (t.term.clone(), (t.level, t.evaluative))),
        );

        let (verbal_forward, verbal_reverse) = if axis_terms.is_empty() || level_terms.is_empty() {
            (None, None)
        } else {
            let axis_alt =
                alternation(&axis_terms.iter().map(|(t, _)| t.clone()).collect::<Vec<_>>());
            let level_alt =
                alternation(&level_terms.iter().map(|(t, _)| t.clone()).collect::<Vec<_>>());

            let forward = format!(
                r"(?i)\b(?P<axis>{axis_alt}){AXIS_SUFFIX}(?P<filler>(?:\s+\p{{L}}+){{0,2}}?)\s+(?P<level>{level_alt})\p{{L}}*"
            );
            let reverse = format!(
                r"(?i)\b(?P<level>{level_alt})\s+(?P<axis>{axis_alt})(?:{AXIS_ADJECTIVE_SUFFIX}|{AXIS_SUFFIX})\b"
            );

            (
                Some(build(&forward, "axis/level declaration")?),
                Some(build(&reverse, "level/axis declaration")?),
            )
        };

        let single_words: Vec<String> = axis_terms
            .iter()
            .filter(|(t, _)| !t.contains(' '))
            .map(|(t, _)| t.clone())
            .collect();
        let axis_token = if single_words.is_empty() {
            None
        } else {
            let pattern = format!(r"(?i)^(?P<axis>{}){AXIS_SUFFIX}$", alternation(&single_words));
            Some(build(&pattern, "axis term")?)
        };

        let numeric = build(
            r"(?i)(?:\b(?P<num>\d{1,3})\s*/\s*(?P<den>\d{1,3})\b)|(?:\b(?P<den2>\d{1,3})\s+üzerinden\s+(?P<num2>\d{1,3})\b)|(?:(?:%\s*|\byüzde\s+)(?P<pct>\d{1,3})\b)|(?:\b(?P<pct2>\d{1,3})\s*%)",
            "numeric declaration",
        )?;

        let mut blockers: Vec<String> = lexicon
            .contrast_words
            .iter()
            .map(|w| normalize(w))
            .filter(|w| !w.is_empty() && !w.contains(' '))
            .collect();
        blockers.push("ve".to_string());

        Ok(Self {
            verbal_forward,
            verbal_reverse,
            numeric,
            axis_token,
            axis_terms,
            level_terms,
            intensifiers,
            blockers,
        })
    }

    /// Find every self-report in normalized text
    pub fn detect(&self, text: &str) -> Declarations {
        let mut items = Vec::new();
        let mut forward_spans: Vec<(usize, usize)> = Vec::new();

        if let Some(forward) = &self.verbal_forward {
            for caps in forward.captures_iter(text) {
                let filler = caps.name("filler").map_or("", |m| m.as_str());
                let filler_words: Vec<&str> = filler.split_whitespace().collect();
                if filler_words.iter().any(|w| self.blockers.iter().any(|b| b == w)) {
                    continue;
                }
                let Some(decl) = self.verbal(&caps, &filler_words) else {
                    continue;
                };
                if let Some(whole) = caps.get(0) {
                    forward_spans.push((whole.start(), whole.end()));
                }
                items.push(decl);
            }
        }

        if let Some(reverse) = &self.verbal_reverse {
            for caps in reverse.captures_iter(text) {
                let Some(whole) = caps.get(0) else { continue };
                let overlaps = forward_spans
                    .iter()
                    .any(|&(s, e)| whole.start() < e && s < whole.end());
                if overlaps {
                    continue;
                }
                if let Some(decl) = self.verbal(&caps, &[]) {
                    items.push(decl);
                }
            }
        }

        for caps in self.numeric.captures_iter(text) {
            if let Some(decl) = self.numeric(text, &caps) {
                items.push(decl);
            }
        }

        items.sort_by_key(|d| d.start);
        Declarations { items }
    }

    fn verbal(&self, caps: &Captures<'_>, filler_words: &[&str]) -> Option<Declaration> {
        let whole = caps.get(0)?;
        let axis_text = caps.name("axis")?.as_str();
        let level_text = caps.name("level")?.as_str();
        let axis = self.axis_for(axis_text)?;
        let (level, evaluative) = self
            .level_terms
            .iter()
            .find(|(term, _)| same_phrase(term, level_text))
            .map(|(_, tag)| *tag)?;
        if evaluative && axis == Axis::Anxiety {
            return None;
        }

        let intensified = filler_words
            .iter()
            .any(|w| self.intensifiers.iter().any(|i| i == w));

        Some(Declaration {
            axis,
            value: level.value(),
            intensified,
            source: DeclarationSource::Verbal,
            start: whole.start(),
            end: whole.end(),
        })
    }

    fn numeric(&self, text: &str, caps: &Captures<'_>) -> Option<Declaration> {
        let whole = caps.get(0)?;
        let parse = |name: &str| caps.name(name).and_then(|m| m.as_str().parse::<f64>().ok());

        let value = if let (Some(num), Some(den)) = (
            parse("num").or_else(|| parse("num2")),
            parse("den").or_else(|| parse("den2")),
        ) {
            // Only scales people actually use; "3/4" is more likely a date or ratio
            if !matches!(den as u32, 5 | 10 | 100) || num > den {
                return None;
            }
            num / den * 10.0
        } else {
            let pct = parse("pct").or_else(|| parse("pct2"))?;
            if pct > 100.0 {
                return None;
            }
            pct / 10.0
        };

        let axis = self.axis_near(text, whole.start(), whole.end()).unwrap_or(Axis::Mood);

        Some(Declaration {
            axis,
            value: value.clamp(1.0, 10.0),
            intensified: false,
            source: DeclarationSource::Numeric,
            start: whole.start(),
            end: whole.end(),
        })
    }

    fn axis_for(&self, text: &str) -> Option<Axis> {
        self.axis_terms
            .iter()
            .find(|(term, _)| same_phrase(term, text))
            .map(|(_, axis)| *axis)
    }

    /// Axis named in the three tokens before a number, else the two after
    fn axis_near(&self, text: &str, start: usize, end: usize) -> Option<Axis> {
        let axis_token = self.axis_token.as_ref()?;
        let before: Vec<&str> = text[..start].split_whitespace().collect();
        let after: Vec<&str> = text[end..].split_whitespace().take(2).collect();

        before
            .iter()
            .rev()
            .take(3)
            .chain(after.iter())
            .find_map(|token| {
                let caps = axis_token.captures(token)?;
                self.axis_for(caps.name("axis")?.as_str())
            })
    }
}

/// Compare phrases ignoring differences in internal whitespace
fn same_phrase(a: &str, b: &str) -> bool {
    a.split_whitespace().eq(b.split_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matchers() -> ExplicitMatchers {
        let lexicon = Lexicon::default();
        ExplicitMatchers::compile(&lexicon, vec!["çok".to_string(), "gerçekten".to_string()])
            .unwrap()
    }

    #[test]
    fn test_verbal_energy_high() {
        let decls = matchers().detect("bugün çok mutluyum enerjim yüksek");
        let energy = decls.latest(Axis::Energy).unwrap();

        assert_eq!(energy.value, 8.0);
        assert!(!energy.intensified);
        assert_eq!(energy.source, DeclarationSource::Verbal);
        assert!(decls.latest(Axis::Mood).is_none());
    }

    #[test]
    fn test_intensified_declaration() {
        let decls = matchers().detect("enerjim çok yüksek");
        let energy = decls.latest(Axis::Energy).unwrap();
        assert!(energy.intensified);
        assert_eq!(energy.boosted_value(5.5, 1.5, 1.0, 10.0), 9.5);
    }

    #[test]
    fn test_zero_and_low_levels() {
        let m = matchers();
        assert_eq!(m.detect("enerjim sıfır").latest(Axis::Energy).unwrap().value, 1.0);
        assert_eq!(m.detect("kaygım yok").latest(Axis::Anxiety).unwrap().value, 1.0);
        assert_eq!(m.detect("moralim düşük").latest(Axis::Mood).unwrap().value, 3.0);
        assert_eq!(m.detect("modum normal").latest(Axis::Mood).unwrap().value, 5.0);
    }

    #[test]
    fn test_reverse_order() {
        let decls = matchers().detect("bugün yüksek enerjiliyim");
        assert_eq!(decls.latest(Axis::Energy).unwrap().value, 8.0);
    }

    #[test]
    fn test_numeric_declarations() {
        let m = matchers();
        let decls = m.detect("modum 8/10");
        assert_eq!(decls.latest(Axis::Mood).unwrap().value, 8.0);
        assert_eq!(decls.latest(Axis::Mood).unwrap().source, DeclarationSource::Numeric);

        assert_eq!(m.detect("enerjim %70").latest(Axis::Energy).unwrap().value, 7.0);
        assert_eq!(m.detect("kaygım 10 üzerinden 3").latest(Axis::Anxiety).unwrap().value, 3.0);
        assert_eq!(m.detect("bugün 4/5").latest(Axis::Mood).unwrap().value, 8.0);
    }

    #[test]
    fn test_numeric_rejects_odd_scales() {
        let m = matchers();
        assert!(m.detect("saat 3/4 gibi").is_empty());
        assert!(m.detect("modum 12/10").is_empty());
    }

    #[test]
    fn test_contrast_word_blocks_declaration() {
        let decls = matchers().detect("stresliyim ama iyiyim");
        assert!(decls.latest(Axis::Anxiety).is_none());
    }

    #[test]
    fn test_evaluative_levels_skip_anxiety() {
        let m = matchers();
        assert!(m.detect("kaygım iyi").latest(Axis::Anxiety).is_none());
        assert_eq!(m.detect("kaygım düşük").latest(Axis::Anxiety).unwrap().value, 3.0);
        assert_eq!(m.detect("modum iyi").latest(Axis::Mood).unwrap().value, 7.0);
    }

    #[test]
    fn test_later_declaration_wins() {
        let decls = matchers().detect("enerjim düşük sonra enerjim yüksek oldu");
        assert_eq!(decls.latest(Axis::Energy).unwrap().value, 8.0);
        assert_eq!(decls.axes(), vec![Axis::Energy]);
    }

    #[test]
    fn test_axis_stem_needs_inflection_not_derivation() {
        let m = matchers();
        assert!(m.detect("enerjik hissediyorum çok iyi").is_empty());
        assert!(m.detect("modern bir ev güzel").is_empty());
        assert_eq!(m.detect("enerjimiz düşük").latest(Axis::Energy).unwrap().value, 3.0);
        assert_eq!(m.detect("ruh halim iyi").latest(Axis::Mood).unwrap().value, 7.0);
        assert_eq!(m.detect("kaygısı yok").latest(Axis::Anxiety).unwrap().value, 1.0);
    }

    #[test]
    fn test_numeric_axis_ignores_derived_words() {
        let m = matchers();
        assert_eq!(m.detect("enerjim 3/10").latest(Axis::Energy).unwrap().value, 3.0);
        let decls = m.detect("enerjik bir gün 8/10");
        assert!(decls.latest(Axis::Energy).is_none());
        assert_eq!(decls.latest(Axis::Mood).unwrap().value, 8.0);
    }
}
