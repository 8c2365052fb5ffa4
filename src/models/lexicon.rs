use std::fmt;

use serde::{Deserialize, Serialize};

/// One independently scored dimension of affect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Mood,
    Energy,
    Anxiety,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::Mood, Axis::Energy, Axis::Anxiety];

    pub fn as_str(self) -> &'static str {
        match self {
            Axis::Mood => "mood",
            Axis::Energy => "energy",
            Axis::Anxiety => "anxiety",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signed effect of a keyword on each axis, each in [-5, +5]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisImpact {
    #[serde(default)]
    pub mood: f64,
    #[serde(default)]
    pub energy: f64,
    #[serde(default)]
    pub anxiety: f64,
}

impl AxisImpact {
    pub const fn new(mood: f64, energy: f64, anxiety: f64) -> Self {
        Self {
            mood,
            energy,
            anxiety,
        }
    }

    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Mood => self.mood,
            Axis::Energy => self.energy,
            Axis::Anxiety => self.anxiety,
        }
    }

    /// Sum of absolute impacts across all axes
    pub fn magnitude(&self) -> f64 {
        self.mood.abs() + self.energy.abs() + self.anxiety.abs()
    }

    /// Category key from the strongest axis and its sign, e.g. `mood+`
    pub fn dominant_category(&self) -> String {
        let strongest = Axis::ALL
            .into_iter()
            .max_by(|a, b| {
                self.get(*a)
                    .abs()
                    .partial_cmp(&self.get(*b).abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .unwrap_or(Axis::Mood);

        let value = self.get(strongest);
        if value == 0.0 {
            return "neutral".to_string();
        }
        let sign = if value > 0.0 { '+' } else { '-' };
        format!("{}{}", strongest, sign)
    }
}

/// A lexicon row: surface forms plus their effect on each axis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordPattern {
    /// Surface forms or phrases (final word tolerates inflectional suffixes)
    pub keywords: Vec<String>,
    /// Per-axis impact
    pub impact: AxisImpact,
    /// Reliability of this row (> 0)
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity: Option<String>,
    /// Broad semantic category used for saturation; derived from the impact when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl KeywordPattern {
    pub fn new(keywords: &[&str], impact: AxisImpact, weight: f64) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            impact,
            weight,
            emotion: None,
            trigger: None,
            activity: None,
            category: None,
        }
    }

    pub fn with_emotion(mut self, emotion: &str) -> Self {
        self.emotion = Some(emotion.to_string());
        self
    }

    pub fn with_trigger(mut self, trigger: &str) -> Self {
        self.trigger = Some(trigger.to_string());
        self
    }

    pub fn with_activity(mut self, activity: &str) -> Self {
        self.activity = Some(activity.to_string());
        self
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    /// Semantic category used for saturation damping
    pub fn category(&self) -> String {
        self.category
            .clone()
            .unwrap_or_else(|| self.impact.dominant_category())
    }

    /// Sign of the mood impact, used for polarity agreement
    pub fn polarity(&self) -> i8 {
        if self.impact.mood > 0.0 {
            1
        } else if self.impact.mood < 0.0 {
            -1
        } else {
            0
        }
    }
}

/// Canonical term and its equivalent surface forms
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynonymGroup {
    pub canonical: String,
    pub forms: Vec<String>,
}

impl SynonymGroup {
    pub fn new(canonical: &str, forms: &[&str]) -> Self {
        Self {
            canonical: canonical.to_string(),
            forms: forms.iter().map(|f| f.to_string()).collect(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.canonical == word || self.forms.iter().any(|f| f == word)
    }

    /// Every member of the group except `word`
    pub fn alternatives<'a>(&'a self, word: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        std::iter::once(self.canonical.as_str())
            .chain(self.forms.iter().map(String::as_str))
            .filter(move |f| *f != word)
    }
}

/// Phrase that scales the intensity of a following keyword
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntensityModifier {
    pub phrase: String,
    /// > 1.0 intensifies, < 1.0 diminishes
    pub multiplier: f64,
}

impl IntensityModifier {
    pub fn new(phrase: &str, multiplier: f64) -> Self {
        Self {
            phrase: phrase.to_string(),
            multiplier,
        }
    }
}

/// Verbal level named in an explicit self-report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclaredLevel {
    Zero,
    Low,
    Normal,
    Good,
    High,
}

impl DeclaredLevel {
    /// Axis value a declaration of this level maps to
    pub fn value(self) -> f64 {
        match self {
            DeclaredLevel::Zero => 1.0,
            DeclaredLevel::Low => 3.0,
            DeclaredLevel::Normal => 5.0,
            DeclaredLevel::Good => 7.0,
            DeclaredLevel::High => 8.0,
        }
    }
}

/// Word stem that names an axis directly ("enerji", "mod", ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AxisTerm {
    pub axis: Axis,
    pub term: String,
}

/// Word that names a level ("yüksek", "sıfır", ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelTerm {
    pub level: DeclaredLevel,
    pub term: String,
    /// Judges quality ("iyi", "kötü") rather than amount; never applied to
    /// anxiety, where "good" means low
    #[serde(default)]
    pub evaluative: bool,
}

/// The complete static lexicon. Loaded once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lexicon {
    pub patterns: Vec<KeywordPattern>,
    #[serde(default)]
    pub synonyms: Vec<SynonymGroup>,
    #[serde(default)]
    pub intensity_modifiers: Vec<IntensityModifier>,
    #[serde(default)]
    pub negation_words: Vec<String>,
    #[serde(default)]
    pub uncertainty_words: Vec<String>,
    #[serde(default)]
    pub crisis_phrases: Vec<String>,
    #[serde(default)]
    pub contrast_words: Vec<String>,
    #[serde(default)]
    pub axis_terms: Vec<AxisTerm>,
    #[serde(default)]
    pub level_terms: Vec<LevelTerm>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dominant_category() {
        assert_eq!(AxisImpact::new(3.0, 1.0, -1.0).dominant_category(), "mood+");
        assert_eq!(AxisImpact::new(-1.0, -3.0, 0.0).dominant_category(), "energy-");
        assert_eq!(AxisImpact::new(-2.0, 1.0, 3.0).dominant_category(), "anxiety+");
        assert_eq!(AxisImpact::default().dominant_category(), "neutral");
    }

    #[test]
    fn test_explicit_category_wins() {
        let pattern =
            KeywordPattern::new(&["toplantı"], AxisImpact::new(-0.5, 0.0, 1.0), 0.6)
                .with_category("work");
        assert_eq!(pattern.category(), "work");
    }

    #[test]
    fn test_synonym_alternatives() {
        let group = SynonymGroup::new("mutlu", &["neşeli", "sevinçli"]);
        let alts: Vec<&str> = group.alternatives("neşeli").collect();
        assert_eq!(alts, vec!["mutlu", "sevinçli"]);
        assert!(group.contains("mutlu"));
        assert!(!group.contains("üzgün"));
    }
}
