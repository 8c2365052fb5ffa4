use crate::config::AxisBaselines;
use crate::lexicon::CompiledLexicon;
use crate::models::{Axis, IntensityBucket, SentimentBucket};
use crate::stages::{AxisScores, KeywordMatch};

/// Tags and surface forms collected from a match set
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Entities {
    /// Emotion tag with the highest accumulated weight
    pub top_emotion: Option<String>,
    pub triggers: Vec<String>,
    pub activities: Vec<String>,
    pub keywords: Vec<String>,
    pub emotion_signals: Vec<String>,
}

fn push_unique(list: &mut Vec<String>, value: &str) {
    if !list.iter().any(|v| v == value) {
        list.push(value.to_string());
    }
}

/// Collect de-duplicated entities in order of first appearance
///
/// Negated matches still report their keyword, trigger and activity, but
/// carry no emotion: "mutlu değilim" is not evidence of happiness.
pub fn extract_entities(matches: &[KeywordMatch], lexicon: &CompiledLexicon) -> Entities {
    let mut entities = Entities::default();
    let mut emotion_weights: Vec<(String, f64)> = Vec::new();

    for m in matches {
        let Some(compiled) = lexicon.pattern(m.pattern_index) else {
            continue;
        };
        let pattern = &compiled.pattern;

        push_unique(&mut entities.keywords, &m.surface);
        if let Some(trigger) = &pattern.trigger {
            push_unique(&mut entities.triggers, trigger);
        }
        if let Some(activity) = &pattern.activity {
            push_unique(&mut entities.activities, activity);
        }

        if m.negated {
            continue;
        }
        if let Some(emotion) = &pattern.emotion {
            push_unique(&mut entities.emotion_signals, emotion);
            let weight = pattern.weight * m.intensity;
            match emotion_weights.iter_mut().find(|(e, _)| e == emotion) {
                Some((_, total)) => *total += weight,
                None => emotion_weights.push((emotion.clone(), weight)),
            }
        }
    }

    // Strictly greater keeps the first-seen tag on ties
    let mut best: Option<&(String, f64)> = None;
    for entry in &emotion_weights {
        if best.is_none_or(|b| entry.1 > b.1) {
            best = Some(entry);
        }
    }
    entities.top_emotion = best.map(|(e, _)| e.clone());

    entities
}

/// Label derived from the axis values alone
fn axis_label(scores: &AxisScores) -> &'static str {
    if scores.mood >= 7.0 {
        "happy"
    } else if scores.mood <= 3.0 {
        "sad"
    } else if scores.anxiety >= 7.0 {
        "anxious"
    } else if scores.energy <= 3.0 {
        "tired"
    } else if scores.energy >= 7.0 {
        "energetic"
    } else {
        "neutral"
    }
}

/// Final dominant emotion, considering the axis combination first
///
/// 1. High anxiety with high energy and non-negative mood reads as "excited"
/// 2. Every axis near its baseline reads as "neutral"
/// 3. Otherwise the strongest emotion tag, falling back to an axis label
pub fn final_emotion(scores: &AxisScores, top_emotion: Option<&str>, baselines: &AxisBaselines) -> String {
    if scores.anxiety >= 7.0 && scores.energy >= 7.0 && scores.mood >= 5.0 {
        return "excited".to_string();
    }

    let near_baseline = Axis::ALL
        .into_iter()
        .all(|axis| (scores.get(axis) - baselines.get(axis)).abs() <= 1.0);
    if near_baseline {
        return "neutral".to_string();
    }

    match top_emotion {
        Some(emotion) => emotion.to_string(),
        None => axis_label(scores).to_string(),
    }
}

/// Bucket the mean match intensity
pub fn intensity_bucket(matches: &[KeywordMatch]) -> IntensityBucket {
    if matches.is_empty() {
        return IntensityBucket::Low;
    }
    let mean = matches.iter().map(|m| m.intensity).sum::<f64>() / matches.len() as f64;
    if mean < 0.9 {
        IntensityBucket::Low
    } else if mean > 1.3 {
        IntensityBucket::High
    } else {
        IntensityBucket::Medium
    }
}

pub fn sentiment_bucket(mood_score: u8) -> SentimentBucket {
    match mood_score {
        0..=4 => SentimentBucket::Negative,
        5 => SentimentBucket::Neutral,
        _ => SentimentBucket::Positive,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScoringConfig;
    use crate::stages::{find_matches, NormalizedText};

    fn matches_for(text: &str) -> (Vec<KeywordMatch>, CompiledLexicon) {
        let lexicon = CompiledLexicon::builtin().unwrap();
        let text = NormalizedText::new(text);
        let matches = find_matches(&text, &lexicon, &ScoringConfig::default(), 1.0);
        (matches, lexicon)
    }

    fn scores(mood: f64, energy: f64, anxiety: f64) -> AxisScores {
        AxisScores {
            mood,
            energy,
            anxiety,
            explicit_axes: vec![],
            contributions: Default::default(),
            contradiction: false,
            segments: vec![],
        }
    }

    #[test]
    fn test_collects_triggers_and_activities() {
        let (matches, lexicon) = matches_for("patronum yüzünden stresliyim, akşam yoga yaptım, patron yine aradı");
        let entities = extract_entities(&matches, &lexicon);

        assert_eq!(entities.triggers, vec!["work"]);
        assert_eq!(entities.activities, vec!["exercise"]);
        assert_eq!(entities.top_emotion.as_deref(), Some("stressed"));
        assert!(entities.keywords.contains(&"yoga".to_string()));
    }

    #[test]
    fn test_top_emotion_by_weight() {
        let (matches, lexicon) = matches_for("biraz yorgunum ama çok mutluyum");
        let entities = extract_entities(&matches, &lexicon);
        assert_eq!(entities.top_emotion.as_deref(), Some("happy"));
        assert_eq!(entities.emotion_signals, vec!["tired", "happy"]);
    }

    #[test]
    fn test_negated_match_carries_no_emotion() {
        let (matches, lexicon) = matches_for("mutlu değilim");
        let entities = extract_entities(&matches, &lexicon);
        assert!(entities.top_emotion.is_none());
        assert_eq!(entities.keywords, vec!["mutlu"]);
    }

    #[test]
    fn test_final_emotion_order() {
        let baselines = AxisBaselines::default();
        assert_eq!(final_emotion(&scores(6.0, 8.0, 8.0), Some("anxious"), &baselines), "excited");
        assert_eq!(final_emotion(&scores(5.5, 5.0, 4.5), Some("happy"), &baselines), "neutral");
        assert_eq!(final_emotion(&scores(8.0, 6.0, 3.0), Some("content"), &baselines), "content");
        assert_eq!(final_emotion(&scores(2.0, 4.0, 5.0), None, &baselines), "sad");
        assert_eq!(final_emotion(&scores(5.0, 2.0, 4.0), None, &baselines), "tired");
    }

    #[test]
    fn test_buckets() {
        assert_eq!(intensity_bucket(&[]), IntensityBucket::Low);
        let (matches, _) = matches_for("çok mutluyum");
        assert_eq!(intensity_bucket(&matches), IntensityBucket::High);
        let (matches, _) = matches_for("mutluyum");
        assert_eq!(intensity_bucket(&matches), IntensityBucket::Medium);

        assert_eq!(sentiment_bucket(8), SentimentBucket::Positive);
        assert_eq!(sentiment_bucket(5), SentimentBucket::Neutral);
        assert_eq!(sentiment_bucket(4), SentimentBucket::Negative);
    }
}
