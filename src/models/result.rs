use serde::{Deserialize, Serialize};

/// Coarse strength of the matched vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntensityBucket {
    Low,
    Medium,
    High,
}

/// Coarse valence of the final mood score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentBucket {
    Negative,
    Neutral,
    Positive,
}

/// Explainability data attached to every result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisDetails {
    /// Surface forms that matched
    pub keywords: Vec<String>,
    /// Emotion tags carried by the matches
    pub emotion_signals: Vec<String>,
    pub intensity_bucket: IntensityBucket,
    pub sentiment_bucket: SentimentBucket,
    /// Whether a contrastive conjunction split the utterance
    pub contradiction: bool,
    /// Clauses on either side of contrastive conjunctions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub segments: Vec<String>,
    /// Axes whose value came from a direct self-report
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub explicit_axes: Vec<super::Axis>,
    /// Number of matches dampened by a nearby negation
    pub negated_matches: usize,
}

impl Default for AnalysisDetails {
    fn default() -> Self {
        Self {
            keywords: vec![],
            emotion_signals: vec![],
            intensity_bucket: IntensityBucket::Low,
            sentiment_bucket: SentimentBucket::Neutral,
            contradiction: false,
            segments: vec![],
            explicit_axes: vec![],
            negated_matches: 0,
        }
    }
}

/// Final output of the batch analyzer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// 1-10
    pub mood_score: u8,
    /// 1-10
    pub energy_level: u8,
    /// 1-10
    pub anxiety_level: u8,
    pub dominant_emotion: String,
    pub triggers: Vec<String>,
    pub activities: Vec<String>,
    /// Original text, or a diagnostic when no analysis was possible
    pub notes: String,
    /// 0.2-0.95
    pub confidence: f64,
    pub details: AnalysisDetails,
}

impl AnalysisResult {
    /// Fixed fallback used for short, empty or failed input
    pub fn neutral(
        mood_score: u8,
        energy_level: u8,
        anxiety_level: u8,
        confidence: f64,
        notes: String,
    ) -> Self {
        Self {
            mood_score,
            energy_level,
            anxiety_level,
            dominant_emotion: "neutral".to_string(),
            triggers: vec![],
            activities: vec![],
            notes,
            confidence,
            details: AnalysisDetails::default(),
        }
    }
}
