use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::models::Axis;

/// Starting value of each axis before any evidence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisBaselines {
    pub mood: f64,
    pub energy: f64,
    /// Slightly below neutral: calm statements are rarely anxiety-flagged
    pub anxiety: f64,
}

impl Default for AxisBaselines {
    fn default() -> Self {
        Self {
            mood: 5.0,
            energy: 5.0,
            anxiety: 4.0,
        }
    }
}

impl AxisBaselines {
    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Mood => self.mood,
            Axis::Energy => self.energy,
            Axis::Anxiety => self.anxiety,
        }
    }
}

/// Configuration for lexical matching and axis scoring
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub baselines: AxisBaselines,
    /// Lower clamp for every axis
    pub axis_min: f64,
    /// Upper clamp for every axis
    pub axis_max: f64,
    /// Normalized texts shorter than this (in chars) get the neutral result
    pub min_text_chars: usize,
    /// Tokens before a match scanned for intensity modifiers
    pub intensity_window_tokens: usize,
    /// Tokens on either side of a match scanned for negation words
    pub negation_window_tokens: usize,
    /// Intensity multiplier applied to negated matches
    pub negation_dampening: f64,
    /// Added to the global intensity multiplier per repeated intensifier
    pub repetition_bonus: f64,
    /// Maximum repetitions counted
    pub max_repetitions: usize,
    /// Occurrence count at which category saturation stops growing
    pub saturation_cap: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            baselines: AxisBaselines::default(),
            axis_min: 1.0,
            axis_max: 10.0,
            min_text_chars: 5,
            intensity_window_tokens: 5,
            negation_window_tokens: 6,
            negation_dampening: 0.3,
            repetition_bonus: 0.2,
            max_repetitions: 3,
            saturation_cap: 4,
        }
    }
}

impl ScoringConfig {
    pub fn clamp_axis(&self, value: f64) -> f64 {
        value.clamp(self.axis_min, self.axis_max)
    }

    /// Clamp and round to the reported integer scale
    pub fn axis_score(&self, value: f64) -> u8 {
        self.clamp_axis(value).round() as u8
    }
}

/// Configuration for the confidence estimator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceConfig {
    /// Used when the caller supplies text without a transcription score
    pub default_transcription_confidence: f64,
    pub min_confidence: f64,
    pub max_confidence: f64,
    /// Confidence reported with the neutral result
    pub insufficient_confidence: f64,
    /// Text length (chars) at which the length factor reaches 1.0
    pub length_reference_chars: f64,
    /// Bonus per tag kind (emotion, trigger, activity) present
    pub diversity_bonus_per_kind: f64,
    /// Share of emotion matches that must agree in polarity
    pub polarity_agreement: f64,
    pub polarity_bonus: f64,
    /// Match intensity counted as high-intensity vocabulary
    pub high_intensity: f64,
    /// Mean intensity required alongside high-intensity vocabulary
    pub high_mean_intensity: f64,
    pub intensity_bonus: f64,
    pub negation_penalty_per_match: f64,
    pub max_negation_penalty: f64,
    pub uncertainty_penalty_per_hedge: f64,
    pub max_uncertainty_penalty: f64,
    /// Word count above which the uncertainty penalty shrinks
    pub uncertainty_reference_words: f64,
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            default_transcription_confidence: 0.85,
            min_confidence: 0.2,
            max_confidence: 0.95,
            insufficient_confidence: 0.2,
            length_reference_chars: 50.0,
            diversity_bonus_per_kind: 0.05,
            polarity_agreement: 0.7,
            polarity_bonus: 0.1,
            high_intensity: 1.5,
            high_mean_intensity: 1.3,
            intensity_bonus: 0.05,
            negation_penalty_per_match: 0.1,
            max_negation_penalty: 0.3,
            uncertainty_penalty_per_hedge: 0.08,
            max_uncertainty_penalty: 0.3,
            uncertainty_reference_words: 20.0,
        }
    }
}

/// Configuration for the streaming engine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RealtimeConfig {
    /// Minimum smoothing factor (weak evidence)
    pub smoothing_floor: f64,
    /// Smoothing factor gained per unit of signal strength
    pub smoothing_gain: f64,
    /// Upper bound for the signal-driven smoothing factor
    pub max_alpha: f64,
    /// Smoothing factor for axes with an explicit declaration
    pub explicit_alpha: f64,
    /// Token distance over which recency weight decays by 1/e
    pub recency_decay: f64,
    /// Weighted impact at which signal strength reaches 1 - 1/e
    pub signal_saturation: f64,
    /// Below this signal strength a chunk arms the gate
    pub weak_signal_threshold: f64,
    /// At or above this signal strength a chunk clears the gate
    pub strong_signal_threshold: f64,
    /// Deltas shorter than this (chars) arm the gate
    pub min_chunk_chars: usize,
    /// Deltas with fewer words arm the gate
    pub min_chunk_words: usize,
    pub gate_duration_ms: i64,
    /// Meta-conversation phrases that arm the gate
    pub filler_phrases: Vec<String>,
    /// LCP shorter than this (chars) is checked for echoes
    pub echo_min_prefix_chars: usize,
    /// Token window used for duplicate-tail suppression
    pub duplicate_window_tokens: usize,
    /// Trailing tokens re-checked for explicit declarations
    pub explicit_window_tokens: usize,
    /// How far an intensified declaration is pushed toward the extreme
    pub explicit_boost: f64,
    /// Axis value mapped to coordinate 0
    pub coordinate_center: f64,
    /// Axis distance mapped to coordinate ±1
    pub coordinate_span: f64,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            smoothing_floor: 0.15,
            smoothing_gain: 0.6,
            max_alpha: 0.8,
            explicit_alpha: 0.8,
            recency_decay: 8.0,
            signal_saturation: 3.0,
            weak_signal_threshold: 0.25,
            strong_signal_threshold: 0.6,
            min_chunk_chars: 6,
            min_chunk_words: 2,
            gate_duration_ms: 1_500,
            filler_phrases: vec![
                "test".to_string(),
                "deneme".to_string(),
                "demo".to_string(),
                "ses kontrol".to_string(),
                "bir iki üç".to_string(),
                "beni duyuyor musun".to_string(),
                "kayıt".to_string(),
                "mikrofon".to_string(),
            ],
            echo_min_prefix_chars: 5,
            duplicate_window_tokens: 3,
            explicit_window_tokens: 15,
            explicit_boost: 1.5,
            coordinate_center: 5.5,
            coordinate_span: 4.5,
        }
    }
}

/// Every recognized tunable, grouped by component
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub scoring: ScoringConfig,
    pub confidence: ConfidenceConfig,
    pub realtime: RealtimeConfig,
}

impl EngineConfig {
    /// Reject tunables that would break clamping or smoothing
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scoring = &self.scoring;
        ordered("scoring.axis_min", scoring.axis_min, "scoring.axis_max", scoring.axis_max)?;
        for axis in Axis::ALL {
            finite("scoring.baselines", scoring.baselines.get(axis))?;
        }
        within("scoring.negation_dampening", scoring.negation_dampening, 0.0, 1.0, "[0, 1]")?;
        non_negative("scoring.repetition_bonus", scoring.repetition_bonus)?;
        positive("scoring.saturation_cap", scoring.saturation_cap as f64)?;

        let confidence = &self.confidence;
        within("confidence.min_confidence", confidence.min_confidence, 0.0, 1.0, "[0, 1]")?;
        within("confidence.max_confidence", confidence.max_confidence, 0.0, 1.0, "[0, 1]")?;
        ordered(
            "confidence.min_confidence",
            confidence.min_confidence,
            "confidence.max_confidence",
            confidence.max_confidence,
        )?;
        within(
            "confidence.default_transcription_confidence",
            confidence.default_transcription_confidence,
            0.0,
            1.0,
            "[0, 1]",
        )?;
        positive("confidence.length_reference_chars", confidence.length_reference_chars)?;
        positive("confidence.uncertainty_reference_words", confidence.uncertainty_reference_words)?;

        let rt = &self.realtime;
        unit_alpha("realtime.smoothing_floor", rt.smoothing_floor)?;
        unit_alpha("realtime.max_alpha", rt.max_alpha)?;
        unit_alpha("realtime.explicit_alpha", rt.explicit_alpha)?;
        if rt.smoothing_floor > rt.max_alpha {
            return Err(ConfigError::InvertedRange {
                min_field: "realtime.smoothing_floor",
                min: rt.smoothing_floor,
                max_field: "realtime.max_alpha",
                max: rt.max_alpha,
            });
        }
        non_negative("realtime.smoothing_gain", rt.smoothing_gain)?;
        positive("realtime.recency_decay", rt.recency_decay)?;
        positive("realtime.signal_saturation", rt.signal_saturation)?;
        positive("realtime.coordinate_span", rt.coordinate_span)?;
        finite("realtime.coordinate_center", rt.coordinate_center)?;
        finite("realtime.explicit_boost", rt.explicit_boost)?;
        non_negative("realtime.gate_duration_ms", rt.gate_duration_ms as f64)?;

        Ok(())
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field, value })
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    within(field, value, 0.0, f64::MAX, "[0, inf)")
}

fn within(field: &'static str, value: f64, min: f64, max: f64, range: &'static str) -> Result<(), ConfigError> {
    finite(field, value)?;
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, range, value })
    }
}

/// Smoothing factors live in (0, 1]
fn unit_alpha(field: &'static str, value: f64) -> Result<(), ConfigError> {
    positive(field, value)?;
    within(field, value, 0.0, 1.0, "(0, 1]")
}

fn ordered(min_field: &'static str, min: f64, max_field: &'static str, max: f64) -> Result<(), ConfigError> {
    finite(min_field, min)?;
    finite(max_field, max)?;
    if min < max {
        Ok(())
    } else {
        Err(ConfigError::InvertedRange {
            min_field,
            min,
            max_field,
            max,
        })
    }
}
