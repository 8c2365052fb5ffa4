use thiserror::Error;

use crate::models::Axis;

/// Problems found while validating or compiling a lexicon
#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("keyword pattern {index} has no keywords")]
    EmptyPattern { index: usize },

    #[error("keyword pattern {index} contains a blank keyword")]
    BlankKeyword { index: usize },

    #[error("keyword pattern {index}: {axis} impact {value} is outside [-5, 5]")]
    ImpactOutOfRange { index: usize, axis: Axis, value: f64 },

    #[error("keyword pattern {index}: weight must be positive, got {weight}")]
    NonPositiveWeight { index: usize, weight: f64 },

    #[error("intensity modifier `{phrase}` has non-positive multiplier {multiplier}")]
    InvalidModifier { phrase: String, multiplier: f64 },

    #[error("failed to build matcher for `{phrase}`")]
    InvalidMatcher {
        phrase: String,
        #[source]
        source: regex::Error,
    },
}

/// Tunables that would make scoring panic or produce non-finite values
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field}: {value} is not a finite number")]
    NonFinite { field: &'static str, value: f64 },

    #[error("{min_field} ({min}) must be below {max_field} ({max})")]
    InvertedRange {
        min_field: &'static str,
        min: f64,
        max_field: &'static str,
        max: f64,
    },

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} must be within {range}, got {value}")]
    OutOfRange {
        field: &'static str,
        range: &'static str,
        value: f64,
    },
}

/// Internal faults raised while scoring a single utterance.
///
/// Never escapes the public analysis entry points; the analyzer converts
/// these into the neutral result.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("{axis} score is not a finite number")]
    NonFiniteScore { axis: Axis },

    #[error("confidence is not a finite number")]
    NonFiniteConfidence,
}
