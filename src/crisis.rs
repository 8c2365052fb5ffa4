use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::stages::stage0_normalize::normalize;

/// Result of screening one utterance for crisis language
///
/// Independent of mood scoring. Callers route a flagged assessment to
/// their own escalation workflow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrisisAssessment {
    pub flagged: bool,
    /// Configured phrases found, in configuration order
    pub hits: Vec<String>,
}

/// Check raw text against normalized crisis phrases
///
/// Phrases match as substrings of the normalized text, so inflected forms
/// ("kendimi öldüreceğim") are caught by their stem phrase.
pub fn detect_crisis(text: &str, phrases: &[String]) -> CrisisAssessment {
    let normalized = normalize(text);
    if normalized.is_empty() {
        return CrisisAssessment::default();
    }

    let mut hits: Vec<String> = Vec::new();
    for phrase in phrases {
        let phrase = normalize(phrase);
        if !phrase.is_empty() && normalized.contains(&phrase) && !hits.contains(&phrase) {
            hits.push(phrase);
        }
    }

    if !hits.is_empty() {
        warn!("Crisis language detected: {} phrase(s)", hits.len());
    }

    CrisisAssessment {
        flagged: !hits.is_empty(),
        hits,
    }
}
