use serde::{Deserialize, Serialize};

fn default_confidence() -> f64 {
    0.85
}

fn default_success() -> bool {
    true
}

/// Output of the external speech-to-text collaborator
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TranscriptionRecord {
    /// The recognized text
    pub text: String,
    /// Transcription accuracy score (0-1)
    #[serde(default = "default_confidence")]
    pub confidence: f64,
    /// Audio duration in seconds
    #[serde(default)]
    pub duration_seconds: f64,
    /// BCP-47 style language tag, e.g. `tr-TR`
    #[serde(default)]
    pub language_tag: Option<String>,
    /// Whether transcription succeeded
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

impl TranscriptionRecord {
    /// A successful record carrying only text
    pub fn from_text(text: &str, confidence: f64) -> Self {
        Self {
            text: text.to_string(),
            confidence,
            duration_seconds: 0.0,
            language_tag: None,
            success: true,
            error: None,
        }
    }
}
