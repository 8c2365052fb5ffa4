use std::path::Path;

use anyhow::{Context, Result};

use crate::config::EngineConfig;
use crate::models::{Lexicon, TranscriptionRecord};

/// Parse a transcription record file (JSON)
pub fn parse_transcription_file(path: &Path) -> Result<TranscriptionRecord> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    parse_transcription_json(&content)
}

/// Parse a transcription record from a JSON string
pub fn parse_transcription_json(json: &str) -> Result<TranscriptionRecord> {
    let record: TranscriptionRecord =
        serde_json::from_str(json).context("Failed to parse transcription JSON")?;

    if !(0.0..=1.0).contains(&record.confidence) {
        anyhow::bail!(
            "Transcription confidence must be within [0, 1], got {}",
            record.confidence
        );
    }

    Ok(record)
}

/// Load a replacement lexicon from JSON
pub fn load_lexicon(path: &Path) -> Result<Lexicon> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read lexicon: {:?}", path))?;
    serde_json::from_str(&content).context("Failed to parse lexicon JSON")
}

/// Load and validate engine configuration; fields absent from the file
/// keep their defaults
pub fn load_config(path: &Path) -> Result<EngineConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {:?}", path))?;
    let config: EngineConfig = serde_json::from_str(&content).context("Failed to parse config JSON")?;
    config
        .validate()
        .with_context(|| format!("Invalid config: {:?}", path))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use tempfile::NamedTempFile;

    use crate::lexicon::CompiledLexicon;

    fn temp_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_parse_transcription_json() {
        let json = r#"{
            "text": "Bugün çok mutluyum",
            "confidence": 0.92,
            "duration_seconds": 2.4,
            "language_tag": "tr-TR",
            "success": true
        }"#;
        let record = parse_transcription_json(json).unwrap();

        assert_eq!(record.text, "Bugün çok mutluyum");
        assert_eq!(record.confidence, 0.92);
        assert_eq!(record.duration_seconds, 2.4);
    }

    #[test]
    fn test_rejects_out_of_range_confidence() {
        let err = parse_transcription_json(r#"{"text": "iyiyim", "confidence": 1.7}"#).unwrap_err();
        assert!(err.to_string().contains("within [0, 1]"));
    }

    #[test]
    fn test_parse_transcription_file() {
        let file = temp_file(r#"{"text": "yorgunum"}"#);
        let record = parse_transcription_file(file.path()).unwrap();
        assert_eq!(record.text, "yorgunum");
        assert_eq!(record.confidence, 0.85);
    }

    #[test]
    fn test_missing_file_has_context() {
        let err = parse_transcription_file(Path::new("/nonexistent/record.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }

    #[test]
    fn test_load_lexicon_roundtrip_compiles() {
        let json = serde_json::to_string(&Lexicon::default()).unwrap();
        let file = temp_file(&json);

        let lexicon = load_lexicon(file.path()).unwrap();
        assert_eq!(lexicon.patterns.len(), Lexicon::default().patterns.len());
        assert!(CompiledLexicon::compile(&lexicon).is_ok());
    }

    #[test]
    fn test_load_minimal_lexicon() {
        let file = temp_file(
            r#"{"patterns": [{"keywords": ["mutlu"], "impact": {"mood": 3.0}, "weight": 1.0, "emotion": "happy"}]}"#,
        );
        let lexicon = load_lexicon(file.path()).unwrap();
        assert_eq!(lexicon.patterns[0].impact.energy, 0.0);
        assert!(lexicon.crisis_phrases.is_empty());
    }

    #[test]
    fn test_load_partial_config() {
        let file = temp_file(r#"{"realtime": {"gate_duration_ms": 3000}}"#);
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.realtime.gate_duration_ms, 3000);
        assert_eq!(config.scoring.min_text_chars, 5);
    }

    #[test]
    fn test_load_config_rejects_inverted_axis_range() {
        let file = temp_file(r#"{"scoring": {"axis_min": 10.0, "axis_max": 1.0}}"#);
        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("Invalid config"));
        assert!(format!("{:#}", err).contains("scoring.axis_min"));
    }

    #[test]
    fn test_load_config_rejects_zero_recency_decay() {
        let file = temp_file(r#"{"realtime": {"recency_decay": 0.0}}"#);
        assert!(load_config(file.path()).is_err());
    }
}
