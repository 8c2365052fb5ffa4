use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::crisis::{detect_crisis, CrisisAssessment};
use crate::error::AnalysisError;
use crate::heuristics::collect_text_signals;
use crate::lexicon::CompiledLexicon;
use crate::models::{AnalysisDetails, AnalysisResult, TranscriptionRecord};
use crate::stages::{
    estimate_confidence, extract_entities, final_emotion, find_matches, intensity_bucket,
    score_axes, sentiment_bucket, ConfidenceInputs, NormalizedText,
};

/// Batch analyzer: one utterance in, one `AnalysisResult` out
///
/// Holds no per-call state, so one instance can serve any number of
/// callers concurrently.
#[derive(Debug, Clone)]
pub struct MoodAnalyzer {
    lexicon: Arc<CompiledLexicon>,
    config: Arc<EngineConfig>,
}

impl MoodAnalyzer {
    pub fn new(lexicon: Arc<CompiledLexicon>, config: Arc<EngineConfig>) -> Self {
        Self { lexicon, config }
    }

    /// Analyze bare text using the default transcription confidence
    pub fn analyze_text(&self, text: &str) -> AnalysisResult {
        self.analyze(text, self.config.confidence.default_transcription_confidence)
    }

    /// Analyze a transcription record; failed transcriptions yield the
    /// neutral result with the recognizer's error in `notes`
    pub fn analyze_transcription(&self, record: &TranscriptionRecord) -> AnalysisResult {
        if !record.success {
            let reason = record.error.as_deref().unwrap_or("unknown error");
            warn!("Transcription failed: {}", reason);
            return self.neutral_result(format!("Transcription failed: {}", reason));
        }
        self.analyze(&record.text, record.confidence)
    }

    /// Analyze text with an explicit transcription confidence
    ///
    /// Never fails: short input and internal faults both produce the
    /// neutral result.
    pub fn analyze(&self, text: &str, transcription_confidence: f64) -> AnalysisResult {
        match self.try_analyze(text, transcription_confidence) {
            Ok(result) => result,
            Err(e) => {
                warn!("Analysis fault, returning neutral result: {}", e);
                self.neutral_result(format!("{} [analysis error: {}]", text.trim(), e))
            }
        }
    }

    /// Fixed fallback: baselines, no entities, minimum confidence
    pub fn neutral_result(&self, notes: String) -> AnalysisResult {
        let scoring = &self.config.scoring;
        AnalysisResult::neutral(
            scoring.axis_score(scoring.baselines.mood),
            scoring.axis_score(scoring.baselines.energy),
            scoring.axis_score(scoring.baselines.anxiety),
            self.config.confidence.insufficient_confidence,
            notes,
        )
    }

    /// Screen text for crisis language; independent of scoring
    pub fn check_crisis(&self, text: &str) -> CrisisAssessment {
        detect_crisis(text, &self.lexicon.crisis_phrases)
    }

    /// The pipeline proper
    ///
    /// 1. Normalize; short-circuit on too little text
    /// 2. Collect text-wide signals (repetition, hedging, contrast)
    /// 3. Match patterns with local intensity and negation
    /// 4. Score each axis, applying explicit overrides
    /// 5. Extract entities and pick the dominant emotion
    /// 6. Estimate confidence and assemble the result
    fn try_analyze(&self, text: &str, transcription_confidence: f64) -> Result<AnalysisResult, AnalysisError> {
        let scoring = &self.config.scoring;
        let normalized = NormalizedText::new(text);

        if normalized.char_len() < scoring.min_text_chars {
            debug!("Text too short for analysis ({} chars)", normalized.char_len());
            return Ok(self.neutral_result(format!(
                "Insufficient text for analysis: \"{}\"",
                text.trim()
            )));
        }

        let signals = collect_text_signals(&normalized, &self.lexicon, scoring);
        let matches = find_matches(&normalized, &self.lexicon, scoring, signals.repetition_multiplier);
        let declarations = self.lexicon.explicit.detect(normalized.as_str());

        let scores = score_axes(&matches, &signals, &declarations, &self.lexicon, scoring, None)?;
        let entities = extract_entities(&matches, &self.lexicon);

        let mood_score = scoring.axis_score(scores.mood);
        let dominant_emotion = final_emotion(&scores, entities.top_emotion.as_deref(), &scoring.baselines);

        let confidence = estimate_confidence(
            &ConfidenceInputs {
                transcription_confidence,
                matches: &matches,
                uncertainty_hits: signals.uncertainty_hits,
                text_chars: normalized.char_len(),
                word_count: normalized.token_count(),
            },
            &self.lexicon,
            &self.config.confidence,
        )?;

        debug!(
            "Scored mood {:.2} energy {:.2} anxiety {:.2} from {} matches, confidence {:.2}",
            scores.mood,
            scores.energy,
            scores.anxiety,
            matches.len(),
            confidence
        );

        Ok(AnalysisResult {
            mood_score,
            energy_level: scoring.axis_score(scores.energy),
            anxiety_level: scoring.axis_score(scores.anxiety),
            dominant_emotion,
            triggers: entities.triggers,
            activities: entities.activities,
            notes: text.trim().to_string(),
            confidence,
            details: AnalysisDetails {
                keywords: entities.keywords,
                emotion_signals: entities.emotion_signals,
                intensity_bucket: intensity_bucket(&matches),
                sentiment_bucket: sentiment_bucket(mood_score),
                contradiction: scores.contradiction,
                segments: scores.segments,
                explicit_axes: scores.explicit_axes,
                negated_matches: matches.iter().filter(|m| m.negated).count(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SentimentBucket;

    fn analyzer() -> MoodAnalyzer {
        analyzer_with(EngineConfig::default())
    }

    fn analyzer_with(config: EngineConfig) -> MoodAnalyzer {
        let lexicon = CompiledLexicon::builtin().unwrap();
        MoodAnalyzer::new(Arc::new(lexicon), Arc::new(config))
    }

    fn assert_in_range(result: &AnalysisResult) {
        for value in [result.mood_score, result.energy_level, result.anxiety_level] {
            assert!((1..=10).contains(&value), "axis out of range: {}", value);
        }
        assert!(result.confidence.is_finite());
        assert!((0.2..=0.95).contains(&result.confidence));
    }

    #[test]
    fn test_end_to_end_example() {
        let record = TranscriptionRecord::from_text("Bugün çok mutluyum, enerjim yüksek", 0.9);
        let result = analyzer().analyze_transcription(&record);

        assert!(result.mood_score > 5);
        assert!(result.energy_level > 5);
        assert_eq!(result.energy_level, 8);
        assert!(result.anxiety_level <= 4);
        assert_eq!(result.dominant_emotion, "happy");
        assert!(result.confidence > 0.5);
        assert_eq!(result.details.sentiment_bucket, SentimentBucket::Positive);
        assert_eq!(result.notes, "Bugün çok mutluyum, enerjim yüksek");
    }

    #[test]
    fn test_short_text_is_neutral() {
        let analyzer = analyzer();
        for text in ["", "   ", "iyi", "?!"] {
            let result = analyzer.analyze_text(text);
            assert_eq!(result.mood_score, 5);
            assert_eq!(result.energy_level, 5);
            assert_eq!(result.anxiety_level, 4);
            assert_eq!(result.dominant_emotion, "neutral");
            assert_eq!(result.confidence, 0.2);
            assert!(result.triggers.is_empty());
            assert!(result.notes.starts_with("Insufficient text"));
        }
    }

    #[test]
    fn test_failed_transcription_is_neutral() {
        let mut record = TranscriptionRecord::from_text("", 0.0);
        record.success = false;
        record.error = Some("no speech detected".to_string());

        let result = analyzer().analyze_transcription(&record);
        assert_eq!(result.mood_score, 5);
        assert!(result.notes.contains("no speech detected"));
        assert!(result.details.keywords.is_empty());
    }

    #[test]
    fn test_outputs_always_in_range() {
        let analyzer = analyzer();
        let inputs = [
            "çok çok çok çok aşırı mutluyum harika şahane muhteşem süper",
            "depresif umutsuz çaresiz üzgün ağlıyorum berbat kötüyüm yalnızım",
            "panik stres kaygılı endişeli korkuyorum tedirgin gerginim",
            "modum 0/10 enerjim %100 kaygım 10 üzerinden 10",
            "bugün markete gittim sonra eve döndüm",
            "sanırım belki galiba herhalde bilmiyorum emin değilim",
        ];
        for text in inputs {
            assert_in_range(&analyzer.analyze_text(text));
        }
    }

    #[test]
    fn test_idempotent() {
        let analyzer = analyzer();
        let text = "Sanırım biraz yorgunum ama arkadaşlarımla buluştuk, keyfim yerinde";
        assert_eq!(analyzer.analyze_text(text), analyzer.analyze_text(text));
    }

    #[test]
    fn test_negation_lowers_mood() {
        let analyzer = analyzer();
        let plain = analyzer.analyze_text("bugün mutluyum");
        let negated = analyzer.analyze_text("bugün mutlu değilim");
        assert!(negated.mood_score < plain.mood_score);
        assert_eq!(negated.details.negated_matches, 1);
    }

    #[test]
    fn test_repetition_monotonic() {
        let analyzer = analyzer();
        let happy = analyzer.analyze_text("bugün mutluyum");
        let very = analyzer.analyze_text("bugün çok mutluyum");
        let very_very = analyzer.analyze_text("bugün çok çok mutluyum");
        assert!(very_very.mood_score >= very.mood_score);
        assert!(very.mood_score >= happy.mood_score);
    }

    #[test]
    fn test_explicit_override_precedence() {
        let analyzer = analyzer();
        let numeric = analyzer.analyze_text("çok mutluyum harika hissediyorum ama modum 2/10");
        assert_eq!(numeric.mood_score, 2);

        let verbal = analyzer.analyze_text("bitkinim yorgunum ama enerjim yüksek");
        assert_eq!(verbal.energy_level, 8);

        let zero = analyzer.analyze_text("çok enerjik biriyim ama bugün enerjim sıfır");
        assert_eq!(zero.energy_level, 1);
    }

    #[test]
    fn test_entities_reported() {
        let result = analyzer().analyze_text("Patronumla kavga ettik, akşam koşuya çıktım ve rahatladım");
        assert!(result.triggers.contains(&"work".to_string()));
        assert!(result.triggers.contains(&"conflict".to_string()));
        assert_eq!(result.activities, vec!["exercise"]);
    }

    #[test]
    fn test_fault_becomes_neutral_result() {
        let mut config = EngineConfig::default();
        config.scoring.repetition_bonus = f64::INFINITY;
        let analyzer = analyzer_with(config);

        let result = analyzer.analyze_text("çok çok mutluyum bugün");
        assert_eq!(result.mood_score, 5);
        assert_eq!(result.dominant_emotion, "neutral");
        assert!(result.notes.starts_with("çok çok mutluyum bugün"));
        assert!(result.notes.contains("not a finite number"));
    }

    #[test]
    fn test_crisis_independent_of_scores() {
        let analyzer = analyzer();
        let text = "Bugün çok mutluyum ama bazen yaşamak istemiyorum";
        let crisis = analyzer.check_crisis(text);
        let result = analyzer.analyze_text(text);

        assert!(crisis.flagged);
        assert_eq!(crisis.hits, vec!["yaşamak istemiyorum"]);
        assert!(result.mood_score > 5);
    }
}
