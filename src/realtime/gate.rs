use chrono::{DateTime, Duration, Utc};

use crate::config::RealtimeConfig;
use crate::heuristics::contains_phrase;
use crate::stages::stage0_normalize::normalize;

/// What a chunk does to the stability gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Explicit or strong evidence: release immediately
    Clear,
    /// Weak, short or filler chunk: (re)start the hold
    Arm,
    /// Leave the current expiry in place
    Hold,
}

/// Delta too short to be meaningful on its own
pub fn is_short_chunk(tokens: &[String], config: &RealtimeConfig) -> bool {
    tokens.len() < config.min_chunk_words || tokens.join(" ").chars().count() < config.min_chunk_chars
}

/// Delta contains meta-conversation ("test", "ses kontrol")
pub fn is_filler_chunk(tokens: &[String], config: &RealtimeConfig) -> bool {
    let tokens: Vec<&str> = tokens.iter().map(String::as_str).collect();
    config.filler_phrases.iter().any(|phrase| {
        let phrase: Vec<String> = normalize(phrase).split_whitespace().map(str::to_string).collect();
        contains_phrase(&tokens, &phrase)
    })
}

pub fn evaluate_gate(explicit: bool, signal: f64, tokens: &[String], config: &RealtimeConfig) -> GateDecision {
    if explicit || signal >= config.strong_signal_threshold {
        return GateDecision::Clear;
    }
    if signal < config.weak_signal_threshold
        || is_short_chunk(tokens, config)
        || is_filler_chunk(tokens, config)
    {
        return GateDecision::Arm;
    }
    GateDecision::Hold
}

/// Gate expiry after applying `decision` at `now`
pub fn next_expiry(
    decision: GateDecision,
    current: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    config: &RealtimeConfig,
) -> Option<DateTime<Utc>> {
    match decision {
        GateDecision::Clear => None,
        GateDecision::Arm => Some(now + Duration::milliseconds(config.gate_duration_ms)),
        GateDecision::Hold => current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_explicit_and_strong_clear() {
        let config = RealtimeConfig::default();
        assert_eq!(evaluate_gate(true, 0.0, &toks("yüksek"), &config), GateDecision::Clear);
        assert_eq!(evaluate_gate(false, 0.7, &toks("test"), &config), GateDecision::Clear);
    }

    #[test]
    fn test_weak_short_filler_arm() {
        let config = RealtimeConfig::default();
        assert_eq!(evaluate_gate(false, 0.1, &toks("bugün markete gittim"), &config), GateDecision::Arm);
        assert_eq!(evaluate_gate(false, 0.4, &toks("mutluyum"), &config), GateDecision::Arm);
        assert_eq!(evaluate_gate(false, 0.4, &toks("ses kontrol yapıyorum"), &config), GateDecision::Arm);
    }

    #[test]
    fn test_moderate_signal_holds() {
        let config = RealtimeConfig::default();
        assert_eq!(evaluate_gate(false, 0.4, &toks("bugün biraz yorgunum"), &config), GateDecision::Hold);
    }

    #[test]
    fn test_short_chunk_rules() {
        let config = RealtimeConfig::default();
        assert!(is_short_chunk(&toks("ah"), &config));
        assert!(is_short_chunk(&toks("a b"), &config));
        assert!(!is_short_chunk(&toks("iyi günler"), &config));
    }

    #[test]
    fn test_next_expiry() {
        let config = RealtimeConfig::default();
        let now = Utc::now();
        let armed = next_expiry(GateDecision::Arm, None, now, &config);
        assert_eq!(armed, Some(now + Duration::milliseconds(1500)));
        assert_eq!(next_expiry(GateDecision::Hold, armed, now, &config), armed);
        assert_eq!(next_expiry(GateDecision::Clear, armed, now, &config), None);
    }
}
