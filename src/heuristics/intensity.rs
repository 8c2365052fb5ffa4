use crate::lexicon::CompiledModifier;

use super::phrase_at;

/// Strongest intensity modifier in the `window` tokens before a match
///
/// Returns 1.0 when no modifier is present. A diminisher on its own
/// yields its (< 1.0) multiplier.
pub fn local_intensity(
    tokens: &[&str],
    first_token: usize,
    modifiers: &[CompiledModifier],
    window: usize,
) -> f64 {
    let lo = first_token.saturating_sub(window);
    let mut strongest: Option<f64> = None;

    for modifier in modifiers {
        let len = modifier.tokens.len();
        if len == 0 || len > first_token - lo {
            continue;
        }
        let found = (lo..=first_token - len).any(|start| phrase_at(tokens, start, &modifier.tokens));
        if found {
            strongest = Some(strongest.map_or(modifier.multiplier, |s| s.max(modifier.multiplier)));
        }
    }

    strongest.unwrap_or(1.0)
}

/// Whether a token is a single-word intensifier ("çok", "gerçekten")
pub fn is_intensifier(token: &str, modifiers: &[CompiledModifier]) -> bool {
    modifiers
        .iter()
        .any(|m| m.multiplier > 1.0 && m.tokens.len() == 1 && m.tokens[0] == token)
}

/// Count adjacent intensifier pairs ("çok çok", "gerçekten çok"), capped
pub fn count_repetitions(tokens: &[&str], modifiers: &[CompiledModifier], cap: usize) -> usize {
    tokens
        .windows(2)
        .filter(|pair| is_intensifier(pair[0], modifiers) && is_intensifier(pair[1], modifiers))
        .count()
        .min(cap)
}

/// Global multiplier applied to every match intensity
pub fn repetition_multiplier(count: usize, bonus: f64) -> f64 {
    1.0 + bonus * count as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn modifiers() -> Vec<CompiledModifier> {
        vec![
            CompiledModifier::new("çok", 1.5),
            CompiledModifier::new("son derece", 1.8),
            CompiledModifier::new("gerçekten", 1.4),
            CompiledModifier::new("biraz", 0.6),
        ]
    }

    #[test]
    fn test_no_modifier_defaults_to_one() {
        let tokens = vec!["bugün", "mutluyum"];
        assert_eq!(local_intensity(&tokens, 1, &modifiers(), 5), 1.0);
    }

    #[test]
    fn test_takes_strongest_modifier() {
        let tokens = vec!["son", "derece", "ve", "çok", "mutluyum"];
        assert_eq!(local_intensity(&tokens, 4, &modifiers(), 5), 1.8);
    }

    #[test]
    fn test_diminisher() {
        let tokens = vec!["biraz", "yorgunum"];
        assert_eq!(local_intensity(&tokens, 1, &modifiers(), 5), 0.6);
    }

    #[test]
    fn test_modifier_outside_window_ignored() {
        let tokens = vec!["çok", "a", "b", "c", "mutlu"];
        assert_eq!(local_intensity(&tokens, 4, &modifiers(), 2), 1.0);
        assert_eq!(local_intensity(&tokens, 0, &modifiers(), 5), 1.0);
    }

    #[test]
    fn test_count_repetitions() {
        let mods = modifiers();
        assert_eq!(count_repetitions(&["çok", "mutluyum"], &mods, 3), 0);
        assert_eq!(count_repetitions(&["çok", "çok", "mutluyum"], &mods, 3), 1);
        assert_eq!(count_repetitions(&["gerçekten", "çok", "çok", "iyi"], &mods, 3), 2);
        // Diminishers never count as repetition
        assert_eq!(count_repetitions(&["biraz", "biraz"], &mods, 3), 0);
        assert_eq!(count_repetitions(&["çok"; 10], &mods, 3), 3);
    }

    #[test]
    fn test_repetition_multiplier_is_linear() {
        assert_eq!(repetition_multiplier(0, 0.2), 1.0);
        assert!((repetition_multiplier(2, 0.2) - 1.4).abs() < 1e-9);
    }
}
