use super::count_phrase;

/// Whether a token is a negation word, allowing inflectional suffixes
/// ("değil" matches "değilim", "değiliz")
pub fn is_negation_token(token: &str, negation_words: &[String]) -> bool {
    negation_words
        .iter()
        .any(|word| !word.is_empty() && token.starts_with(word.as_str()))
}

/// Check for a negation word within `window` tokens of a match
///
/// The matched tokens themselves (`first..=last`) are never counted, so a
/// keyword that happens to begin like a negation word does not negate itself.
pub fn is_negated(
    tokens: &[&str],
    first: usize,
    last: usize,
    negation_words: &[String],
    window: usize,
) -> bool {
    if tokens.is_empty() {
        return false;
    }
    let lo = first.saturating_sub(window);
    let hi = (last + window).min(tokens.len() - 1);

    (lo..=hi)
        .filter(|&i| i < first || i > last)
        .any(|i| is_negation_token(tokens[i], negation_words))
}

/// Count hedging phrases ("sanırım", "emin değilim") in the text
pub fn count_uncertainty(tokens: &[&str], phrases: &[Vec<String>]) -> usize {
    phrases.iter().map(|p| count_phrase(tokens, p)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_suffix_negation_after_match() {
        let negations = words(&["değil", "hiç"]);
        let tokens = vec!["bugün", "mutlu", "değilim"];
        assert!(is_negated(&tokens, 1, 1, &negations, 6));
    }

    #[test]
    fn test_negation_outside_window() {
        let negations = words(&["değil"]);
        let tokens = vec!["değil", "a", "b", "c", "mutlu"];
        assert!(!is_negated(&tokens, 4, 4, &negations, 2));
        assert!(is_negated(&tokens, 4, 4, &negations, 4));
    }

    #[test]
    fn test_match_tokens_do_not_negate_themselves() {
        let negations = words(&["yok"]);
        let tokens = vec!["yoksul", "hissediyorum"];
        assert!(!is_negated(&tokens, 0, 0, &negations, 6));
    }

    #[test]
    fn test_count_uncertainty() {
        let phrases = vec![words(&["sanırım"]), words(&["emin", "değilim"])];
        let tokens = vec!["sanırım", "iyiyim", "ama", "emin", "değilim", "sanırım"];
        assert_eq!(count_uncertainty(&tokens, &phrases), 3);
    }
}
