use crate::config::RealtimeConfig;

/// How a new partial relates to what the session has already consumed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaKind {
    /// New tokens to consume
    Append,
    /// Same as, or a truncation of, the previous partial
    Restatement,
    /// Short shared prefix but the head already appears in the accumulated text
    Echo,
    /// Everything new was a copy of the accumulated tail
    Duplicate,
}

/// Result of reconciling one partial transcript against session history
#[derive(Debug, Clone, PartialEq)]
pub struct Delta {
    pub kind: DeltaKind,
    /// Tokens to remove from the accumulated tail before appending
    pub retract: usize,
    /// Tokens to append
    pub tokens: Vec<String>,
}

impl Delta {
    fn none(kind: DeltaKind) -> Self {
        Self {
            kind,
            retract: 0,
            tokens: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn text(&self) -> String {
        self.tokens.join(" ")
    }
}

/// Byte length of the longest common prefix, on a char boundary
pub fn common_prefix_len(a: &str, b: &str) -> usize {
    a.char_indices()
        .zip(b.chars())
        .find(|((_, ca), cb)| ca != cb)
        .map(|((i, _), _)| i)
        .unwrap_or_else(|| a.len().min(b.len()))
}

fn split_tokens(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

fn contains_sequence(haystack: &[String], needle: &[String]) -> bool {
    !needle.is_empty() && haystack.windows(needle.len()).any(|w| w == needle)
}

/// Pull a prefix length back to the start of the word it ends in, unless
/// it already falls between whole words in both partials
fn word_boundary(previous: &str, current: &str, lcp: usize) -> usize {
    if lcp == 0 {
        return 0;
    }
    let shared = &current[..lcp];
    if shared.ends_with(' ') {
        return lcp;
    }

    let current_breaks = current[lcp..].starts_with(' ');
    let previous_breaks = lcp == previous.len() || previous[lcp..].starts_with(' ');
    if current_breaks && previous_breaks {
        return lcp;
    }

    shared.rfind(' ').map_or(0, |i| i + 1)
}

/// Work out which tokens of `current` are genuinely new
///
/// `previous` and `current` are normalized partials; `accumulated` is the
/// session's token history.
///
/// 1. The delta is whatever follows the longest common prefix
/// 2. A short prefix whose head already appears in the history is an echo
/// 3. A prefix ending mid-word retracts the fragment appended last time
/// 4. Leading and trailing copies of the accumulated tail are stripped;
///    after a short prefix even a one-token leading overlap is a copy
pub fn reconcile(accumulated: &[String], previous: &str, current: &str, config: &RealtimeConfig) -> Delta {
    if current.is_empty() {
        return Delta::none(DeltaKind::Restatement);
    }

    let lcp = common_prefix_len(previous, current);
    if lcp == current.len() {
        return Delta::none(DeltaKind::Restatement);
    }

    if !previous.is_empty() && lcp < config.echo_min_prefix_chars {
        let head: Vec<String> = current
            .split_whitespace()
            .take(config.duplicate_window_tokens.max(1))
            .map(str::to_string)
            .collect();
        if contains_sequence(accumulated, &head) {
            return Delta::none(DeltaKind::Echo);
        }
        return strip_duplicates(accumulated, 0, split_tokens(current), 1, config);
    }

    let snap = word_boundary(previous, current, lcp);
    let stale = split_tokens(&previous[snap.min(previous.len())..]);
    let retract = if !stale.is_empty() && accumulated.ends_with(&stale) {
        stale.len()
    } else {
        0
    };

    let window = config.duplicate_window_tokens.max(1);
    strip_duplicates(accumulated, retract, split_tokens(&current[snap..]), window, config)
}

fn strip_duplicates(
    accumulated: &[String],
    retract: usize,
    mut tokens: Vec<String>,
    min_lead: usize,
    config: &RealtimeConfig,
) -> Delta {
    let base = &accumulated[..accumulated.len() - retract];
    let window = config.duplicate_window_tokens.max(1);

    let max_overlap = tokens.len().min(base.len());
    if let Some(k) = (min_lead.max(1)..=max_overlap)
        .rev()
        .find(|&k| base[base.len() - k..] == tokens[..k])
    {
        tokens.drain(..k);
    }

    if tokens.len() >= window && base.len() >= window && tokens[tokens.len() - window..] == base[base.len() - window..] {
        tokens.truncate(tokens.len() - window);
    }

    if tokens.is_empty() {
        return Delta::none(DeltaKind::Duplicate);
    }

    Delta {
        kind: DeltaKind::Append,
        retract,
        tokens,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(text: &str) -> Vec<String> {
        split_tokens(text)
    }

    fn run(accumulated: &str, previous: &str, current: &str) -> Delta {
        reconcile(&toks(accumulated), previous, current, &RealtimeConfig::default())
    }

    #[test]
    fn test_common_prefix_len() {
        assert_eq!(common_prefix_len("bugün çok", "bugün çok mutlu"), "bugün çok".len());
        assert_eq!(common_prefix_len("üzgün", "üzgünüm"), "üzgün".len());
        assert_eq!(common_prefix_len("çok", "çık"), "ç".len());
        assert_eq!(common_prefix_len("", "abc"), 0);
    }

    #[test]
    fn test_identical_partial_is_empty() {
        let delta = run("bugün çok", "bugün çok", "bugün çok");
        assert!(delta.is_empty());
        assert_eq!(delta.kind, DeltaKind::Restatement);
    }

    #[test]
    fn test_extension_appends_suffix() {
        let delta = run("bugün çok", "bugün çok", "bugün çok mutluyum");
        assert_eq!(delta.kind, DeltaKind::Append);
        assert_eq!(delta.tokens, toks("mutluyum"));
        assert_eq!(delta.retract, 0);
    }

    #[test]
    fn test_completed_word_retracts_fragment() {
        let delta = run("bugün mut", "bugün mut", "bugün mutluyum");
        assert_eq!(delta.retract, 1);
        assert_eq!(delta.tokens, toks("mutluyum"));
    }

    #[test]
    fn test_corrected_word_replaces_tail() {
        let delta = run("bugün iyi ama", "bugün iyi ama", "bugün iyi fakat yorgunum");
        assert_eq!(delta.retract, 1);
        assert_eq!(delta.tokens, toks("fakat yorgunum"));
    }

    #[test]
    fn test_shortened_restatement_is_empty() {
        let delta = run("bugün çok mutluyum", "bugün çok mutluyum", "bugün çok");
        assert!(delta.is_empty());
        assert_eq!(delta.kind, DeltaKind::Restatement);
    }

    #[test]
    fn test_echo_with_short_prefix() {
        let delta = run("bugün çok mutluyum", "bugün çok mutluyum", "çok mutluyum");
        assert!(delta.is_empty());
        assert_eq!(delta.kind, DeltaKind::Echo);
    }

    #[test]
    fn test_grown_echo_keeps_only_new_tokens() {
        // The previous partial is still the pre-echo one
        let delta = run("bugün çok mutluyum", "bugün çok mutluyum", "çok mutluyum ama");
        assert_eq!(delta.kind, DeltaKind::Append);
        assert_eq!(delta.tokens, toks("ama"));

        let delta = run("bugün çok mutluyum", "bugün çok mutluyum", "mutluyum ama yorgunum");
        assert_eq!(delta.tokens, toks("ama yorgunum"));
    }

    #[test]
    fn test_new_segment_with_short_prefix() {
        let delta = run("bugün mutluyum", "bugün mutluyum", "yarın sınavım var");
        assert_eq!(delta.tokens, toks("yarın sınavım var"));
    }

    #[test]
    fn test_trailing_duplicate_window_stripped() {
        let delta = run(
            "bugün çok iyi hissediyorum",
            "bugün çok iyi hissediyorum",
            "ayrıca çok iyi hissediyorum",
        );
        assert_eq!(delta.tokens, toks("ayrıca"));
    }

    #[test]
    fn test_leading_overlap_stripped() {
        let delta = run("selam ben çok iyiyim", "selam", "selam ben çok iyiyim bugün");
        assert_eq!(delta.tokens, toks("bugün"));
    }

    #[test]
    fn test_pure_duplicate() {
        let delta = run("selam ben çok iyiyim", "selam", "selam ben çok iyiyim");
        assert!(delta.is_empty());
        assert_eq!(delta.kind, DeltaKind::Duplicate);
    }

    #[test]
    fn test_first_partial() {
        let delta = run("", "", "merhaba");
        assert_eq!(delta.tokens, toks("merhaba"));
    }
}
