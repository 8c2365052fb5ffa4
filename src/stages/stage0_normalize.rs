/// Lowercase text, mapping the Turkish dotted and dotless capitals correctly
///
/// `str::to_lowercase` turns `İ` into `i` + U+0307 and `I` into `i`, which
/// breaks words like "İyiyim" and "IŞIK". The lexicon is Turkish, so `I`
/// lowercases to `ı`.
pub fn turkish_lowercase(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            'İ' => out.push('i'),
            'I' if chars.peek() == Some(&'\u{0307}') => {
                chars.next();
                out.push('i');
            }
            'I' => out.push('ı'),
            '\u{0307}' => {}
            _ => out.extend(c.to_lowercase()),
        }
    }
    out
}

/// Normalize an utterance for matching
///
/// Lowercases, replaces every character that is not a letter, digit, `/`
/// or `%` with a space, and collapses whitespace. `/` and `%` survive so
/// numeric self-reports ("8/10", "%70") remain detectable.
pub fn normalize(text: &str) -> String {
    let lowered = turkish_lowercase(text);
    let mut out = String::with_capacity(lowered.len());
    let mut pending_space = false;

    for c in lowered.chars() {
        if c.is_alphanumeric() || c == '/' || c == '%' {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(c);
        } else {
            pending_space = true;
        }
    }

    out
}

/// Normalized text with precomputed token boundaries
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedText {
    text: String,
    /// Byte offset where each token starts
    token_starts: Vec<usize>,
}

impl NormalizedText {
    /// Normalize raw text
    pub fn new(raw: &str) -> Self {
        Self::from_normalized(normalize(raw))
    }

    /// Wrap text that is already normalized (single spaces, lowercase)
    pub fn from_normalized(text: String) -> Self {
        let mut token_starts = Vec::new();
        let mut prev_space = true;
        for (i, c) in text.char_indices() {
            if c == ' ' {
                prev_space = true;
            } else {
                if prev_space {
                    token_starts.push(i);
                }
                prev_space = false;
            }
        }
        Self { text, token_starts }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Length in characters
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn token_count(&self) -> usize {
        self.token_starts.len()
    }

    pub fn tokens(&self) -> Vec<&str> {
        self.text.split(' ').filter(|t| !t.is_empty()).collect()
    }

    /// Index of the token containing byte offset `pos`
    pub fn token_index_at(&self, pos: usize) -> usize {
        self.token_starts
            .partition_point(|&start| start <= pos)
            .saturating_sub(1)
    }
}
