use super::phrase_at;

/// Clauses separated by contrastive conjunctions ("ama", "fakat")
///
/// Surfaced as a flag for downstream consumers; scoring does not weight
/// segments differently.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContrastSplit {
    pub segments: Vec<String>,
}

impl ContrastSplit {
    pub fn is_contradiction(&self) -> bool {
        self.segments.len() > 1
    }
}

/// Split tokens on contrastive conjunctions, dropping empty segments
pub fn split_on_contrast(tokens: &[&str], conjunctions: &[Vec<String>]) -> ContrastSplit {
    let mut segments = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        let conjunction = conjunctions
            .iter()
            .find(|c| !c.is_empty() && phrase_at(tokens, i, c));

        match conjunction {
            Some(c) => {
                if !current.is_empty() {
                    segments.push(current.join(" "));
                    current.clear();
                }
                i += c.len();
            }
            None => {
                current.push(tokens[i]);
                i += 1;
            }
        }
    }

    if !current.is_empty() {
        segments.push(current.join(" "));
    }

    ContrastSplit { segments }
}
