//! Display highlighting of extracted chunks inside claim text

use regex::{NoExpand, Regex};

pub const DEFAULT_HIGHLIGHT_OPEN: &str = r#"<b style="color:red;">"#;
pub const DEFAULT_HIGHLIGHT_CLOSE: &str = "</b>";

/// Wraps chunk occurrences in a claim with open/close markup.
///
/// Matching is case-sensitive on word boundaries. Chunks are applied one
/// after another without deduplication, so a later chunk contained in an
/// earlier one wraps the already wrapped text again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlighter {
    open: String,
    close: String,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new(DEFAULT_HIGHLIGHT_OPEN, DEFAULT_HIGHLIGHT_CLOSE)
    }
}

impl Highlighter {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }

    pub fn highlight(&self, claim: &str, chunks: &[String]) -> String {
        let mut highlighted = claim.to_string();
        for chunk in chunks.iter().filter(|c| !c.is_empty()) {
            let pattern = format!(r"\b{}\b", regex::escape(chunk));
            let Ok(re) = Regex::new(&pattern) else {
                continue;
            };
            let wrapped = format!("{}{}{}", self.open, chunk, self.close);
            highlighted = re.replace_all(&highlighted, NoExpand(&wrapped)).into_owned();
        }
        highlighted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_every_occurrence() {
        let h = Highlighter::new("[", "]");
        let out = h.highlight(
            "a sensor element and a sensor element",
            &["sensor element".to_string()],
        );
        assert_eq!(out, "a [sensor element] and a [sensor element]");
    }

    #[test]
    fn respects_word_boundaries_and_case() {
        let h = Highlighter::new("[", "]");
        let out = h.highlight("A valve, valves and a Valve", &["a valve".to_string(), "valve".to_string()]);
        assert_eq!(out, "A [valve], valves and a Valve");
    }

    #[test]
    fn overlapping_chunks_rewrap() {
        let h = Highlighter::new("[", "]");
        let out = h.highlight(
            "a sensor element",
            &["a sensor element".to_string(), "sensor element".to_string()],
        );
        assert_eq!(out, "[a [sensor element]]");
    }

    #[test]
    fn dollar_signs_are_literal() {
        let h = Highlighter::new("<", ">");
        let out = h.highlight("a coin $1 each", &["coin $1".to_string()]);
        assert_eq!(out, "a <coin $1> each");
    }
}
