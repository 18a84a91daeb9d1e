//! Tokens and part-of-speech tags

use serde::{Deserialize, Serialize};

/// Coarse part-of-speech tags (universal tag set subset)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PosTag {
    /// Determiner ("a", "each", "its")
    Det,
    Adj,
    Noun,
    /// Proper noun or acronym ("LED", "CPU")
    Propn,
    Num,
    Pron,
    Verb,
    Aux,
    /// Adposition ("of", "for", "between")
    Adp,
    Cconj,
    Sconj,
    Adv,
    /// Particle ("to" before an infinitive)
    Part,
    Punct,
}

impl PosTag {
    /// Whether this tag may appear inside a noun phrase
    pub fn is_nominal(self) -> bool {
        matches!(
            self,
            PosTag::Det | PosTag::Adj | PosTag::Noun | PosTag::Propn | PosTag::Num
        )
    }

    /// Whether this tag can head a noun phrase
    pub fn is_noun(self) -> bool {
        matches!(self, PosTag::Noun | PosTag::Propn)
    }
}

/// A token with its byte span in the source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub tag: PosTag,
    pub start: usize,
    pub end: usize,
}

/// A raw token span before tagging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Span {
    pub start: usize,
    pub end: usize,
    pub punct: bool,
}

/// Split text into word and punctuation spans.
///
/// Whitespace separates words. Leading and trailing non-alphanumeric
/// characters of a word become single-character punctuation spans, so
/// "housing," yields "housing" and ",". Inner characters (hyphens,
/// slashes, apostrophes) stay part of the word.
pub(crate) fn tokenize(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut word_start: Option<usize> = None;

    for (i, c) in text.char_indices() {
        if c.is_whitespace() {
            if let Some(start) = word_start.take() {
                split_word(text, start, i, &mut spans);
            }
        } else if word_start.is_none() {
            word_start = Some(i);
        }
    }
    if let Some(start) = word_start {
        split_word(text, start, text.len(), &mut spans);
    }

    spans
}

fn split_word(text: &str, start: usize, end: usize, spans: &mut Vec<Span>) {
    let word = &text[start..end];

    let core_start = word
        .char_indices()
        .find(|(_, c)| c.is_alphanumeric())
        .map(|(i, _)| i);

    let Some(core_start) = core_start else {
        for (i, c) in word.char_indices() {
            spans.push(Span {
                start: start + i,
                end: start + i + c.len_utf8(),
                punct: true,
            });
        }
        return;
    };

    // Last alphanumeric char marks the end of the core word
    let core_end = word
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_alphanumeric())
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(word.len());

    for (i, c) in word[..core_start].char_indices() {
        spans.push(Span {
            start: start + i,
            end: start + i + c.len_utf8(),
            punct: true,
        });
    }
    spans.push(Span {
        start: start + core_start,
        end: start + core_end,
        punct: false,
    });
    for (i, c) in word[core_end..].char_indices() {
        spans.push(Span {
            start: start + core_end + i,
            end: start + core_end + i + c.len_utf8(),
            punct: true,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<&str> {
        tokenize(text).iter().map(|s| &text[s.start..s.end]).collect()
    }

    #[test]
    fn splits_trailing_punctuation() {
        assert_eq!(
            words("a housing, comprising: a sensor."),
            vec!["a", "housing", ",", "comprising", ":", "a", "sensor", "."]
        );
    }

    #[test]
    fn keeps_inner_hyphens() {
        assert_eq!(words("a so-called read/write head"), vec!["a", "so-called", "read/write", "head"]);
    }

    #[test]
    fn punctuation_only_word() {
        let spans = tokenize("a -- b");
        assert_eq!(spans.len(), 4);
        assert!(spans[1].punct && spans[2].punct);
    }

    #[test]
    fn empty_text_has_no_tokens() {
        assert!(tokenize("   ").is_empty());
    }
}
