//! Noun-phrase chunking

use super::pos::{PosTag, Token};
use super::tagger::LexiconTagger;

/// A contiguous noun-phrase span of tagged tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// The source text covered by the chunk
    pub text: String,
    pub tokens: Vec<Token>,
}

impl Chunk {
    /// Tag of the first token, if any
    pub fn first_tag(&self) -> Option<PosTag> {
        self.tokens.first().map(|t| t.tag)
    }
}

/// Anything that can segment a sentence into noun-phrase chunks.
///
/// Implementations must be read-only after construction so one instance
/// can serve every extraction call in the process.
pub trait NounPhraseParser: Send + Sync {
    /// Noun-phrase chunks of `text` in document order
    fn noun_chunks(&self, text: &str) -> Vec<Chunk>;
}

/// Chunker that groups maximal runs of nominal tokens.
///
/// A chunk is a run of determiner, adjective, numeral and noun tokens that
/// contains at least one noun. A determiner inside a run starts a new
/// chunk, and trailing modifiers after the last noun are dropped.
#[derive(Debug, Clone, Default)]
pub struct RuleChunker {
    tagger: LexiconTagger,
}

impl RuleChunker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tagger(tagger: LexiconTagger) -> Self {
        Self { tagger }
    }

    fn close_run(text: &str, run: &mut Vec<Token>, chunks: &mut Vec<Chunk>) {
        let Some(last_noun) = run.iter().rposition(|t| t.tag.is_noun()) else {
            run.clear();
            return;
        };
        run.truncate(last_noun + 1);
        let start = run[0].start;
        let end = run[last_noun].end;
        chunks.push(Chunk {
            text: text[start..end].to_string(),
            tokens: std::mem::take(run),
        });
    }
}

impl NounPhraseParser for RuleChunker {
    fn noun_chunks(&self, text: &str) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        let mut run: Vec<Token> = Vec::new();

        for token in self.tagger.tag(text) {
            if !token.tag.is_nominal() {
                Self::close_run(text, &mut run, &mut chunks);
                continue;
            }
            let starts_new = token.tag == PosTag::Det
                && run.iter().any(|t| t.tag != PosTag::Det);
            if starts_new {
                Self::close_run(text, &mut run, &mut chunks);
            }
            run.push(token);
        }
        Self::close_run(text, &mut run, &mut chunks);

        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk_texts(text: &str) -> Vec<String> {
        RuleChunker::new()
            .noun_chunks(text)
            .into_iter()
            .map(|c| c.text)
            .collect()
    }

    #[test]
    fn chunks_claim_sentence() {
        assert_eq!(
            chunk_texts("A device for measuring a pressure, comprising: a housing and a sensor element arranged in the housing."),
            vec!["A device", "a pressure", "a housing", "a sensor element", "the housing"]
        );
    }

    #[test]
    fn determiner_inside_run_splits_chunk() {
        assert_eq!(chunk_texts("the valve the seat"), vec!["the valve", "the seat"]);
    }

    #[test]
    fn run_without_noun_is_dropped() {
        assert!(chunk_texts("is very flat").is_empty());
    }

    #[test]
    fn non_article_determiner_stays_in_chunk() {
        let chunks = RuleChunker::new().noun_chunks("each sensor element");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].first_tag(), Some(PosTag::Det));
        assert_eq!(chunks[0].text, "each sensor element");
    }
}
