//! Feature candidates from a single claim sentence

use super::chunker::{Chunk, NounPhraseParser, RuleChunker};
use super::pos::PosTag;
use once_cell::sync::Lazy;
use tracing::debug;

/// Articles kept at the start of a chunk
pub const ARTICLES: [&str; 3] = ["a", "an", "the"];

/// A chunk is cut at the first of these tokens
pub const STOP_PREPOSITIONS: [&str; 6] = ["for", "with", "by", "of", "on", "at"];

static SHARED: Lazy<ChunkExtractor> = Lazy::new(ChunkExtractor::new);

fn is_article(word: &str) -> bool {
    ARTICLES.contains(&word.to_lowercase().as_str())
}

fn is_stop_preposition(word: &str) -> bool {
    STOP_PREPOSITIONS.contains(&word.to_lowercase().as_str())
}

/// Extracts noun-phrase features from cleaned claim sentences.
///
/// The parser does the linguistic segmentation; the extractor applies the
/// feature rules on top of its chunks:
///
/// 1. a leading determiner other than an article is dropped;
/// 2. the chunk is cut at the first stop preposition;
/// 3. chunks shorter than two words are discarded;
/// 4. the first article + alphabetic word pair of the raw claim is put in
///    front of the result.
#[derive(Debug, Clone)]
pub struct ChunkExtractor<P = RuleChunker> {
    parser: P,
}

impl ChunkExtractor<RuleChunker> {
    pub fn new() -> Self {
        Self {
            parser: RuleChunker::new(),
        }
    }

    /// Process-wide extractor; the lexicon is built on first use.
    pub fn shared() -> &'static ChunkExtractor {
        &SHARED
    }
}

impl Default for ChunkExtractor<RuleChunker> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: NounPhraseParser> ChunkExtractor<P> {
    pub fn with_parser(parser: P) -> Self {
        Self { parser }
    }

    /// Feature candidates for one claim, in output order.
    pub fn extract(&self, claim: &str) -> Vec<String> {
        if claim.trim().is_empty() {
            return Vec::new();
        }

        let chunks = self.parser.noun_chunks(claim);
        let chunk_count = chunks.len();
        let mut features: Vec<String> = chunks.iter().filter_map(feature_from_chunk).collect();

        if let Some(candidate) = article_candidate(claim) {
            features.insert(0, candidate);
        }

        debug!(chunks = chunk_count, features = features.len(), "extracted claim features");
        features
    }
}

/// Apply the determiner, stop-preposition and length rules to one chunk.
fn feature_from_chunk(chunk: &Chunk) -> Option<String> {
    let mut words: Vec<&str> = chunk.text.split_whitespace().collect();

    let drops_determiner = chunk.first_tag() == Some(PosTag::Det)
        && words.first().is_some_and(|w| !is_article(w));
    if drops_determiner {
        words.remove(0);
    }

    if let Some(cut) = words.iter().position(|w| is_stop_preposition(w)) {
        words.truncate(cut);
    }

    (words.len() > 1).then(|| words.join(" "))
}

/// First article directly followed by a purely alphabetic word.
pub fn article_candidate(claim: &str) -> Option<String> {
    let words: Vec<&str> = claim.split_whitespace().collect();
    words.windows(2).find_map(|pair| {
        let (article, word) = (pair[0], pair[1]);
        (is_article(article) && word.chars().all(char::is_alphabetic))
            .then(|| format!("{article} {word}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::pos::Token;

    /// Parser returning fixed chunks, so the feature rules can be tested
    /// independently of tagging quality.
    struct FixedParser(Vec<Vec<(&'static str, PosTag)>>);

    impl NounPhraseParser for FixedParser {
        fn noun_chunks(&self, _text: &str) -> Vec<Chunk> {
            self.0
                .iter()
                .map(|words| Chunk {
                    text: words.iter().map(|(w, _)| *w).collect::<Vec<_>>().join(" "),
                    tokens: words
                        .iter()
                        .map(|(w, tag)| Token {
                            text: w.to_string(),
                            tag: *tag,
                            start: 0,
                            end: 0,
                        })
                        .collect(),
                })
                .collect()
        }
    }

    fn extractor(chunks: Vec<Vec<(&'static str, PosTag)>>) -> ChunkExtractor<FixedParser> {
        ChunkExtractor::with_parser(FixedParser(chunks))
    }

    #[test]
    fn drops_non_article_determiner() {
        let ex = extractor(vec![vec![
            ("Each", PosTag::Det),
            ("sensor", PosTag::Noun),
            ("element", PosTag::Noun),
        ]]);
        assert_eq!(ex.extract("x"), vec!["sensor element"]);
    }

    #[test]
    fn keeps_articles() {
        let ex = extractor(vec![vec![("The", PosTag::Det), ("valve", PosTag::Noun)]]);
        assert_eq!(ex.extract("1 x"), vec!["The valve"]);
    }

    #[test]
    fn truncates_at_stop_preposition() {
        let ex = extractor(vec![vec![
            ("a", PosTag::Det),
            ("plurality", PosTag::Noun),
            ("of", PosTag::Adp),
            ("sensor", PosTag::Noun),
            ("elements", PosTag::Noun),
        ]]);
        assert_eq!(ex.extract("1"), vec!["a plurality"]);
    }

    #[test]
    fn discards_single_word_after_truncation() {
        let ex = extractor(vec![
            vec![("sensor", PosTag::Noun)],
            vec![("its", PosTag::Det), ("housing", PosTag::Noun)],
            vec![("valve", PosTag::Noun), ("With", PosTag::Adp), ("seat", PosTag::Noun)],
        ]);
        assert!(ex.extract("1").is_empty());
    }

    #[test]
    fn article_candidate_goes_first_once() {
        let ex = extractor(vec![vec![("a", PosTag::Det), ("big", PosTag::Adj), ("pump", PosTag::Noun)]]);
        let out = ex.extract("comprising a pump, an inlet and the outlet");
        assert_eq!(out, vec!["an inlet", "a big pump"]);
    }

    #[test]
    fn article_candidate_requires_alphabetic_word() {
        assert_eq!(article_candidate("a 3-way valve and the valve"), Some("the valve".to_string()));
        assert_eq!(article_candidate("A device"), Some("A device".to_string()));
        assert_eq!(article_candidate("the"), None);
        assert_eq!(article_candidate(""), None);
    }

    #[test]
    fn empty_claim_yields_nothing() {
        assert!(ChunkExtractor::shared().extract("   ").is_empty());
    }

    #[test]
    fn extracts_real_claim() {
        let out = ChunkExtractor::shared().extract(
            "A device for measuring a pressure, comprising: a housing and a sensor element arranged in the housing.",
        );
        assert_eq!(
            out,
            vec!["A device", "A device", "a pressure", "a housing", "a sensor element", "the housing"]
        );
    }
}
