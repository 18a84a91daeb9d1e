//! Chunk extraction: claim sentences to noun-phrase feature candidates
//!
//! The pipeline for a pasted claim set is split → clean → chunk →
//! feature rules → highlight. Only the highlighting touches the claim
//! text; everything else produces new values.

mod chunker;
mod clean;
mod extractor;
mod highlight;
mod pos;
mod tagger;

pub use chunker::{Chunk, NounPhraseParser, RuleChunker};
pub use clean::{clean_claim, split_claims};
pub use extractor::{article_candidate, ChunkExtractor, ARTICLES, STOP_PREPOSITIONS};
pub use highlight::{Highlighter, DEFAULT_HIGHLIGHT_CLOSE, DEFAULT_HIGHLIGHT_OPEN};
pub use pos::{PosTag, Token};
pub use tagger::LexiconTagger;

use crate::claim::ClaimId;
use indexmap::IndexMap;
use tracing::info;

/// Result of running extraction over a whole claim set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedClaims {
    /// Cleaned claim sentences, claim 1 first
    pub claims: Vec<String>,
    /// Feature candidates per claim, parallel to `claims`
    pub features: Vec<Vec<String>>,
    /// Claims with their features highlighted, parallel to `claims`
    pub highlighted: Vec<String>,
}

impl ExtractedClaims {
    pub fn claim_count(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    /// Cleaned claims keyed `Cl_1..Cl_N`
    pub fn claims_by_id(&self) -> IndexMap<ClaimId, String> {
        self.claims
            .iter()
            .enumerate()
            .map(|(i, claim)| (ClaimId::from_position(i), claim.clone()))
            .collect()
    }

    /// Extracted features keyed `Cl_1..Cl_N`
    pub fn features_by_id(&self) -> IndexMap<ClaimId, Vec<String>> {
        self.features
            .iter()
            .enumerate()
            .map(|(i, features)| (ClaimId::from_position(i), features.clone()))
            .collect()
    }
}

/// Split, clean, extract and highlight every claim of a pasted claim set.
pub fn extract_claims<P: NounPhraseParser>(
    text: &str,
    extractor: &ChunkExtractor<P>,
    highlighter: &Highlighter,
) -> ExtractedClaims {
    let claims: Vec<String> = split_claims(text).iter().map(|c| clean_claim(c)).collect();
    let features: Vec<Vec<String>> = claims.iter().map(|c| extractor.extract(c)).collect();
    let highlighted = claims
        .iter()
        .zip(&features)
        .map(|(claim, chunks)| highlighter.highlight(claim, chunks))
        .collect();

    info!(
        claims = claims.len(),
        features = features.iter().map(Vec::len).sum::<usize>(),
        "extracted claim set"
    );

    ExtractedClaims {
        claims,
        features,
        highlighted,
    }
}
