//! Lexicon-driven part-of-speech tagger for claim language
//!
//! Closed word classes (determiners, adpositions, conjunctions, auxiliaries)
//! come from a fixed lexicon. Open-class words are resolved from their
//! suffix and the tags of their neighbours. The tagger is tuned for the
//! register of patent claims ("a sensor element arranged in the housing"),
//! not for general English.

use super::pos::{tokenize, PosTag, Token};
use std::collections::{HashMap, HashSet};

const DETERMINERS: &[&str] = &[
    "a", "an", "the", "each", "every", "any", "some", "all", "both", "this", "these", "those",
    "its", "their", "his", "her", "our", "your", "my", "no", "another", "either", "neither",
    "such", "whose",
];

const ADPOSITIONS: &[&str] = &[
    "of", "for", "with", "by", "on", "at", "in", "from", "into", "onto", "between", "through",
    "via", "under", "over", "within", "without", "along", "about", "above", "below", "upon",
    "across", "after", "before", "during", "against", "toward", "towards", "around", "among",
    "beside", "behind", "beyond", "inside", "outside", "near", "per", "throughout",
    "underneath", "except", "like", "than",
];

const COORDINATORS: &[&str] = &["and", "or", "but", "nor", "and/or"];

const SUBORDINATORS: &[&str] = &[
    "wherein", "whereby", "whereas", "when", "where", "while", "if", "whether", "because",
    "although", "thereby", "so",
];

const PRONOUNS: &[&str] = &[
    "it", "they", "them", "which", "who", "whom", "that", "itself", "themselves", "thereof",
    "therein", "thereto", "same",
];

const AUXILIARIES: &[&str] = &[
    "is", "are", "was", "were", "be", "been", "being", "am", "has", "have", "had", "does", "do",
    "did", "can", "could", "may", "might", "will", "would", "shall", "should", "must",
];

const VERBS: &[&str] = &[
    "comprising", "comprises", "comprise", "comprised", "including", "includes", "include",
    "having", "consisting", "consists", "containing", "contains", "contain", "characterized",
    "characterised", "configured", "adapted", "arranged", "designed", "operable", "provided",
    "connected", "coupled", "disposed", "located", "positioned", "mounted", "attached",
    "formed", "defined", "selected", "according", "measures", "generates", "determines",
    "detects", "receives", "transmits", "provides", "performs", "calculates", "compares",
    "outputs", "converts", "applies", "moves", "rotates", "extends", "connects", "couples",
    "forms", "defines", "extending", "based",
];

const ADJECTIVES: &[&str] = &[
    "said", "first", "second", "third", "fourth", "fifth", "sixth", "seventh", "eighth",
    "ninth", "tenth", "last", "main", "upper", "lower", "inner", "outer", "front", "rear",
    "top", "bottom", "left", "right", "other", "different", "predetermined", "predefined",
    "respective", "new", "high", "low", "small", "large", "long", "short", "wide", "narrow",
    "thin", "thick", "hollow", "flat", "single", "multiple", "several", "various", "digital",
    "analog", "further", "additional",
];

const ADVERBS: &[&str] = &["not", "very", "also", "then", "therefore", "respectively", "least", "only", "more"];

const NUMBER_WORDS: &[&str] = &[
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "hundred",
];

/// Nouns that would otherwise be read as gerunds or participles
const ING_NOUNS: &[&str] = &[
    "housing", "bearing", "coating", "opening", "winding", "spring", "string", "thing", "casing",
    "fitting", "setting", "wiring", "lining", "building", "ceiling", "padding", "tubing",
    "piping", "recording", "drawing", "mounting", "coupling", "sealing", "ring",
];

/// Nouns ending in "ly" that are not adverbs
const LY_NOUNS: &[&str] = &["assembly", "supply", "family", "anomaly", "reply", "butterfly"];

const ADJ_SUFFIXES: &[&str] = &["al", "ic", "ive", "ous", "ful", "less", "able", "ible"];

/// Rule-based part-of-speech tagger.
///
/// Construction builds the lexicon tables once; tagging is read-only and
/// can be shared across threads.
#[derive(Debug, Clone)]
pub struct LexiconTagger {
    lexicon: HashMap<&'static str, PosTag>,
    ing_nouns: HashSet<&'static str>,
    ly_nouns: HashSet<&'static str>,
}

impl Default for LexiconTagger {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconTagger {
    pub fn new() -> Self {
        let mut lexicon = HashMap::new();
        // Later tables win on overlap
        let tables: [(&[&'static str], PosTag); 10] = [
            (NUMBER_WORDS, PosTag::Num),
            (ADJECTIVES, PosTag::Adj),
            (ADVERBS, PosTag::Adv),
            (VERBS, PosTag::Verb),
            (AUXILIARIES, PosTag::Aux),
            (PRONOUNS, PosTag::Pron),
            (SUBORDINATORS, PosTag::Sconj),
            (COORDINATORS, PosTag::Cconj),
            (ADPOSITIONS, PosTag::Adp),
            (DETERMINERS, PosTag::Det),
        ];
        for (words, tag) in tables {
            for word in words {
                lexicon.insert(*word, tag);
            }
        }
        lexicon.insert("to", PosTag::Part);

        Self {
            lexicon,
            ing_nouns: ING_NOUNS.iter().copied().collect(),
            ly_nouns: LY_NOUNS.iter().copied().collect(),
        }
    }

    /// Tag every token of `text`
    pub fn tag(&self, text: &str) -> Vec<Token> {
        let spans = tokenize(text);
        let lowered: Vec<String> = spans
            .iter()
            .map(|s| text[s.start..s.end].to_lowercase())
            .collect();
        let lexical: Vec<Option<PosTag>> = spans
            .iter()
            .zip(&lowered)
            .map(|(span, word)| {
                if span.punct {
                    Some(PosTag::Punct)
                } else {
                    self.lookup(word)
                }
            })
            .collect();

        let mut tokens: Vec<Token> = Vec::with_capacity(spans.len());
        for (i, span) in spans.iter().enumerate() {
            let original = &text[span.start..span.end];
            let prev = tokens.last().map(|t| t.tag);
            let tag = match lexical[i] {
                Some(PosTag::Part) => self.resolve_to(lexical.get(i + 1).copied().flatten()),
                Some(tag) => tag,
                None => self.resolve_open(original, &lowered[i], prev, self.next_is_open(i, &lowered, &lexical)),
            };
            tokens.push(Token {
                text: original.to_string(),
                tag,
                start: span.start,
                end: span.end,
            });
        }

        tokens
    }

    fn lookup(&self, word: &str) -> Option<PosTag> {
        if let Some(tag) = self.lexicon.get(word) {
            return Some(*tag);
        }
        let numeric = word.chars().any(|c| c.is_ascii_digit())
            && word.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',');
        numeric.then_some(PosTag::Num)
    }

    /// "to" is an adposition before a nominal, an infinitive marker otherwise
    fn resolve_to(&self, next: Option<PosTag>) -> PosTag {
        match next {
            Some(PosTag::Det | PosTag::Num | PosTag::Adj | PosTag::Pron) => PosTag::Adp,
            _ => PosTag::Part,
        }
    }

    fn next_is_open(&self, i: usize, lowered: &[String], lexical: &[Option<PosTag>]) -> bool {
        match (lowered.get(i + 1), lexical.get(i + 1)) {
            (Some(word), Some(None)) => {
                !(word.ends_with("ly") && !self.ly_nouns.contains(word.as_str()))
                    && !is_participle(word)
            }
            _ => false,
        }
    }

    fn resolve_open(&self, original: &str, word: &str, prev: Option<PosTag>, next_open: bool) -> PosTag {
        if original.len() >= 2
            && original.chars().any(|c| c.is_alphabetic())
            && original.chars().all(|c| c.is_uppercase() || c.is_ascii_digit())
        {
            return PosTag::Propn;
        }

        if word.len() > 3 && word.ends_with("ly") && !self.ly_nouns.contains(word) {
            return PosTag::Adv;
        }

        match prev {
            Some(PosTag::Part) => return PosTag::Verb,
            Some(PosTag::Aux) => {
                return if is_participle(word) || word.ends_with("ing") || word.ends_with("en") {
                    PosTag::Verb
                } else if has_adj_suffix(word) {
                    PosTag::Adj
                } else {
                    PosTag::Verb
                };
            }
            _ => {}
        }

        let after_modifier = matches!(prev, Some(PosTag::Det | PosTag::Adj | PosTag::Num));
        let after_nominal = after_modifier || matches!(prev, Some(PosTag::Noun | PosTag::Propn));

        if self.ing_nouns.contains(word) {
            return PosTag::Noun;
        }
        if word.len() > 4 && word.ends_with("ing") {
            return if after_nominal && next_open {
                PosTag::Adj
            } else if after_modifier {
                PosTag::Noun
            } else {
                PosTag::Verb
            };
        }
        if is_participle(word) {
            return if after_modifier {
                if next_open {
                    PosTag::Adj
                } else {
                    PosTag::Noun
                }
            } else {
                PosTag::Verb
            };
        }
        if next_open && has_adj_suffix(word) {
            return PosTag::Adj;
        }

        PosTag::Noun
    }
}

fn is_participle(word: &str) -> bool {
    word.len() > 3 && word.ends_with("ed") && !word.ends_with("eed")
}

fn has_adj_suffix(word: &str) -> bool {
    word.len() > 4 && ADJ_SUFFIXES.iter().any(|s| word.ends_with(s))
}
