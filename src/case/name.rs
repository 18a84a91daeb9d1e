//! Case names safe for use as directory and file names

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fallback when nothing printable survives sanitizing
const EMPTY_NAME: &str = "file";

/// A sanitized case name
///
/// Only ASCII word characters, `.` and `-` survive; runs of spaces become
/// `_`. Use [`CaseName::sanitize`] for user input; [`CaseName::from_string`]
/// trusts its input (names read back from a store).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseName(String);

impl CaseName {
    /// Sanitize a user supplied name, optionally appending a random
    /// `_xxxxxx` suffix so repeated uploads don't collide.
    pub fn sanitize(raw: &str, uuid_suffix: bool) -> Self {
        let mut name = String::with_capacity(raw.len());
        for c in raw.chars().filter_map(fold_ascii) {
            if c == ' ' {
                if !name.ends_with(' ') {
                    name.push(' ');
                }
            } else if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
                name.push(c);
            }
        }
        let mut name = name
            .replace(' ', "_")
            .trim_matches(|c: char| c == '.' || c == '_')
            .to_string();

        if name.is_empty() {
            name = EMPTY_NAME.to_string();
        }
        if uuid_suffix {
            let hex = Uuid::new_v4().simple().to_string();
            name.push('_');
            name.push_str(&hex[..6]);
        }
        Self(name)
    }

    pub fn from_string(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Map a character to its unaccented ASCII base letter; other non-ASCII
/// characters are dropped.
fn fold_ascii(c: char) -> Option<char> {
    if c.is_ascii() {
        return Some(c);
    }
    let base = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' | 'Ā' | 'Ă' | 'Ą' => 'A',
        'ç' | 'ć' | 'č' => 'c',
        'Ç' | 'Ć' | 'Č' => 'C',
        'ď' => 'd',
        'Ď' => 'D',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ė' | 'ę' | 'ě' => 'e',
        'È' | 'É' | 'Ê' | 'Ë' | 'Ē' | 'Ė' | 'Ę' | 'Ě' => 'E',
        'ì' | 'í' | 'î' | 'ï' | 'ī' | 'į' => 'i',
        'Ì' | 'Í' | 'Î' | 'Ï' | 'Ī' | 'Į' | 'İ' => 'I',
        'ñ' | 'ń' | 'ň' => 'n',
        'Ñ' | 'Ń' | 'Ň' => 'N',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ō' | 'ő' => 'o',
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ō' | 'Ő' => 'O',
        'ř' => 'r',
        'Ř' => 'R',
        'ś' | 'š' | 'ş' => 's',
        'Ś' | 'Š' | 'Ş' => 'S',
        'ť' | 'ţ' => 't',
        'Ť' | 'Ţ' => 'T',
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' | 'ų' => 'u',
        'Ù' | 'Ú' | 'Û' | 'Ü' | 'Ū' | 'Ů' | 'Ű' | 'Ų' => 'U',
        'ý' | 'ÿ' => 'y',
        'Ý' | 'Ÿ' => 'Y',
        'ź' | 'ż' | 'ž' => 'z',
        'Ź' | 'Ż' | 'Ž' => 'Z',
        _ => return None,
    };
    Some(base)
}

impl std::fmt::Display for CaseName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for CaseName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean(raw: &str) -> String {
        CaseName::sanitize(raw, false).as_str().to_string()
    }

    #[test]
    fn replaces_whitespace_and_drops_punctuation() {
        assert_eq!(clean("EP 1234567 (draft)"), "EP_1234567_draft");
        assert_eq!(clean("a/b\\c:d"), "abcd");
        assert_eq!(clean("v1.2-rc"), "v1.2-rc");
    }

    #[test]
    fn folds_accents() {
        assert_eq!(clean("Café Müller"), "Cafe_Muller");
        assert_eq!(clean("日本 case"), "case");
    }

    #[test]
    fn strips_edge_dots_and_underscores() {
        assert_eq!(clean("  ..hidden case_ "), "hidden_case");
        assert_eq!(clean("../../etc/passwd"), "etcpasswd");
    }

    #[test]
    fn empty_becomes_file() {
        assert_eq!(clean(""), "file");
        assert_eq!(clean("?!"), "file");
        assert_eq!(clean(" _. "), "file");
    }

    #[test]
    fn uuid_suffix_is_six_hex_digits() {
        let name = CaseName::sanitize("case", true);
        let (base, suffix) = name.as_str().split_once('_').unwrap();
        assert_eq!(base, "case");
        assert_eq!(suffix.len(), 6);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
