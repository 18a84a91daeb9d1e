//! Claim text normalization

use once_cell::sync::Lazy;
use regex::Regex;

static PARENTHESIZED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\([^)]*\)").expect("parenthesis pattern is valid"));

/// Remove parenthesized content (reference signs, remarks) and collapse whitespace.
pub fn clean_claim(claim: &str) -> String {
    let stripped = PARENTHESIZED.replace_all(claim, "");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split a pasted claim set into one claim per non-empty line.
pub fn split_claims(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_reference_signs() {
        assert_eq!(
            clean_claim("A device (1) having  a housing (10, 12)."),
            "A device having a housing ."
        );
    }

    #[test]
    fn unbalanced_parenthesis_is_kept() {
        assert_eq!(clean_claim("a valve (open"), "a valve (open");
    }

    #[test]
    fn splits_on_lines_and_skips_blank() {
        let claims = split_claims("1. A device.\n\n   \n2. The device of claim 1.  \n");
        assert_eq!(claims, vec!["1. A device.", "2. The device of claim 1."]);
    }
}
