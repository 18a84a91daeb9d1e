//! Text reports derived from a case record
//!
//! - [`cite_claim`]: claim 1 with a citation placeholder after every feature,
//!   one feature per line, as a starting point for a communication.
//! - [`ross_summary`]: the short summary of the general fields and markers.
//! - [`summary_document`]: the full case summary as a Markdown document.

use crate::case::{fields, CaseName, CaseRecord};
use crate::claim::ClaimId;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

/// Citation placeholder appended after each cited feature
pub const DEFAULT_CITATION: &str = " (D1: abstr., fig., page )";

/// Fields of the summary table, in document order
pub const SUMMARY_FIELDS: [&str; 9] = [
    fields::INDEPENDENT_CLAIMS,
    fields::PTBS,
    fields::SOLUTION,
    fields::TECHNICAL_EFFECT,
    fields::KEYWORDS,
    fields::CLASSES,
    fields::REMARKS,
    fields::UNITY,
    fields::PRIOR_ART,
];

/// Fields of the short summary, followed by the marker combinations
pub const ROSS_FIELDS: [&str; 6] = [
    fields::PTBS,
    fields::TECHNICAL_EFFECT,
    fields::SOLUTION,
    fields::KEYWORDS,
    fields::CLASSES,
    fields::REMARKS,
];

pub const NO_IMAGE_NOTICE: &str = "You did not provide an application image.";

static LEADING_NON_LETTERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^a-zA-Z]+").expect("leading non-letter pattern is valid"));
static CLOSING_PAREN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\)([.,;:]?)").expect("closing parenthesis pattern is valid"));
static ARTICLE_AFTER_PUNCT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([.,;:]) (\b(?:a|an)\b )").expect("article pattern is valid"));

/// Insert `citation` after every whole-word occurrence of a feature and
/// break the text into one cited feature per line.
///
/// Returns `None` when there is no claim text or no feature to cite.
pub fn cite_text(claim: &str, features: &[String], citation: &str) -> Option<String> {
    let features: Vec<&String> = features.iter().filter(|f| !f.is_empty()).collect();
    if claim.is_empty() || features.is_empty() {
        return None;
    }

    let alternation = features
        .iter()
        .map(|f| regex::escape(f))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = Regex::new(&format!(r"\b({alternation})\b")).ok()?;

    let cited = pattern.replace_all(claim, |caps: &regex::Captures<'_>| format!("{}{citation}", &caps[0]));
    let cited = LEADING_NON_LETTERS.replace(&cited, NoExpand(""));
    let cited = CLOSING_PAREN.replace_all(&cited, ")${1}\n");
    let cited = ARTICLE_AFTER_PUNCT.replace_all(&cited, "${1}\n${2}");
    Some(cited.into_owned())
}

/// Citation draft for claim 1 of a record, from its cleaned claim text and
/// reviewed claim-1 features.
pub fn cite_claim(record: &CaseRecord, citation: &str) -> Option<String> {
    let first = ClaimId::new(1);
    let claim = record.user_claims().ok().flatten()?.shift_remove(&first)?;
    let features = record
        .edited_feature_table()
        .ok()
        .flatten()?
        .shift_remove(&first)?;
    cite_text(&claim, &features, citation)
}

/// Short summary: the general fields, then the marker combinations on one
/// comma-separated line.
pub fn ross_summary(record: &CaseRecord) -> String {
    let mut lines: Vec<String> = ROSS_FIELDS.iter().map(|key| record.display_text(key)).collect();
    lines.push(record.combinations().join(", "));
    lines.join("\n").trim().to_string()
}

/// The case summary as Markdown: a title with the date, a table of the
/// summary fields, then the application image or a notice that it is
/// missing.
pub fn summary_document(name: &CaseName, record: &CaseRecord, image: Option<&str>, today: NaiveDate) -> String {
    let mut doc = format!("# {name}\t{}\n\n", today.format("%Y-%m-%d"));
    doc.push_str("| Field | Value |\n|---|---|\n");
    for key in SUMMARY_FIELDS {
        doc.push_str(&format!("| **{key}** | {} |\n", table_cell(&record.display_text(key))));
    }
    doc.push('\n');
    match image {
        Some(reference) => doc.push_str(&format!("![Application image]({reference})\n")),
        None => doc.push_str(&format!("*{NO_IMAGE_NOTICE}*\n")),
    }
    doc
}

/// Keep multi-line values and pipes inside one Markdown table cell
fn table_cell(text: &str) -> String {
    text.trim().replace('|', "\\|").replace('\n', "<br>")
}
