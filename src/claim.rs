//! Claim labels

use serde::{Deserialize, Serialize};

const PREFIX: &str = "Cl_";

/// Label of one claim column, `Cl_1`, `Cl_2`, …
///
/// Serializes as a plain string. Labels read back from a hand-edited
/// record may not follow the `Cl_<n>` pattern; they are kept verbatim and
/// [`ClaimId::number`] returns `None` for them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimId(String);

impl ClaimId {
    /// Label for the 1-based claim number
    pub fn new(number: usize) -> Self {
        Self(format!("{PREFIX}{number}"))
    }

    /// Label for a 0-based position in a claim list
    pub fn from_position(position: usize) -> Self {
        Self::new(position + 1)
    }

    pub fn from_string(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The 1-based claim number, if the label has the `Cl_<n>` form
    pub fn number(&self) -> Option<usize> {
        self.0.strip_prefix(PREFIX)?.parse().ok()
    }
}

impl std::fmt::Display for ClaimId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parses `Cl_<n>` labels as given and a bare number `n` as `Cl_<n>`
impl std::str::FromStr for ClaimId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("empty claim label".to_string());
        }
        Ok(match s.parse::<usize>() {
            Ok(number) => Self::new(number),
            Err(_) => Self(s.to_string()),
        })
    }
}

impl From<&str> for ClaimId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ClaimId {
    fn from(s: String) -> Self {
        Self(s)
    }
}
