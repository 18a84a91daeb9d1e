//! Claim color palette

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Claim colors, assigned in first-encounter order and cycled
pub const DEFAULT_PALETTE: [&str; 16] = [
    "red", "orange", "lime", "turquoise", "hotpink", "khaki", "blue", "green", "yellow", "violet",
    "coral", "pink", "steelblue", "salmon", "tomato", "springgreen",
];

/// Color of nodes restored without a color
pub const DEFAULT_NODE_COLOR: &str = "lightblue";

/// Color of nodes added interactively
pub const INTERACTIVE_NODE_COLOR: &str = "yellow";

/// Ordered list of colors handed out to claims.
///
/// Serializes as a plain list of color names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette(Vec<String>);

impl Default for Palette {
    fn default() -> Self {
        Self(DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect())
    }
}

/// One line of the claim color legend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendEntry {
    pub label: String,
    pub color: String,
}

impl Palette {
    /// A palette from explicit colors; an empty list falls back to the default.
    pub fn new(colors: Vec<String>) -> Self {
        if colors.is_empty() {
            Self::default()
        } else {
            Self(colors)
        }
    }

    pub fn colors(&self) -> &[String] {
        &self.0
    }

    /// Color at `position`, wrapping around the palette
    pub fn color_at(&self, position: usize) -> &str {
        if self.0.is_empty() {
            return DEFAULT_NODE_COLOR;
        }
        &self.0[position % self.0.len()]
    }

    /// "Claim 1" … "Claim n" with their palette colors
    pub fn legend(&self, claim_count: usize) -> Vec<LegendEntry> {
        (0..claim_count)
            .map(|i| LegendEntry {
                label: format!("Claim {}", i + 1),
                color: self.color_at(i).to_string(),
            })
            .collect()
    }

    /// A fresh per-build color assignment
    pub fn assigner(&self) -> ClaimColors<'_> {
        ClaimColors {
            palette: self,
            assigned: HashMap::new(),
        }
    }
}

/// Binds each distinct claim label to the next palette color
#[derive(Debug)]
pub struct ClaimColors<'a> {
    palette: &'a Palette,
    assigned: HashMap<String, usize>,
}

impl<'a> ClaimColors<'a> {
    pub fn color_for(&mut self, claim: &str) -> &'a str {
        let next = self.assigned.len();
        let position = *self.assigned.entry(claim.to_string()).or_insert(next);
        self.palette.color_at(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assigns_in_first_encounter_order() {
        let palette = Palette::default();
        let mut colors = palette.assigner();
        assert_eq!(colors.color_for("Cl_2"), "red");
        assert_eq!(colors.color_for("Cl_1"), "orange");
        assert_eq!(colors.color_for("Cl_2"), "red");
    }

    #[test]
    fn wraps_around() {
        let palette = Palette::new(vec!["red".into(), "blue".into()]);
        let mut colors = palette.assigner();
        let assigned: Vec<&str> = ["a", "b", "c"].iter().map(|c| colors.color_for(c)).collect();
        assert_eq!(assigned, vec!["red", "blue", "red"]);
    }

    #[test]
    fn empty_palette_falls_back_to_default() {
        assert_eq!(Palette::new(Vec::new()), Palette::default());
    }

    #[test]
    fn legend_lists_claims() {
        let legend = Palette::default().legend(2);
        assert_eq!(legend[1].label, "Claim 2");
        assert_eq!(legend[1].color, "orange");
    }
}
