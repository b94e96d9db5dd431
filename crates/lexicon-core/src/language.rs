//! Language tags and plural rules.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A bundle's language tag as written in the input (`pt`, `ptBr`, `en`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Language(String);

impl Language {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercased tag with separators removed: `pt-BR`, `pt_br` and `ptBr`
    /// all fold to `ptbr`.
    pub fn folded(&self) -> String {
        self.0
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect()
    }

    /// Primary subtag: `pt` for `pt-BR`, `pt_BR` and `ptBr`.
    pub fn primary(&self) -> String {
        let head = self.0.split(&['-', '_'][..]).next().unwrap_or(&self.0);
        // camelCase tags like `ptBr` carry the region after the first uppercase letter.
        let camel = head.starts_with(|c: char| c.is_ascii_lowercase());
        let end = head
            .char_indices()
            .skip(1)
            .find(|(_, c)| camel && c.is_ascii_uppercase())
            .map(|(i, _)| i)
            .unwrap_or(head.len());
        head[..end].to_ascii_lowercase()
    }

    /// Plural category for `n` under this language's rule.
    ///
    /// Simplified from CLDR: every `pt` tag, `pt-PT` included, uses the
    /// Brazilian 0-or-1 rule, and only whole numbers are singular, so `1.5`
    /// is `Other` where CLDR `pt` (`i = 0..1`) would say `One`.
    pub fn plural_category(&self, n: f64) -> PluralCategory {
        let primary = self.primary();
        let integral = n.fract() == 0.0;
        let one = match primary.as_str() {
            // pt-BR and fr treat 0 and 1 as singular.
            "pt" | "fr" => integral && (n == 0.0 || n == 1.0),
            _ => integral && n == 1.0,
        };
        if one {
            PluralCategory::One
        } else {
            PluralCategory::Other
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Language {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Language {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Plural categories used for `_one` / `_other` key suffixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluralCategory {
    One,
    Other,
}

impl PluralCategory {
    pub fn suffix(self) -> &'static str {
        match self {
            Self::One => "one",
            Self::Other => "other",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folded_equates_spellings() {
        assert_eq!(Language::from("pt-BR").folded(), "ptbr");
        assert_eq!(Language::from("pt_br").folded(), "ptbr");
        assert_eq!(Language::from("ptBr").folded(), "ptbr");
    }

    #[test]
    fn test_primary_subtag() {
        assert_eq!(Language::from("pt-BR").primary(), "pt");
        assert_eq!(Language::from("ptBr").primary(), "pt");
        assert_eq!(Language::from("EN").primary(), "en");
        assert_eq!(Language::from("tr").primary(), "tr");
    }

    #[test]
    fn test_plural_rules() {
        let pt = Language::from("pt");
        assert_eq!(pt.plural_category(0.0), PluralCategory::One);
        assert_eq!(pt.plural_category(1.0), PluralCategory::One);
        assert_eq!(pt.plural_category(2.0), PluralCategory::Other);
        assert_eq!(pt.plural_category(1.5), PluralCategory::Other);
        assert_eq!(
            Language::from("pt-PT").plural_category(0.0),
            PluralCategory::One
        );

        let en = Language::from("en");
        assert_eq!(en.plural_category(0.0), PluralCategory::Other);
        assert_eq!(en.plural_category(1.0), PluralCategory::One);
    }
}
