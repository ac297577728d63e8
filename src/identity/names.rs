use lazy_static::lazy_static;
use tracing::trace;
use unicode_normalization::UnicodeNormalization;

use super::TARGET_IDENTITY;
use crate::normalize::rules::{apply_rules, collapse_whitespace, title_case, Rule};

lazy_static! {
    /// Run before title-casing, while capitals still mark initials
    static ref INITIAL_RULES: Vec<Rule> = vec![
        // "MensahJ." / "MensahJ" -> "Mensah J."
        Rule::new("trailing_initial", r"([a-z])([A-Z])(\.|\s|$)", "$1 $2$3"),
        // "J.Mensah" -> "J. Mensah"
        Rule::new("initial_spacing", r"\.(\p{L})", ". $1"),
        Rule::new("repeated_period", r"\.{2,}", "."),
    ];

    /// Run after title-casing
    static ref DISPLAY_RULES: Vec<Rule> = vec![
        Rule::new("hyphen_spacing", r"\s*-\s*", "-"),
        Rule::new("foreign_chars", r"[^\p{L}\s.\-]", ""),
    ];
}

/// Display form and comparison key of one invigilator name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalName {
    pub display: String,
    pub key: String,
}

impl CanonicalName {
    pub fn is_empty(&self) -> bool {
        self.key.is_empty()
    }
}

/// Turns name fragments into a consistent display form and a letters-only
/// comparison key.
#[derive(Debug, Clone, Default)]
pub struct NameCanonicalizer;

impl NameCanonicalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn canonicalize(&self, raw: &str) -> CanonicalName {
        let shown = self.display_form(raw);
        let key = self.comparison_key(&shown);
        trace!(target: TARGET_IDENTITY, "Name {:?} -> {:?} ({})", raw, shown, key);
        CanonicalName { display: shown, key }
    }

    /// Title case, initials spaced and followed by a period, hyphens tight,
    /// nothing but letters, whitespace, periods and hyphens.
    pub fn display_form(&self, raw: &str) -> String {
        let text = apply_rules(&INITIAL_RULES, &collapse_whitespace(raw));
        let text = apply_rules(&DISPLAY_RULES, &title_case(&text));

        collapse_whitespace(&text)
            .split(' ')
            .map(|token| {
                let mut letters = token.chars();
                match (letters.next(), letters.next()) {
                    (Some(c), None) if c.is_alphabetic() => format!("{}.", c),
                    _ => token.to_string(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Letters only, decomposed and case-folded: "J. Mensah" -> "jmensah"
    pub fn comparison_key(&self, display: &str) -> String {
        display
            .nfkd()
            .filter(|c| c.is_alphabetic())
            .flat_map(char::to_lowercase)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_form() {
        let names = NameCanonicalizer::new();
        assert_eq!(names.display_form("J.Mensah"), "J. Mensah");
        assert_eq!(names.display_form("  KWAME   OWUSU "), "Kwame Owusu");
        assert_eq!(names.display_form("MensahJ."), "Mensah J.");
        assert_eq!(names.display_form("Ama Serwaa - Boateng"), "Ama Serwaa-Boateng");
        assert_eq!(names.display_form("A B Mensah"), "A. B. Mensah");
        assert_eq!(names.display_form("Dr. (Mrs) E. Adjei*"), "Dr. Mrs E. Adjei");
    }

    #[test]
    fn test_comparison_key() {
        let names = NameCanonicalizer::new();
        assert_eq!(names.comparison_key("J. Mensah"), "jmensah");
        assert_eq!(names.comparison_key("Ama Serwaa-Boateng"), "amaserwaaboateng");
        assert_eq!(names.comparison_key("Adjéi"), "adjei");
    }

    #[test]
    fn test_spacing_variants_share_a_key() {
        let names = NameCanonicalizer::new();
        let a = names.canonicalize("J.Mensah");
        let b = names.canonicalize("J. Mensah");
        let c = names.canonicalize("j mensah");
        assert_eq!(a, b);
        assert_eq!(a.key, c.key);
    }

    #[test]
    fn test_empty_names() {
        let names = NameCanonicalizer::new();
        assert!(names.canonicalize("   ").is_empty());
        assert!(names.canonicalize(" - . ").is_empty());
    }
}
