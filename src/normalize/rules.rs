use regex::Regex;

/// One step of a cleanup chain: every match of `pattern` is replaced by
/// `replacement` (which may reference capture groups as `$1`).
#[derive(Debug, Clone)]
pub struct Rule {
    pub name: &'static str,
    pattern: Regex,
    replacement: &'static str,
}

impl Rule {
    /// Rules are declared from literal patterns, so a bad pattern is a
    /// programming error caught by the rule tests.
    pub fn new(name: &'static str, pattern: &str, replacement: &'static str) -> Self {
        Rule {
            name,
            pattern: Regex::new(pattern).expect("rule pattern must compile"),
            replacement,
        }
    }

    pub fn apply(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, self.replacement)
            .into_owned()
    }
}

/// Run an ordered rule chain over `text`
pub fn apply_rules(rules: &[Rule], text: &str) -> String {
    rules
        .iter()
        .fold(text.to_string(), |current, rule| rule.apply(&current))
}

/// Collapse runs of whitespace (line breaks included) to single spaces and trim
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Title-case the way the source spreadsheets were cleaned: a letter is
/// upper-cased when the previous character is not a letter, lower-cased
/// otherwise ("o'neil-ADJEI" → "O'Neil-Adjei").
pub fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut previous_is_letter = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if previous_is_letter {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            result.push(c);
            previous_is_letter = false;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_apply_in_order() {
        let rules = [
            Rule::new("dash", r"\s*-\s*", "-"),
            Rule::new("semicolon", r";", ", "),
        ];
        assert_eq!(apply_rules(&rules, "Ama - Serwaa;Kofi"), "Ama-Serwaa, Kofi");
    }

    #[test]
    fn test_capture_groups() {
        let rule = Rule::new("split", r"([a-z])([A-Z]\.)", "$1 $2");
        assert_eq!(rule.apply("JohnA."), "John A.");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("JOHN MENSAH"), "John Mensah");
        assert_eq!(title_case("o'neil-ADJEI"), "O'Neil-Adjei");
        assert_eq!(title_case("j.mensah"), "J.Mensah");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  PG \n BLOCK\t A "), "PG BLOCK A");
    }
}
