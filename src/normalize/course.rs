use lazy_static::lazy_static;
use regex::Regex;

use super::rules::{apply_rules, collapse_whitespace, Rule};

lazy_static! {
    static ref COURSE_CODE_RULES: Vec<Rule> = vec![
        // "ACCT\n201" is one code wrapped across lines
        Rule::new("wrapped_number", r"\r?\n\s*(\d)", " $1"),
        Rule::new("line_list", r"\r?\n", ", "),
        Rule::new("letter_digit_gap", r"([A-Za-z])(\d)", "$1 $2"),
    ];
    static ref FIRST_NUMBER: Regex = Regex::new(r"\d+").expect("valid number pattern");
}

/// Split a course-code cell into normalized codes, order and duplicates kept
pub fn normalize_course_codes(raw: &str) -> Vec<String> {
    apply_rules(&COURSE_CODE_RULES, raw)
        .split(',')
        .map(collapse_whitespace)
        .filter(|code| !code.is_empty())
        .collect()
}

/// First integer in the cell, if any
pub fn parse_student_count(raw: &str) -> Option<u32> {
    FIRST_NUMBER
        .find(raw)
        .and_then(|found| found.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_code_lists() {
        assert_eq!(
            normalize_course_codes("ACCT201\nFINC 203"),
            vec!["ACCT 201", "FINC 203"]
        );
        assert_eq!(normalize_course_codes("ACCT\n201"), vec!["ACCT 201"]);
        assert_eq!(
            normalize_course_codes("MGMT 101, MGMT 101 ,"),
            vec!["MGMT 101", "MGMT 101"]
        );
    }

    #[test]
    fn test_student_count() {
        assert_eq!(parse_student_count(" 120 "), Some(120));
        assert_eq!(parse_student_count("approx. 45 students"), Some(45));
        assert_eq!(parse_student_count(""), None);
    }
}
