use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

use super::rules::collapse_whitespace;

lazy_static! {
    static ref DATE_START: Regex = Regex::new(r"^\d{1,2}\s*/").expect("valid date pattern");
}

/// Day/month/year as printed, after light cleanup.
///
/// The month is kept as text because a truncated month ("1" where "11" was
/// printed) must stay distinguishable until carry-forward has run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateParts {
    pub day: String,
    pub month: String,
    pub year: String,
}

/// A date cell after normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExamDate {
    Parts(DateParts),
    /// Text that does not split into day/month/year; emitted verbatim
    Unparsed(String),
}

impl ExamDate {
    pub fn month(&self) -> Option<&str> {
        match self {
            ExamDate::Parts(parts) => Some(&parts.month),
            ExamDate::Unparsed(_) => None,
        }
    }
}

impl fmt::Display for ExamDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExamDate::Parts(parts) => {
                let month = if parts.month.chars().count() == 1 {
                    format!("0{}", parts.month)
                } else {
                    parts.month.clone()
                };
                write!(f, "{}/{}/{}", parts.day, month, parts.year)
            }
            ExamDate::Unparsed(text) => write!(f, "{}", text),
        }
    }
}

/// Strip the weekday and stray slashes: "Mon 3/5/23/" → "3/5/23"
pub fn clean_date(raw: &str) -> String {
    let text = collapse_whitespace(raw);

    let text = match text.split_once(' ') {
        Some((first, rest))
            if !first.chars().any(|c| c.is_ascii_digit()) && DATE_START.is_match(rest) =>
        {
            rest.to_string()
        }
        _ => text,
    };

    text.trim_matches(|c: char| c == '/' || c.is_whitespace())
        .to_string()
}

/// Normalize a date cell into day/month/year parts.
///
/// Day is zero-padded, a month longer than two characters is cut to two and a
/// two-digit year becomes `20YY`. Month padding is left to rendering so that
/// carry-forward can still see which months were truncated.
pub fn parse_date(raw: &str) -> ExamDate {
    let cleaned = clean_date(raw);
    let parts: Vec<&str> = cleaned.split('/').map(str::trim).collect();

    if parts.len() != 3 || parts[0].is_empty() {
        return ExamDate::Unparsed(cleaned);
    }

    let day = if parts[0].chars().count() == 1 {
        format!("0{}", parts[0])
    } else {
        parts[0].to_string()
    };

    let month: String = parts[1].chars().take(2).collect();

    let year = if parts[2].len() == 2 && parts[2].chars().all(|c| c.is_ascii_digit()) {
        format!("20{}", parts[2])
    } else {
        parts[2].to_string()
    };

    ExamDate::Parts(DateParts { day, month, year })
}
