use lazy_static::lazy_static;

use super::rules::{apply_rules, Rule};

lazy_static! {
    /// Applied to the whole cell before splitting into halves
    static ref RANGE_RULES: Vec<Rule> = vec![
        Rule::new("en_dash", "[\u{2013}\u{2014}]", "-"),
        Rule::new("mojibake_dash", "\u{e2}\u{20ac}[\u{201c}\u{201d}]", "-"),
        Rule::new("line_break", r"\s+", " "),
    ];

    /// Applied to each half
    static ref HALF_RULES: Vec<Rule> = vec![
        Rule::new("colon_spacing", r"\s*:\s*", ":"),
        Rule::new("suffix_spacing", r"\s+(am|pm)$", "$1"),
    ];
}

/// Start and end of an exam session in `H:MMam` form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeRange {
    pub start: String,
    pub end: String,
}

/// Normalize a time range cell.
///
/// "9-11am" and "9am - 11am" both become `9:00am`/`11:00am`: the start half
/// borrows the end half's suffix when it has none, and a half without minutes
/// gets `:00` before its suffix. Text without a dash is returned as the start
/// with an empty end.
pub fn normalize_time_range(raw: &str) -> TimeRange {
    let text = apply_rules(&RANGE_RULES, raw).to_lowercase();

    let (start, end) = match text.split_once('-') {
        Some((start, end)) => (clean_half(start), clean_half(end)),
        None => (clean_half(&text), String::new()),
    };

    let start = match (suffix(&start), suffix(&end)) {
        (None, Some(end_suffix)) if !start.is_empty() => format!("{}{}", start, end_suffix),
        _ => start,
    };

    TimeRange {
        start: with_minutes(&start),
        end: with_minutes(&end),
    }
}

fn clean_half(half: &str) -> String {
    apply_rules(&HALF_RULES, half.trim()).trim().to_string()
}

fn suffix(half: &str) -> Option<&'static str> {
    if half.ends_with("am") {
        Some("am")
    } else if half.ends_with("pm") {
        Some("pm")
    } else {
        None
    }
}

/// "9am" → "9:00am", "9" → "9:00"; anything else is left alone
fn with_minutes(half: &str) -> String {
    if half.is_empty() || half.contains(':') {
        return half.to_string();
    }

    match suffix(half) {
        Some(s) => {
            let hour = half[..half.len() - s.len()].trim_end();
            if hour.is_empty() {
                half.to_string()
            } else {
                format!("{}:00{}", hour, s)
            }
        }
        None if half.chars().all(|c| c.is_ascii_digit()) => format!("{}:00", half),
        None => half.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(raw: &str) -> (String, String) {
        let t = normalize_time_range(raw);
        (t.start, t.end)
    }

    #[test]
    fn test_start_borrows_suffix() {
        assert_eq!(range("9-11am"), ("9:00am".into(), "11:00am".into()));
        assert_eq!(range("9am-11am"), ("9:00am".into(), "11:00am".into()));
        assert_eq!(range("1-3pm"), ("1:00pm".into(), "3:00pm".into()));
    }

    #[test]
    fn test_spacing_and_case() {
        assert_eq!(
            range("9 : 30 AM \u{2013} 12 : 30 PM"),
            ("9:30am".into(), "12:30pm".into())
        );
        assert_eq!(range("11:30am - 1:30 pm"), ("11:30am".into(), "1:30pm".into()));
    }

    #[test]
    fn test_mojibake_dash() {
        assert_eq!(
            range("9am\u{e2}\u{20ac}\u{201c}11am"),
            ("9:00am".into(), "11:00am".into())
        );
    }

    #[test]
    fn test_unparseable_passes_through() {
        assert_eq!(range("TBA"), ("tba".into(), "".into()));
        assert_eq!(range("9-11"), ("9:00".into(), "11:00".into()));
    }
}
