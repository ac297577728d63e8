//! Page-header parsing and entry handling for the flat exam timetable.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;
use tracing::debug;

use super::types::ExamScheduleEntry;
use crate::normalize::rules::{apply_rules, collapse_whitespace, Rule};
use crate::table::PageHeader;
use crate::TARGET_PIPELINE;

// Header keywords
const STREAM_MARKERS: &[&str] = &["REGULAR", "PARALLEL"];
const FOUR_LINE_MARKERS: &[&str] = &["REGULAR", "PARALLEL", "ACADEMIC YEAR"];
const POSTGRADUATE_MARKERS: &[&str] = &["MBA", "MASTER", "MSC", "MPHIL", "PHD"];
const UNDERGRADUATE_MARKER: &str = "BACHELOR";

lazy_static! {
    static ref FIRST_NUMBER: Regex = Regex::new(r"\d+").expect("valid number pattern");

    /// Reduce a postgraduate programme line to a year label
    static ref PROGRAMME_RULES: Vec<Rule> = vec![
        Rule::new("parenthesised", r"\(.*\)", ""),
        Rule::new("year_word", r"YEAR", ""),
        Rule::new("slash_spacing", r"\s/", "/"),
        Rule::new("mba", r"MASTER OF BUSINESS ADMINISTRATION", "MBA"),
        Rule::new("msc", r"MASTER OF SCIENCE", "MSC"),
        Rule::new("mphil", r"MASTER OF PHILOSOPHY", "MPHIL"),
    ];
}

/// Degree level named on a page header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Programme {
    Undergraduate,
    Postgraduate,
    Unspecified,
}

impl Programme {
    fn suffix(&self) -> Option<&'static str> {
        match self {
            Programme::Undergraduate => Some("(UNDERGRADUATE)"),
            Programme::Postgraduate => Some("(POSTGRADUATE)"),
            Programme::Unspecified => None,
        }
    }
}

/// What a page's header lines say about the rows on that page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamHeader {
    /// Year or programme label attached to every row of the page
    pub year: Option<String>,
    /// Examination title without the programme suffix
    pub exam_name: Option<String>,
    pub programme: Programme,
}

impl ExamHeader {
    /// Parse the leading text lines of a page.
    ///
    /// The header is four lines when the fourth mentions a stream or an
    /// academic year, otherwise three. Line two carries the level or
    /// programme and line three the examination title.
    pub fn parse(page: &PageHeader) -> Self {
        let lines: Vec<&str> = page.lines.iter().map(|l| l.trim()).collect();
        let programme_line = lines.get(1).copied().unwrap_or_default();
        let title_line = lines.get(2).copied();

        let fourth = lines
            .get(3)
            .copied()
            .filter(|line| contains_any(line, FOUR_LINE_MARKERS));
        // an academic-year line belongs to the title, a stream marker does not
        let qualifier = fourth.filter(|line| !contains_any(line, STREAM_MARKERS));

        let programme = if contains_any(programme_line, POSTGRADUATE_MARKERS) {
            Programme::Postgraduate
        } else if programme_line.to_uppercase().contains(UNDERGRADUATE_MARKER) {
            Programme::Undergraduate
        } else {
            Programme::Unspecified
        };

        let year = if programme == Programme::Postgraduate {
            let label = collapse_whitespace(&apply_rules(&PROGRAMME_RULES, programme_line));
            Some(label).filter(|l| !l.is_empty())
        } else {
            FIRST_NUMBER.find(programme_line).map(|number| match qualifier {
                Some(q) => format!("{} ({})", number.as_str(), q),
                None => number.as_str().to_string(),
            })
        };

        let exam_name = title_line.filter(|t| !t.is_empty()).map(|title| match qualifier {
            Some(q) => format!("{} {}", title, q),
            None => title.to_string(),
        });

        ExamHeader {
            year,
            exam_name,
            programme,
        }
    }
}

/// Examination title for a whole document.
///
/// The title comes from the first page that has one, and the programme
/// suffix from the first page that names a degree level.
pub fn document_exam_name(headers: &[ExamHeader]) -> Option<String> {
    let title = headers.iter().find_map(|h| h.exam_name.clone())?;
    match headers.iter().find_map(|h| h.programme.suffix()) {
        Some(suffix) => Some(format!("{} {}", title, suffix)),
        None => Some(title),
    }
}

/// Drop entries repeating an earlier (date, course codes, venue, start, end)
pub fn dedupe_entries(entries: Vec<ExamScheduleEntry>) -> Vec<ExamScheduleEntry> {
    let before = entries.len();
    let mut seen = HashSet::new();
    let unique: Vec<ExamScheduleEntry> = entries
        .into_iter()
        .filter(|e| {
            seen.insert((
                e.date.clone(),
                e.course_codes.clone(),
                e.venue.clone(),
                e.start_time.clone(),
                e.end_time.clone(),
            ))
        })
        .collect();

    if unique.len() < before {
        debug!(
            target: TARGET_PIPELINE,
            "Dropped {} duplicate exam entries",
            before - unique.len()
        );
    }
    unique
}

fn contains_any(line: &str, keywords: &[&str]) -> bool {
    let upper = line.to_uppercase();
    keywords.iter().any(|k| upper.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(lines: &[&str]) -> ExamHeader {
        ExamHeader::parse(&PageHeader {
            lines: lines.iter().map(|l| l.to_string()).collect(),
        })
    }

    #[test]
    fn test_undergraduate_with_stream() {
        let parsed = header(&[
            "UNIVERSITY OF GHANA BUSINESS SCHOOL",
            "BACHELOR OF SCIENCE LEVEL 300",
            "END OF SECOND SEMESTER EXAMINATIONS",
            "REGULAR",
        ]);
        assert_eq!(parsed.year.as_deref(), Some("300"));
        assert_eq!(
            parsed.exam_name.as_deref(),
            Some("END OF SECOND SEMESTER EXAMINATIONS")
        );
        assert_eq!(parsed.programme, Programme::Undergraduate);
    }

    #[test]
    fn test_academic_year_qualifies_year_and_title() {
        let parsed = header(&[
            "UGBS",
            "LEVEL 400",
            "FIRST SEMESTER EXAMINATIONS",
            "2022/2023 ACADEMIC YEAR",
        ]);
        assert_eq!(parsed.year.as_deref(), Some("400 (2022/2023 ACADEMIC YEAR)"));
        assert_eq!(
            parsed.exam_name.as_deref(),
            Some("FIRST SEMESTER EXAMINATIONS 2022/2023 ACADEMIC YEAR")
        );
        assert_eq!(parsed.programme, Programme::Unspecified);
    }

    #[test]
    fn test_three_line_header_ignores_table_text() {
        let parsed = header(&["UGBS", "LEVEL 200", "RESIT EXAMINATIONS", "Day/Date Course Code"]);
        assert_eq!(parsed.year.as_deref(), Some("200"));
        assert_eq!(parsed.exam_name.as_deref(), Some("RESIT EXAMINATIONS"));
    }

    #[test]
    fn test_postgraduate_programme_label() {
        let parsed = header(&[
            "UGBS",
            "MASTER OF SCIENCE (ACCOUNTING) YEAR 1",
            "MAY EXAMINATIONS",
        ]);
        assert_eq!(parsed.year.as_deref(), Some("MSC 1"));
        assert_eq!(parsed.programme, Programme::Postgraduate);

        let parsed = header(&["UGBS", "MBA YEAR 2 / WEEKEND", "MAY EXAMINATIONS"]);
        assert_eq!(parsed.year.as_deref(), Some("MBA 2/ WEEKEND"));
    }

    #[test]
    fn test_short_header() {
        let parsed = header(&["UGBS"]);
        assert_eq!(parsed.year, None);
        assert_eq!(parsed.exam_name, None);
        assert_eq!(document_exam_name(&[parsed]), None);
    }

    #[test]
    fn test_document_name_takes_suffix_from_any_page() {
        let pages = vec![
            header(&["UGBS", "LEVEL 100", "FIRST SEMESTER EXAMINATIONS"]),
            header(&["UGBS", "BACHELOR OF ARTS LEVEL 200", "OTHER TITLE"]),
        ];
        assert_eq!(
            document_exam_name(&pages).as_deref(),
            Some("FIRST SEMESTER EXAMINATIONS (UNDERGRADUATE)")
        );
    }

    #[test]
    fn test_dedupe_keeps_first() {
        let entry = |venue: &str, count: Option<u32>| ExamScheduleEntry {
            date: "03/05/2023".to_string(),
            course_codes: vec!["ACCT 201".to_string()],
            no_of_students: count,
            start_time: "9:00am".to_string(),
            end_time: "11:00am".to_string(),
            venue: venue.to_string(),
            year: None,
            exam_name: None,
        };
        let unique = dedupe_entries(vec![
            entry("PG 1", Some(40)),
            entry("PG 1", Some(55)),
            entry("PG 2", None),
        ]);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].no_of_students, Some(40));
    }
}
