use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Result, ScheduleError};

/// Known columns of an exam-schedule table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Date,
    CourseCode,
    CourseName,
    StudentCount,
    Time,
    Venue,
    Invigilators,
    Examiner,
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Column::Date => write!(f, "Day/Date"),
            Column::CourseCode => write!(f, "Course Code"),
            Column::CourseName => write!(f, "Course Name"),
            Column::StudentCount => write!(f, "No. of Students"),
            Column::Time => write!(f, "Time"),
            Column::Venue => write!(f, "Venue"),
            Column::Invigilators => write!(f, "Invigilators"),
            Column::Examiner => write!(f, "Examiner"),
        }
    }
}

impl Column {
    /// Resolve a printed header to a known column.
    ///
    /// Extraction splits headers across lines ("Day/Dat\ne") and varies
    /// punctuation ("No. of Students"), so matching only looks at the
    /// lowercased alphanumeric characters.
    pub fn from_header(header: &str) -> Option<Column> {
        let folded: String = header
            .chars()
            .filter(|c| c.is_alphanumeric())
            .flat_map(char::to_lowercase)
            .collect();

        match folded.as_str() {
            "daydate" | "date" | "day" | "dates" => Some(Column::Date),
            "coursecode" | "coursecodes" | "code" => Some(Column::CourseCode),
            "coursename" | "coursetitle" | "course" => Some(Column::CourseName),
            "noofstudents" | "numberofstudents" | "students" | "noofstudent" => {
                Some(Column::StudentCount)
            }
            "time" | "period" => Some(Column::Time),
            "venue" | "venues" => Some(Column::Venue),
            "invigilators" | "invigilator" => Some(Column::Invigilators),
            "examiner" | "examiners" => Some(Column::Examiner),
            _ => None,
        }
    }
}

/// Header text printed above the table on one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageHeader {
    pub lines: Vec<String>,
}

/// Table exactly as the source delivered it, before any cleanup.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    /// Column names as printed on the first page.
    pub headers: Vec<String>,
    /// Data rows in document order. `None` marks a cell the source did not
    /// provide at all, which is different from an empty cell.
    pub rows: Vec<SourceRow>,
    /// Page header text, indexed by page number.
    pub pages: Vec<PageHeader>,
}

/// One row of a [`RawTable`]
#[derive(Debug, Clone, Default)]
pub struct SourceRow {
    pub page: usize,
    pub cells: Vec<Option<String>>,
}

/// One table line, keyed by column, ready for explosion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    line: usize,
    page: usize,
    cells: BTreeMap<Column, String>,
}

impl RawRow {
    pub fn new(line: usize, page: usize) -> Self {
        RawRow {
            line,
            page,
            cells: BTreeMap::new(),
        }
    }

    /// Builder used by tests and by callers that already hold column-keyed cells
    pub fn with_cell(mut self, column: Column, text: impl Into<String>) -> Self {
        self.cells.insert(column, text.into());
        self
    }

    pub fn insert(&mut self, column: Column, text: String) {
        self.cells.insert(column, text);
    }

    /// 1-based position of this row in the source document
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn cell(&self, column: Column) -> Option<&str> {
        self.cells.get(&column).map(String::as_str)
    }

    /// Cell text for a column every row must carry
    pub fn require(&self, column: Column) -> Result<&str> {
        self.cell(column).ok_or(ScheduleError::MissingCell {
            line: self.line,
            column,
        })
    }
}
