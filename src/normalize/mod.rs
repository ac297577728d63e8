//! Per-field cleanup of table cells.
//!
//! Every normalizer is best-effort: text it cannot interpret is passed through
//! rather than rejected.

pub mod course;
pub mod date;
pub mod rules;
pub mod time;
pub mod venue;

pub use course::{normalize_course_codes, parse_student_count};
pub use date::{parse_date, DateParts, ExamDate};
pub use time::{normalize_time_range, TimeRange};
pub use venue::VenueNormalizer;

use crate::config::VenueConfig;
use crate::error::Result;

pub const TARGET_NORMALIZE: &str = "normalize";

/// All field normalizers behind one handle
#[derive(Debug, Clone)]
pub struct FieldNormalizer {
    venues: VenueNormalizer,
}

impl FieldNormalizer {
    pub fn new(venue_config: &VenueConfig) -> Result<Self> {
        Ok(FieldNormalizer {
            venues: VenueNormalizer::new(venue_config)?,
        })
    }

    pub fn date(&self, raw: &str) -> ExamDate {
        parse_date(raw)
    }

    pub fn time(&self, raw: &str) -> TimeRange {
        normalize_time_range(raw)
    }

    pub fn venue(&self, raw: &str) -> String {
        self.venues.clean(raw)
    }

    pub fn course_codes(&self, raw: &str) -> Vec<String> {
        normalize_course_codes(raw)
    }

    pub fn student_count(&self, raw: &str) -> Option<u32> {
        parse_student_count(raw)
    }

    pub fn venues(&self) -> &VenueNormalizer {
        &self.venues
    }
}
