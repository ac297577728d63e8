use serde::{Deserialize, Serialize};

/// One atomic duty: a single invigilator at a single venue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DutyRecord {
    /// Canonical `DD/MM/YYYY`, or the cell text when it could not be split
    pub date: String,
    pub course_codes: Vec<String>,
    pub student_count: Option<u32>,
    pub start_time: String,
    pub end_time: String,
    pub venue: String,
    /// Display form of the invigilator's name
    pub raw_invigilator_name: String,
    /// Letters-only comparison key of the name
    pub name_key: String,
}

/// Duty entry as listed under an invigilator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DutyDetail {
    pub date: String,
    pub course_codes: Vec<String>,
    pub start_time: String,
    pub end_time: String,
    pub venue: String,
}

impl From<&DutyRecord> for DutyDetail {
    fn from(record: &DutyRecord) -> Self {
        DutyDetail {
            date: record.date.clone(),
            course_codes: record.course_codes.clone(),
            start_time: record.start_time.clone(),
            end_time: record.end_time.clone(),
            venue: record.venue.clone(),
        }
    }
}

/// All duties of one resolved identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedInvigilator {
    pub invigilator: String,
    pub details: Vec<DutyDetail>,
}

/// Top-level document of the invigilator pipeline
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvigilatorSchedule {
    pub invigilators_schedule: Vec<AggregatedInvigilator>,
}

/// One line of the flat exam timetable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamScheduleEntry {
    pub date: String,
    pub course_codes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_of_students: Option<u32>,
    pub start_time: String,
    pub end_time: String,
    pub venue: String,
    pub year: Option<String>,
    pub exam_name: Option<String>,
}

/// Top-level document of the exam-timetable pipeline
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamSchedule {
    pub exams_schedule: Vec<ExamScheduleEntry>,
    #[serde(rename = "examName")]
    pub exam_name: Option<String>,
}
