//! Result documents: grouping duty records per invigilator, the flat exam
//! timetable, and JSON output.

pub mod aggregate;
pub mod emit;
pub mod exams;
pub mod types;

pub use aggregate::aggregate;
pub use emit::emit;
pub use exams::{dedupe_entries, document_exam_name, ExamHeader, Programme};
pub use types::*;
