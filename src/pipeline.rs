//! End-to-end runs over one document: table rows in, result document out.

use tracing::{debug, info};

use crate::carry_forward::carry_forward_months;
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::explode::RowExploder;
use crate::identity::{IdentityResolver, NameCanonicalizer};
use crate::normalize::{ExamDate, FieldNormalizer};
use crate::schedule::{
    aggregate, dedupe_entries, document_exam_name, DutyRecord, ExamHeader, ExamSchedule,
    ExamScheduleEntry, InvigilatorSchedule,
};
use crate::table::{prepare_rows, Column, RawRow, RawTable, TableSource};
use crate::TARGET_PIPELINE;

/// Columns every invigilator-table row must carry
pub const INVIGILATOR_COLUMNS: &[Column] = &[
    Column::Date,
    Column::CourseCode,
    Column::Time,
    Column::Venue,
    Column::Invigilators,
];

/// Columns every exam-timetable row must carry
pub const EXAM_COLUMNS: &[Column] = &[Column::Date, Column::CourseCode, Column::Time, Column::Venue];

/// Invigilator duty table to per-invigilator schedule
#[derive(Debug, Clone)]
pub struct InvigilatorPipeline {
    config: PipelineConfig,
    fields: FieldNormalizer,
    names: NameCanonicalizer,
    resolver: IdentityResolver,
}

impl InvigilatorPipeline {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        Ok(InvigilatorPipeline {
            fields: FieldNormalizer::new(&config.venue)?,
            names: NameCanonicalizer::new(),
            resolver: IdentityResolver::from(&config.resolver),
            config,
        })
    }

    pub fn run(&self, source: &impl TableSource) -> Result<InvigilatorSchedule> {
        let table = source.load()?;
        self.run_table(&table)
    }

    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run_table(&self, table: &RawTable) -> Result<InvigilatorSchedule> {
        let rows = prepare_rows(table, INVIGILATOR_COLUMNS, &self.config.table.fill_columns)?;
        let records = self.duty_records(&rows)?;

        let identities = self
            .resolver
            .resolve(records.iter().map(|r| r.name_key.as_str()));

        Ok(InvigilatorSchedule {
            invigilators_schedule: aggregate(&records, &identities),
        })
    }

    /// Explode and normalize prepared rows into atomic duty records.
    ///
    /// Pairs whose venue cleans to nothing or whose name has no letters are
    /// dropped.
    pub fn duty_records(&self, rows: &[RawRow]) -> Result<Vec<DutyRecord>> {
        let dates = repaired_dates(&self.fields, rows)?;
        let exploder = RowExploder::new(self.fields.venues());
        let mut records = Vec::new();

        for (row, date) in rows.iter().zip(&dates) {
            let time = self.fields.time(row.require(Column::Time)?);
            let course_codes = self.fields.course_codes(row.require(Column::CourseCode)?);
            let student_count = row
                .cell(Column::StudentCount)
                .and_then(|cell| self.fields.student_count(cell));

            for atomic in exploder.explode(row)? {
                let venue = self.fields.venue(&atomic.venue);
                if venue.is_empty() {
                    debug!(
                        target: TARGET_PIPELINE,
                        "Row {}: venue {:?} cleaned to nothing", row.line(), atomic.venue
                    );
                    continue;
                }

                let name = self.names.canonicalize(&atomic.invigilator);
                if name.is_empty() {
                    debug!(
                        target: TARGET_PIPELINE,
                        "Row {}: name {:?} has no letters", row.line(), atomic.invigilator
                    );
                    continue;
                }

                records.push(DutyRecord {
                    date: date.to_string(),
                    course_codes: course_codes.clone(),
                    student_count,
                    start_time: time.start.clone(),
                    end_time: time.end.clone(),
                    venue,
                    raw_invigilator_name: name.display,
                    name_key: name.key,
                });
            }
        }

        info!(
            target: TARGET_PIPELINE,
            "Built {} duty records from {} rows",
            records.len(),
            rows.len()
        );
        Ok(records)
    }
}

/// Exam timetable to flat exam schedule
#[derive(Debug, Clone)]
pub struct ExamPipeline {
    config: PipelineConfig,
    fields: FieldNormalizer,
}

impl ExamPipeline {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        Ok(ExamPipeline {
            fields: FieldNormalizer::new(&config.venue)?,
            config,
        })
    }

    pub fn run(&self, source: &impl TableSource) -> Result<ExamSchedule> {
        let table = source.load()?;
        self.run_table(&table)
    }

    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run_table(&self, table: &RawTable) -> Result<ExamSchedule> {
        let rows = prepare_rows(table, EXAM_COLUMNS, &self.config.table.fill_columns)?;
        let dates = repaired_dates(&self.fields, &rows)?;
        let headers: Vec<ExamHeader> = table.pages.iter().map(ExamHeader::parse).collect();
        let exam_name = document_exam_name(&headers);

        let mut entries = Vec::with_capacity(rows.len());
        for (row, date) in rows.iter().zip(&dates) {
            let time = self.fields.time(row.require(Column::Time)?);
            let venue = row
                .require(Column::Venue)?
                .lines()
                .map(|line| self.fields.venues().clean_keeping_digits(line))
                .filter(|line| !line.is_empty())
                .collect::<Vec<_>>()
                .join(", ");

            entries.push(ExamScheduleEntry {
                date: date.to_string(),
                course_codes: self.fields.course_codes(row.require(Column::CourseCode)?),
                no_of_students: row
                    .cell(Column::StudentCount)
                    .and_then(|cell| self.fields.student_count(cell)),
                start_time: time.start,
                end_time: time.end,
                venue,
                year: headers.get(row.page()).and_then(|h| h.year.clone()),
                exam_name: exam_name.clone(),
            });
        }

        let exams_schedule = dedupe_entries(entries);
        info!(
            target: TARGET_PIPELINE,
            "Built {} exam entries from {} rows",
            exams_schedule.len(),
            rows.len()
        );

        Ok(ExamSchedule {
            exams_schedule,
            exam_name,
        })
    }
}

/// Parse every row's date and repair truncated months in document order
fn repaired_dates(fields: &FieldNormalizer, rows: &[RawRow]) -> Result<Vec<ExamDate>> {
    let parsed = rows
        .iter()
        .map(|row| Ok(fields.date(row.require(Column::Date)?)))
        .collect::<Result<Vec<_>>>()?;
    Ok(carry_forward_months(&parsed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{PageHeader, SourceRow};

    fn table(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|cells| SourceRow {
                    page: 0,
                    cells: cells.iter().map(|c| Some(c.to_string())).collect(),
                })
                .collect(),
            pages: vec![PageHeader::default()],
        }
    }

    #[test]
    fn test_duty_records_carry_month_and_fill() {
        let pipeline = InvigilatorPipeline::new(PipelineConfig::default()).unwrap();
        let raw = table(
            &["Day/Date", "Course Code", "No. of Students", "Time", "Venue", "Invigilators"],
            &[
                &["Mon 13/11/23", "ACCT201", "120", "9-11am", "PG1", "Ama Serwaa"],
                &["Tue 14/1/23", "", "", "1:30-3:30pm", "SMA", "Kofi Annan"],
            ],
        );
        let rows = prepare_rows(&raw, INVIGILATOR_COLUMNS, &pipeline.config.table.fill_columns)
            .unwrap();
        let records = pipeline.duty_records(&rows).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].date, "14/11/2023");
        assert_eq!(records[1].course_codes, vec!["ACCT 201"]);
        assert_eq!(records[1].student_count, Some(120));
        assert_eq!(records[1].start_time, "1:30pm");
        assert_eq!(records[1].end_time, "3:30pm");
        assert_eq!(records[0].venue, "PG");
    }

    #[test]
    fn test_empty_names_never_reach_records() {
        let pipeline = InvigilatorPipeline::new(PipelineConfig::default()).unwrap();
        let raw = table(
            &["Date", "Course Code", "Time", "Venue", "Invigilators"],
            &[&["3/5/23", "ACCT 201", "9-11am", "PG1", "--, Ama Serwaa, ..."]],
        );
        let schedule = pipeline.run(&raw).unwrap();
        assert_eq!(schedule.invigilators_schedule.len(), 1);
        assert_eq!(schedule.invigilators_schedule[0].invigilator, "Ama Serwaa");
    }

    #[test]
    fn test_exam_venues_joined_and_year_from_page() {
        let pipeline = ExamPipeline::new(PipelineConfig::default()).unwrap();
        let mut raw = table(
            &["Day/Date", "Course Code", "Course Name", "No of Students", "Time", "Venue", "Examiner"],
            &[&[
                "Mon 3/5/23",
                "ACCT 201",
                "Financial Accounting",
                "80",
                "9-11am",
                "JQB PG 1\nSMA",
                "Dr. Owusu",
            ]],
        );
        raw.pages = vec![PageHeader {
            lines: vec![
                "UNIVERSITY OF GHANA BUSINESS SCHOOL".to_string(),
                "BACHELOR OF SCIENCE LEVEL 200".to_string(),
                "FIRST SEMESTER EXAMINATIONS".to_string(),
            ],
        }];

        let schedule = pipeline.run(&raw).unwrap();
        let entry = &schedule.exams_schedule[0];
        assert_eq!(entry.venue, "PG 1, SMA");
        assert_eq!(entry.year.as_deref(), Some("200"));
        assert_eq!(entry.no_of_students, Some(80));
        assert_eq!(
            schedule.exam_name.as_deref(),
            Some("FIRST SEMESTER EXAMINATIONS (UNDERGRADUATE)")
        );
    }
}
