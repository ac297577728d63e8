//! Month repair for continuation rows.
//!
//! Schedules list dates in non-decreasing blocks, and continuation rows often
//! lose part of the month when the table is extracted ("16/1/23" printed as
//! "16/11/23"). Every single-character month is treated as truncated and
//! takes over the nearest earlier full month.

use tracing::debug;

use crate::normalize::{DateParts, ExamDate};
use crate::TARGET_PIPELINE;

/// Repair truncated months in document order, returning a new sequence.
///
/// A single-character month is replaced by the nearest earlier month of two
/// or more characters. When no earlier row has one, the first row's month is
/// used instead. The first row is never changed, nor are empty or full months.
pub fn carry_forward_months(dates: &[ExamDate]) -> Vec<ExamDate> {
    let mut last_full: Option<&str> = None;
    let mut first_month: Option<&str> = None;
    let mut repaired = Vec::with_capacity(dates.len());

    for (index, date) in dates.iter().enumerate() {
        let ExamDate::Parts(parts) = date else {
            repaired.push(date.clone());
            continue;
        };

        let month_len = parts.month.chars().count();
        let replacement = if month_len == 1 {
            last_full.or(first_month)
        } else {
            None
        };

        first_month.get_or_insert(parts.month.as_str());
        if month_len >= 2 {
            last_full = Some(parts.month.as_str());
        }

        match replacement {
            Some(month) => {
                debug!(
                    target: TARGET_PIPELINE,
                    "Row {}: month {:?} carried forward as {:?}",
                    index + 1,
                    parts.month,
                    month
                );
                repaired.push(ExamDate::Parts(DateParts {
                    month: month.to_string(),
                    ..parts.clone()
                }));
            }
            None => repaired.push(date.clone()),
        }
    }

    repaired
}
