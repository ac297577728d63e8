use std::collections::HashMap;
use tracing::{debug, info};

use super::types::{Column, RawRow, RawTable, SourceRow};
use super::TARGET_TABLE;
use crate::error::{Result, ScheduleError};

/// Turn a raw extractor table into column-keyed rows.
///
/// - Headers are resolved to known [`Column`]s; unknown headers are ignored.
/// - A required column missing from the header, or from any row, fails the run.
/// - Rows repeating the header (one per page in concatenated tables) are dropped.
/// - Empty cells of `fill_columns` inherit the value above them, which is how
///   merged cells come out of the extractor.
#[tracing::instrument(level = "debug", skip_all, fields(rows = table.rows.len()))]
pub fn prepare_rows(
    table: &RawTable,
    required: &[Column],
    fill_columns: &[Column],
) -> Result<Vec<RawRow>> {
    if table.headers.is_empty() || table.rows.is_empty() {
        return Err(ScheduleError::EmptyTable);
    }

    let columns: Vec<Option<Column>> = table
        .headers
        .iter()
        .map(|header| {
            let column = Column::from_header(header);
            if column.is_none() {
                debug!(target: TARGET_TABLE, "Ignoring unrecognised header {:?}", header);
            }
            column
        })
        .collect();

    for column in required {
        if !columns.contains(&Some(*column)) {
            return Err(ScheduleError::MissingColumn(*column));
        }
    }

    let mut rows = Vec::with_capacity(table.rows.len());
    let mut above: HashMap<Column, String> = HashMap::new();
    let mut repeated_headers = 0;

    for (index, source_row) in table.rows.iter().enumerate() {
        if is_repeated_header(&table.headers, source_row) {
            repeated_headers += 1;
            continue;
        }

        let mut row = RawRow::new(index + 1, source_row.page);
        for (position, column) in columns.iter().enumerate() {
            let Some(column) = column else { continue };
            if row.cell(*column).is_some() {
                continue;
            }
            let Some(Some(text)) = source_row.cells.get(position) else {
                continue;
            };

            let mut text = text.clone();
            if fill_columns.contains(column) {
                if text.trim().is_empty() {
                    if let Some(previous) = above.get(column) {
                        text = previous.clone();
                    }
                } else {
                    above.insert(*column, text.clone());
                }
            }
            row.insert(*column, text);
        }

        for column in required {
            row.require(*column)?;
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(ScheduleError::EmptyTable);
    }

    info!(
        target: TARGET_TABLE,
        "Prepared {} rows ({} repeated header rows dropped)",
        rows.len(),
        repeated_headers
    );

    Ok(rows)
}

/// More than one cell equal to its own column header
fn is_repeated_header(headers: &[String], row: &SourceRow) -> bool {
    headers
        .iter()
        .zip(&row.cells)
        .filter(|(header, cell)| {
            cell.as_deref()
                .is_some_and(|text| !text.trim().is_empty() && text.trim() == header.trim())
        })
        .count()
        > 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::PageHeader;

    fn grid(headers: &[&str], rows: &[&[Option<&str>]]) -> RawTable {
        RawTable {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|cells| SourceRow {
                    page: 0,
                    cells: cells.iter().map(|c| c.map(str::to_string)).collect(),
                })
                .collect(),
            pages: vec![PageHeader::default()],
        }
    }

    #[test]
    fn test_missing_header_column_is_fatal() {
        let table = grid(&["Day/Date", "Venue"], &[&[Some("3/5/23"), Some("PG1")]]);
        let err = prepare_rows(&table, &[Column::Date, Column::Invigilators], &[]).unwrap_err();
        assert!(matches!(
            err,
            ScheduleError::MissingColumn(Column::Invigilators)
        ));
    }

    #[test]
    fn test_missing_cell_is_fatal() {
        let table = grid(
            &["Venue", "Invigilators"],
            &[&[Some("PG1"), Some("J. Mensah")], &[Some("PG2"), None]],
        );
        let err = prepare_rows(&table, &[Column::Venue, Column::Invigilators], &[]).unwrap_err();
        assert!(matches!(
            err,
            ScheduleError::MissingCell {
                line: 2,
                column: Column::Invigilators
            }
        ));
    }

    #[test]
    fn test_empty_table_is_fatal() {
        let table = grid(&["Venue"], &[]);
        assert!(matches!(
            prepare_rows(&table, &[Column::Venue], &[]),
            Err(ScheduleError::EmptyTable)
        ));
    }

    #[test]
    fn test_repeated_headers_dropped() {
        let table = grid(
            &["Day/Date", "Venue"],
            &[
                &[Some("3/5/23"), Some("PG1")],
                &[Some("Day/Date"), Some("Venue")],
                &[Some("4/5/23"), Some("PG2")],
            ],
        );
        let rows = prepare_rows(&table, &[Column::Venue], &[]).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].line(), 3);
        assert_eq!(rows[1].cell(Column::Venue), Some("PG2"));
    }

    #[test]
    fn test_merged_cells_filled_from_above() {
        let table = grid(
            &["Day/Date", "Venue", "Invigilators"],
            &[
                &[Some("Mon 3/5/23"), Some("PG1"), Some("J. Mensah")],
                &[Some(""), Some(""), Some("")],
            ],
        );
        let rows = prepare_rows(&table, &[Column::Venue], &[Column::Date]).unwrap();
        assert_eq!(rows[1].cell(Column::Date), Some("Mon 3/5/23"));
        assert_eq!(rows[1].cell(Column::Venue), Some(""));
        assert_eq!(rows[1].cell(Column::Invigilators), Some(""));
    }
}
