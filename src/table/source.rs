//! Decoding of table-extractor payloads.
//!
//! Geometry extraction from the PDF happens upstream; what arrives here is the
//! extractor's JSON, either as text or base64-encoded.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

use super::types::{PageHeader, RawTable, SourceRow};
use super::TARGET_TABLE;
use crate::error::{Result, ScheduleError};

/// Anything that can hand over the rows of one document in document order
pub trait TableSource {
    fn load(&self) -> Result<RawTable>;
}

/// Already-built tables are their own source
impl TableSource for RawTable {
    fn load(&self) -> Result<RawTable> {
        Ok(self.clone())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TablePayload {
    Pages { pages: Vec<PagePayload> },
    Grid(Vec<Vec<Value>>),
    Records(Vec<Map<String, Value>>),
}

#[derive(Deserialize)]
struct PagePayload {
    #[serde(default)]
    header_text: Vec<String>,
    #[serde(default)]
    table: Vec<Vec<Value>>,
}

/// Table source backed by an in-memory extractor payload
pub struct PayloadSource {
    payload: Vec<u8>,
}

impl PayloadSource {
    pub fn new(payload: impl Into<Vec<u8>>) -> Self {
        PayloadSource {
            payload: payload.into(),
        }
    }

    /// Return the JSON bytes, decoding base64 when the payload is not JSON itself
    fn json_bytes(&self) -> Result<Vec<u8>> {
        let trimmed = self.payload.trim_ascii();
        if matches!(trimmed.first(), Some(b'[') | Some(b'{')) {
            return Ok(trimmed.to_vec());
        }

        let compact: Vec<u8> = trimmed
            .iter()
            .copied()
            .filter(|b| !b.is_ascii_whitespace())
            .collect();
        debug!(target: TARGET_TABLE, "Payload is not JSON, decoding {} base64 bytes", compact.len());
        STANDARD
            .decode(&compact)
            .map_err(|e| ScheduleError::Decode(e.to_string()))
    }
}

impl TableSource for PayloadSource {
    fn load(&self) -> Result<RawTable> {
        let bytes = self.json_bytes()?;
        let payload: TablePayload = serde_json::from_slice(&bytes)?;

        let table = match payload {
            TablePayload::Pages { pages } => from_pages(pages),
            TablePayload::Grid(grid) => from_pages(vec![PagePayload {
                header_text: Vec::new(),
                table: grid,
            }]),
            TablePayload::Records(records) => from_records(records),
        };

        info!(
            target: TARGET_TABLE,
            "Loaded table with {} columns, {} rows across {} pages",
            table.headers.len(),
            table.rows.len(),
            table.pages.len()
        );

        Ok(table)
    }
}

/// Concatenate page tables the way the extractor lays them out: the first row
/// of the first page is the header, later pages may repeat it.
fn from_pages(pages: Vec<PagePayload>) -> RawTable {
    let mut table = RawTable::default();
    let mut header_taken = false;

    for (page_index, page) in pages.into_iter().enumerate() {
        table.pages.push(PageHeader {
            lines: page.header_text,
        });

        for row in page.table {
            let cells: Vec<Option<String>> = row.into_iter().map(cell_text).collect();
            if !header_taken {
                table.headers = cells.into_iter().map(Option::unwrap_or_default).collect();
                header_taken = true;
                continue;
            }
            table.rows.push(SourceRow {
                page: page_index,
                cells,
            });
        }
    }

    table
}

/// Column-to-cell mappings. The header is the union of keys in first-seen
/// order; a key a record does not carry stays absent rather than empty.
fn from_records(records: Vec<Map<String, Value>>) -> RawTable {
    let mut headers: Vec<String> = Vec::new();
    for record in &records {
        for key in record.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let rows = records
        .into_iter()
        .map(|mut record| SourceRow {
            page: 0,
            cells: headers
                .iter()
                .map(|key| record.remove(key).and_then(cell_text))
                .collect(),
        })
        .collect();

    RawTable {
        headers,
        rows,
        pages: vec![PageHeader::default()],
    }
}

/// Extractors emit `null` for blank cells; those are empty, not absent.
fn cell_text(value: Value) -> Option<String> {
    Some(match value {
        Value::Null => String::new(),
        Value::String(text) => text,
        other => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_payload() {
        let source = PayloadSource::new(
            r#"[["Day/Date","Venue"],["Mon 3/5/23","PG1"],[null,"PG2"]]"#,
        );
        let table = source.load().unwrap();
        assert_eq!(table.headers, vec!["Day/Date", "Venue"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1].cells[0], Some(String::new()));
    }

    #[test]
    fn test_base64_payload() {
        let encoded = STANDARD.encode(r#"[["Time"],["9-11am"]]"#);
        let table = PayloadSource::new(format!("{}\n", encoded)).load().unwrap();
        assert_eq!(table.headers, vec!["Time"]);
        assert_eq!(table.rows[0].cells[0].as_deref(), Some("9-11am"));
    }

    #[test]
    fn test_record_payload_keeps_missing_keys_absent() {
        let source = PayloadSource::new(
            r#"[{"Venue":"PG1","Time":"9-11am"},{"Venue":"PG2","No. of Students":45}]"#,
        );
        let table = source.load().unwrap();
        assert_eq!(table.headers.len(), 3);
        let time_index = table.headers.iter().position(|h| h == "Time").unwrap();
        let count_index = table
            .headers
            .iter()
            .position(|h| h == "No. of Students")
            .unwrap();
        assert_eq!(table.rows[1].cells[time_index], None);
        assert_eq!(table.rows[1].cells[count_index].as_deref(), Some("45"));
    }

    #[test]
    fn test_pages_payload() {
        let source = PayloadSource::new(
            r#"{"pages":[
                {"header_text":["UNIVERSITY","LEVEL 100"],"table":[["Venue","Time"],["PG1","9-11am"]]},
                {"header_text":["UNIVERSITY","LEVEL 200"],"table":[["Venue","Time"],["SMA","1-3pm"]]}
            ]}"#,
        );
        let table = source.load().unwrap();
        assert_eq!(table.pages.len(), 2);
        assert_eq!(table.pages[1].lines[1], "LEVEL 200");
        // the second page's header row is kept as data; preparation drops it
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[2].page, 1);
    }

    #[test]
    fn test_garbage_payload_is_malformed() {
        let err = PayloadSource::new("%%% not a table %%%").load().unwrap_err();
        assert!(err.to_string().starts_with("malformed input"));
    }
}
