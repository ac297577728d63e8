use serde::Serialize;

use crate::error::{Result, ScheduleError};

/// Serialize a result document to JSON, compact or indented
pub fn emit<T: Serialize>(document: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(document)
    } else {
        serde_json::to_string(document)
    };
    json.map_err(ScheduleError::Output)
}
