use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::identity::resolver::{DEFAULT_LENGTH_TOLERANCE, DEFAULT_SIMILARITY_THRESHOLD};
use crate::table::Column;

/// Text before any of these is discarded from a venue line
pub const VENUE_ANCHORS: &[&str] = &[
    "PG",
    "SMA",
    "SAARAH MENSAH AUD",
    "SAARAH MENSAH AUDITORIUM",
    "BLOCK",
];

/// Long venue names collapsed to the short forms used on duty rosters
pub const VENUE_ALIASES: &[(&str, &str)] = &[
    ("SAARAH MENSAH AUDITORIUM", "SMA"),
    ("SAARAH MENSAH AUD", "SMA"),
    ("BLK", "BLOCK"),
];

/// Lines starting with these open a new venue even without an anchor
pub const VENUE_BLOCK_STARTERS: &[&str] = &["ACCRA"];

/// Columns whose empty cells are merged cells from the row above
pub const FILL_COLUMNS: &[Column] = &[
    Column::Date,
    Column::Time,
    Column::CourseCode,
    Column::CourseName,
    Column::StudentCount,
];

/// Run configuration. Every field is optional in the JSON file; missing
/// fields take the built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub resolver: ResolverConfig,
    pub venue: VenueConfig,
    pub table: TableConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Largest length difference between two keys still compared for typos
    pub length_tolerance: usize,
    /// Similarity a key pair must exceed to be merged (0.0-1.0)
    pub similarity_threshold: f64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        ResolverConfig {
            length_tolerance: DEFAULT_LENGTH_TOLERANCE,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VenueConfig {
    pub anchors: Vec<String>,
    /// Ordered `[from, to]` pairs, matched on whole words
    pub aliases: Vec<(String, String)>,
    /// Prepended to venues that start with BLOCK
    pub block_prefix: String,
    pub block_starters: Vec<String>,
}

impl Default for VenueConfig {
    fn default() -> Self {
        VenueConfig {
            anchors: VENUE_ANCHORS.iter().map(|s| s.to_string()).collect(),
            aliases: VENUE_ALIASES
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
            block_prefix: "PG".to_string(),
            block_starters: VENUE_BLOCK_STARTERS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub fill_columns: Vec<Column>,
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig {
            fill_columns: FILL_COLUMNS.to_vec(),
        }
    }
}

impl PipelineConfig {
    /// Load a JSON configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: PipelineConfig =
            serde_json::from_str(r#"{"resolver": {"similarity_threshold": 0.8}}"#).unwrap();
        assert_eq!(config.resolver.similarity_threshold, 0.8);
        assert_eq!(config.resolver.length_tolerance, DEFAULT_LENGTH_TOLERANCE);
        assert_eq!(config.venue, VenueConfig::default());
    }

    #[test]
    fn test_fill_columns_by_name() {
        let config: PipelineConfig =
            serde_json::from_str(r#"{"table": {"fill_columns": ["date", "venue"]}}"#).unwrap();
        assert_eq!(config.table.fill_columns, vec![Column::Date, Column::Venue]);
    }

    #[test]
    fn test_aliases_as_pairs() {
        let config: PipelineConfig =
            serde_json::from_str(r#"{"venue": {"aliases": [["GREAT HALL", "GH"]]}}"#).unwrap();
        assert_eq!(
            config.venue.aliases,
            vec![("GREAT HALL".to_string(), "GH".to_string())]
        );
        assert_eq!(config.venue.anchors, VenueConfig::default().anchors);
    }
}
