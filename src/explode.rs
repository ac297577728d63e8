//! Row explosion: one table line naming several invigilators and venues
//! becomes one atomic row per (venue, invigilator) pair.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::error::Result;
use crate::normalize::rules::{apply_rules, title_case, Rule};
use crate::normalize::VenueNormalizer;
use crate::table::{Column, RawRow};
use crate::TARGET_PIPELINE;

lazy_static! {
    /// Separate names packed into one cell before splitting on commas
    static ref NAME_BOUNDARY_RULES: Vec<Rule> = vec![
        Rule::new("line_break", r"\s+", " "),
        // "JohnA." -> "John A."
        Rule::new("glued_initial", r"([a-z])([A-Z]\.)", "$1 $2"),
        // lone capitals are initials
        Rule::new("initial_period", r"\b([A-Z])\b\.?", "$1."),
        // "John Doe A. Smith" -> "John Doe, A. Smith"
        Rule::new("name_boundary", r"(\w+)(\s[A-Z]\.)", "$1,$2"),
    ];

    static ref NAME_LIST_RULES: Vec<Rule> = vec![
        Rule::new("hyphen_spacing", r"\s*-\s*", "-"),
        Rule::new("list_separators", r"[/;]", ", "),
        Rule::new("empty_entries", r",\s*,", ","),
    ];

    static ref LIST_SPLIT: Regex = Regex::new(r",\s*").expect("valid split pattern");
    static ref NAME_NOISE: Regex = Regex::new(r"[^\w\s.\-]").expect("valid noise pattern");
}

/// One (venue, invigilator) pairing of a source row; every other field is
/// read from `source` unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomicRow<'a> {
    pub source: &'a RawRow,
    pub venue: String,
    pub invigilator: String,
}

/// Splits rows on their venue and invigilator axes
#[derive(Debug, Clone)]
pub struct RowExploder<'a> {
    venues: &'a VenueNormalizer,
}

impl<'a> RowExploder<'a> {
    pub fn new(venues: &'a VenueNormalizer) -> Self {
        RowExploder { venues }
    }

    /// Cartesian product of the row's venues and invigilators, venue-major.
    ///
    /// A row with no venue or no invigilator left after splitting yields
    /// nothing. The row must carry both columns.
    pub fn explode<'r>(&self, row: &'r RawRow) -> Result<Vec<AtomicRow<'r>>> {
        let invigilators = split_invigilators(row.require(Column::Invigilators)?);
        let venues = self.venues.split_lines(row.require(Column::Venue)?);

        if invigilators.is_empty() || venues.is_empty() {
            debug!(
                target: TARGET_PIPELINE,
                "Row {}: dropped ({} invigilators, {} venues)",
                row.line(),
                invigilators.len(),
                venues.len()
            );
            return Ok(Vec::new());
        }

        let mut atomic = Vec::with_capacity(invigilators.len() * venues.len());
        for venue in &venues {
            for invigilator in &invigilators {
                atomic.push(AtomicRow {
                    source: row,
                    venue: venue.clone(),
                    invigilator: invigilator.clone(),
                });
            }
        }

        Ok(atomic)
    }
}

/// Split an invigilator cell into individual name fragments.
///
/// Names are separated by commas, semicolons or slashes, and also where a
/// name runs straight into the next person's initial.
pub fn split_invigilators(cell: &str) -> Vec<String> {
    let separated = apply_rules(&NAME_BOUNDARY_RULES, cell);
    let listed = apply_rules(&NAME_LIST_RULES, &title_case(&separated));

    LIST_SPLIT
        .split(&listed)
        .map(|name| NAME_NOISE.replace_all(name, "").trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}
