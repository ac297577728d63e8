use regex::{Regex, RegexBuilder};
use tracing::trace;

use super::rules::collapse_whitespace;
use super::TARGET_NORMALIZE;
use crate::config::VenueConfig;
use crate::error::{Result, ScheduleError};

/// Venue cleanup driven by the anchor keywords and alias table of a
/// [`VenueConfig`].
#[derive(Debug, Clone)]
pub struct VenueNormalizer {
    anchor: Option<Regex>,
    aliases: Vec<(Regex, String)>,
    block_prefix: String,
    block_starters: Vec<String>,
}

impl VenueNormalizer {
    pub fn new(config: &VenueConfig) -> Result<Self> {
        let anchor = if config.anchors.is_empty() {
            None
        } else {
            Some(anchor_regex(&config.anchors)?)
        };

        let aliases = config
            .aliases
            .iter()
            .map(|(from, to)| Ok((alias_regex(from)?, to.clone())))
            .collect::<Result<Vec<_>>>()?;

        // any text an anchor or alias would recognise also opens a new venue line
        let mut block_starters: Vec<String> = config
            .block_starters
            .iter()
            .chain(&config.anchors)
            .chain(config.aliases.iter().map(|(from, _)| from))
            .map(|s| s.to_uppercase())
            .collect();
        block_starters.sort();
        block_starters.dedup();

        Ok(VenueNormalizer {
            anchor,
            aliases,
            block_prefix: config.block_prefix.clone(),
            block_starters,
        })
    }

    /// Canonical venue token for one venue line.
    ///
    /// Punctuation other than commas and every digit are removed, text before
    /// the first anchor keyword is discarded and aliases are applied. A line
    /// with no anchor keeps its text.
    pub fn clean(&self, raw: &str) -> String {
        self.clean_line(raw, true)
    }

    /// Same as [`clean`](Self::clean) but keeps room numbers, as the flat
    /// exam timetable does
    pub fn clean_keeping_digits(&self, raw: &str) -> String {
        self.clean_line(raw, false)
    }

    fn clean_line(&self, raw: &str, strip_digits: bool) -> String {
        let stripped: String = raw
            .chars()
            .filter(|c| !c.is_ascii_punctuation() || *c == ',')
            .collect();
        let mut venue = collapse_whitespace(&stripped);

        if let Some(found) = self.anchor.as_ref().and_then(|re| re.find(&venue)) {
            venue = venue[found.start()..].to_string();
        }

        if strip_digits {
            venue.retain(|c| !c.is_ascii_digit());
        }

        for (pattern, replacement) in &self.aliases {
            venue = pattern
                .replace_all(&venue, replacement.as_str())
                .into_owned();
        }

        let mut venue = collapse_whitespace(&venue);
        if !self.block_prefix.is_empty() && venue.to_uppercase().starts_with("BLOCK") {
            venue = format!("{} {}", self.block_prefix, venue);
        }

        trace!(target: TARGET_NORMALIZE, "Venue {:?} -> {:?}", raw, venue);
        venue
    }

    /// Split a venue cell into venue lines.
    ///
    /// A line that does not open a new block (anchor, alias or configured
    /// starter such as "ACCRA") continues the previous venue and is joined to
    /// it with `" - "`.
    pub fn split_lines(&self, cell: &str) -> Vec<String> {
        let mut venues: Vec<String> = Vec::new();

        for line in cell.lines().map(str::trim).filter(|l| !l.is_empty()) {
            match venues.last_mut() {
                Some(previous) if !self.starts_block(line) => {
                    previous.push_str(" - ");
                    previous.push_str(line);
                }
                _ => venues.push(line.to_string()),
            }
        }

        venues
    }

    fn starts_block(&self, line: &str) -> bool {
        let upper = line
            .trim_start_matches(|c: char| c.is_ascii_punctuation() || c.is_whitespace())
            .to_uppercase();
        self.block_starters
            .iter()
            .any(|starter| upper.starts_with(starter.as_str()))
    }
}

/// Case-sensitive alternation over the anchor keywords, starting at a word
/// boundary so mixed-case words ("Ismail", "Upgrade") are not cut
fn anchor_regex(anchors: &[String]) -> Result<Regex> {
    let alternation = anchors
        .iter()
        .map(|k| regex::escape(k))
        .collect::<Vec<_>>()
        .join("|");

    Regex::new(&format!(r"\b(?:{})", alternation))
        .map_err(|e| ScheduleError::Config(e.to_string()))
}

/// Case-insensitive whole-word match of one alias source
fn alias_regex(from: &str) -> Result<Regex> {
    RegexBuilder::new(&format!(r"\b(?:{})\b", regex::escape(from)))
        .case_insensitive(true)
        .build()
        .map_err(|e| ScheduleError::Config(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> VenueNormalizer {
        VenueNormalizer::new(&VenueConfig::default()).unwrap()
    }

    #[test]
    fn test_anchor_discards_prefix() {
        let venues = normalizer();
        assert_eq!(venues.clean("GROUND FLOOR PG1"), "PG");
        assert_eq!(venues.clean("ACCRA CAMPUS - SMA"), "SMA");
    }

    #[test]
    fn test_aliases() {
        let venues = normalizer();
        assert_eq!(venues.clean("SAARAH MENSAH AUDITORIUM"), "SMA");
        assert_eq!(venues.clean("Saarah Mensah Aud."), "SMA");
        assert_eq!(venues.clean("PG BLK A"), "PG BLOCK A");
    }

    #[test]
    fn test_block_gets_prefix() {
        let venues = normalizer();
        assert_eq!(venues.clean("BLOCK C 12"), "PG BLOCK C");
    }

    #[test]
    fn test_unanchored_passes_through() {
        let venues = normalizer();
        assert_eq!(venues.clean("Main Library, Room 4."), "Main Library, Room");
        assert_eq!(venues.clean_keeping_digits("Lab 2"), "Lab 2");
    }

    #[test]
    fn test_anchor_inside_word_is_ignored() {
        let venues = normalizer();
        assert_eq!(venues.clean("Ismail Hall"), "Ismail Hall");
        assert_eq!(venues.clean("Upgrade Room"), "Upgrade Room");
        assert_eq!(venues.clean("UPGRADE ROOM"), "UPGRADE ROOM");
        assert_eq!(venues.clean_keeping_digits("Great Hall pg 3"), "Great Hall pg 3");
        assert_eq!(venues.clean_keeping_digits("JQB PG 3"), "PG 3");
    }

    #[test]
    fn test_split_lines_continuations() {
        let venues = normalizer();
        assert_eq!(venues.split_lines("PG1\nPG2"), vec!["PG1", "PG2"]);
        assert_eq!(
            venues.split_lines("PG BLOCK A\nGROUND FLOOR\nACCRA SMA"),
            vec!["PG BLOCK A - GROUND FLOOR", "ACCRA SMA"]
        );
        assert!(venues.split_lines(" \n ").is_empty());
    }
}
