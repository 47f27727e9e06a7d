//! Client-side style search over a list of species records.
//!
//! Matching is a case-insensitive substring test on the enabled fields. The
//! highlighter splits text into plain and matched segments so any front end
//! can render the matches however it likes.

use regex::RegexBuilder;
use serde::{Deserialize, Serialize};

use crate::constants::catalog::{PREVIEW_CHARS, PREVIEW_SUFFIX};
use crate::models::species::Species;

/// Which fields participate in a text search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchFilters {
    pub scientific_name: bool,
    pub common_name: bool,
    pub description: bool,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            scientific_name: true,
            common_name: true,
            description: true,
        }
    }
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

#[must_use]
pub fn matches(species: &Species, text: &str, filters: SearchFilters) -> bool {
    let needle = text.to_lowercase();

    (filters.scientific_name && contains_ci(&species.scientific_name, &needle))
        || (filters.common_name
            && species
                .common_name
                .as_deref()
                .is_some_and(|n| contains_ci(n, &needle)))
        || (filters.description
            && species
                .description
                .as_deref()
                .is_some_and(|d| contains_ci(d, &needle)))
}

/// Keeps records where any enabled field contains `text`. Empty text keeps
/// everything; input order is preserved.
#[must_use]
pub fn filter_species<'a>(
    species: &'a [Species],
    text: &str,
    filters: SearchFilters,
) -> Vec<&'a Species> {
    if text.is_empty() {
        return species.iter().collect();
    }

    species
        .iter()
        .filter(|s| matches(s, text, filters))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Segment {
    Plain(String),
    Match(String),
}

/// Splits `text` around case-insensitive occurrences of `needle`.
///
/// The needle is matched literally. When highlighting is disabled or the
/// needle is empty the whole text comes back as one plain segment.
#[must_use]
pub fn highlight(text: &str, needle: &str, enabled: bool) -> Vec<Segment> {
    if text.is_empty() {
        return Vec::new();
    }

    if !enabled || needle.is_empty() {
        return vec![Segment::Plain(text.to_string())];
    }

    let Ok(re) = RegexBuilder::new(&regex::escape(needle))
        .case_insensitive(true)
        .build()
    else {
        return vec![Segment::Plain(text.to_string())];
    };

    let mut segments = Vec::new();
    let mut last = 0;

    for m in re.find_iter(text) {
        if m.start() > last {
            segments.push(Segment::Plain(text[last..m.start()].to_string()));
        }
        segments.push(Segment::Match(m.as_str().to_string()));
        last = m.end();
    }

    if last < text.len() {
        segments.push(Segment::Plain(text[last..].to_string()));
    }

    segments
}

/// Card-sized teaser of a description.
#[must_use]
pub fn description_preview(description: &str) -> String {
    let head: String = description.chars().take(PREVIEW_CHARS).collect();
    format!("{}{}", head.trim(), PREVIEW_SUFFIX)
}

#[must_use]
pub fn result_count_label(count: usize) -> String {
    if count == 1 {
        "1 result".to_string()
    } else {
        format!("{count} results")
    }
}
