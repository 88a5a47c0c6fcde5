//! Advisory level extraction from country pages
//!
//! The DFA site renders the advisory banner as
//! `<div class="accordion_travel <level> accordion is-open">`; the class
//! token naming the level is the primary signal. Pages that omit the
//! container fall back to the accordion heading text, a best-effort
//! secondary signal. Both paths use a priority-ordered marker table so a
//! page carrying several markers resolves to the most severe one, and
//! adding a marker is a data change rather than a logic change.

use anyhow::{Result, anyhow};
use scraper::{Html, Selector};
use tracing::debug;

use crate::domain::advisory::AdvisoryLevel;

/// Class-attribute markers, most severe first.
const CLASS_MARKERS: &[(&str, AdvisoryLevel)] = &[
    ("do-not-travel", AdvisoryLevel::DoNotTravel),
    ("avoid-non-essential-travel", AdvisoryLevel::AvoidUnnecessaryTravel),
    ("avoid-unnecessary-travel", AdvisoryLevel::AvoidUnnecessaryTravel),
    ("high-degree-of-caution", AdvisoryLevel::HighDegreeOfCaution),
    ("high-degree-caution", AdvisoryLevel::HighDegreeOfCaution),
    ("normal-precautions", AdvisoryLevel::NormalPrecautions),
];

/// Heading-text markers, same priority order.
const TEXT_MARKERS: &[(&str, AdvisoryLevel)] = &[
    ("do not travel", AdvisoryLevel::DoNotTravel),
    ("avoid non-essential travel", AdvisoryLevel::AvoidUnnecessaryTravel),
    ("avoid unnecessary travel", AdvisoryLevel::AvoidUnnecessaryTravel),
    ("high degree of caution", AdvisoryLevel::HighDegreeOfCaution),
    ("normal precautions", AdvisoryLevel::NormalPrecautions),
];

/// Extractor for the advisory level of a single country page.
pub struct AdvisoryExtractor {
    container_selector: Selector,
    heading_selector: Selector,
}

impl AdvisoryExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            container_selector: Selector::parse("div.accordion_travel")
                .map_err(|e| anyhow!("invalid container selector: {e}"))?,
            heading_selector: Selector::parse("h3.accordion__title")
                .map_err(|e| anyhow!("invalid heading selector: {e}"))?,
        })
    }

    /// Extract the advisory level, or `None` when neither heuristic matches.
    pub fn extract_level(&self, html: &Html) -> Option<AdvisoryLevel> {
        if let Some(container) = html.select(&self.container_selector).next() {
            let classes = container
                .value()
                .attr("class")
                .unwrap_or_default()
                .to_lowercase();
            if let Some(level) = match_marker(CLASS_MARKERS, &classes) {
                debug!("Matched advisory container class, level {}", level.code());
                return Some(level);
            }
        }

        // Container missing or unmarked: check the accordion heading text.
        if let Some(heading) = html.select(&self.heading_selector).next() {
            let text = heading.text().collect::<String>().trim().to_lowercase();
            if let Some(level) = match_marker(TEXT_MARKERS, &text) {
                debug!("Matched advisory heading text, level {}", level.code());
                return Some(level);
            }
        }

        None
    }
}

/// First matching marker in table order wins.
fn match_marker(markers: &[(&str, AdvisoryLevel)], haystack: &str) -> Option<AdvisoryLevel> {
    markers
        .iter()
        .find(|(marker, _)| haystack.contains(marker))
        .map(|&(_, level)| level)
}
