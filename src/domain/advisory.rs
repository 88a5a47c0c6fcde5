//! Core advisory domain types
//!
//! The advisory level is a closed four-value rating issued per country,
//! 1 = lowest risk. Records move through three shapes: a discovered link,
//! a raw scrape outcome, and a fully classified dataset row.

use serde::{Deserialize, Serialize};

/// Discrete travel advisory level, ascending severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AdvisoryLevel {
    NormalPrecautions,
    HighDegreeOfCaution,
    AvoidUnnecessaryTravel,
    DoNotTravel,
}

impl AdvisoryLevel {
    /// All levels in ascending severity order.
    pub const ALL: [Self; 4] = [
        Self::NormalPrecautions,
        Self::HighDegreeOfCaution,
        Self::AvoidUnnecessaryTravel,
        Self::DoNotTravel,
    ];

    /// Numeric code as published by the DFA (1-4).
    pub fn code(self) -> u8 {
        match self {
            Self::NormalPrecautions => 1,
            Self::HighDegreeOfCaution => 2,
            Self::AvoidUnnecessaryTravel => 3,
            Self::DoNotTravel => 4,
        }
    }

    /// Parse a numeric code; anything outside 1-4 is `None`.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::NormalPrecautions),
            2 => Some(Self::HighDegreeOfCaution),
            3 => Some(Self::AvoidUnnecessaryTravel),
            4 => Some(Self::DoNotTravel),
            _ => None,
        }
    }

    /// Human-readable label attached to assembled records.
    pub fn label(self) -> &'static str {
        match self {
            Self::NormalPrecautions => "Normal Precautions",
            Self::HighDegreeOfCaution => "High Degree of Caution",
            Self::AvoidUnnecessaryTravel => "Avoid Unnecessary Travel",
            Self::DoNotTravel => "Do Not Travel",
        }
    }

    /// Fixed choropleth color for this level.
    pub fn color(self) -> &'static str {
        match self {
            Self::NormalPrecautions => "green",
            Self::HighDegreeOfCaution => "yellow",
            Self::AvoidUnnecessaryTravel => "orange",
            Self::DoNotTravel => "red",
        }
    }

    /// Descriptive legend entry, e.g. "Level 4: Do Not Travel".
    pub fn legend_entry(self) -> String {
        format!("Level {}: {}", self.code(), self.label())
    }
}

// Levels serialize as their numeric code so CSV rows carry plain 1-4.
impl Serialize for AdvisoryLevel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for AdvisoryLevel {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = u8::deserialize(deserializer)?;
        Self::from_code(code)
            .ok_or_else(|| serde::de::Error::custom(format!("advisory level out of range: {code}")))
    }
}

/// Map a raw level code as it appears in persisted data to its descriptive
/// legend entry. Accepts both integer-like ("4") and float-like ("4.0")
/// string forms.
pub fn legend_entry_for_code(code: &str) -> Option<String> {
    let normalized = code.strip_suffix(".0").unwrap_or(code);
    normalized
        .parse::<u8>()
        .ok()
        .and_then(AdvisoryLevel::from_code)
        .map(AdvisoryLevel::legend_entry)
}

/// A country advisory page discovered on the index page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CountryLink {
    /// Display name derived from the URL slug.
    pub country: String,
    /// Absolute URL of the country's advisory page.
    pub url: String,
}

/// Raw per-country scrape outcome prior to assembly.
///
/// `level` is `None` when the page carried no recognizable marker or the
/// fetch failed.
#[derive(Debug, Clone)]
pub struct ScrapedAdvisory {
    pub link: CountryLink,
    pub level: Option<AdvisoryLevel>,
}

/// One fully classified row of the advisory dataset.
///
/// Only the assembler produces these; a row always carries a level and its
/// label, and is immutable from assembly on. Field order matches the CSV
/// column contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedAdvisory {
    pub country: String,
    pub url: String,
    pub advisory_level: AdvisoryLevel,
    pub country_standardized: String,
    pub advisory_label: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for level in AdvisoryLevel::ALL {
            assert_eq!(AdvisoryLevel::from_code(level.code()), Some(level));
        }
        assert_eq!(AdvisoryLevel::from_code(0), None);
        assert_eq!(AdvisoryLevel::from_code(5), None);
    }

    #[test]
    fn labels_and_legend_entries() {
        assert_eq!(AdvisoryLevel::DoNotTravel.label(), "Do Not Travel");
        assert_eq!(
            AdvisoryLevel::NormalPrecautions.legend_entry(),
            "Level 1: Normal Precautions"
        );
    }

    #[test]
    fn legend_lookup_accepts_integer_and_float_codes() {
        assert_eq!(
            legend_entry_for_code("4").as_deref(),
            Some("Level 4: Do Not Travel")
        );
        assert_eq!(
            legend_entry_for_code("4.0").as_deref(),
            Some("Level 4: Do Not Travel")
        );
        assert_eq!(
            legend_entry_for_code("2.0").as_deref(),
            Some("Level 2: High Degree of Caution")
        );
        assert_eq!(legend_entry_for_code("5"), None);
        assert_eq!(legend_entry_for_code("not-a-level"), None);
    }

    #[test]
    fn level_serializes_as_number() {
        let json = serde_json::to_string(&AdvisoryLevel::AvoidUnnecessaryTravel).unwrap();
        assert_eq!(json, "3");
        let level: AdvisoryLevel = serde_json::from_str("3").unwrap();
        assert_eq!(level, AdvisoryLevel::AvoidUnnecessaryTravel);
        assert!(serde_json::from_str::<AdvisoryLevel>("9").is_err());
    }
}
