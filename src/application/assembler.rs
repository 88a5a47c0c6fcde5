//! Dataset assembly
//!
//! Joins raw per-country scrape outcomes with standardized country names,
//! drops countries whose level could not be determined, and attaches the
//! human-readable label. Rows are immutable from here on.

use std::collections::BTreeMap;

use tracing::debug;

use crate::domain::advisory::{ClassifiedAdvisory, ScrapedAdvisory};
use crate::domain::country::standardize_country_name;

/// Assemble the canonical dataset from raw scrape outcomes.
///
/// Every emitted row carries a level and its label; outcomes with an absent
/// level are dropped.
pub fn assemble_dataset(results: Vec<ScrapedAdvisory>) -> Vec<ClassifiedAdvisory> {
    let total = results.len();

    let records: Vec<ClassifiedAdvisory> = results
        .into_iter()
        .filter_map(|result| {
            let level = result.level?;
            Some(ClassifiedAdvisory {
                country_standardized: standardize_country_name(&result.link.country).to_string(),
                advisory_label: level.label().to_string(),
                country: result.link.country,
                url: result.link.url,
                advisory_level: level,
            })
        })
        .collect();

    debug!(
        "Assembled {} classified records out of {} scraped countries",
        records.len(),
        total
    );
    records
}

/// Count records per advisory level code, in ascending level order.
pub fn level_distribution(records: &[ClassifiedAdvisory]) -> BTreeMap<u8, usize> {
    let mut distribution = BTreeMap::new();
    for record in records {
        *distribution.entry(record.advisory_level.code()).or_insert(0) += 1;
    }
    distribution
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::advisory::{AdvisoryLevel, CountryLink};

    fn scraped(country: &str, level: Option<AdvisoryLevel>) -> ScrapedAdvisory {
        ScrapedAdvisory {
            link: CountryLink {
                country: country.to_string(),
                url: format!(
                    "https://www.ireland.ie/en/dfa/overseas-travel/advice/{}/",
                    country.to_lowercase().replace(' ', "-")
                ),
            },
            level,
        }
    }

    #[test]
    fn unresolved_countries_are_dropped() {
        let records = assemble_dataset(vec![
            scraped("France", Some(AdvisoryLevel::NormalPrecautions)),
            scraped("Atlantis", None),
            scraped("Ukraine", Some(AdvisoryLevel::DoNotTravel)),
        ]);

        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| !r.advisory_label.is_empty()));
    }

    #[test]
    fn names_are_standardized_and_labels_attached() {
        let records = assemble_dataset(vec![scraped("Uae", Some(AdvisoryLevel::HighDegreeOfCaution))]);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].country, "Uae");
        assert_eq!(records[0].country_standardized, "United Arab Emirates");
        assert_eq!(records[0].advisory_label, "High Degree of Caution");
        assert_eq!(records[0].advisory_level, AdvisoryLevel::HighDegreeOfCaution);
    }

    #[test]
    fn distribution_counts_by_ascending_level() {
        let records = assemble_dataset(vec![
            scraped("France", Some(AdvisoryLevel::NormalPrecautions)),
            scraped("Spain", Some(AdvisoryLevel::NormalPrecautions)),
            scraped("Egypt", Some(AdvisoryLevel::HighDegreeOfCaution)),
            scraped("Ukraine", Some(AdvisoryLevel::DoNotTravel)),
        ]);

        let distribution = level_distribution(&records);
        assert_eq!(distribution.get(&1), Some(&2));
        assert_eq!(distribution.get(&2), Some(&1));
        assert_eq!(distribution.get(&3), None);
        assert_eq!(distribution.get(&4), Some(&1));
    }
}
