//! CSV persistence for the assembled advisory dataset
//!
//! The CSV file is the contract between the scrape stage and the map stage:
//! columns {country, url, advisory_level, country_standardized,
//! advisory_label}, one row per successfully classified country.

use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};
use tracing::info;

use crate::domain::advisory::ClassifiedAdvisory;
use crate::infrastructure::error::DatasetError;

/// Write the assembled dataset, replacing any previous run's file.
pub fn write_dataset(path: &Path, records: &[ClassifiedAdvisory]) -> Result<(), DatasetError> {
    let mut writer = WriterBuilder::new().from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    info!("Saved {} advisory records to {}", records.len(), path.display());
    Ok(())
}

/// Read a previously assembled dataset.
///
/// A missing file is reported as [`DatasetError::Missing`] so callers can
/// tell the user to run the scrape stage first.
pub fn read_dataset(path: &Path) -> Result<Vec<ClassifiedAdvisory>, DatasetError> {
    if !path.exists() {
        return Err(DatasetError::Missing {
            path: path.display().to_string(),
        });
    }

    let mut reader = ReaderBuilder::new().from_path(path)?;
    let mut records = Vec::new();
    for row in reader.deserialize() {
        records.push(row?);
    }
    info!("Loaded {} advisory records from {}", records.len(), path.display());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::domain::advisory::AdvisoryLevel;

    fn sample_records() -> Vec<ClassifiedAdvisory> {
        vec![
            ClassifiedAdvisory {
                country: "Uae".to_string(),
                url: "https://www.ireland.ie/en/dfa/overseas-travel/advice/uae/".to_string(),
                advisory_level: AdvisoryLevel::HighDegreeOfCaution,
                country_standardized: "United Arab Emirates".to_string(),
                advisory_label: "High Degree of Caution".to_string(),
            },
            ClassifiedAdvisory {
                country: "France".to_string(),
                url: "https://www.ireland.ie/en/dfa/overseas-travel/advice/france/".to_string(),
                advisory_level: AdvisoryLevel::NormalPrecautions,
                country_standardized: "France".to_string(),
                advisory_label: "Normal Precautions".to_string(),
            },
        ]
    }

    #[test]
    fn dataset_round_trips_through_csv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("advisories.csv");

        let records = sample_records();
        write_dataset(&path, &records).unwrap();
        let loaded = read_dataset(&path).unwrap();

        assert_eq!(loaded, records);
    }

    #[test]
    fn written_file_carries_the_column_contract() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("advisories.csv");

        write_dataset(&path, &sample_records()).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        let header = contents.lines().next().unwrap();

        assert_eq!(
            header,
            "country,url,advisory_level,country_standardized,advisory_label"
        );
        assert!(contents.contains("Uae,"));
        assert!(contents.contains(",2,United Arab Emirates,"));
    }

    #[test]
    fn missing_dataset_is_reported_as_missing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("does-not-exist.csv");

        match read_dataset(&path) {
            Err(DatasetError::Missing { path: reported }) => {
                assert!(reported.ends_with("does-not-exist.csv"));
            }
            other => panic!("expected DatasetError::Missing, got {other:?}"),
        }
    }
}
