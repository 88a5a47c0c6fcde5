//! Sequential advisory crawl orchestration
//!
//! One request in flight at a time with a fixed pause between countries.
//! The pause is courtesy rate limiting for the DFA site, not adaptive
//! backoff; a failed country fetch is logged and recorded as an absent
//! level rather than retried.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::domain::advisory::ScrapedAdvisory;
use crate::domain::services::{AdvisoryLevelCollector, CountryListCollector};

/// Drives the scrape: listing discovery, then one country page at a time.
pub struct AdvisoryCrawler {
    list_collector: Arc<dyn CountryListCollector>,
    level_collector: Arc<dyn AdvisoryLevelCollector>,
    request_delay: Duration,
}

impl AdvisoryCrawler {
    pub fn new(
        list_collector: Arc<dyn CountryListCollector>,
        level_collector: Arc<dyn AdvisoryLevelCollector>,
        request_delay: Duration,
    ) -> Self {
        Self {
            list_collector,
            level_collector,
            request_delay,
        }
    }

    /// Run the full crawl: discover country pages, then classify each one.
    ///
    /// Listing discovery failure is terminal. Per-country failures are not:
    /// the country is recorded with an absent level and the crawl continues.
    pub async fn run(&self) -> Result<Vec<ScrapedAdvisory>> {
        let links = self
            .list_collector
            .collect_country_links()
            .await
            .context("Failed to fetch country list from the advisory index")?;

        let total = links.len();
        info!("Found {} countries", total);

        let mut results = Vec::with_capacity(total);

        for (index, link) in links.into_iter().enumerate() {
            let level = match self.level_collector.collect_level(&link.url).await {
                Ok(Some(level)) => {
                    info!("{}/{}: {} - Level {}", index + 1, total, link.country, level.code());
                    Some(level)
                }
                Ok(None) => {
                    info!("{}/{}: {} - unable to determine", index + 1, total, link.country);
                    None
                }
                Err(error) => {
                    warn!("{}/{}: {} - fetch failed: {:#}", index + 1, total, link.country, error);
                    None
                }
            };

            results.push(ScrapedAdvisory { link, level });

            if index + 1 < total {
                tokio::time::sleep(self.request_delay).await;
            }
        }

        Ok(results)
    }
}
