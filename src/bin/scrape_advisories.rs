//! Scrape stage entry point: collect advisory levels and write the dataset

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{error, info};

use dfa_advisory_map::application::assembler::{assemble_dataset, level_distribution};
use dfa_advisory_map::application::crawler::AdvisoryCrawler;
use dfa_advisory_map::infrastructure::advisory_extractor::AdvisoryExtractor;
use dfa_advisory_map::infrastructure::collectors::{DfaAdvisoryCollector, DfaListingCollector};
use dfa_advisory_map::infrastructure::config::ConfigManager;
use dfa_advisory_map::infrastructure::csv_store;
use dfa_advisory_map::infrastructure::http_client::HttpClient;
use dfa_advisory_map::infrastructure::listing_parser::{ListingParser, MANUAL_FALLBACK_GUIDE};
use dfa_advisory_map::infrastructure::logging::init_logging;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_logging("info")?;
    let config = ConfigManager::new()?.load_config().await?;

    info!("Starting travel advisory scrape of {}", config.site.index_url);

    let http = Arc::new(
        HttpClient::new(config.crawl.http.clone()).context("Failed to build HTTP client")?,
    );
    let parser = ListingParser::new(&config.site.base_url)?;
    let extractor = AdvisoryExtractor::new()?;

    let crawler = AdvisoryCrawler::new(
        Arc::new(DfaListingCollector::new(
            http.clone(),
            parser,
            config.site.index_url.clone(),
        )),
        Arc::new(DfaAdvisoryCollector::new(http, extractor)),
        Duration::from_millis(config.crawl.request_delay_ms),
    );

    let results = match crawler.run().await {
        Ok(results) => results,
        Err(err) => {
            error!("Advisory scrape aborted: {:#}", err);
            error!("{}", MANUAL_FALLBACK_GUIDE);
            std::process::exit(1);
        }
    };

    let records = assemble_dataset(results);
    csv_store::write_dataset(&config.output.csv_path, &records)?;

    info!("Successfully scraped {} countries", records.len());
    info!("Advisory level distribution:");
    for (level, count) in level_distribution(&records) {
        info!("  Level {}: {}", level, count);
    }
    info!("Run create-map to generate the map visualization");

    Ok(())
}
