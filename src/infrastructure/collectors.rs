//! Collector implementations backed by the live DFA site

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use scraper::Html;
use tracing::debug;

use crate::domain::advisory::{AdvisoryLevel, CountryLink};
use crate::domain::services::{AdvisoryLevelCollector, CountryListCollector};
use crate::infrastructure::advisory_extractor::AdvisoryExtractor;
use crate::infrastructure::http_client::HttpClient;
use crate::infrastructure::listing_parser::ListingParser;

/// Discovers country advisory pages from the live index page.
pub struct DfaListingCollector {
    http: Arc<HttpClient>,
    parser: ListingParser,
    index_url: String,
}

impl DfaListingCollector {
    pub fn new(http: Arc<HttpClient>, parser: ListingParser, index_url: String) -> Self {
        Self {
            http,
            parser,
            index_url,
        }
    }
}

#[async_trait]
impl CountryListCollector for DfaListingCollector {
    async fn collect_country_links(&self) -> Result<Vec<CountryLink>> {
        let body = self
            .http
            .get_text(&self.index_url)
            .await
            .with_context(|| format!("Failed to fetch advisory index page {}", self.index_url))?;

        let html = Html::parse_document(&body);
        let links = self.parser.parse_country_links(&html);

        if links.is_empty() {
            bail!(
                "no country links found on the advisory index page {}",
                self.index_url
            );
        }
        Ok(links)
    }
}

/// Classifies individual country pages from the live site.
pub struct DfaAdvisoryCollector {
    http: Arc<HttpClient>,
    extractor: AdvisoryExtractor,
}

impl DfaAdvisoryCollector {
    pub fn new(http: Arc<HttpClient>, extractor: AdvisoryExtractor) -> Self {
        Self { http, extractor }
    }
}

#[async_trait]
impl AdvisoryLevelCollector for DfaAdvisoryCollector {
    async fn collect_level(&self, url: &str) -> Result<Option<AdvisoryLevel>> {
        let body = self.http.get_text(url).await?;
        let html = Html::parse_document(&body);
        let level = self.extractor.extract_level(&html);
        if level.is_none() {
            debug!("No advisory marker found on {}", url);
        }
        Ok(level)
    }
}
