//! Service layer traits for the crawl stages
//!
//! Collectors are the seams between orchestration and the live site;
//! tests substitute fixture-backed implementations.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::advisory::{AdvisoryLevel, CountryLink};

/// Discovers the set of per-country advisory pages.
#[async_trait]
pub trait CountryListCollector: Send + Sync {
    /// Fetch the advisory index and return deduplicated country links.
    ///
    /// An error here is terminal for the run; no partial listing is used.
    async fn collect_country_links(&self) -> Result<Vec<CountryLink>>;
}

/// Classifies a single country advisory page.
#[async_trait]
pub trait AdvisoryLevelCollector: Send + Sync {
    /// Fetch one country page and extract its advisory level.
    ///
    /// `Ok(None)` means the page was reachable but carried no recognizable
    /// advisory marker.
    async fn collect_level(&self, url: &str) -> Result<Option<AdvisoryLevel>>;
}
