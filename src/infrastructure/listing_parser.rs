//! Advisory index page parsing
//!
//! Discovers per-country advisory links on the DFA travel advice index page
//! by URL pattern rather than page structure: the index markup has changed
//! before, the URL scheme has not. A country URL contains the advice path
//! segment, sits deep enough in the hierarchy, and names the country in its
//! final slug.

use std::collections::HashSet;

use anyhow::{Result, anyhow};
use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

use crate::domain::advisory::CountryLink;

/// Path segment every country advisory URL contains.
const ADVISORY_PATH_SEGMENT: &str = "/advice/";

/// Minimum number of path separators in a country href; shallower paths are
/// section indexes, not country pages.
const MIN_PATH_SEPARATORS: usize = 5;

/// Href keywords that mark non-country pages under the advice path.
const EXCLUDED_KEYWORDS: &[&str] = &["covid", "index", "search", "about"];

/// Manual fallback instructions logged when the index page cannot be scraped
/// automatically (the site occasionally blocks non-browser traffic).
pub const MANUAL_FALLBACK_GUIDE: &str = r#"The website may be blocking automated requests.
Alternative method: use your browser's developer console.

1. Open the travel advice index page in a browser
2. Open the console (F12) and paste:

   countries = [];
   document.querySelectorAll('a[href*="/advice/"]').forEach(link => {
       const href = link.getAttribute('href');
       if (href && href.split('/').length >= 5) {
           const country = href.split('/').filter(x => x).pop();
           if (!['covid', 'index', 'search', 'about'].includes(country)) {
               countries.push({ country: country.replace(/-/g, ' '), url: href });
           }
       }
   });
   console.log(JSON.stringify(countries, null, 2));

3. Save the output and build the dataset from it before re-running."#;

/// Parser for the advisory index page.
pub struct ListingParser {
    anchor_selector: Selector,
    base_url: Url,
}

impl ListingParser {
    /// Create a parser resolving relative hrefs against `base_url`.
    pub fn new(base_url: &str) -> Result<Self> {
        let anchor_selector =
            Selector::parse("a[href]").map_err(|e| anyhow!("invalid anchor selector: {e}"))?;
        let base_url =
            Url::parse(base_url).map_err(|e| anyhow!("invalid base URL '{base_url}': {e}"))?;
        Ok(Self {
            anchor_selector,
            base_url,
        })
    }

    /// Extract deduplicated country links from the index page.
    pub fn parse_country_links(&self, html: &Html) -> Vec<CountryLink> {
        let mut seen = HashSet::new();
        let mut links = Vec::new();

        for anchor in html.select(&self.anchor_selector) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            if !Self::is_country_href(href) {
                continue;
            }
            let Some(url) = self.resolve_url(href) else {
                continue;
            };
            let Some(country) = display_name_from_href(href) else {
                continue;
            };

            let link = CountryLink { country, url };
            if seen.insert((link.country.clone(), link.url.clone())) {
                links.push(link);
            }
        }

        debug!("Discovered {} country links on index page", links.len());
        links
    }

    /// Keep an href only if it looks like a country advisory page: advice
    /// path segment, deep enough, and none of the excluded keywords.
    pub fn is_country_href(href: &str) -> bool {
        if !href.contains(ADVISORY_PATH_SEGMENT) {
            return false;
        }
        if href.matches('/').count() < MIN_PATH_SEPARATORS {
            return false;
        }
        let lowered = href.to_lowercase();
        !EXCLUDED_KEYWORDS.iter().any(|keyword| lowered.contains(keyword))
    }

    fn resolve_url(&self, href: &str) -> Option<String> {
        if href.starts_with("http") {
            Some(href.to_string())
        } else {
            self.base_url.join(href).ok().map(|url| url.to_string())
        }
    }
}

/// Derive the display name from the final path segment of an advisory href:
/// hyphens become spaces, each word gets a leading capital.
fn display_name_from_href(href: &str) -> Option<String> {
    let slug = href.trim_end_matches('/').rsplit('/').next()?;
    if slug.is_empty() {
        return None;
    }
    Some(title_case(&slug.replace('-', " ")))
}

fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
