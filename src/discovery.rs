//! Nearby restaurant discovery
//!
//! An alternate data source behind "search nearby". The default lists a fixed
//! set of nearby restaurants; [`ScrapeDiscovery`] pulls names off a listing page.

use std::time::Duration;

use async_trait::async_trait;
use scraper::{Html, Selector};
use url::Url;

use crate::{Error, Result};

/// Most names returned by a discovery call
pub const MAX_RESULTS: usize = 5;

/// Default CSS selector for restaurant names on a listing page
pub const DEFAULT_SELECTOR: &str = r#"a[data-result-type="ResCard_Name"]"#;

/// Finds restaurants near the user
#[async_trait]
pub trait RestaurantDiscovery: Send + Sync {
    /// Up to [`MAX_RESULTS`] restaurant names, optionally narrowed by `search`
    ///
    /// # Errors
    ///
    /// Returns error if the source cannot be reached or parsed
    async fn discover(&self, search: Option<&str>) -> Result<Vec<String>>;
}

/// Fixed list of nearby restaurants
#[derive(Debug, Clone)]
pub struct StaticNearby {
    restaurants: Vec<String>,
}

impl Default for StaticNearby {
    fn default() -> Self {
        Self {
            restaurants: vec![
                "Empire (Indian)".to_string(),
                "Mainland China (Chinese)".to_string(),
                "McDonald's (Fast Food)".to_string(),
            ],
        }
    }
}

impl StaticNearby {
    /// Use a custom list
    #[must_use]
    pub const fn new(restaurants: Vec<String>) -> Self {
        Self { restaurants }
    }
}

#[async_trait]
impl RestaurantDiscovery for StaticNearby {
    async fn discover(&self, search: Option<&str>) -> Result<Vec<String>> {
        let names = self
            .restaurants
            .iter()
            .filter(|name| search.is_none_or(|s| name.to_lowercase().contains(&s.to_lowercase())))
            .take(MAX_RESULTS)
            .cloned()
            .collect();
        Ok(names)
    }
}

/// Scrapes restaurant names from a listing page
pub struct ScrapeDiscovery {
    client: reqwest::Client,
    base_url: Url,
    selector: String,
}

impl ScrapeDiscovery {
    /// Create a scraper for a listing page
    ///
    /// # Errors
    ///
    /// Returns error if the URL or selector is invalid, or the HTTP client
    /// cannot be built
    pub fn new(base_url: &str, selector: &str) -> Result<Self> {
        let base_url =
            Url::parse(base_url).map_err(|e| Error::Discovery(format!("invalid URL: {e}")))?;

        Selector::parse(selector)
            .map_err(|e| Error::Discovery(format!("invalid selector {selector}: {e:?}")))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(20))
            .user_agent("Dinebell/0.1")
            .build()?;

        Ok(Self {
            client,
            base_url,
            selector: selector.to_string(),
        })
    }

    fn listing_url(&self, search: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        if let Some(search) = search.filter(|s| !s.trim().is_empty()) {
            url.query_pairs_mut().append_pair("q", search.trim());
        }
        url
    }
}

impl std::fmt::Debug for ScrapeDiscovery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrapeDiscovery")
            .field("base_url", &self.base_url.as_str())
            .field("selector", &self.selector)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl RestaurantDiscovery for ScrapeDiscovery {
    async fn discover(&self, search: Option<&str>) -> Result<Vec<String>> {
        let url = self.listing_url(search);
        tracing::debug!(url = %url, "fetching restaurant listing");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| Error::Discovery(format!("failed to fetch {url}: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::Discovery(format!("HTTP error: {}", response.status())));
        }

        let html = response
            .text()
            .await
            .map_err(|e| Error::Discovery(format!("failed to read response: {e}")))?;

        let names = parse_names(&html, &self.selector)?;
        tracing::info!(count = names.len(), "restaurants discovered");
        Ok(names)
    }
}

/// Pull the first [`MAX_RESULTS`] non-empty element texts matching `selector`
///
/// # Errors
///
/// Returns error if the selector is invalid
pub fn parse_names(html: &str, selector: &str) -> Result<Vec<String>> {
    let selector = Selector::parse(selector)
        .map_err(|e| Error::Discovery(format!("invalid selector: {e:?}")))?;
    let document = Html::parse_document(html);

    let names = document
        .select(&selector)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|name| !name.is_empty())
        .take(MAX_RESULTS)
        .collect();

    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        let html = r#"
            <html><body>
              <a data-result-type="ResCard_Name" href="/a"> Empire </a>
              <a data-result-type="ResCard_Name" href="/b"></a>
              <a data-result-type="Other" href="/c">Not a restaurant</a>
              <a data-result-type="ResCard_Name" href="/d">Meghana <b>Foods</b></a>
            </body></html>
        "#;

        let names = parse_names(html, DEFAULT_SELECTOR).unwrap();
        assert_eq!(names, ["Empire", "Meghana Foods"]);
    }

    #[test]
    fn test_parse_names_caps_results() {
        let html: String = (0..8)
            .map(|i| format!(r#"<a data-result-type="ResCard_Name">Place {i}</a>"#))
            .collect();

        let names = parse_names(&html, DEFAULT_SELECTOR).unwrap();
        assert_eq!(names.len(), MAX_RESULTS);
        assert_eq!(names[0], "Place 0");
    }

    #[test]
    fn test_invalid_selector() {
        assert!(ScrapeDiscovery::new("https://example.com", "a[[").is_err());
        assert!(ScrapeDiscovery::new("not a url", DEFAULT_SELECTOR).is_err());
    }

    #[test]
    fn test_listing_url() {
        let discovery = ScrapeDiscovery::new("https://example.com/list", DEFAULT_SELECTOR).unwrap();
        assert_eq!(discovery.listing_url(None).as_str(), "https://example.com/list");
        assert_eq!(
            discovery.listing_url(Some("biryani")).as_str(),
            "https://example.com/list?q=biryani"
        );
    }

    #[tokio::test]
    async fn test_static_nearby() {
        let nearby = StaticNearby::default();
        let all = nearby.discover(None).await.unwrap();
        assert_eq!(all.len(), 3);

        let filtered = nearby.discover(Some("china")).await.unwrap();
        assert_eq!(filtered, ["Mainland China (Chinese)"]);
    }
}
