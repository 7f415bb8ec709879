//! Fixture transport
//!
//! Returns canned results for every query and page. Used by tests and by
//! offline runs where no search credential is configured, so the whole
//! pipeline stays exercisable without network access.

use async_trait::async_trait;

use paperscout_core::{PageScraper, Result, ScrapedPage, SearchHit, SearchProvider};

/// Canned search provider and scraper
pub struct FixtureProvider {
    hits: Vec<SearchHit>,
    pages: Vec<ScrapedPage>,
}

impl FixtureProvider {
    /// Create a provider with a representative canned result set
    pub fn new() -> Self {
        Self {
            hits: vec![
                SearchHit {
                    url: "https://filings.example.com/abcp-program".to_string(),
                    title: "Asset-Backed Commercial Paper Program Overview".to_string(),
                    snippet: "Liquidity Provider: Global Trust Bank, N.A. \
                              Administrator: Fiduciary Services Corp"
                        .to_string(),
                    content: String::new(),
                },
                SearchHit {
                    url: "https://ratings.example.com/conduit-report".to_string(),
                    title: "ABCP Conduit Rating Report".to_string(),
                    snippet: "The program is sponsored by Example Holdings Inc \
                              with backup liquidity from Global Trust Bank"
                        .to_string(),
                    content: String::new(),
                },
            ],
            pages: vec![ScrapedPage {
                url: "https://filings.example.com/abcp-program".to_string(),
                content: "Commercial paper notes. Liquidity Provider: Global Trust Bank, N.A."
                    .to_string(),
            }],
        }
    }

    /// Create a provider that returns the given hits for every query
    pub fn with_hits(hits: Vec<SearchHit>) -> Self {
        Self {
            hits,
            pages: Vec::new(),
        }
    }

    /// Create a provider that returns nothing
    pub fn empty() -> Self {
        Self {
            hits: Vec::new(),
            pages: Vec::new(),
        }
    }
}

impl Default for FixtureProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchProvider for FixtureProvider {
    async fn search(&self, _query: &str) -> Result<Vec<SearchHit>> {
        Ok(self.hits.clone())
    }

    fn name(&self) -> &str {
        "fixture"
    }
}

#[async_trait]
impl PageScraper for FixtureProvider {
    async fn scrape(&self, url: &str) -> Result<ScrapedPage> {
        Ok(self
            .pages
            .iter()
            .find(|p| p.url == url)
            .cloned()
            .unwrap_or_else(|| ScrapedPage {
                url: url.to_string(),
                content: String::new(),
            }))
    }

    async fn crawl(&self, _url: &str) -> Result<Vec<ScrapedPage>> {
        Ok(self.pages.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_same_hits_for_every_query() {
        let provider = FixtureProvider::new();
        let a = provider.search("query one").await.unwrap();
        let b = provider.search("query two").await.unwrap();
        assert_eq!(a.len(), b.len());
        assert!(!a.is_empty());
    }

    #[tokio::test]
    async fn test_empty_provider() {
        let provider = FixtureProvider::empty();
        assert!(provider.search("anything").await.unwrap().is_empty());
        assert!(provider.crawl("https://example.com").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_scrape_unknown_url_returns_blank_page() {
        let provider = FixtureProvider::empty();
        let page = provider.scrape("https://unknown.example").await.unwrap();
        assert_eq!(page.url, "https://unknown.example");
        assert!(page.content.is_empty());
    }
}
