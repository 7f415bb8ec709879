//! Paperscout Search - transport implementations
//!
//! Concrete [`SearchProvider`] and [`PageScraper`] implementations behind the
//! core traits:
//! - SerpAPI (Google results via serpapi.com)
//! - Brave Search API
//! - Firecrawl-compatible scraping and crawling
//! - In-process fixtures for tests and offline runs

pub mod brave;
pub mod firecrawl;
pub mod fixture;
pub mod serpapi;

pub use brave::BraveProvider;
pub use firecrawl::FirecrawlScraper;
pub use fixture::FixtureProvider;
pub use serpapi::SerpApiProvider;

use std::sync::Arc;

use paperscout_core::{Result, SearchBackendKind, SearchConfig, SearchProvider};

/// Build the configured search provider.
///
/// Fails with a configuration error when the selected backend is missing
/// its credential; the fixture backend needs none.
pub fn build_provider(config: &SearchConfig) -> Result<Arc<dyn SearchProvider>> {
    match config.backend {
        SearchBackendKind::SerpApi => Ok(Arc::new(SerpApiProvider::from_config(config)?)),
        SearchBackendKind::Brave => Ok(Arc::new(BraveProvider::from_config(config)?)),
        SearchBackendKind::Fixture => Ok(Arc::new(FixtureProvider::new())),
    }
}
