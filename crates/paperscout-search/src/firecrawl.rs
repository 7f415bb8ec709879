//! Firecrawl-compatible scraping transport
//!
//! Single-page scrapes are synchronous; crawls are submitted as jobs and
//! polled until the service reports completion. Works against the hosted
//! API or a self-hosted instance via the configured base URL.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use paperscout_core::{PageScraper, PaperscoutError, Result, ScrapedPage, SearchConfig};

/// Poll interval for crawl jobs
const CRAWL_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Maximum poll attempts before a crawl is abandoned
const CRAWL_MAX_POLLS: usize = 60;

/// Firecrawl API client
pub struct FirecrawlScraper {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct ScrapeRequest<'a> {
    url: &'a str,
    formats: Vec<&'a str>,
}

#[derive(Debug, Deserialize)]
struct ScrapeResponse {
    #[serde(default)]
    data: ScrapeData,
}

#[derive(Debug, Deserialize, Default)]
struct ScrapeData {
    #[serde(default)]
    markdown: String,
    #[serde(default)]
    metadata: PageMetadata,
}

#[derive(Debug, Deserialize, Default)]
struct PageMetadata {
    #[serde(rename = "sourceURL", default)]
    source_url: String,
}

#[derive(Debug, Serialize)]
struct CrawlRequest<'a> {
    url: &'a str,
}

#[derive(Debug, Deserialize)]
struct CrawlSubmitResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct CrawlStatusResponse {
    status: String,
    #[serde(default)]
    data: Vec<ScrapeData>,
}

impl FirecrawlScraper {
    /// Create a client with an explicit key, base URL, and timeout
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout_secs: u64,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    /// Create from config
    pub fn from_config(config: &SearchConfig) -> Result<Self> {
        let api_key = config
            .firecrawl_api_key
            .as_ref()
            .ok_or_else(|| PaperscoutError::Config("Firecrawl API key required".to_string()))?;

        Ok(Self::new(
            api_key,
            config.firecrawl_url.clone(),
            config.timeout_secs,
        ))
    }

    async fn poll_crawl(&self, job_id: &str) -> Result<Vec<ScrapeData>> {
        for _ in 0..CRAWL_MAX_POLLS {
            tokio::time::sleep(CRAWL_POLL_INTERVAL).await;

            let response = self
                .client
                .get(format!("{}/v1/crawl/{job_id}", self.base_url))
                .header("Authorization", format!("Bearer {}", self.api_key))
                .send()
                .await
                .map_err(|e| PaperscoutError::Transport(format!("Request failed: {e}")))?;

            if !response.status().is_success() {
                let error_text = response.text().await.unwrap_or_default();
                return Err(PaperscoutError::Transport(format!(
                    "Firecrawl error: {error_text}"
                )));
            }

            let status: CrawlStatusResponse = response
                .json()
                .await
                .map_err(|e| PaperscoutError::Transport(format!("Failed to parse response: {e}")))?;

            match status.status.as_str() {
                "completed" => return Ok(status.data),
                "failed" => {
                    return Err(PaperscoutError::Transport(format!(
                        "Crawl job {job_id} failed"
                    )))
                }
                _ => continue,
            }
        }

        Err(PaperscoutError::Transport(format!(
            "Crawl job {job_id} did not complete in time"
        )))
    }
}

#[async_trait]
impl PageScraper for FirecrawlScraper {
    async fn scrape(&self, url: &str) -> Result<ScrapedPage> {
        let request = ScrapeRequest {
            url,
            formats: vec!["markdown"],
        };

        let response = self
            .client
            .post(format!("{}/v1/scrape", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| PaperscoutError::Transport(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(PaperscoutError::Transport(format!(
                "Firecrawl error: {error_text}"
            )));
        }

        let result: ScrapeResponse = response
            .json()
            .await
            .map_err(|e| PaperscoutError::Transport(format!("Failed to parse response: {e}")))?;

        Ok(ScrapedPage {
            url: url.to_string(),
            content: result.data.markdown,
        })
    }

    async fn crawl(&self, url: &str) -> Result<Vec<ScrapedPage>> {
        let request = CrawlRequest { url };

        let response = self
            .client
            .post(format!("{}/v1/crawl", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| PaperscoutError::Transport(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(PaperscoutError::Transport(format!(
                "Firecrawl error: {error_text}"
            )));
        }

        let submitted: CrawlSubmitResponse = response
            .json()
            .await
            .map_err(|e| PaperscoutError::Transport(format!("Failed to parse response: {e}")))?;

        let pages = self.poll_crawl(&submitted.id).await?;
        Ok(pages
            .into_iter()
            .map(|d| ScrapedPage {
                url: d.metadata.source_url,
                content: d.markdown,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_requires_key() {
        let config = SearchConfig::default();
        assert!(FirecrawlScraper::from_config(&config).is_err());
    }

    #[test]
    fn test_scrape_response_parsing() {
        let json = r##"{"success": true, "data": {"markdown": "# Acme", "metadata": {"sourceURL": "https://example.com"}}}"##;
        let parsed: ScrapeResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.data.markdown, "# Acme");
        assert_eq!(parsed.data.metadata.source_url, "https://example.com");
    }

    #[test]
    fn test_crawl_status_parsing() {
        let json = r#"{"status": "scraping"}"#;
        let parsed: CrawlStatusResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.status, "scraping");
        assert!(parsed.data.is_empty());
    }

    #[tokio::test]
    async fn test_scrape_through_trait_maps_transport_error() {
        // Nothing listens on port 1; the refused connection must surface
        // as a transport error through the trait object.
        let scraper: Box<dyn PageScraper> =
            Box::new(FirecrawlScraper::new("test-key", "http://127.0.0.1:1", 1));

        let err = scraper.scrape("https://example.com").await.unwrap_err();
        assert!(matches!(err, PaperscoutError::Transport(_)));
    }
}
