//! SerpAPI search transport
//!
//! Queries Google through serpapi.com and maps the organic results onto
//! [`SearchHit`]. Fields the API omits deserialize as empty strings.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use paperscout_core::{PaperscoutError, Result, SearchConfig, SearchHit, SearchProvider};

/// SerpAPI client
pub struct SerpApiProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct SerpApiResponse {
    #[serde(default)]
    organic_results: Vec<OrganicResult>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    #[serde(default)]
    link: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    snippet: String,
}

impl SerpApiProvider {
    /// Create a client with an explicit key and timeout
    pub fn new(api_key: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            base_url: "https://serpapi.com".to_string(),
        }
    }

    /// Create from config
    pub fn from_config(config: &SearchConfig) -> Result<Self> {
        let api_key = config
            .serpapi_api_key
            .as_ref()
            .ok_or_else(|| PaperscoutError::Config("SerpAPI key required".to_string()))?;

        Ok(Self::new(api_key, config.timeout_secs))
    }

    /// Set custom base URL (for compatible proxies)
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

#[async_trait]
impl SearchProvider for SerpApiProvider {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        let response = self
            .client
            .get(format!("{}/search.json", self.base_url))
            .query(&[("q", query), ("engine", "google"), ("api_key", &self.api_key)])
            .send()
            .await
            .map_err(|e| PaperscoutError::Transport(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(PaperscoutError::Transport(format!(
                "SerpAPI error: {error_text}"
            )));
        }

        let result: SerpApiResponse = response
            .json()
            .await
            .map_err(|e| PaperscoutError::Transport(format!("Failed to parse response: {e}")))?;

        Ok(result
            .organic_results
            .into_iter()
            .map(|r| SearchHit {
                url: r.link,
                title: r.title,
                snippet: r.snippet,
                content: String::new(),
            })
            .collect())
    }

    fn name(&self) -> &str {
        "serpapi"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_requires_key() {
        let config = SearchConfig::default();
        assert!(SerpApiProvider::from_config(&config).is_err());
    }

    #[test]
    fn test_response_mapping_tolerates_missing_fields() {
        let json = r#"{"organic_results": [{"link": "https://example.com"}, {"title": "Acme"}]}"#;
        let parsed: SerpApiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.organic_results.len(), 2);
        assert_eq!(parsed.organic_results[0].link, "https://example.com");
        assert!(parsed.organic_results[1].snippet.is_empty());
    }

    #[test]
    fn test_response_mapping_tolerates_no_results() {
        let parsed: SerpApiResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.organic_results.is_empty());
    }
}
