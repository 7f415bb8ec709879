//! Brave Search API transport

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use paperscout_core::{PaperscoutError, Result, SearchConfig, SearchHit, SearchProvider};

/// Brave Search API client
pub struct BraveProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct BraveResponse {
    #[serde(default)]
    web: BraveWeb,
}

#[derive(Debug, Deserialize, Default)]
struct BraveWeb {
    #[serde(default)]
    results: Vec<BraveResult>,
}

#[derive(Debug, Deserialize)]
struct BraveResult {
    #[serde(default)]
    url: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
}

impl BraveProvider {
    /// Create a client with an explicit subscription token and timeout
    pub fn new(api_key: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            base_url: "https://api.search.brave.com".to_string(),
        }
    }

    /// Create from config
    pub fn from_config(config: &SearchConfig) -> Result<Self> {
        let api_key = config
            .brave_api_key
            .as_ref()
            .ok_or_else(|| PaperscoutError::Config("Brave subscription token required".to_string()))?;

        Ok(Self::new(api_key, config.timeout_secs))
    }

    /// Set custom base URL
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

#[async_trait]
impl SearchProvider for BraveProvider {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        let response = self
            .client
            .get(format!("{}/res/v1/web/search", self.base_url))
            .query(&[("q", query)])
            .header("X-Subscription-Token", &self.api_key)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| PaperscoutError::Transport(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(PaperscoutError::Transport(format!(
                "Brave Search error: {error_text}"
            )));
        }

        let result: BraveResponse = response
            .json()
            .await
            .map_err(|e| PaperscoutError::Transport(format!("Failed to parse response: {e}")))?;

        Ok(result
            .web
            .results
            .into_iter()
            .map(|r| SearchHit {
                url: r.url,
                title: r.title,
                snippet: r.description,
                content: String::new(),
            })
            .collect())
    }

    fn name(&self) -> &str {
        "brave"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_requires_token() {
        let config = SearchConfig::default();
        assert!(BraveProvider::from_config(&config).is_err());
    }

    #[test]
    fn test_response_mapping() {
        let json = r#"{"web": {"results": [{"url": "https://example.com", "title": "Acme", "description": "ABCP conduit"}]}}"#;
        let parsed: BraveResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.web.results.len(), 1);
        assert_eq!(parsed.web.results[0].description, "ABCP conduit");
    }

    #[test]
    fn test_response_without_web_section() {
        let parsed: BraveResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.web.results.is_empty());
    }
}
