//! Research pipeline
//!
//! Drives one full research run: plan the queries, execute them against the
//! injected search transport with a rate-limit delay between calls, extract
//! a record from every hit, then aggregate and cap the ranked list.
//!
//! Transport failures on individual queries are logged and skipped; the run
//! only fails outright when the issuer is blank or no query produced any
//! extractable record.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use paperscout_core::{ExtractionResult, PaperscoutError, PipelineConfig, Result, SearchProvider};

use crate::aggregate::aggregate;
use crate::extract::{EntityExtractor, ExtractorConfig};
use crate::planner::plan;

/// End-to-end issuer research pipeline
pub struct ResearchPipeline {
    provider: Arc<dyn SearchProvider>,
    extractor: EntityExtractor,
    query_delay: Duration,
    max_results: usize,
}

impl ResearchPipeline {
    /// Create a pipeline over the given transport
    pub fn new(provider: Arc<dyn SearchProvider>, config: &PipelineConfig) -> Self {
        Self {
            provider,
            extractor: EntityExtractor::new(ExtractorConfig::default()),
            query_delay: Duration::from_millis(config.query_delay_ms),
            max_results: config.max_results,
        }
    }

    /// Replace the extractor configuration
    pub fn with_extractor(mut self, extractor: EntityExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Run the full research pipeline for one issuer.
    ///
    /// Returns the ranked, deduplicated records, capped at the configured
    /// maximum. Individual query failures are skipped; an entirely empty
    /// outcome is reported as [`PaperscoutError::NoResults`].
    pub async fn run(&self, issuer: &str) -> Result<Vec<ExtractionResult>> {
        let issuer = issuer.trim();
        if issuer.is_empty() {
            return Err(PaperscoutError::Validation(
                "issuer name must not be empty".to_string(),
            ));
        }

        let queries = plan(issuer);
        info!(
            issuer,
            provider = self.provider.name(),
            queries = queries.len(),
            "starting research run"
        );

        let mut records = Vec::new();
        for (i, query) in queries.iter().enumerate() {
            if i > 0 && !self.query_delay.is_zero() {
                tokio::time::sleep(self.query_delay).await;
            }

            let hits = match self.provider.search(query).await {
                Ok(hits) => hits,
                Err(e) => {
                    warn!(query, error = %e, "query failed, skipping");
                    continue;
                }
            };

            debug!(query, hits = hits.len(), "query complete");
            for hit in hits {
                if let Some(mut record) = self.extractor.extract(&hit.combined_text(), issuer) {
                    record.source = hit.url;
                    records.push(record);
                }
            }
        }

        let mut ranked = aggregate(records);
        if ranked.is_empty() {
            return Err(PaperscoutError::NoResults {
                issuer: issuer.to_string(),
            });
        }

        ranked.truncate(self.max_results);
        info!(issuer, results = ranked.len(), "research run complete");
        Ok(ranked)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use paperscout_core::SearchHit;
    use paperscout_search::FixtureProvider;

    struct FailingProvider;

    #[async_trait::async_trait]
    impl SearchProvider for FailingProvider {
        async fn search(&self, _query: &str) -> Result<Vec<SearchHit>> {
            Err(PaperscoutError::Transport("connection refused".to_string()))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    fn fast_config() -> PipelineConfig {
        PipelineConfig {
            query_delay_ms: 0,
            ..PipelineConfig::default()
        }
    }

    fn hit(url: &str, content: &str) -> SearchHit {
        SearchHit {
            url: url.to_string(),
            title: String::new(),
            snippet: String::new(),
            content: content.to_string(),
        }
    }

    #[tokio::test]
    async fn test_blank_issuer_is_rejected() {
        let provider = Arc::new(FixtureProvider::empty());
        let pipeline = ResearchPipeline::new(provider, &fast_config());

        let err = pipeline.run("   ").await.unwrap_err();
        assert!(matches!(err, PaperscoutError::Validation(_)));
    }

    #[tokio::test]
    async fn test_run_extracts_and_attaches_source() {
        let provider = Arc::new(FixtureProvider::with_hits(vec![hit(
            "https://filings.example/10k",
            "Acme Funding LLC commercial paper. Liquidity Provider: Big Bank Corp",
        )]));
        let pipeline = ResearchPipeline::new(provider, &fast_config());

        let results = pipeline.run("Acme Funding LLC").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].source, "https://filings.example/10k");
        assert_eq!(
            results[0].liquidity_providers,
            vec!["Big Bank Corp".to_string()]
        );
    }

    #[tokio::test]
    async fn test_duplicate_hits_collapse_across_queries() {
        // Every planned query returns the same hit; one record must survive.
        let provider = Arc::new(FixtureProvider::with_hits(vec![hit(
            "https://filings.example/10k",
            "ABCP program. Liquidity Provider: Big Bank Corp",
        )]));
        let pipeline = ResearchPipeline::new(provider, &fast_config());

        let results = pipeline.run("Acme Funding LLC").await.unwrap();
        assert_eq!(results.len(), 1);
    }

    #[tokio::test]
    async fn test_transport_failures_become_no_results() {
        let pipeline = ResearchPipeline::new(Arc::new(FailingProvider), &fast_config());

        let err = pipeline.run("Acme Funding LLC").await.unwrap_err();
        assert!(matches!(err, PaperscoutError::NoResults { .. }));
    }

    #[tokio::test]
    async fn test_irrelevant_hits_become_no_results() {
        let provider = Arc::new(FixtureProvider::with_hits(vec![hit(
            "https://news.example/sports",
            "Local team wins the championship after extra time.",
        )]));
        let pipeline = ResearchPipeline::new(provider, &fast_config());

        let err = pipeline.run("Acme Funding LLC").await.unwrap_err();
        assert!(matches!(err, PaperscoutError::NoResults { .. }));
    }

    #[tokio::test]
    async fn test_results_capped_at_max() {
        let hits: Vec<SearchHit> = (0..6)
            .map(|i| {
                hit(
                    &format!("https://filings.example/{i}"),
                    &format!("ABCP program. Liquidity Provider: Bank Number{i} Corp"),
                )
            })
            .collect();

        let config = PipelineConfig {
            query_delay_ms: 0,
            max_results: 2,
            ..PipelineConfig::default()
        };
        let pipeline = ResearchPipeline::new(Arc::new(FixtureProvider::with_hits(hits)), &config);

        let results = pipeline.run("Acme Funding LLC").await.unwrap();
        assert_eq!(results.len(), 2);
    }
}
