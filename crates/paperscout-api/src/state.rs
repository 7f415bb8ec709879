//! Application state management

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use paperscout_core::config::AppConfig;
use paperscout_core::{
    HistoryStore, InMemoryHistoryStore, JsonFileHistoryStore, Result, SearchProvider,
};
use paperscout_extractor::{EntityExtractor, ExtractorConfig, ResearchPipeline};
use paperscout_search::build_provider;

/// Application state shared across handlers
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,
    /// Server start time
    pub start_time: Instant,
    /// Request counter
    pub request_count: AtomicU64,
    /// Research pipeline over the configured search provider
    pub pipeline: ResearchPipeline,
    /// Extractor tuned for uploaded documents
    pub document_extractor: EntityExtractor,
    /// Search history store
    pub history: Arc<dyn HistoryStore>,
    /// Name of the active search provider
    pub provider_name: String,
}

impl AppState {
    /// Build state from configuration, constructing the search provider,
    /// pipeline, and history store
    pub fn from_config(config: AppConfig) -> Result<Self> {
        let provider: Arc<dyn SearchProvider> = build_provider(&config.search)?;
        Self::with_provider(config, provider)
    }

    /// Build state around an explicit provider
    pub fn with_provider(config: AppConfig, provider: Arc<dyn SearchProvider>) -> Result<Self> {
        let provider_name = provider.name().to_string();
        let pipeline = ResearchPipeline::new(provider, &config.pipeline);

        let history: Arc<dyn HistoryStore> = match &config.pipeline.history_path {
            Some(path) => Arc::new(JsonFileHistoryStore::new(
                path.clone(),
                config.pipeline.history_capacity,
            )),
            None => Arc::new(InMemoryHistoryStore::new(config.pipeline.history_capacity)),
        };

        Ok(Self {
            config,
            start_time: Instant::now(),
            request_count: AtomicU64::new(0),
            pipeline,
            document_extractor: EntityExtractor::new(ExtractorConfig::document_analysis()),
            history,
            provider_name,
        })
    }

    /// Increment request counter
    pub fn increment_requests(&self) -> u64 {
        self.request_count.fetch_add(1, Ordering::SeqCst)
    }

    /// Get total request count
    pub fn get_request_count(&self) -> u64 {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Get uptime in seconds
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
