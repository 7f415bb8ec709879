//! Paperscout Core - Domain models, traits, and shared types
//!
//! This crate defines the core abstractions used throughout paperscout:
//! - Extraction records (issuer, liquidity providers, administrator, sponsor)
//! - Search transport types and traits
//! - Common error types
//! - Configuration management
//! - Bounded search history storage

pub mod config;
pub mod history;

pub use config::{
    AppConfig, ConfigError, LoggingConfig, PipelineConfig, SearchBackendKind, SearchConfig,
    ServerConfig,
};
pub use history::{HistoryStore, InMemoryHistoryStore, JsonFileHistoryStore};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for paperscout operations
#[derive(Error, Debug)]
pub enum PaperscoutError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Parser error: {0}")]
    Parser(String),

    #[error("No results found for issuer: {issuer}")]
    NoResults { issuer: String },

    #[error("History store error: {0}")]
    History(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, PaperscoutError>;

// ============================================================================
// Extraction Records
// ============================================================================

/// Structured record extracted from one block of text.
///
/// Produced by the entity extractor, consumed by the aggregator. A record is
/// only ever created when at least one of the three role fields is populated;
/// empty records are represented by absence, never constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Issuer/conduit name as supplied by the caller, carried through unchanged
    pub issuer: String,

    /// Liquidity providers, unique, in order of first match
    pub liquidity_providers: Vec<String>,

    /// Program administrator, first match wins
    pub administrator: Option<String>,

    /// Program sponsor, first match wins
    pub sponsor: Option<String>,

    /// Heuristic confidence score, clamped to [0.0, 1.0]
    pub confidence: f64,

    /// Provenance (URL or label), attached by the caller after extraction
    pub source: String,
}

impl ExtractionResult {
    /// Create an empty record for the given issuer
    pub fn new(issuer: impl Into<String>) -> Self {
        Self {
            issuer: issuer.into(),
            liquidity_providers: Vec::new(),
            administrator: None,
            sponsor: None,
            confidence: 0.0,
            source: String::new(),
        }
    }

    /// Attach a provenance label
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// True when no role field is populated
    pub fn is_empty(&self) -> bool {
        self.liquidity_providers.is_empty()
            && self.administrator.is_none()
            && self.sponsor.is_none()
    }

    /// Identity key for deduplication across queries.
    ///
    /// Two records with the same issuer, provider list, administrator, and
    /// sponsor are duplicates regardless of source or confidence.
    pub fn identity_key(&self) -> String {
        format!(
            "{}|{}|{}|{}",
            self.issuer,
            self.liquidity_providers.join("|"),
            self.administrator.as_deref().unwrap_or(""),
            self.sponsor.as_deref().unwrap_or("")
        )
    }
}

// ============================================================================
// Search Transport Types
// ============================================================================

/// One result returned by a search provider
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchHit {
    /// Result URL
    pub url: String,

    /// Result title
    pub title: String,

    /// Short snippet shown by the search engine
    pub snippet: String,

    /// Full page content, when the provider returns it
    pub content: String,
}

impl SearchHit {
    /// Combined text block fed to the extractor
    pub fn combined_text(&self) -> String {
        let mut text = String::with_capacity(
            self.title.len() + self.snippet.len() + self.content.len() + 2,
        );
        text.push_str(&self.title);
        text.push('\n');
        text.push_str(&self.snippet);
        text.push('\n');
        text.push_str(&self.content);
        text
    }
}

/// Content of a single scraped page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapedPage {
    /// Page URL
    pub url: String,

    /// Extracted text content
    pub content: String,
}

// ============================================================================
// Search History
// ============================================================================

/// One completed research run, recorded for later display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHistoryEntry {
    /// Unique identifier
    pub id: Uuid,

    /// Issuer that was searched
    pub issuer: String,

    /// When the search completed
    pub timestamp: DateTime<Utc>,

    /// Ranked results from that run
    pub results: Vec<ExtractionResult>,
}

impl SearchHistoryEntry {
    /// Create a new entry timestamped now
    pub fn new(issuer: impl Into<String>, results: Vec<ExtractionResult>) -> Self {
        Self {
            id: Uuid::new_v4(),
            issuer: issuer.into(),
            timestamp: Utc::now(),
            results,
        }
    }
}

// ============================================================================
// Traits
// ============================================================================

/// Trait for search transports (SerpAPI, Brave, fixtures)
#[async_trait::async_trait]
pub trait SearchProvider: Send + Sync {
    /// Run one query and return its hits
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>>;

    /// Get provider name for logging
    fn name(&self) -> &str;
}

/// Trait for single-page and crawl-style scrapers
#[async_trait::async_trait]
pub trait PageScraper: Send + Sync {
    /// Fetch and extract the text content of one page
    async fn scrape(&self, url: &str) -> Result<ScrapedPage>;

    /// Crawl starting from a URL, returning every fetched page
    async fn crawl(&self, url: &str) -> Result<Vec<ScrapedPage>>;
}

// ============================================================================
// Tests
// ============================================================================
