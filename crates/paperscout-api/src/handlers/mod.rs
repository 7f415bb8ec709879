//! API handlers

pub mod documents;
pub mod health;
pub mod history;
pub mod research;

use serde::Serialize;
use utoipa::ToSchema;

use paperscout_core::{ExtractionResult, SearchHistoryEntry};

/// One extraction record as returned by the API
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ExtractionRecord {
    /// Issuer the record belongs to
    pub issuer: String,
    /// Liquidity providers, in order of first match
    pub liquidity_providers: Vec<String>,
    /// Program administrator
    pub administrator: Option<String>,
    /// Program sponsor
    pub sponsor: Option<String>,
    /// Heuristic confidence in [0.0, 1.0]
    pub confidence: f64,
    /// Source URL or document label
    pub source: String,
}

impl From<ExtractionResult> for ExtractionRecord {
    fn from(r: ExtractionResult) -> Self {
        Self {
            issuer: r.issuer,
            liquidity_providers: r.liquidity_providers,
            administrator: r.administrator,
            sponsor: r.sponsor,
            confidence: r.confidence,
            source: r.source,
        }
    }
}

/// One recorded research run
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HistoryEntry {
    /// Entry identifier
    pub id: String,
    /// Issuer that was searched
    pub issuer: String,
    /// Completion time, RFC 3339
    pub timestamp: String,
    /// Ranked results from that run
    pub results: Vec<ExtractionRecord>,
}

impl From<SearchHistoryEntry> for HistoryEntry {
    fn from(e: SearchHistoryEntry) -> Self {
        Self {
            id: e.id.to_string(),
            issuer: e.issuer,
            timestamp: e.timestamp.to_rfc3339(),
            results: e.results.into_iter().map(ExtractionRecord::from).collect(),
        }
    }
}
