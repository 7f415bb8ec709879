//! Paperscout Extractor - ABCP research core
//!
//! Implements the three-stage research core:
//! - Query planning: issuer name -> deterministic search query plan
//! - Entity extraction: free text -> structured role record with confidence
//! - Aggregation: records from many queries -> deduplicated, ranked list
//!
//! The extraction heuristic is a fixed-vocabulary regex pass, not a general
//! NER system: it looks for role-indicating phrases (liquidity provider,
//! administrator, sponsor) near candidate organization names and scores each
//! record with additive confidence increments.

pub mod aggregate;
pub mod extract;
pub mod pipeline;
pub mod planner;

pub use aggregate::aggregate;
pub use extract::{clean_captured_text, EntityExtractor, ExtractorConfig};
pub use pipeline::ResearchPipeline;
pub use planner::plan;
