//! Result aggregation
//!
//! Collapses records gathered across many queries into one ranked list:
//! duplicates (same issuer, providers, administrator, sponsor) keep their
//! first occurrence, and the survivors sort by descending confidence. The
//! sort is stable, so equal-confidence records keep arrival order.

use std::cmp::Ordering;
use std::collections::HashSet;

use paperscout_core::ExtractionResult;

/// Deduplicate and rank extraction records
pub fn aggregate(results: Vec<ExtractionResult>) -> Vec<ExtractionResult> {
    let mut seen = HashSet::new();
    let mut unique: Vec<ExtractionResult> = results
        .into_iter()
        .filter(|r| seen.insert(r.identity_key()))
        .collect();

    unique.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(Ordering::Equal)
    });

    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(provider: &str, confidence: f64, source: &str) -> ExtractionResult {
        let mut r = ExtractionResult::new("Acme Funding LLC");
        r.liquidity_providers.push(provider.to_string());
        r.confidence = confidence;
        r.source = source.to_string();
        r
    }

    #[test]
    fn test_duplicates_keep_first_occurrence() {
        let results = vec![
            record("Alpha Bank", 0.5, "https://a.example/1"),
            record("Alpha Bank", 0.8, "https://a.example/2"),
        ];

        let aggregated = aggregate(results);
        assert_eq!(aggregated.len(), 1);
        assert_eq!(aggregated[0].source, "https://a.example/1");
        assert!((aggregated[0].confidence - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_sorted_by_descending_confidence() {
        let results = vec![
            record("Alpha Bank", 0.3, "s1"),
            record("Beta Bank", 0.9, "s2"),
            record("Gamma Bank", 0.6, "s3"),
        ];

        let aggregated = aggregate(results);
        let confidences: Vec<f64> = aggregated.iter().map(|r| r.confidence).collect();
        assert_eq!(confidences, vec![0.9, 0.6, 0.3]);
    }

    #[test]
    fn test_equal_confidence_preserves_arrival_order() {
        let results = vec![
            record("Alpha Bank", 0.5, "s1"),
            record("Beta Bank", 0.5, "s2"),
            record("Gamma Bank", 0.5, "s3"),
        ];

        let aggregated = aggregate(results);
        let sources: Vec<&str> = aggregated.iter().map(|r| r.source.as_str()).collect();
        assert_eq!(sources, vec!["s1", "s2", "s3"]);
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let results = vec![
            record("Alpha Bank", 0.3, "s1"),
            record("Beta Bank", 0.9, "s2"),
            record("Alpha Bank", 0.4, "s3"),
        ];

        let once = aggregate(results);
        let twice = aggregate(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate(Vec::new()).is_empty());
    }
}
