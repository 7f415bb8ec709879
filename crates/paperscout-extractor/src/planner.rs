//! Query planning
//!
//! Builds the fixed set of search queries for an issuer. Queries embed the
//! issuer verbatim inside quoted substrings and bias results toward
//! regulatory filings, rating agencies, and financial news. The plan is
//! deterministic; an empty issuer produces an empty plan so callers can
//! short-circuit before touching the transport.

/// Build the ordered query plan for an issuer name
pub fn plan(issuer: &str) -> Vec<String> {
    let issuer = issuer.trim();
    if issuer.is_empty() {
        return Vec::new();
    }

    vec![
        format!("\"{issuer}\" ABCP \"liquidity provider\""),
        format!("\"{issuer}\" \"commercial paper conduit\" \"backup liquidity\""),
        format!("\"{issuer}\" \"program administrator\" sponsor \"commercial paper\""),
        format!("site:sec.gov \"{issuer}\" \"liquidity provider\""),
        format!(
            "site:moodys.com OR site:spglobal.com OR site:fitchratings.com \"{issuer}\" ABCP"
        ),
        format!("\"{issuer}\" asset-backed commercial paper \"liquidity facility\""),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_embeds_issuer_in_every_query() {
        let queries = plan("Acme Funding LLC");
        assert!(!queries.is_empty());
        for query in &queries {
            assert!(
                query.contains("Acme Funding LLC"),
                "query missing issuer: {query}"
            );
        }
    }

    #[test]
    fn test_plan_is_deterministic() {
        assert_eq!(plan("Acme Funding LLC"), plan("Acme Funding LLC"));
    }

    #[test]
    fn test_empty_issuer_yields_empty_plan() {
        assert!(plan("").is_empty());
        assert!(plan("   \t ").is_empty());
    }

    #[test]
    fn test_plan_trims_issuer() {
        let queries = plan("  Acme Funding LLC  ");
        assert!(queries[0].contains("\"Acme Funding LLC\""));
    }
}
