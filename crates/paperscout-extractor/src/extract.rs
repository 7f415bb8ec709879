//! Entity extraction
//!
//! Scans one block of free text (search snippet, scraped page, or document
//! text) for role-indicating phrases and captures the organization names
//! that follow them. Role keywords, confidence increments, and the issuer
//! relevance bonus are all data on [`ExtractorConfig`], so the web-search
//! and document-analysis variants share one implementation.
//!
//! The extractor never fails: malformed or unrelated text yields `None`.

use regex::Regex;

use paperscout_core::ExtractionResult;

/// Punctuation stripped from every captured substring
const STRIP_CHARS: &[char] = &[
    ',', '.', ';', ':', '!', '?', '(', ')', '[', ']', '{', '}',
];

/// Maximum words retained in a cleaned capture
const MAX_CAPTURE_WORDS: usize = 8;

/// Clean a captured substring before acceptance.
///
/// Strips punctuation, collapses whitespace runs, trims, and truncates to
/// the first eight words. An empty result means "no match".
pub fn clean_captured_text(raw: &str) -> String {
    let stripped: String = raw.chars().filter(|c| !STRIP_CHARS.contains(c)).collect();
    stripped
        .split_whitespace()
        .take(MAX_CAPTURE_WORDS)
        .collect::<Vec<_>>()
        .join(" ")
}

// ============================================================================
// Configuration
// ============================================================================

/// Data-driven extractor configuration.
///
/// Keyword lists are ordered; pattern order is the tie-break for the
/// first-match-wins administrator and sponsor fields.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Role keywords whose captures accumulate into the provider list
    pub provider_keywords: Vec<String>,

    /// Role keywords for the administrator field (first match wins)
    pub administrator_keywords: Vec<String>,

    /// Role keywords for the sponsor field (first match wins)
    pub sponsor_keywords: Vec<String>,

    /// Bank names matched directly as liquidity providers
    pub bank_names: Vec<String>,

    /// Confidence added per distinct new provider
    pub provider_increment: f64,

    /// Confidence added when the administrator is first set
    pub administrator_increment: f64,

    /// Confidence added when the sponsor is first set
    pub sponsor_increment: f64,

    /// Flat confidence bonus when the text mentions the issuer
    pub relevance_bonus: f64,
}

impl Default for ExtractorConfig {
    /// Reference configuration for web-search snippets
    fn default() -> Self {
        Self {
            provider_keywords: strings(&[
                "liquidity provider",
                "liquidity providers",
                "liquidity facility",
                "liquidity facilities",
                "backup liquidity",
                "committed liquidity",
                "standby liquidity",
            ]),
            administrator_keywords: strings(&[
                "administrator",
                "program administrator",
                "administrative agent",
                "trustee",
            ]),
            sponsor_keywords: strings(&[
                "sponsor",
                "program sponsor",
                "sponsored by",
                "originator",
            ]),
            bank_names: Vec::new(),
            provider_increment: 0.3,
            administrator_increment: 0.2,
            sponsor_increment: 0.2,
            relevance_bonus: 0.3,
        }
    }
}

impl ExtractorConfig {
    /// Preset for uploaded-document analysis: same patterns, larger issuer
    /// relevance bonus (whole documents mention the issuer more reliably
    /// than snippets do)
    pub fn document_analysis() -> Self {
        Self {
            relevance_bonus: 0.4,
            ..Self::default()
        }
    }

    /// Extended preset: adds general credit-facility keywords and direct
    /// bank-name matching for major global, Canadian, and investment banks
    pub fn extended() -> Self {
        let mut config = Self::default();
        config.provider_keywords.extend(strings(&[
            "credit facility",
            "credit facilities",
            "revolving facility",
        ]));
        config.bank_names = strings(&[
            "JPMorgan Chase",
            "Bank of America",
            "Citibank",
            "Wells Fargo",
            "Goldman Sachs",
            "Morgan Stanley",
            "Royal Bank of Canada",
            "Toronto-Dominion Bank",
            "Bank of Montreal",
            "Scotiabank",
            "National Bank of Canada",
            "CIBC",
            "Barclays",
            "Deutsche Bank",
            "BNP Paribas",
            "Societe Generale",
            "Credit Agricole",
            "HSBC",
            "UBS",
            "Mizuho",
            "MUFG",
            "Sumitomo Mitsui",
        ]);
        config
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ============================================================================
// Extractor
// ============================================================================

/// Regex-based role extractor for ABCP program text
pub struct EntityExtractor {
    config: ExtractorConfig,
    provider_patterns: Vec<Regex>,
    administrator_patterns: Vec<Regex>,
    sponsor_patterns: Vec<Regex>,
    bank_patterns: Vec<Regex>,
}

impl EntityExtractor {
    /// Compile patterns for the given configuration
    pub fn new(config: ExtractorConfig) -> Self {
        let provider_patterns = role_patterns(&config.provider_keywords);
        let administrator_patterns = role_patterns(&config.administrator_keywords);
        let sponsor_patterns = role_patterns(&config.sponsor_keywords);
        let bank_patterns = bank_patterns(&config.bank_names);

        Self {
            config,
            provider_patterns,
            administrator_patterns,
            sponsor_patterns,
            bank_patterns,
        }
    }

    /// Extract a structured record from one text block.
    ///
    /// Returns `None` when the block is unrelated to the issuer or yields
    /// no role matches at all. Captured substrings keep the original case;
    /// only keyword tests use the lower-cased copy.
    pub fn extract(&self, text: &str, issuer: &str) -> Option<ExtractionResult> {
        let lower = text.to_lowercase();
        let issuer_lower = issuer.trim().to_lowercase();

        let mentions_issuer = !issuer_lower.is_empty() && lower.contains(&issuer_lower);

        // Relevance gate: skip blocks with no connection to the domain.
        if !mentions_issuer && !lower.contains("abcp") && !lower.contains("commercial paper") {
            return None;
        }

        let mut result = ExtractionResult::new(issuer);
        let mut confidence = 0.0f64;

        // Liquidity providers accumulate every distinct hit: a program may
        // legitimately have several providers.
        for pattern in &self.provider_patterns {
            for caps in pattern.captures_iter(text) {
                let Some(m) = caps.get(1) else { continue };
                let cleaned = clean_captured_text(m.as_str());
                if cleaned.is_empty() || result.liquidity_providers.contains(&cleaned) {
                    continue;
                }
                result.liquidity_providers.push(cleaned);
                confidence += self.config.provider_increment;
            }
        }

        for pattern in &self.bank_patterns {
            for m in pattern.find_iter(text) {
                let cleaned = clean_captured_text(m.as_str());
                if cleaned.is_empty() || result.liquidity_providers.contains(&cleaned) {
                    continue;
                }
                result.liquidity_providers.push(cleaned);
                confidence += self.config.provider_increment;
            }
        }

        // Administrator and sponsor are singular: first match wins, pattern
        // list order is the tie-break.
        if let Some(admin) = first_capture(&self.administrator_patterns, text) {
            result.administrator = Some(admin);
            confidence += self.config.administrator_increment;
        }

        if let Some(sponsor) = first_capture(&self.sponsor_patterns, text) {
            result.sponsor = Some(sponsor);
            confidence += self.config.sponsor_increment;
        }

        if mentions_issuer {
            confidence += self.config.relevance_bonus;
        }

        // Final gate: absence instead of an empty record.
        if result.is_empty() {
            return None;
        }

        result.confidence = confidence.min(1.0);
        Some(result)
    }
}

impl Default for EntityExtractor {
    fn default() -> Self {
        Self::new(ExtractorConfig::default())
    }
}

/// Compile `<keyword>[:\s]+<capture>` patterns in keyword-list order.
///
/// The keyword match is case-insensitive; the capture is anchored on a
/// capital letter and never crosses a line boundary.
fn role_patterns(keywords: &[String]) -> Vec<Regex> {
    let mut patterns = Vec::with_capacity(keywords.len());
    for keyword in keywords {
        let source = format!(
            r"(?i:\b{})[\s:]+([A-Z][A-Za-z0-9&.,' \-]{{1,100}})",
            regex::escape(keyword)
        );
        if let Ok(pattern) = Regex::new(&source) {
            patterns.push(pattern);
        }
    }
    patterns
}

/// Compile whole-match bank-name patterns, tolerating "Bank" / "N.A." tails
fn bank_patterns(names: &[String]) -> Vec<Regex> {
    let mut patterns = Vec::with_capacity(names.len());
    for name in names {
        let source = format!(
            r"(?i)\b{}(?: Bank)?(?:,? N\.A\.?)?",
            regex::escape(name)
        );
        if let Ok(pattern) = Regex::new(&source) {
            patterns.push(pattern);
        }
    }
    patterns
}

/// First non-empty cleaned capture across an ordered pattern list
fn first_capture(patterns: &[Regex], text: &str) -> Option<String> {
    for pattern in patterns {
        for caps in pattern.captures_iter(text) {
            let Some(m) = caps.get(1) else { continue };
            let cleaned = clean_captured_text(m.as_str());
            if !cleaned.is_empty() {
                return Some(cleaned);
            }
        }
    }
    None
}

// ============================================================================
// Tests
// ============================================================================
