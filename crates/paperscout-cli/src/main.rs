//! Paperscout CLI - Command-line interface
//!
//! Usage:
//!   pscout plan <issuer>
//!   pscout search <issuer>
//!   pscout scrape <url> --issuer <issuer>
//!   pscout analyze <path> --issuer <issuer>
//!   pscout history list
//!   pscout history clear

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use paperscout_core::config::AppConfig;
use paperscout_core::{
    ExtractionResult, HistoryStore, JsonFileHistoryStore, PageScraper, SearchHistoryEntry,
    SearchProvider,
};
use paperscout_extractor::{plan, EntityExtractor, ExtractorConfig, ResearchPipeline};
use paperscout_parser::ParserRegistry;
use paperscout_search::{build_provider, FirecrawlScraper, FixtureProvider};

/// Default history file, used when no path is configured
const DEFAULT_HISTORY_FILE: &str = ".paperscout_history.json";

#[derive(Parser)]
#[command(name = "pscout")]
#[command(about = "ABCP issuer research CLI")]
#[command(version)]
struct Cli {
    /// Emit JSON instead of human-readable output
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the query plan for an issuer without searching
    Plan {
        /// Issuer or conduit name
        issuer: String,
    },
    /// Research an issuer across the configured search provider
    Search {
        /// Issuer or conduit name
        issuer: String,
    },
    /// Scrape one page and extract roles from its content
    Scrape {
        /// Page URL
        url: String,
        /// Issuer the page concerns
        #[arg(long)]
        issuer: String,
    },
    /// Analyze a local document (PDF, text, or markdown)
    Analyze {
        /// Path to the document
        path: PathBuf,
        /// Issuer the document concerns
        #[arg(long)]
        issuer: String,
    },
    /// Inspect recorded research runs
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
}

#[derive(Subcommand)]
enum HistoryAction {
    /// List recorded runs, most recent first
    List,
    /// Remove all recorded runs
    Clear,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "paperscout_cli=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "invalid environment configuration, using defaults");
        AppConfig::default()
    });

    match cli.command {
        Commands::Plan { issuer } => {
            let queries = plan(&issuer);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&queries)?);
            } else {
                for (i, query) in queries.iter().enumerate() {
                    println!("{}. {query}", i + 1);
                }
            }
        }
        Commands::Search { issuer } => {
            let provider = resolve_provider(&config);
            let pipeline = ResearchPipeline::new(provider, &config.pipeline);
            let results = pipeline.run(&issuer).await?;

            let history = open_history(&config);
            if let Err(e) = history
                .append(SearchHistoryEntry::new(issuer.trim(), results.clone()))
                .await
            {
                tracing::warn!(error = %e, "failed to record history entry");
            }

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                print_results(&results);
            }
        }
        Commands::Scrape { url, issuer } => {
            let scraper = resolve_scraper(&config);
            let page = scraper.scrape(&url).await?;

            let extractor = EntityExtractor::default();
            let result = extractor
                .extract(&page.content, &issuer)
                .map(|r| r.with_source(page.url));

            match result {
                Some(record) if cli.json => {
                    println!("{}", serde_json::to_string_pretty(&record)?)
                }
                Some(record) => print_results(std::slice::from_ref(&record)),
                None => println!("No extractable roles found at {url}"),
            }
        }
        Commands::Analyze { path, issuer } => {
            let registry = ParserRegistry::with_default_parsers();
            let doc = registry.parse(&path)?;

            let extractor = EntityExtractor::new(ExtractorConfig::document_analysis());
            let result = extractor
                .extract(&doc.content, &issuer)
                .map(|r| r.with_source(path.display().to_string()));

            match result {
                Some(record) if cli.json => {
                    println!("{}", serde_json::to_string_pretty(&record)?)
                }
                Some(record) => print_results(std::slice::from_ref(&record)),
                None => println!("No extractable roles found in {}", path.display()),
            }
        }
        Commands::History { action } => {
            let history = open_history(&config);
            match action {
                HistoryAction::List => {
                    let entries = history.list().await?;
                    if cli.json {
                        println!("{}", serde_json::to_string_pretty(&entries)?);
                    } else if entries.is_empty() {
                        println!("No recorded runs");
                    } else {
                        for entry in &entries {
                            println!(
                                "{}  {}  ({} results)",
                                entry.timestamp.to_rfc3339(),
                                entry.issuer,
                                entry.results.len()
                            );
                        }
                    }
                }
                HistoryAction::Clear => {
                    history.clear().await?;
                    println!("History cleared");
                }
            }
        }
    }

    Ok(())
}

/// Build the configured provider, falling back to fixtures when the
/// configured backend has no credential
fn resolve_provider(config: &AppConfig) -> Arc<dyn SearchProvider> {
    match build_provider(&config.search) {
        Ok(provider) => provider,
        Err(e) => {
            tracing::warn!(error = %e, "falling back to fixture search provider");
            Arc::new(FixtureProvider::new())
        }
    }
}

/// Build the configured scraper, falling back to fixtures when no
/// Firecrawl credential is present
fn resolve_scraper(config: &AppConfig) -> Arc<dyn PageScraper> {
    match FirecrawlScraper::from_config(&config.search) {
        Ok(scraper) => Arc::new(scraper),
        Err(e) => {
            tracing::warn!(error = %e, "falling back to fixture scraper");
            Arc::new(FixtureProvider::new())
        }
    }
}

fn open_history(config: &AppConfig) -> JsonFileHistoryStore {
    let path = config
        .pipeline
        .history_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_HISTORY_FILE));
    JsonFileHistoryStore::new(path, config.pipeline.history_capacity)
}

fn print_results(results: &[ExtractionResult]) {
    for (i, result) in results.iter().enumerate() {
        println!("{}. {} (confidence {:.2})", i + 1, result.issuer, result.confidence);
        if !result.liquidity_providers.is_empty() {
            println!("   liquidity providers: {}", result.liquidity_providers.join(", "));
        }
        if let Some(admin) = &result.administrator {
            println!("   administrator: {admin}");
        }
        if let Some(sponsor) = &result.sponsor {
            println!("   sponsor: {sponsor}");
        }
        if !result.source.is_empty() {
            println!("   source: {}", result.source);
        }
    }
}
