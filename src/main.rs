//! # Review Analyzer CLI (`review-analyzer`)
//!
//! Serves the review dataset over HTTP and offers the same filter pipeline
//! offline for scripting and debugging.
//!
//! ## Usage
//!
//! ```bash
//! review-analyzer --config ./config/reviews.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `review-analyzer serve` | Start the HTTP server |
//! | `review-analyzer filter` | Filter and annotate reviews, print JSON |
//! | `review-analyzer sentiment "<text>"` | Score a piece of text |
//! | `review-analyzer stats` | Summarize the loaded dataset |
//!
//! When the config file does not exist, built-in defaults are used
//! (`data/reviews.csv`, port 8000). `PORT` overrides the listen port.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use review_analyzer::config;
use review_analyzer::dataset;
use review_analyzer::pipeline::ReviewPipeline;
use review_analyzer::query::{self, END_DATE_PARAM, LOCATION_PARAM, START_DATE_PARAM};
use review_analyzer::sentiment::{LexiconAnalyzer, SentimentAnalyzer};
use review_analyzer::server;
use review_analyzer::stats;

/// Review Analyzer — filter customer reviews by location and date, with
/// sentiment scores attached.
#[derive(Parser)]
#[command(
    name = "review-analyzer",
    about = "Review Analyzer — serve customer reviews filtered by location and date, annotated with sentiment",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/reviews.toml`. Built-in defaults are used when
    /// the file does not exist.
    #[arg(long, global = true, default_value = "./config/reviews.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server.
    ///
    /// Loads the dataset once, then answers `GET` requests on any path.
    Serve,

    /// Filter and annotate reviews without starting a server.
    ///
    /// Applies exactly the same rules as the HTTP endpoint and prints the
    /// resulting JSON array to stdout.
    Filter {
        /// Only reviews from this location (exact match).
        #[arg(long)]
        location: Option<String>,

        /// Only reviews on or after this date (YYYY-MM-DD).
        #[arg(long)]
        start_date: Option<String>,

        /// Only reviews on or before this date (YYYY-MM-DD).
        #[arg(long)]
        end_date: Option<String>,
    },

    /// Print the sentiment scores of a piece of text as JSON.
    Sentiment {
        /// The text to score.
        text: String,
    },

    /// Summarize the configured dataset.
    Stats,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let cfg = config::load_or_default(&cli.config)?;

    match cli.command {
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
        Commands::Filter {
            location,
            start_date,
            end_date,
        } => {
            let params: Vec<(String, String)> = [
                (LOCATION_PARAM, location),
                (START_DATE_PARAM, start_date),
                (END_DATE_PARAM, end_date),
            ]
            .into_iter()
            .filter_map(|(k, v)| v.map(|v| (k.to_string(), v)))
            .collect();
            let spec = query::interpret(&params)?;

            let pipeline = ReviewPipeline::from_config(&cfg)?;
            let annotated = pipeline.run(&spec)?;
            println!("{}", serde_json::to_string_pretty(&annotated)?);
        }
        Commands::Sentiment { text } => {
            let analyzer = LexiconAnalyzer::load(cfg.sentiment.lexicon.as_deref())?;
            let scores = analyzer.polarity_scores(&text);
            println!("{}", serde_json::to_string_pretty(&scores)?);
        }
        Commands::Stats => {
            let reviews = dataset::load_reviews(&cfg.dataset)
                .with_context(|| "Cannot compute stats")?;
            stats::print_stats(&reviews);
        }
    }

    Ok(())
}
