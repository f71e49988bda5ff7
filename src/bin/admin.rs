//! CLI administration tool for redis-shortener.
//!
//! Inspects and manipulates the link store directly, without going through
//! the HTTP server.
//!
//! # Usage
//!
//! ```bash
//! # Show the record of a short code
//! cargo run --bin admin -- info 1c
//!
//! # Show the newest links
//! cargo run --bin admin -- latest 20
//!
//! # Create a short link
//! cargo run --bin admin -- shorten https://example.com/page
//!
//! # Convert between counter values and codes
//! cargo run --bin admin -- encode 100
//! cargo run --bin admin -- decode 1c
//!
//! # Show the counter and check the backend
//! cargo run --bin admin -- counter
//! cargo run --bin admin -- ping
//! ```
//!
//! # Environment Variables
//!
//! Same as the server, see [`redis_shortener::config`]. Without `REDIS_URL`
//! (or `REDIS_HOST`) every command that touches the store runs against an
//! empty in-memory store.

use redis_shortener::application::services::LinkService;
use redis_shortener::application::services::link_service::DEFAULT_LATEST_COUNT;
use redis_shortener::config::{self, Config};
use redis_shortener::domain::entities::UrlRecord;
use redis_shortener::domain::repositories::RecordRepository;
use redis_shortener::server::{build_repository, connect_backend};
use redis_shortener::utils::code_generator::Encoder;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::sync::Arc;
use tokio::sync::mpsc;

/// CLI tool for managing redis-shortener.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the record of a short code
    Info {
        /// Short code, e.g. "1c"
        code: String,
    },

    /// List the newest links
    Latest {
        /// Number of links to show
        #[arg(default_value_t = DEFAULT_LATEST_COUNT)]
        count: u64,
    },

    /// Create a short link
    Shorten {
        /// Long URL; `http://` is assumed when no scheme is given
        url: String,
    },

    /// Print the short code of a counter value
    Encode {
        value: u64,
    },

    /// Print the counter value of a short code
    Decode {
        code: String,
    },

    /// Show the current counter value
    Counter,

    /// Check backend connectivity
    Ping,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env().context("Invalid configuration")?;

    match cli.command {
        Commands::Encode { value } => encode(&config, value),
        Commands::Decode { code } => decode(&config, &code),
        Commands::Info { code } => info(open_repository(&config).await?, &code).await,
        Commands::Latest { count } => latest(open_repository(&config).await?, count).await,
        Commands::Shorten { url } => {
            shorten(&config, open_repository(&config).await?, &url).await
        }
        Commands::Counter => counter(open_repository(&config).await?).await,
        Commands::Ping => ping(open_repository(&config).await?).await,
    }
}

async fn open_repository(config: &Config) -> Result<Arc<dyn RecordRepository>> {
    if config.redis_url.is_none() {
        println!(
            "{}",
            "⚠️  Redis is not configured, using an empty in-memory store".yellow()
        );
        println!();
    }

    let backend = connect_backend(config.redis_url.as_deref()).await?;
    let (repository, _) = build_repository(config, backend)?;
    Ok(repository)
}

fn encoder(config: &Config) -> Result<Encoder> {
    Encoder::new(&config.code_alphabet).context("Invalid CODE_ALPHABET")
}

fn print_record(record: &UrlRecord) {
    println!("  Code:     {}", record.key.bright_yellow().bold());
    println!("  Short:    {}", record.short_url.cyan());
    println!("  Long:     {}", record.long_url);
    println!(
        "  Created:  {}",
        record
            .created_at()
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string()
            .bright_black()
    );
    println!("  Clicks:   {}", record.clicks.to_string().bright_white().bold());
}

/// Displays a single record.
async fn info(repository: Arc<dyn RecordRepository>, code: &str) -> Result<()> {
    println!("{}", "🔗 Link Info".bright_blue().bold());
    println!();

    let record = repository
        .load_record(code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load record: {}", e))?;

    match record {
        Some(record) => print_record(&record),
        None => println!("  {}", format!("No link with code '{}'", code).yellow()),
    }
    println!();

    Ok(())
}

/// Lists the newest records as a table.
///
/// # Output Format
///
/// ```text
/// 📋 Latest Links
///
///   Code       Clicks   Created              Long URL
///   ──────────────────────────────────────────────────────────────────
///   1e         0        2024-01-15 10:30     http://example.com/c
///   1d         4        2024-01-15 10:29     http://example.com/b
/// ```
async fn latest(repository: Arc<dyn RecordRepository>, count: u64) -> Result<()> {
    println!("{}", "📋 Latest Links".bright_blue().bold());
    println!();

    let records = repository
        .latest(count)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if records.is_empty() {
        println!("{}", "  No links found".yellow());
        println!();
        return Ok(());
    }

    println!(
        "  {:<10} {:<8} {:<20} {}",
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Created".bright_white().bold(),
        "Long URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for record in &records {
        println!(
            "  {:<10} {:<8} {:<20} {}",
            record.key.cyan(),
            record.clicks,
            record
                .created_at()
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            record.long_url
        );
    }

    println!();
    println!(
        "  Total: {}",
        records.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Creates a short link through the same flow as the HTTP endpoint.
async fn shorten(config: &Config, repository: Arc<dyn RecordRepository>, url: &str) -> Result<()> {
    println!("{}", "✂️  Shorten URL".bright_blue().bold());
    println!();

    // Nothing resolves links here, so click events are never sent.
    let (click_tx, _click_rx) = mpsc::channel(1);
    let service = LinkService::new(repository, encoder(config)?, config.base_url(), click_tx);

    let record = service
        .shorten(url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to shorten URL: {}", e))?;

    print_record(&record);
    println!();
    println!("{}", "✅ Link created successfully!".green().bold());
    println!();

    Ok(())
}

fn encode(config: &Config, value: u64) -> Result<()> {
    println!("{}", encoder(config)?.encode(value).bright_yellow().bold());
    Ok(())
}

fn decode(config: &Config, code: &str) -> Result<()> {
    let value = encoder(config)?
        .decode(code)
        .with_context(|| format!("Cannot decode '{}'", code))?;
    println!("{}", value.to_string().bright_yellow().bold());
    Ok(())
}

/// Shows the last allocated counter value.
async fn counter(repository: Arc<dyn RecordRepository>) -> Result<()> {
    println!("{}", "📊 Counter".bright_blue().bold());
    println!();

    let value = repository
        .current_counter()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read counter: {}", e))?;

    println!("{}", counter_line(value));
    println!();

    Ok(())
}

/// The counter holds the last allocated value, which includes skipped
/// reserved codes, so it is not a count of stored links.
fn counter_line(value: u64) -> String {
    format!("  Counter value: {}", value.to_string().bright_white().bold())
}

/// Checks the backend with PING.
async fn ping(repository: Arc<dyn RecordRepository>) -> Result<()> {
    println!("{}", "🔍 Checking backend...".bright_blue().bold());

    if repository.health_check().await {
        println!("{}", "✅ Backend is reachable".green().bold());
        Ok(())
    } else {
        println!("{}", "❌ Backend did not answer PING".red().bold());
        anyhow::bail!("Backend unreachable")
    }
}
