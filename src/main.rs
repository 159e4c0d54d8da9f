//! Wikiscape CLI
//!
//! Crawls the WalkScape wiki and exports the collected tables.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use wikiscape::export::confirm;
use wikiscape::{
    ExportFormat, Exporter, LabeledTable, ScraperConfig, WikiScraper, DEFAULT_SAMPLE_SIZE,
};

/// Wikiscape - WalkScape wiki scraper
#[derive(Parser, Debug)]
#[command(name = "wikiscape")]
#[command(version)]
#[command(about = "Scrape structured activity and location data from the WalkScape wiki")]
struct Args {
    /// What to crawl (defaults to activities)
    #[command(subcommand)]
    command: Option<Command>,

    /// Site root
    #[arg(long, global = true, default_value = "https://wiki.walkscape.app")]
    base_url: String,

    /// Delay before each request, in milliseconds
    #[arg(long, global = true, default_value = "500")]
    delay_ms: u64,

    /// Per-request timeout, in milliseconds
    #[arg(long, global = true, default_value = "10000")]
    timeout_ms: u64,

    /// Directory for exported files
    #[arg(short, long, global = true, default_value = ".")]
    out_dir: PathBuf,

    /// File name prefix for exported files
    #[arg(long, global = true, default_value = "walkscape_activities")]
    prefix: String,

    /// Export format
    #[arg(long, global = true, value_enum, default_value = "csv")]
    format: Format,

    /// Export without asking
    #[arg(short, long, global = true)]
    yes: bool,

    /// Never export, only print
    #[arg(long, global = true, conflicts_with = "yes")]
    no_export: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Command {
    /// Crawl every activity page and aggregate its tables
    Activities,
    /// Crawl regions and the locations listed on each region page
    Locations,
    /// Dump every wikitable on the activities page
    Tables,
    /// List every image on the activities page
    Images,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum Format {
    Csv,
    Json,
}

impl From<Format> for ExportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => ExportFormat::Csv,
            Format::Json => ExportFormat::Json,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn collect(scraper: &mut WikiScraper, command: Command) -> Vec<LabeledTable> {
    match command {
        Command::Activities => {
            let results = scraper.scrape_activities_or_empty().await;
            println!("{}", results.summary(DEFAULT_SAMPLE_SIZE));
            results.to_labeled_tables()
        }
        Command::Locations => {
            let results = scraper.scrape_locations_or_empty().await;
            println!(
                "Found {} regions and {} locations",
                results.regions().len(),
                results.locations().len()
            );
            results.to_labeled_tables()
        }
        Command::Tables => {
            let result = scraper.scrape_wikitables().await;
            wikiscape::pipeline::or_empty(result, "Table dump")
        }
        Command::Images => {
            let result = scraper.scrape_images().await;
            wikiscape::pipeline::or_empty(result, "Image listing")
        }
    }
}

fn print_available(tables: &[LabeledTable]) {
    println!("Available tables:");
    for table in tables {
        println!(
            "  {}. {} ({} rows, columns: {})",
            table.number,
            table.label,
            table.len(),
            table.columns.join(", ")
        );
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let command = args.command.unwrap_or(Command::Activities);
    tracing::info!(
        "Wikiscape {} starting: {:?} on {}",
        wikiscape::VERSION,
        command,
        args.base_url
    );

    let config = ScraperConfig::builder()
        .base_url(args.base_url.as_str())
        .request_delay_ms(args.delay_ms)
        .timeout_ms(args.timeout_ms)
        .build();
    let mut scraper = WikiScraper::new(config).context("invalid scraper configuration")?;

    let tables = collect(&mut scraper, command).await;
    let tables: Vec<LabeledTable> = tables.into_iter().filter(|t| !t.is_empty()).collect();
    if tables.is_empty() {
        tracing::warn!("No data to export");
        return Ok(());
    }
    print_available(&tables);

    if args.no_export {
        return Ok(());
    }

    let question = format!("Save these {} tables?", tables.len());
    let save = args.yes
        || confirm(std::io::stdin().lock(), std::io::stdout(), &question)
            .context("failed to read answer")?;
    if !save {
        tracing::info!("Tables not saved");
        return Ok(());
    }

    let exporter = Exporter::new(&args.out_dir, args.prefix.as_str(), args.format.into());
    let written = exporter.write_all(&tables).context("export failed")?;
    tracing::info!("Wrote {} files to {}", written.len(), args.out_dir.display());
    Ok(())
}
