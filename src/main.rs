//! metaserp CLI - multi-engine search scraper command line interface.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use metaserp::{config, engines, report, Aggregator, Query, SearchOperator};

/// Scrape several web search engines at once
#[derive(Parser)]
#[command(name = "metaserp")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the selected engines and merge the results
    Search(SearchArgs),

    /// List available search engines
    Engines,
}

#[derive(Parser)]
struct SearchArgs {
    /// Search query
    query: String,

    /// Engines to use (comma-separated); see `metaserp engines`
    #[arg(short, long, value_delimiter = ',', default_value = "duckduckgo,bing,mojeek")]
    engines: Vec<String>,

    /// Results pages to fetch per engine
    #[arg(short, long, default_value_t = config::DEFAULT_PAGES)]
    pages: usize,

    /// Per-fetch timeout in seconds
    #[arg(short, long, default_value_t = config::DEFAULT_TIMEOUT)]
    timeout: u64,

    /// Proxy URL (e.g. http://127.0.0.1:8080 or socks5://127.0.0.1:1080)
    #[arg(long)]
    proxy: Option<String>,

    /// Drop results whose URL was already returned by another engine
    #[arg(long)]
    unique_urls: bool,

    /// Drop results whose domain was already returned by another engine
    #[arg(long)]
    unique_domains: bool,

    /// Search operator applied to every engine (e.g. site:example.com)
    #[arg(long)]
    operator: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Output file (defaults to a name derived from the query for
    /// non-text formats)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable console output
    Text,
    /// JSON report
    Json,
    /// CSV report
    Csv,
    /// HTML report
    Html,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("metaserp=debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Search(args) => run_search(args).await,
        Commands::Engines => list_engines(),
    }
}

fn list_engines() -> Result<()> {
    println!("Available search engines:\n");
    for name in engines::NAMES {
        println!("  {name}");
    }
    println!("\nUsage: metaserp search \"query\" -e duckduckgo,bing,startpage");
    Ok(())
}

async fn run_search(args: SearchArgs) -> Result<()> {
    let mut selected = Vec::new();
    for name in &args.engines {
        if engines::by_name(name).is_some() {
            selected.push(name.clone());
        } else {
            eprintln!("Warning: unknown engine '{name}', skipping");
        }
    }
    if selected.is_empty() {
        anyhow::bail!("no valid engines specified");
    }

    let mut aggregator = Aggregator::new(
        selected,
        args.proxy.clone(),
        Duration::from_secs(args.timeout),
    );
    aggregator.set_ignore_duplicate_urls(args.unique_urls);
    aggregator.set_ignore_duplicate_domains(args.unique_domains);
    if let Some(spec) = &args.operator {
        aggregator.set_search_operator(SearchOperator::parse(spec));
    }

    let query = Query::new(&args.query);
    let outcome = aggregator.search(&query, args.pages).await?;

    match args.format {
        OutputFormat::Text => report::print_console(&query, &outcome),
        OutputFormat::Json => write_report(report::to_json(&query, &outcome), &query, "json", args.output)?,
        OutputFormat::Csv => write_report(report::to_csv(&query, &outcome), &query, "csv", args.output)?,
        OutputFormat::Html => write_report(report::to_html(&query, &outcome), &query, "html", args.output)?,
    }

    Ok(())
}

fn write_report(
    data: String,
    query: &Query,
    extension: &str,
    output: Option<PathBuf>,
) -> Result<()> {
    let path = output.unwrap_or_else(|| report::default_path(query, extension));
    report::write_file(&data, &path)?;
    eprintln!("Report written to {}", path.display());
    Ok(())
}
