use anyhow::{Context, Result};
use clap::Parser;
use squidex_builder::query::clauses_from_json;
use squidex_builder::{SearchBuilder, SearchSettings};
use std::io::Read;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "squidex-builder")]
#[command(about = "Compile a saved clause list into a search request body", long_about = None)]
struct Args {
    /// Clause list JSON file ("-" reads stdin)
    #[arg(long, env = "SQUIDEX_CLAUSES", default_value = "-")]
    clauses: String,

    /// Search settings JSON file (index, doc_type, per_page, columns)
    #[arg(long, env = "SQUIDEX_SETTINGS")]
    settings: Option<PathBuf>,

    /// Index name, overrides the settings file
    #[arg(long, env = "SQUIDEX_INDEX")]
    index: Option<String>,

    /// Page number; enables pagination with the configured page size
    #[arg(long)]
    page: Option<i64>,

    /// Page size, overrides the settings file
    #[arg(long)]
    per_page: Option<i64>,

    /// Sort keys as field:direction, comma separated
    #[arg(long, value_delimiter = ',')]
    order_by: Vec<String>,

    /// Score expression replacing relevance (drops sort keys)
    #[arg(long)]
    script_score: Option<String>,

    /// Print the count request body instead of the search body
    #[arg(long)]
    count: bool,

    /// Pretty-print the output
    #[arg(long)]
    pretty: bool,
}

fn read_clauses(source: &str) -> Result<String> {
    if source == "-" {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("reading clause list from stdin")?;
        return Ok(raw);
    }
    std::fs::read_to_string(source).with_context(|| format!("reading clause list {}", source))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let args = Args::parse();

    let mut settings = match &args.settings {
        Some(path) => SearchSettings::load(path)?,
        None => SearchSettings::default(),
    };
    if let Some(index) = args.index {
        settings.index = index;
    }
    if let Some(per_page) = args.per_page {
        settings = settings.with_per_page(per_page);
    }

    info!("squidex-builder v{} targeting {}", squidex_builder::VERSION, settings.target());

    let raw = read_clauses(&args.clauses)?;
    let value: serde_json::Value = serde_json::from_str(&raw).context("parsing clause list")?;
    let clauses = clauses_from_json(&value)?;
    info!("Loaded {} clauses", clauses.len());

    let mut builder = clauses
        .into_iter()
        .fold(SearchBuilder::from_settings(&settings), SearchBuilder::add_clause);

    for key in &args.order_by {
        let (field, direction) = match key.split_once(':') {
            Some((field, direction)) => (field, direction),
            None => (key.as_str(), "asc"),
        };
        builder = builder.order_by(field, direction);
    }

    if let Some(expression) = args.script_score {
        if !args.order_by.is_empty() {
            warn!("--script-score replaces --order-by; sort keys are dropped");
        }
        builder = builder.order_by_script_score(expression);
    }

    if let Some(page) = args.page {
        builder = builder.for_page(page, settings.per_page);
    }

    let request = builder.to_request(&settings.columns);
    let body = if args.count {
        request.count_json()
    } else {
        request.to_json()
    };

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&body)?
    } else {
        serde_json::to_string(&body)?
    };
    println!("{}", rendered);

    Ok(())
}
