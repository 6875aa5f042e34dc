use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use vinted_scraper::{
    parse_item_url, retrieve, PageSource, RetrieveOptions, ScraperError, VintedClient,
};

mod output;

/// Exit status when the page held no recognizable item record.
const EXIT_DETAILS_NOT_FOUND: u8 = 2;

/// Where users report pages the tool could not read.
const ISSUES_URL: &str = concat!(env!("CARGO_PKG_REPOSITORY"), "/issues");

#[derive(Debug, Parser)]
#[command(name = "vinted-dl")]
#[command(about = "Download the photos and details of a Vinted listing")]
struct Cli {
    /// Item page, e.g. https://www.vinted.fr/items/123456-foobar
    item_url: String,

    /// Directory the files are written to
    #[arg(short = 'o', long = "output", default_value = ".")]
    output_dir: PathBuf,

    /// Also download the seller's profile photo
    #[arg(long)]
    seller: bool,

    /// Also download the photos of every other item the seller lists
    #[arg(long)]
    all_items: bool,

    /// Read the item page from a saved HTML file instead of fetching it
    #[arg(long, value_name = "FILE", conflicts_with = "api")]
    html: Option<PathBuf>,

    /// Read the item details from the JSON API instead of the item page
    #[arg(long)]
    api: bool,

    /// Retry through the JSON API when the item page holds no details
    #[arg(long, conflicts_with = "api")]
    api_fallback: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let config = vinted_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let item_url = parse_item_url(&cli.item_url)?;
    let source = match &cli.html {
        Some(path) => PageSource::Saved(
            std::fs::read_to_string(path)
                .with_context(|| format!("failed to read saved page {}", path.display()))?,
        ),
        None if cli.api => PageSource::Api,
        None => PageSource::Remote,
    };

    let client = VintedClient::from_config(&item_url.origin(), &config)?;
    let options = RetrieveOptions {
        seller_photo: cli.seller,
        all_seller_items: cli.all_items,
        api_fallback: cli.api_fallback,
        wardrobe_page_size: config.wardrobe_page_size,
        last_login_policy: config.last_login_policy,
    };

    tracing::info!(
        url = item_url.url(),
        item_id = item_url.item_id(),
        output = %cli.output_dir.display(),
        "retrieving item"
    );

    match retrieve(&client, &item_url, source, &options).await {
        Ok(retrieval) => {
            let written = output::write_retrieval(&cli.output_dir, &retrieval)?;
            tracing::info!(
                files = written.len(),
                photos = retrieval.assets.len(),
                "retrieval complete"
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(ScraperError::ItemDetailsNotFound { url, body }) => {
            let path = output::write_diagnostic(&cli.output_dir, &body)?;
            eprintln!(
                "Could not find the item details in {url}.\n\
                 The page was saved to {}.\n\
                 Please open an issue at {ISSUES_URL} and attach that file.",
                path.display()
            );
            Ok(ExitCode::from(EXIT_DETAILS_NOT_FOUND))
        }
        Err(err) => Err(err.into()),
    }
}
