//! Command-line front end for the hqporn scraper
//!
//! Every subcommand prints its records as JSON on stdout; logs go to stderr.
//!
//! ```text
//! hqporn fresh 2
//! hqporn search "hot tub" --page 3
//! hqporn stream https://hqporn.xxx/v/abc.html --pretty
//! RUST_LOG=hqporn_core=debug hqporn categories
//! ```

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Commands};
use hqporn_core::{HqpornScraper, VideoSection};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    tracing::debug!(?cli, "parsed arguments");

    let pretty = cli.pretty;
    let scraper = HqpornScraper::with_config(cli.client_config())
        .context("Failed to create scraper")?;

    match cli.command {
        Commands::Fresh { page } => {
            print_json(&scraper.videos(VideoSection::Fresh, page).await?, pretty)
        }
        Commands::Best { page } => {
            print_json(&scraper.videos(VideoSection::Best, page).await?, pretty)
        }
        Commands::Trend { page } => {
            print_json(&scraper.videos(VideoSection::Trend, page).await?, pretty)
        }
        Commands::Search { query, page } => {
            print_json(&scraper.search(&query, page).await?, pretty)
        }
        Commands::Categories { page } => print_json(&scraper.categories(page).await?, pretty),
        Commands::Channels { page } => print_json(&scraper.channels(page).await?, pretty),
        Commands::Pornstars { page } => print_json(&scraper.pornstars(page).await?, pretty),
        Commands::Stream { url } => {
            let stream = scraper.stream(&url).await?;
            print_json(&stream, pretty)?;
            if stream.is_player_missing() {
                anyhow::bail!("{} does not look like a video page", url);
            }
            Ok(())
        }
        Commands::Scrape { url } => print_json(&scraper.scrape_videos(&url).await?, pretty),
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("Failed to serialize output")?;

    println!("{}", json);
    Ok(())
}
