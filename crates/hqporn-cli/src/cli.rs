use clap::{Parser, Subcommand};
use hqporn_core::{ClientConfig, DEFAULT_ORIGIN};

/// Scrape hqporn.xxx listings and video pages as JSON
#[derive(Parser, Debug)]
#[command(name = "hqporn", version)]
#[command(about = "Scrape hqporn.xxx listings and video pages as JSON", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Site origin used for fetching and resolving relative links
    #[arg(long, global = true, default_value = DEFAULT_ORIGIN)]
    pub origin: String,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = 15)]
    pub timeout: u64,

    /// Maximum requests per second
    #[arg(long, global = true, default_value_t = 2.0)]
    pub rps: f64,

    /// Retries for rate limiting, timeouts and server errors
    #[arg(long, global = true, default_value_t = 3)]
    pub retries: u32,

    /// Pretty-print the JSON output
    #[arg(long, global = true)]
    pub pretty: bool,
}

impl Cli {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            origin: self.origin.clone(),
            requests_per_second: self.rps,
            timeout_secs: self.timeout,
            max_retries: self.retries,
            ..ClientConfig::default()
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Newest videos
    Fresh {
        #[arg(default_value_t = 1)]
        page: u32,
    },
    /// Best rated videos
    Best {
        #[arg(default_value_t = 1)]
        page: u32,
    },
    /// Trending videos
    Trend {
        #[arg(default_value_t = 1)]
        page: u32,
    },
    /// Search videos
    Search {
        query: String,
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Category index
    Categories {
        #[arg(default_value_t = 1)]
        page: u32,
    },
    /// Channel index
    Channels {
        #[arg(default_value_t = 1)]
        page: u32,
    },
    /// Pornstar index
    Pornstars {
        #[arg(default_value_t = 1)]
        page: u32,
    },
    /// Playable sources, poster and sprites of a video page
    Stream {
        /// Absolute URL of the video page
        url: String,
    },
    /// Video thumbnails on any page
    Scrape {
        /// Absolute URL of the page
        url: String,
    },
}
