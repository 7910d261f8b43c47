//! HQPorn Scraper Core Library
//!
//! Fetches listing and video pages from hqporn.xxx and extracts typed records
//! from their markup.
//!
//! # Overview
//!
//! This crate provides:
//! - Rate-limited HTTP client for fetching pages
//! - Pure HTML extractors for listing pages (videos, categories, channels,
//!   pornstars) and video pages (stream sources, poster, sprites)
//! - High-level API combining both
//!
//! The extractors never touch the network and can be run against saved HTML.
//! A page with nothing recognizable on it yields an empty result, not an
//! error; only fetch failures and invalid arguments are errors.
//!
//! # Example
//!
//! ```no_run
//! use hqporn_core::{HqpornScraper, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let scraper = HqpornScraper::new()?;
//!
//!     let videos = scraper.search("beach", 1).await?;
//!     for video in &videos {
//!         println!("{:?}: {:?}", video.title, video.page_url);
//!     }
//!
//!     if let Some(url) = videos.first().and_then(|v| v.page_url.as_deref()) {
//!         let stream = scraper.stream(url).await?;
//!         for source in &stream.sources {
//!             println!("{} ({:?})", source.url, source.quality_label);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Offline extraction
//!
//! ```
//! use hqporn_core::{ListingKind, extract_listing};
//!
//! let html = r#"<div id="galleries" class="js-category-list">
//!     <div class="b-thumb-item--cat">
//!         <a class="js-category-stats" href="/categories/5/" title="Amateur"></a>
//!     </div>
//! </div>"#;
//!
//! let records = extract_listing(html, "https://hqporn.xxx", ListingKind::Category).unwrap();
//! assert_eq!(records.len(), 1);
//! ```

mod client;
mod error;
pub mod parser;
mod scraper;
mod types;
pub mod url;

// Re-export client types
pub use client::{ClientConfig, HqpornClient, RateLimiter};

// Re-export error types
pub use error::{HqpornError, Result};

// Re-export parser functions
pub use parser::{
    extract_directory, extract_listing, extract_stream, extract_video_thumbs, extract_videos,
    has_no_results_notice, is_video_listing_page,
};

// Re-export main scraper API
pub use scraper::HqpornScraper;

// Re-export data types
pub use types::{
    CategoryEntry, ChannelEntry, DirectoryEntry, ImageSet, ListingKind, ListingRecord,
    NO_DIRECT_SOURCE, PLAYER_NOT_FOUND, PornstarEntry, StreamDescriptor, StreamSource, Tag,
    VideoListingEntry, VideoSection,
};

// Re-export URL helper functions for convenience
pub use url::{DEFAULT_ORIGIN, build_directory_url, build_search_url, build_section_url, resolve};
