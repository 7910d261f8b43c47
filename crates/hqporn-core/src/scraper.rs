//! Main scraper API for hqporn.xxx
//!
//! Provides the high-level API combining HTTP client and parsers.

use tracing::info;

use crate::client::{ClientConfig, HqpornClient};
use crate::error::{HqpornError, Result};
use crate::parser::{
    extract_directory, extract_stream, extract_video_thumbs, extract_videos,
    has_no_results_notice, is_video_listing_page,
};
use crate::types::{DirectoryEntry, ListingKind, StreamDescriptor, VideoListingEntry, VideoSection};
use crate::url::{build_directory_url, build_search_url, build_section_url};

/// Main scraper API for hqporn.xxx
///
/// Combines the rate-limited HTTP client with the HTML parsers. Every
/// listing operation returns an empty list when the page has no items
/// (for example past the last page); only fetch failures and invalid
/// arguments are errors.
pub struct HqpornScraper {
    client: HqpornClient,
}

impl HqpornScraper {
    /// Create a new scraper with default configuration
    ///
    /// # Errors
    /// Returns error if HTTP client initialization fails
    pub fn new() -> Result<Self> {
        let client = HqpornClient::new()?;
        Ok(Self { client })
    }

    /// Create a new scraper with custom client configuration
    ///
    /// # Errors
    /// Returns error if HTTP client initialization fails
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = HqpornClient::with_config(config)?;
        Ok(Self { client })
    }

    /// Site origin used for fetching and link resolution
    pub fn origin(&self) -> &str {
        self.client.origin()
    }

    /// Fetch one page of a video feed
    ///
    /// # Arguments
    /// * `section` - Feed to read (fresh, best, trend)
    /// * `page` - 1-based page number
    ///
    /// # Errors
    /// - `InvalidPage` if page is 0
    /// - `HttpError` / `NotFound` / `RateLimited` if the fetch fails
    ///
    /// # Example
    /// ```no_run
    /// # async fn example() -> hqporn_core::Result<()> {
    /// use hqporn_core::{HqpornScraper, VideoSection};
    /// let scraper = HqpornScraper::new()?;
    /// for video in scraper.videos(VideoSection::Fresh, 1).await? {
    ///     println!("{:?}: {:?}", video.title, video.page_url);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn videos(&self, section: VideoSection, page: u32) -> Result<Vec<VideoListingEntry>> {
        validate_page(page)?;

        let url = build_section_url(self.origin(), section, page);
        let html = self.client.fetch_url(&url).await?;
        extract_videos(&html, self.origin())
    }

    /// Newest videos
    pub async fn fresh(&self, page: u32) -> Result<Vec<VideoListingEntry>> {
        self.videos(VideoSection::Fresh, page).await
    }

    /// Best rated videos
    pub async fn best(&self, page: u32) -> Result<Vec<VideoListingEntry>> {
        self.videos(VideoSection::Best, page).await
    }

    /// Trending videos
    pub async fn trend(&self, page: u32) -> Result<Vec<VideoListingEntry>> {
        self.videos(VideoSection::Trend, page).await
    }

    /// Search for videos by query
    ///
    /// Returns an empty list when the site reports no results, even if the
    /// page shows recommended videos instead.
    ///
    /// # Errors
    /// - `InvalidQuery` if query is empty or whitespace only
    /// - `InvalidPage` if page is 0
    /// - `HttpError` / `NotFound` / `RateLimited` if the fetch fails
    pub async fn search(&self, query: &str, page: u32) -> Result<Vec<VideoListingEntry>> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(HqpornError::InvalidQuery(
                "Search query cannot be empty".to_string(),
            ));
        }
        validate_page(page)?;

        let url = build_search_url(self.origin(), trimmed, page);
        let html = self.client.fetch_url(&url).await?;

        if has_no_results_notice(&html)? {
            info!(query = trimmed, "site reported no results");
            return Ok(Vec::new());
        }

        extract_videos(&html, self.origin())
    }

    /// Fetch one page of the category index
    pub async fn categories(&self, page: u32) -> Result<Vec<DirectoryEntry>> {
        self.directory(ListingKind::Category, page).await
    }

    /// Fetch one page of the channel index
    pub async fn channels(&self, page: u32) -> Result<Vec<DirectoryEntry>> {
        self.directory(ListingKind::Channel, page).await
    }

    /// Fetch one page of the pornstar index
    pub async fn pornstars(&self, page: u32) -> Result<Vec<DirectoryEntry>> {
        self.directory(ListingKind::Pornstar, page).await
    }

    async fn directory(&self, kind: ListingKind, page: u32) -> Result<Vec<DirectoryEntry>> {
        validate_page(page)?;

        let url = build_directory_url(self.origin(), kind, page).ok_or_else(|| {
            HqpornError::InvalidUrl(format!("{:?} listings have no index page", kind))
        })?;
        let html = self.client.fetch_url(&url).await?;
        extract_directory(&html, self.origin(), kind)
    }

    /// Get playable sources of a video page
    ///
    /// A page without a player yields a descriptor for which
    /// [`StreamDescriptor::is_player_missing`] is true.
    ///
    /// # Arguments
    /// * `video_page_url` - Absolute URL of the video page
    ///
    /// # Errors
    /// - `InvalidUrl` if the URL does not start with `http`
    /// - `HttpError` / `NotFound` / `RateLimited` if the fetch fails
    ///
    /// # Note
    /// CDN source URLs are often signed and expire, so do not cache them long-term.
    pub async fn stream(&self, video_page_url: &str) -> Result<StreamDescriptor> {
        let url = validate_absolute(video_page_url)?;

        let html = self.client.fetch_url(url).await?;
        extract_stream(&html, url)
    }

    /// Scrape video thumbnails from any page URL
    ///
    /// Accepts pages the section methods do not cover (tag pages, model
    /// pages, related video blocks).
    ///
    /// # Errors
    /// - `InvalidUrl` if the URL does not start with `http`
    /// - `NotFound` if the page has no video gallery and no thumbnails at all
    /// - `HttpError` / `NotFound` / `RateLimited` if the fetch fails
    pub async fn scrape_videos(&self, page_url: &str) -> Result<Vec<VideoListingEntry>> {
        let url = validate_absolute(page_url)?;

        let html = self.client.fetch_url(url).await?;
        if !is_video_listing_page(&html)? {
            info!(url, "page is not a video listing");
            return Err(HqpornError::NotFound(url.to_string()));
        }

        extract_video_thumbs(&html, self.origin())
    }
}

fn validate_page(page: u32) -> Result<()> {
    if page == 0 {
        return Err(HqpornError::InvalidPage(page));
    }
    Ok(())
}

fn validate_absolute(url: &str) -> Result<&str> {
    let trimmed = url.trim();
    if !trimmed.starts_with("http") {
        return Err(HqpornError::InvalidUrl(trimmed.to_string()));
    }
    Ok(trimmed)
}
