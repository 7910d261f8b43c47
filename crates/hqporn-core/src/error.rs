//! Error types for the hqporn scraper
//!
//! Provides a single error enum with human-readable messages
//! and serialization for JSON error bodies.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for all scraper operations
///
/// Only fetch failures and invalid caller input are errors. A page that
/// parses but contains nothing recognizable is a normal, empty result.
#[derive(Error, Debug)]
pub enum HqpornError {
    /// HTTP request failed (network, timeout, non-2xx status)
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Failed to build an HTML query
    #[error("Failed to parse HTML: {0}")]
    ParseError(String),

    /// Invalid URL format
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Page numbers start at 1
    #[error("Invalid page number: {0}")]
    InvalidPage(u32),

    /// Empty or otherwise unusable search query
    #[error("Invalid search query: {0}")]
    InvalidQuery(String),

    /// Rate limited by server (HTTP 429)
    #[error("Rate limited - too many requests")]
    RateLimited,

    /// Page not found on server (HTTP 404)
    #[error("Page not found: {0}")]
    NotFound(String),
}

impl Serialize for HqpornError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for scraper operations
pub type Result<T> = std::result::Result<T, HqpornError>;
