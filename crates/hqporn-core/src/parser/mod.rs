//! HTML parsers for hqporn.xxx
//!
//! Contains modules for parsing different page types.

mod dom;
mod image;
pub mod listing;
pub mod stream;

pub use listing::{
    extract_directory, extract_listing, extract_video_thumbs, extract_videos,
    has_no_results_notice, is_video_listing_page,
};
pub use stream::extract_stream;
