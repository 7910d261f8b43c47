//! Core data types for the hqporn scraper
//!
//! Records produced by the listing and video page parsers. All of them are
//! plain values: built from one HTML fragment, returned, never mutated.

use serde::{Deserialize, Serialize};

/// Responsive image markup of a thumbnail
///
/// Built from a `<picture>` element with `<source type="image/webp|image/jpeg">`
/// children and a fallback `<img>`. Every field is either absent or non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSet {
    /// `data-src` of the fallback `<img>`, or its `src`
    pub lazy_source: Option<String>,

    /// `srcset` of the JPEG `<source>`
    pub jpeg_srcset: Option<String>,

    /// `srcset` of the WebP `<source>`
    pub webp_srcset: Option<String>,
}

impl ImageSet {
    /// True when no image URL was found at all
    pub fn is_empty(&self) -> bool {
        self.lazy_source.is_none() && self.jpeg_srcset.is_none() && self.webp_srcset.is_none()
    }
}

/// Category or keyword link attached to a video thumbnail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Visible tag text
    pub name: String,

    /// Absolute URL of the tag page
    pub url: String,
}

/// One video thumbnail on a listing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoListingEntry {
    /// Absolute URL of the video page
    pub page_url: Option<String>,

    /// Site-wide gallery ID (`data-gallery-id`)
    pub gallery_id: Option<String>,

    /// Thumbnail ID (`data-thumb-id`)
    pub thumb_id: Option<String>,

    /// Hover preview clip, exactly as the page emits it (may be relative)
    pub preview_video_url: Option<String>,

    /// Display title
    pub title: Option<String>,

    /// `title` attribute of the gallery link
    pub raw_title_attribute: Option<String>,

    pub images: ImageSet,

    /// Duration text, e.g. "12:34"
    pub duration: Option<String>,

    pub tags: Vec<Tag>,
}

/// One entry of a category, channel or pornstar index
///
/// The three directory sections share the same markup shape and differ
/// only in the selectors that locate them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    /// Absolute URL of the entry's own listing page
    pub page_url: String,

    /// Section-specific ID (`data-category-id`, `data-channel-id`, `data-pornstar-id`)
    pub id: Option<String>,

    pub display_name: String,

    pub images: ImageSet,
}

pub type CategoryEntry = DirectoryEntry;
pub type ChannelEntry = DirectoryEntry;
pub type PornstarEntry = DirectoryEntry;

/// Which listing page shape to extract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingKind {
    Video,
    Category,
    Channel,
    Pornstar,
}

/// Video feed sections that share the video listing markup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoSection {
    Fresh,
    Best,
    Trend,
}

impl VideoSection {
    /// Path segment of the section on the site
    pub fn as_str(self) -> &'static str {
        match self {
            VideoSection::Fresh => "fresh",
            VideoSection::Best => "best",
            VideoSection::Trend => "trend",
        }
    }
}

/// A record extracted from a listing page, shaped by its [`ListingKind`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ListingRecord {
    Video(VideoListingEntry),
    Category(CategoryEntry),
    Channel(ChannelEntry),
    Pornstar(PornstarEntry),
}

impl ListingRecord {
    pub fn kind(&self) -> ListingKind {
        match self {
            ListingRecord::Video(_) => ListingKind::Video,
            ListingRecord::Category(_) => ListingKind::Category,
            ListingRecord::Channel(_) => ListingKind::Channel,
            ListingRecord::Pornstar(_) => ListingKind::Pornstar,
        }
    }

    pub fn into_video(self) -> Option<VideoListingEntry> {
        match self {
            ListingRecord::Video(entry) => Some(entry),
            _ => None,
        }
    }

    pub fn into_directory(self) -> Option<DirectoryEntry> {
        match self {
            ListingRecord::Video(_) => None,
            ListingRecord::Category(entry)
            | ListingRecord::Channel(entry)
            | ListingRecord::Pornstar(entry) => Some(entry),
        }
    }
}

/// One playable source candidate of a video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamSource {
    pub url: String,

    /// MIME type, e.g. "video/mp4"
    pub mime_type: Option<String>,

    /// Quality hint, e.g. "720"
    pub quality_label: Option<String>,
}

/// Diagnostic set when the page has no recognizable player element
pub const PLAYER_NOT_FOUND: &str = "player element not found";

/// Diagnostic set when the player exists but carries no source URL
pub const NO_DIRECT_SOURCE: &str = "no direct source found; may be script-loaded";

/// Playable sources and related media extracted from one video page
///
/// `sources` never holds two entries with the same URL, and when
/// `primary_source` is set one of the `sources` carries that URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamDescriptor {
    /// URL of the page that was parsed
    pub page_url: String,

    /// `src` attribute of the video element itself
    pub primary_source: Option<String>,

    pub sources: Vec<StreamSource>,

    pub poster_image: Option<String>,

    /// Scrubbing sprite images, in page order
    pub sprite_preview_urls: Vec<String>,

    /// Human-readable note when nothing playable was found
    pub diagnostic: Option<String>,
}

impl StreamDescriptor {
    /// Creates an empty descriptor for the given page
    pub fn new(page_url: impl Into<String>) -> Self {
        Self {
            page_url: page_url.into(),
            primary_source: None,
            sources: Vec::new(),
            poster_image: None,
            sprite_preview_urls: Vec::new(),
            diagnostic: None,
        }
    }

    /// True when the page was not a video page at all
    ///
    /// Callers serving HTTP typically map this to a 404.
    pub fn is_player_missing(&self) -> bool {
        self.diagnostic.as_deref() == Some(PLAYER_NOT_FOUND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entry() -> VideoListingEntry {
        VideoListingEntry {
            page_url: Some("https://hqporn.xxx/v/abc.html".to_string()),
            gallery_id: Some("101".to_string()),
            thumb_id: None,
            preview_video_url: Some("/preview/abc.mp4".to_string()),
            title: Some("My Clip".to_string()),
            raw_title_attribute: Some("My Clip".to_string()),
            images: ImageSet::default(),
            duration: Some("12:34".to_string()),
            tags: vec![Tag {
                name: "Foo".to_string(),
                url: "https://hqporn.xxx/tag/foo".to_string(),
            }],
        }
    }

    #[test]
    fn test_listing_record_serialization_is_tagged() {
        let record = ListingRecord::Video(sample_entry());
        let json = serde_json::to_value(&record).expect("Serialization should succeed");

        assert_eq!(json["kind"], "video");
        assert_eq!(json["title"], "My Clip");

        let back: ListingRecord =
            serde_json::from_value(json).expect("Deserialization should succeed");
        assert_eq!(back, record);
    }

    #[test]
    fn test_listing_record_narrowing() {
        let entry = DirectoryEntry {
            page_url: "https://hqporn.xxx/categories/5/".to_string(),
            id: Some("5".to_string()),
            display_name: "Amateur".to_string(),
            images: ImageSet::default(),
        };

        let record = ListingRecord::Channel(entry.clone());
        assert_eq!(record.kind(), ListingKind::Channel);
        assert_eq!(record.clone().into_video(), None);
        assert_eq!(record.into_directory(), Some(entry));

        let video = ListingRecord::Video(sample_entry());
        assert_eq!(video.kind(), ListingKind::Video);
        assert!(video.into_directory().is_none());
    }

    #[test]
    fn test_image_set_is_empty() {
        assert!(ImageSet::default().is_empty());

        let images = ImageSet {
            lazy_source: Some("https://cdn/x.jpg".to_string()),
            ..ImageSet::default()
        };
        assert!(!images.is_empty());
    }

    #[test]
    fn test_stream_descriptor_player_missing() {
        let mut descriptor = StreamDescriptor::new("https://hqporn.xxx/v/abc.html");
        assert!(!descriptor.is_player_missing());

        descriptor.diagnostic = Some(NO_DIRECT_SOURCE.to_string());
        assert!(!descriptor.is_player_missing());

        descriptor.diagnostic = Some(PLAYER_NOT_FOUND.to_string());
        assert!(descriptor.is_player_missing());
    }

    #[test]
    fn test_video_section_path() {
        assert_eq!(VideoSection::Fresh.as_str(), "fresh");
        assert_eq!(VideoSection::Best.as_str(), "best");
        assert_eq!(VideoSection::Trend.as_str(), "trend");
    }
}
