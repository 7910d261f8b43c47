//! URL helper functions for hqporn.xxx
//!
//! Resolution of site-relative links and builders for every listing
//! section. The origin is always passed in, never read from a global.

use crate::types::{ListingKind, VideoSection};

/// Origin of the public site
pub const DEFAULT_ORIGIN: &str = "https://hqporn.xxx";

/// Resolves a possibly site-relative link against the origin
///
/// Links starting with `/` get the origin prepended, anything else is
/// returned unchanged.
///
/// # Example
/// ```
/// use hqporn_core::url::resolve;
/// let url = resolve(Some("/categories/5/"), "https://hqporn.xxx");
/// assert_eq!(url.as_deref(), Some("https://hqporn.xxx/categories/5/"));
/// assert_eq!(resolve(None, "https://hqporn.xxx"), None);
/// ```
pub fn resolve(maybe_relative: Option<&str>, origin: &str) -> Option<String> {
    let link = maybe_relative?;
    if link.starts_with('/') {
        Some(format!("{}{}", origin, link))
    } else {
        Some(link.to_string())
    }
}

/// Strips trailing slashes so that `origin + "/path"` stays well-formed
pub fn normalize_origin(origin: &str) -> String {
    origin.trim().trim_end_matches('/').to_string()
}

/// Builds the URL of a video feed page
///
/// Page 1 is the bare section (`/fresh/`), later pages append the number.
/// The trend feed never carries a trailing slash.
///
/// # Example
/// ```
/// use hqporn_core::url::build_section_url;
/// use hqporn_core::VideoSection;
/// assert_eq!(build_section_url("https://hqporn.xxx", VideoSection::Best, 1), "https://hqporn.xxx/best/");
/// assert_eq!(build_section_url("https://hqporn.xxx", VideoSection::Trend, 2), "https://hqporn.xxx/trend/2");
/// ```
pub fn build_section_url(origin: &str, section: VideoSection, page: u32) -> String {
    match (section, page) {
        (VideoSection::Trend, page) => format!("{}/trend/{}", origin, page),
        (section, 1) => format!("{}/{}/", origin, section.as_str()),
        (section, page) => format!("{}/{}/{}/", origin, section.as_str(), page),
    }
}

/// Builds the search URL for a query and page
///
/// # Example
/// ```
/// use hqporn_core::url::build_search_url;
/// let url = build_search_url("https://hqporn.xxx", "hot tub", 1);
/// assert_eq!(url, "https://hqporn.xxx/search/hot%20tub/");
/// ```
pub fn build_search_url(origin: &str, query: &str, page: u32) -> String {
    let encoded = urlencoding::encode(query);
    if page == 1 {
        format!("{}/search/{}/", origin, encoded)
    } else {
        format!("{}/search/{}/{}/", origin, encoded, page)
    }
}

/// Builds the URL of a category, channel or pornstar index page
///
/// Returns `None` for [`ListingKind::Video`], which has no index of its own.
pub fn build_directory_url(origin: &str, kind: ListingKind, page: u32) -> Option<String> {
    let section = match kind {
        ListingKind::Video => return None,
        ListingKind::Category => "categories",
        ListingKind::Channel => "channels",
        ListingKind::Pornstar => "pornstars",
    };

    let url = match (kind, page) {
        (_, 1) => format!("{}/{}/", origin, section),
        // categories paginate without a trailing slash
        (ListingKind::Category, page) => format!("{}/{}/{}", origin, section, page),
        (_, page) => format!("{}/{}/{}/", origin, section, page),
    };
    Some(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ORIGIN: &str = "https://hqporn.xxx";

    #[test]
    fn test_resolve_relative() {
        assert_eq!(
            resolve(Some("/categories/5/"), ORIGIN),
            Some("https://hqporn.xxx/categories/5/".to_string())
        );
    }

    #[test]
    fn test_resolve_absolute_unchanged() {
        assert_eq!(
            resolve(Some("https://other.com/x"), ORIGIN),
            Some("https://other.com/x".to_string())
        );
    }

    #[test]
    fn test_resolve_other_schemes_unchanged() {
        assert_eq!(
            resolve(Some("javascript:void(0)"), ORIGIN),
            Some("javascript:void(0)".to_string())
        );
    }

    #[test]
    fn test_resolve_none() {
        assert_eq!(resolve(None, ORIGIN), None);
    }

    #[test]
    fn test_normalize_origin() {
        assert_eq!(normalize_origin("https://hqporn.xxx/"), ORIGIN);
        assert_eq!(normalize_origin(" https://hqporn.xxx// "), ORIGIN);
        assert_eq!(normalize_origin(ORIGIN), ORIGIN);
    }

    #[test]
    fn test_build_section_url_first_page() {
        assert_eq!(
            build_section_url(ORIGIN, VideoSection::Fresh, 1),
            "https://hqporn.xxx/fresh/"
        );
        assert_eq!(
            build_section_url(ORIGIN, VideoSection::Best, 1),
            "https://hqporn.xxx/best/"
        );
    }

    #[test]
    fn test_build_section_url_later_page() {
        assert_eq!(
            build_section_url(ORIGIN, VideoSection::Fresh, 3),
            "https://hqporn.xxx/fresh/3/"
        );
    }

    #[test]
    fn test_build_section_url_trend() {
        assert_eq!(
            build_section_url(ORIGIN, VideoSection::Trend, 1),
            "https://hqporn.xxx/trend/1"
        );
        assert_eq!(
            build_section_url(ORIGIN, VideoSection::Trend, 7),
            "https://hqporn.xxx/trend/7"
        );
    }

    #[test]
    fn test_build_search_url() {
        assert_eq!(
            build_search_url(ORIGIN, "beach", 1),
            "https://hqporn.xxx/search/beach/"
        );
        assert_eq!(
            build_search_url(ORIGIN, "hot tub", 2),
            "https://hqporn.xxx/search/hot%20tub/2/"
        );
    }

    #[test]
    fn test_build_directory_url() {
        assert_eq!(
            build_directory_url(ORIGIN, ListingKind::Category, 1).as_deref(),
            Some("https://hqporn.xxx/categories/")
        );
        assert_eq!(
            build_directory_url(ORIGIN, ListingKind::Category, 2).as_deref(),
            Some("https://hqporn.xxx/categories/2")
        );
        assert_eq!(
            build_directory_url(ORIGIN, ListingKind::Channel, 2).as_deref(),
            Some("https://hqporn.xxx/channels/2/")
        );
        assert_eq!(
            build_directory_url(ORIGIN, ListingKind::Pornstar, 1).as_deref(),
            Some("https://hqporn.xxx/pornstars/")
        );
        assert_eq!(
            build_directory_url(ORIGIN, ListingKind::Pornstar, 4).as_deref(),
            Some("https://hqporn.xxx/pornstars/4/")
        );
        assert_eq!(build_directory_url(ORIGIN, ListingKind::Video, 1), None);
    }

    proptest! {
        #[test]
        fn prop_relative_paths_get_origin(path in "/[a-z0-9_./-]{0,40}") {
            prop_assert_eq!(resolve(Some(&path), ORIGIN), Some(format!("{}{}", ORIGIN, path)));
        }

        #[test]
        fn prop_absolute_urls_unchanged(url in "https?://[a-z]{1,12}\\.(com|net|xxx)/[a-z0-9_/-]{0,30}") {
            prop_assert_eq!(resolve(Some(&url), ORIGIN), Some(url.clone()));
        }
    }
}
