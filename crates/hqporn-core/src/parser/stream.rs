//! Video page parser
//!
//! Extracts playable sources, poster and scrubbing sprites from the HTML5
//! player of a single video page.

use std::collections::HashSet;

use scraper::{ElementRef, Html};
use tracing::{debug, warn};

use super::dom::{attr, find_first, selector};
use crate::error::Result;
use crate::types::{NO_DIRECT_SOURCE, PLAYER_NOT_FOUND, StreamDescriptor, StreamSource};

const PLAYER_VIDEO: &str = "video#video_html5_api";
const PLAYER_CONTAINER: &str = "div.b-video-player";

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Parses a video page into a [`StreamDescriptor`]
///
/// The player `<video>` is looked up by its id first, then inside the player
/// container. When neither exists the descriptor carries the
/// [`PLAYER_NOT_FOUND`] diagnostic. A player without any source URL is not an
/// error either: its descriptor carries [`NO_DIRECT_SOURCE`] because such
/// pages load their sources from script.
///
/// # Arguments
/// * `html` - Raw HTML of the video page
/// * `page_url` - URL the page was fetched from, copied into the result
///
/// # Errors
/// Returns `ParseError` only if an internal selector fails to compile
pub fn extract_stream(html: &str, page_url: &str) -> Result<StreamDescriptor> {
    let document = Html::parse_document(html);
    let mut descriptor = StreamDescriptor::new(page_url);

    let Some(video) = find_player(&document)? else {
        warn!(page_url, "video player element not found");
        descriptor.diagnostic = Some(PLAYER_NOT_FOUND.to_string());
        return Ok(descriptor);
    };

    descriptor.primary_source = attr(video, "src").map(str::to_string);
    descriptor.sources = collect_sources(video, descriptor.primary_source.as_deref())?;
    descriptor.poster_image = attr(video, "poster").map(str::to_string);
    descriptor.sprite_preview_urls = attr(video, "data-preview")
        .map(split_sprites)
        .unwrap_or_default();

    if descriptor.sources.is_empty() && descriptor.primary_source.is_none() {
        warn!(page_url, "player has no direct source");
        descriptor.diagnostic = Some(NO_DIRECT_SOURCE.to_string());
    }

    Ok(descriptor)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Locates the player `<video>` element
fn find_player(document: &Html) -> Result<Option<ElementRef<'_>>> {
    let by_id = selector(PLAYER_VIDEO)?;
    if let Some(video) = document.select(&by_id).next() {
        return Ok(Some(video));
    }

    let container = selector(PLAYER_CONTAINER)?;
    let video = selector("video")?;
    Ok(document
        .select(&container)
        .next()
        .and_then(|player| find_first(player, &video)))
}

/// Builds the URL-unique source list of a player
///
/// The element's own `src` comes first unless a `<source>` child carries the
/// same URL, in which case the child's richer entry is kept instead.
fn collect_sources(video: ElementRef<'_>, primary: Option<&str>) -> Result<Vec<StreamSource>> {
    let source_selector = selector("source[src]")?;

    let children: Vec<StreamSource> = video
        .select(&source_selector)
        .filter_map(|source| {
            let url = attr(source, "src")?.to_string();
            Some(StreamSource {
                url,
                mime_type: attr(source, "type").map(str::to_string),
                quality_label: attr(source, "size")
                    .or_else(|| attr(source, "label"))
                    .or_else(|| attr(source, "res"))
                    .map(str::to_string),
            })
        })
        .collect();

    let mut seen: HashSet<String> = HashSet::new();
    let mut sources = Vec::with_capacity(children.len() + 1);

    if let Some(primary) = primary
        && !children.iter().any(|child| child.url == primary)
    {
        seen.insert(primary.to_string());
        sources.push(StreamSource {
            url: primary.to_string(),
            mime_type: Some(
                attr(video, "type")
                    .map(str::to_string)
                    .unwrap_or_else(|| guess_mime_type(primary).to_string()),
            ),
            quality_label: None,
        });
    }

    for child in children {
        if seen.insert(child.url.clone()) {
            sources.push(child);
        } else {
            debug!(url = %child.url, "skipping duplicate source");
        }
    }

    Ok(sources)
}

/// Splits a comma-separated sprite list, dropping blank segments
fn split_sprites(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|sprite| !sprite.is_empty())
        .map(str::to_string)
        .collect()
}

/// Guesses a MIME type from the URL path extension
fn guess_mime_type(url: &str) -> &'static str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let extension = path
        .rsplit('/')
        .next()
        .and_then(|file| file.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("m3u8") => "application/x-mpegURL",
        Some("mpd") => "application/dash+xml",
        Some("webm") => "video/webm",
        _ => "video/mp4",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const PAGE: &str = "https://hqporn.xxx/v/abc.html";

    #[test]
    fn test_direct_src_only() {
        let html = r#"<html><body>
            <video id="video_html5_api" src="https://cdn/x.mp4" poster="https://cdn/p.jpg"></video>
        </body></html>"#;

        let descriptor = extract_stream(html, PAGE).unwrap();

        assert_eq!(descriptor.page_url, PAGE);
        assert_eq!(descriptor.primary_source.as_deref(), Some("https://cdn/x.mp4"));
        assert_eq!(
            descriptor.sources,
            vec![StreamSource {
                url: "https://cdn/x.mp4".to_string(),
                mime_type: Some("video/mp4".to_string()),
                quality_label: None,
            }]
        );
        assert_eq!(descriptor.poster_image.as_deref(), Some("https://cdn/p.jpg"));
        assert!(descriptor.sprite_preview_urls.is_empty());
        assert_eq!(descriptor.diagnostic, None);
    }

    #[test]
    fn test_player_container_without_video() {
        let html = r#"<div class="b-video-player"><div class="poster"></div></div>"#;

        let descriptor = extract_stream(html, PAGE).unwrap();

        assert_eq!(descriptor.diagnostic.as_deref(), Some(PLAYER_NOT_FOUND));
        assert!(descriptor.is_player_missing());
        assert!(descriptor.sources.is_empty());
        assert_eq!(descriptor.primary_source, None);
        assert_eq!(descriptor.poster_image, None);
    }

    #[test]
    fn test_video_outside_player_is_ignored() {
        let html = r#"<div class="promo"><video src="https://cdn/ad.mp4"></video></div>"#;

        let descriptor = extract_stream(html, PAGE).unwrap();
        assert!(descriptor.is_player_missing());
    }

    #[test]
    fn test_video_in_player_container() {
        let html = r#"<div class="b-video-player">
            <video class="vjs-tech"><source src="https://cdn/720.mp4" type="video/mp4" size="720"></video>
        </div>"#;

        let descriptor = extract_stream(html, PAGE).unwrap();

        assert_eq!(descriptor.diagnostic, None);
        assert_eq!(descriptor.sources.len(), 1);
        assert_eq!(descriptor.sources[0].quality_label.as_deref(), Some("720"));
    }

    #[test]
    fn test_script_loaded_player() {
        let html = r#"<video id="video_html5_api" poster="https://cdn/p.jpg"></video>"#;

        let descriptor = extract_stream(html, PAGE).unwrap();

        assert!(descriptor.sources.is_empty());
        assert_eq!(descriptor.primary_source, None);
        assert_eq!(descriptor.diagnostic.as_deref(), Some(NO_DIRECT_SOURCE));
        assert!(!descriptor.is_player_missing());
        assert_eq!(descriptor.poster_image.as_deref(), Some("https://cdn/p.jpg"));
    }

    #[test]
    fn test_sources_are_deduplicated_in_order() {
        let html = r#"<video id="video_html5_api" src="https://cdn/1080.mp4">
            <source src="https://cdn/720.mp4" type="video/mp4" size="720">
            <source src="https://cdn/480.mp4" type="video/mp4" label="480p">
            <source src="https://cdn/720.mp4" type="video/mp4" size="720">
            <source type="video/mp4">
        </video>"#;

        let descriptor = extract_stream(html, PAGE).unwrap();
        let urls: Vec<&str> = descriptor.sources.iter().map(|s| s.url.as_str()).collect();

        assert_eq!(
            urls,
            vec!["https://cdn/1080.mp4", "https://cdn/720.mp4", "https://cdn/480.mp4"]
        );
        assert_eq!(descriptor.sources[2].quality_label.as_deref(), Some("480p"));
    }

    #[test]
    fn test_primary_repeated_by_child_keeps_child_entry() {
        let html = r#"<video id="video_html5_api" src="https://cdn/720.mp4">
            <source src="https://cdn/1080.mp4" type="video/mp4" size="1080">
            <source src="https://cdn/720.mp4" type="video/mp4" size="720">
        </video>"#;

        let descriptor = extract_stream(html, PAGE).unwrap();

        assert_eq!(descriptor.primary_source.as_deref(), Some("https://cdn/720.mp4"));
        assert_eq!(descriptor.sources.len(), 2);
        assert_eq!(descriptor.sources[1].url, "https://cdn/720.mp4");
        assert_eq!(descriptor.sources[1].quality_label.as_deref(), Some("720"));
    }

    #[test]
    fn test_sprite_previews() {
        let html = r#"<video id="video_html5_api" src="https://cdn/x.mp4"
            data-preview=" https://cdn/s1.jpg, ,https://cdn/s2.jpg ,"></video>"#;

        let descriptor = extract_stream(html, PAGE).unwrap();

        assert_eq!(
            descriptor.sprite_preview_urls,
            vec!["https://cdn/s1.jpg".to_string(), "https://cdn/s2.jpg".to_string()]
        );
    }

    #[test]
    fn test_primary_type_attribute_wins() {
        let html = r#"<video id="video_html5_api" src="https://cdn/stream" type="application/x-mpegURL"></video>"#;

        let descriptor = extract_stream(html, PAGE).unwrap();
        assert_eq!(
            descriptor.sources[0].mime_type.as_deref(),
            Some("application/x-mpegURL")
        );
    }

    #[test]
    fn test_guess_mime_type() {
        assert_eq!(guess_mime_type("https://cdn/x.mp4"), "video/mp4");
        assert_eq!(guess_mime_type("https://cdn/hls/master.M3U8?token=1"), "application/x-mpegURL");
        assert_eq!(guess_mime_type("https://cdn/dash/manifest.mpd"), "application/dash+xml");
        assert_eq!(guess_mime_type("https://cdn/x.webm#t=3"), "video/webm");
        assert_eq!(guess_mime_type("https://cdn.example/stream"), "video/mp4");
    }

    #[test]
    fn test_split_sprites() {
        assert_eq!(split_sprites("a.jpg,b.jpg"), vec!["a.jpg", "b.jpg"]);
        assert!(split_sprites(" , ,").is_empty());
    }

    fn url_strategy() -> impl Strategy<Value = String> {
        prop::sample::select(vec![
            "https://cdn/a.mp4",
            "https://cdn/b.mp4",
            "https://cdn/c.m3u8",
            "https://cdn/d.webm",
        ])
        .prop_map(str::to_string)
    }

    proptest! {
        #[test]
        fn prop_sources_unique_and_contain_primary(
            primary in proptest::option::of(url_strategy()),
            children in prop::collection::vec(url_strategy(), 0..6),
        ) {
            let src = primary
                .as_ref()
                .map(|url| format!(r#" src="{}""#, url))
                .unwrap_or_default();
            let sources: String = children
                .iter()
                .map(|url| format!(r#"<source src="{}" type="video/mp4">"#, url))
                .collect();
            let html = format!(r#"<video id="video_html5_api"{}>{}</video>"#, src, sources);

            let descriptor = extract_stream(&html, PAGE).unwrap();

            let unique: HashSet<&str> = descriptor.sources.iter().map(|s| s.url.as_str()).collect();
            prop_assert_eq!(unique.len(), descriptor.sources.len());

            if let Some(primary) = &descriptor.primary_source {
                prop_assert!(descriptor.sources.iter().any(|s| &s.url == primary));
            }
            prop_assert_eq!(descriptor.diagnostic.is_some(), primary.is_none() && children.is_empty());
        }
    }
}
