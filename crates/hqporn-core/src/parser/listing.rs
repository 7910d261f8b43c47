//! Listing page parser
//!
//! Turns thumbnail grids (video feeds, search results, category, channel and
//! pornstar indexes) into typed records. One extractor serves every section;
//! the differences between sections live in a selector profile table.

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, warn};

use super::dom::{attr, find_first, has_class, non_empty_text, raw_attr, selector};
use super::image::{ImageSelectors, extract_image_set};
use crate::error::Result;
use crate::types::{DirectoryEntry, ListingKind, ListingRecord, Tag, VideoListingEntry};
use crate::url::resolve;

/// Class of sponsored/decoy thumbnails mixed into video grids
const AD_MARKER: &str = "random-thumb";

const TITLE: &str = "div.b-thumb-item__title";
const DURATION: &str = "div.b-thumb-item__duration span";
const DETAIL_LINKS: &str = "div.b-thumb-item__detail a";
const GALLERY_LIST: &str = "div.js-gallery-list";
const NO_RESULTS: &str = "div.b-catalog-info-descr";
const LISTING_MARKERS: &str = "div#galleries, div.b-thumb-item";

/// Video thumbnails anywhere on a page, minus the directory item shapes
const LOOSE_VIDEO_ITEM: &str =
    "div.b-thumb-item:not(.b-thumb-item--cat):not(.b-thumb-item--star)";

/// Where a record's display name comes from
#[derive(Debug, Clone, Copy)]
enum NameRule {
    /// Title element text, else the link's `title` attribute
    TitleThenAttribute,
    /// Whichever of link `title` and title element text is longer
    Longer,
    /// `<span>` inside the title element, else the link's `title`
    SpanPreferred,
    /// Link `title`, else the title element text
    AttributeThenTitle,
}

/// Markup that identifies one listing kind
#[derive(Debug)]
struct SelectorProfile {
    container: &'static str,
    item: &'static str,
    link: &'static str,
    /// Tried only when no `link` anchor exists in the item
    link_fallback: Option<&'static str>,
    id_attr: &'static str,
    name_rule: NameRule,
}

static VIDEO_PROFILE: SelectorProfile = SelectorProfile {
    container: "div#galleries.js-gallery-list",
    item: "div.b-thumb-item",
    link: "a.js-gallery-link",
    link_fallback: Some("a.js-gallery-stats"),
    id_attr: "data-gallery-id",
    name_rule: NameRule::TitleThenAttribute,
};

static CATEGORY_PROFILE: SelectorProfile = SelectorProfile {
    container: "div#galleries.js-category-list",
    item: "div.b-thumb-item--cat",
    link: "a.js-category-stats",
    link_fallback: None,
    id_attr: "data-category-id",
    name_rule: NameRule::Longer,
};

// channels reuse the category item shape
static CHANNEL_PROFILE: SelectorProfile = SelectorProfile {
    container: "div#galleries.js-channel-list",
    item: "div.b-thumb-item--cat",
    link: "a.js-channel-stats",
    link_fallback: None,
    id_attr: "data-channel-id",
    name_rule: NameRule::SpanPreferred,
};

static PORNSTAR_PROFILE: SelectorProfile = SelectorProfile {
    container: "div#galleries.js-pornstar-list",
    item: "div.b-thumb-item--star",
    link: "a.js-pornstar-stats",
    link_fallback: None,
    id_attr: "data-pornstar-id",
    name_rule: NameRule::AttributeThenTitle,
};

fn profile(kind: ListingKind) -> &'static SelectorProfile {
    match kind {
        ListingKind::Video => &VIDEO_PROFILE,
        ListingKind::Category => &CATEGORY_PROFILE,
        ListingKind::Channel => &CHANNEL_PROFILE,
        ListingKind::Pornstar => &PORNSTAR_PROFILE,
    }
}

/// Selectors used inside a single item, compiled once per page
struct ItemSelectors {
    link: Selector,
    link_fallback: Option<Selector>,
    title: Selector,
    title_span: Selector,
    duration: Selector,
    detail_links: Selector,
    images: ImageSelectors,
}

impl ItemSelectors {
    fn compile(profile: &SelectorProfile) -> Result<Self> {
        Ok(Self {
            link: selector(profile.link)?,
            link_fallback: profile.link_fallback.map(selector).transpose()?,
            title: selector(TITLE)?,
            title_span: selector(&format!("{} span", TITLE))?,
            duration: selector(DURATION)?,
            detail_links: selector(DETAIL_LINKS)?,
            images: ImageSelectors::new()?,
        })
    }

    /// The item's main anchor, honouring the profile's fallback order
    fn link<'a>(&self, item: ElementRef<'a>) -> Option<ElementRef<'a>> {
        find_first(item, &self.link).or_else(|| {
            self.link_fallback
                .as_ref()
                .and_then(|fallback| find_first(item, fallback))
        })
    }
}

/// Parses a listing page into records of the requested kind
///
/// A page without the kind's container (end of pagination, interstitial,
/// captcha) yields an empty list, as does a container without valid items.
/// Items that fail the validity gate are skipped and logged.
///
/// # Arguments
/// * `html` - Raw HTML of the listing page
/// * `origin` - Site origin used to resolve relative links
/// * `kind` - Which section markup to expect
///
/// # Errors
/// Returns `ParseError` only if an internal selector fails to compile
pub fn extract_listing(html: &str, origin: &str, kind: ListingKind) -> Result<Vec<ListingRecord>> {
    let profile = profile(kind);
    let selectors = ItemSelectors::compile(profile)?;
    let container_selector = selector(profile.container)?;
    let item_selector = selector(profile.item)?;

    let document = Html::parse_document(html);

    let Some(container) = document.select(&container_selector).next() else {
        warn!(?kind, "listing container not found, treating page as empty");
        if kind != ListingKind::Video
            && document.select(&selector(GALLERY_LIST)?).next().is_some()
        {
            info!(?kind, "found a video gallery list instead, likely past the last page");
        }
        return Ok(Vec::new());
    };

    let records: Vec<ListingRecord> = container
        .select(&item_selector)
        .filter_map(|item| parse_item(item, kind, profile, &selectors, origin))
        .collect();

    if records.is_empty() {
        info!(?kind, "listing container holds no valid items");
    }

    Ok(records)
}

/// Parses a video listing page into video entries
pub fn extract_videos(html: &str, origin: &str) -> Result<Vec<VideoListingEntry>> {
    Ok(extract_listing(html, origin, ListingKind::Video)?
        .into_iter()
        .filter_map(ListingRecord::into_video)
        .collect())
}

/// Parses a category, channel or pornstar index into directory entries
///
/// Passing [`ListingKind::Video`] yields an empty list.
pub fn extract_directory(html: &str, origin: &str, kind: ListingKind) -> Result<Vec<DirectoryEntry>> {
    Ok(extract_listing(html, origin, kind)?
        .into_iter()
        .filter_map(ListingRecord::into_directory)
        .collect())
}

/// Parses every video thumbnail on an arbitrary page
///
/// Unlike [`extract_videos`] this does not require the gallery list
/// container, so it works on any page that embeds video thumbnails
/// (related videos, tag pages, model pages).
pub fn extract_video_thumbs(html: &str, origin: &str) -> Result<Vec<VideoListingEntry>> {
    let selectors = ItemSelectors::compile(&VIDEO_PROFILE)?;
    let item_selector = selector(LOOSE_VIDEO_ITEM)?;

    let document = Html::parse_document(html);

    Ok(document
        .select(&item_selector)
        .filter(|item| !is_ad(*item))
        .filter_map(|item| parse_video_item(item, &selectors, origin))
        .collect())
}

/// True when a search page carries the site's "no results found" notice
///
/// Such pages may still render a recommendation gallery that must not be
/// mistaken for search hits.
pub fn has_no_results_notice(html: &str) -> Result<bool> {
    let notice = selector(NO_RESULTS)?;
    let document = Html::parse_document(html);

    Ok(document
        .select(&notice)
        .filter_map(non_empty_text)
        .any(|text| text.to_lowercase().contains("no results found")))
}

/// True when a page carries a video gallery or at least one thumbnail item
///
/// Tells a page that simply lists nothing apart from one that is not a
/// listing at all (login wall, error page, wrong URL).
pub fn is_video_listing_page(html: &str) -> Result<bool> {
    let markers = selector(LISTING_MARKERS)?;
    let document = Html::parse_document(html);

    Ok(document.select(&markers).next().is_some())
}

fn is_ad(item: ElementRef<'_>) -> bool {
    has_class(item, AD_MARKER)
}

fn parse_item(
    item: ElementRef<'_>,
    kind: ListingKind,
    profile: &SelectorProfile,
    selectors: &ItemSelectors,
    origin: &str,
) -> Option<ListingRecord> {
    match kind {
        ListingKind::Video => {
            if is_ad(item) {
                debug!("skipping sponsored thumbnail");
                return None;
            }
            parse_video_item(item, selectors, origin).map(ListingRecord::Video)
        }
        ListingKind::Category => {
            parse_directory_item(item, profile, selectors, origin).map(ListingRecord::Category)
        }
        ListingKind::Channel => {
            parse_directory_item(item, profile, selectors, origin).map(ListingRecord::Channel)
        }
        ListingKind::Pornstar => {
            parse_directory_item(item, profile, selectors, origin).map(ListingRecord::Pornstar)
        }
    }
}

/// Parses a single video thumbnail
///
/// # Returns
/// `Some(VideoListingEntry)` if the item has a link or a title, `None` otherwise
fn parse_video_item(
    item: ElementRef<'_>,
    selectors: &ItemSelectors,
    origin: &str,
) -> Option<VideoListingEntry> {
    let link = selectors.link(item);

    let page_url = link.and_then(|a| resolve(attr(a, "href"), origin));
    let raw_title_attribute = link.and_then(|a| raw_attr(a, "title")).map(str::to_string);

    let title = name_for(
        VIDEO_PROFILE.name_rule,
        link.and_then(|a| attr(a, "title")),
        item,
        selectors,
    );

    if page_url.is_none() && title.is_none() {
        debug!("skipping video item without link and title");
        return None;
    }

    let duration = find_first(item, &selectors.duration).and_then(non_empty_text);

    let tags = item
        .select(&selectors.detail_links)
        .filter_map(|a| {
            let url = resolve(attr(a, "href"), origin)?;
            let name = non_empty_text(a)?;
            Some(Tag { name, url })
        })
        .collect();

    Some(VideoListingEntry {
        page_url,
        gallery_id: link
            .and_then(|a| attr(a, VIDEO_PROFILE.id_attr))
            .map(str::to_string),
        thumb_id: link.and_then(|a| attr(a, "data-thumb-id")).map(str::to_string),
        // left as emitted; the player resolves it itself
        preview_video_url: link
            .and_then(|a| raw_attr(a, "data-preview"))
            .map(str::to_string),
        title,
        raw_title_attribute,
        images: extract_image_set(item, &selectors.images, true),
        duration,
        tags,
    })
}

/// Parses a category, channel or pornstar thumbnail
///
/// # Returns
/// `Some(DirectoryEntry)` if both link and display name are present
fn parse_directory_item(
    item: ElementRef<'_>,
    profile: &SelectorProfile,
    selectors: &ItemSelectors,
    origin: &str,
) -> Option<DirectoryEntry> {
    let link = selectors.link(item);

    let page_url = link.and_then(|a| resolve(attr(a, "href"), origin));
    let id = link.and_then(|a| attr(a, profile.id_attr)).map(str::to_string);
    let display_name = name_for(
        profile.name_rule,
        link.and_then(|a| attr(a, "title")),
        item,
        selectors,
    );

    let (Some(page_url), Some(display_name)) = (page_url, display_name) else {
        debug!(id = id.as_deref(), "skipping directory item without link or name");
        return None;
    };

    Some(DirectoryEntry {
        page_url,
        id,
        display_name,
        images: extract_image_set(item, &selectors.images, false),
    })
}

/// Picks the display name of an item according to `rule`
fn name_for(
    rule: NameRule,
    link_title: Option<&str>,
    item: ElementRef<'_>,
    selectors: &ItemSelectors,
) -> Option<String> {
    let link_title = link_title.map(str::to_string);
    let title_text = || find_first(item, &selectors.title).and_then(non_empty_text);

    match rule {
        NameRule::TitleThenAttribute => title_text().or(link_title),
        NameRule::AttributeThenTitle => link_title.or_else(title_text),
        NameRule::SpanPreferred => find_first(item, &selectors.title_span)
            .and_then(non_empty_text)
            .or(link_title),
        NameRule::Longer => match (link_title, title_text()) {
            (Some(from_link), Some(text)) if text.chars().count() > from_link.chars().count() => {
                Some(text)
            }
            (Some(from_link), _) => Some(from_link),
            (None, text) => text,
        },
    }
}
