//! Responsive thumbnail image extraction
//!
//! Reads `<picture>` markup into an [`ImageSet`].

use scraper::{ElementRef, Selector};

use super::dom::{attr, find_first, selector};
use crate::error::Result;
use crate::types::ImageSet;

/// Precompiled selectors for `<picture>` lookups
pub(crate) struct ImageSelectors {
    gallery_picture: Selector,
    picture: Selector,
    webp: Selector,
    jpeg: Selector,
    img: Selector,
}

impl ImageSelectors {
    pub(crate) fn new() -> Result<Self> {
        Ok(Self {
            gallery_picture: selector("picture.js-gallery-img")?,
            picture: selector("picture")?,
            webp: selector(r#"source[type="image/webp"]"#)?,
            jpeg: selector(r#"source[type="image/jpeg"]"#)?,
            img: selector("img")?,
        })
    }
}

/// Extracts the image set of one thumbnail item
///
/// With `prefer_gallery` the `<picture class="js-gallery-img">` is used when
/// present; otherwise, and as fallback, the first `<picture>` in the item.
/// A missing picture or sub-element leaves the matching field empty.
pub(crate) fn extract_image_set(
    item: ElementRef<'_>,
    selectors: &ImageSelectors,
    prefer_gallery: bool,
) -> ImageSet {
    let picture = prefer_gallery
        .then(|| find_first(item, &selectors.gallery_picture))
        .flatten()
        .or_else(|| find_first(item, &selectors.picture));

    let Some(picture) = picture else {
        return ImageSet::default();
    };

    let srcset = |source: &Selector| {
        find_first(picture, source)
            .and_then(|el| attr(el, "srcset"))
            .map(str::to_string)
    };

    let lazy_source = find_first(picture, &selectors.img)
        .and_then(|img| attr(img, "data-src").or_else(|| attr(img, "src")))
        .map(str::to_string);

    ImageSet {
        lazy_source,
        jpeg_srcset: srcset(&selectors.jpeg),
        webp_srcset: srcset(&selectors.webp),
    }
}
