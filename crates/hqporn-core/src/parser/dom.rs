//! Small typed query layer over `scraper`
//!
//! Every lookup returns an `Option`, so a missing element or attribute is a
//! value to match on rather than a failure to guard against.

use scraper::{ElementRef, Selector};

use crate::error::{HqpornError, Result};

/// Compiles a CSS selector
pub(crate) fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| HqpornError::ParseError(format!("Invalid selector {:?}: {:?}", css, e)))
}

/// First descendant of `scope` matching `selector`
pub(crate) fn find_first<'a>(scope: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    scope.select(selector).next()
}

/// Attribute value, trimmed; `None` when missing or blank
pub(crate) fn attr<'a>(element: ElementRef<'a>, name: &str) -> Option<&'a str> {
    element
        .value()
        .attr(name)
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Attribute value exactly as written; `None` when missing or empty
pub(crate) fn raw_attr<'a>(element: ElementRef<'a>, name: &str) -> Option<&'a str> {
    element.value().attr(name).filter(|value| !value.is_empty())
}

/// Text content with whitespace runs collapsed and ends trimmed
pub(crate) fn text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text content, `None` when blank
pub(crate) fn non_empty_text(element: ElementRef<'_>) -> Option<String> {
    let text = text(element);
    (!text.is_empty()).then_some(text)
}

pub(crate) fn has_class(element: ElementRef<'_>, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}
