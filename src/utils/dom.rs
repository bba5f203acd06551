//! DOM and Web API utility functions.
//!
//! Provides safe, consistent access to browser APIs with proper error handling.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlAnchorElement, HtmlElement, Window};

use crate::config::{DIRECTION_ATTR, DISABLED_CLASS, FLIP_ID_ATTR};

/// Get the browser window object.
#[inline]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Get the current document.
#[inline]
pub fn document() -> Option<Document> {
    window()?.document()
}

/// First descendant of `root` matching `selector`.
pub fn query(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

/// Every descendant of `root` matching `selector`, in document order.
pub fn query_all(root: &Element, selector: &str) -> Vec<Element> {
    let Ok(nodes) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Direct element children of `parent`, in document order.
pub fn children(parent: &Element) -> Vec<Element> {
    let collection = parent.children();
    (0..collection.length())
        .filter_map(|index| collection.item(index))
        .collect()
}

/// Show or hide an element through its inline `display`.
pub fn set_displayed(element: &HtmlElement, displayed: bool) {
    let value = if displayed { "block" } else { "none" };
    let _ = element.style().set_property("display", value);
}

// =============================================================================
// List Items
// =============================================================================

/// Stable key of a list item: its `id`, else its `data-flip-id`.
pub fn item_key(element: &Element) -> Option<String> {
    let id = element.id();
    if !id.is_empty() {
        return Some(id);
    }
    element
        .get_attribute(FLIP_ID_ATTR)
        .filter(|key| !key.is_empty())
}

// =============================================================================
// Links
// =============================================================================

/// Icon and label wrappers inside sort links.
fn is_link_decoration(tag_name: &str) -> bool {
    tag_name.eq_ignore_ascii_case("i") || tag_name.eq_ignore_ascii_case("span")
}

fn closest(element: &Element, selector: &str) -> Option<Element> {
    element.closest(selector).ok().flatten()
}

/// The link a click on `target` refers to.
///
/// Icon/text children resolve to the nearest ancestor carrying
/// `direction`, anything else to the nearest anchor. Links marked
/// `disabled` resolve to nothing.
pub fn resolve_link(target: &Element) -> Option<Element> {
    if target.class_list().contains(DISABLED_CLASS) {
        return None;
    }
    let link = if is_link_decoration(&target.tag_name()) {
        closest(target, &format!("[{DIRECTION_ATTR}]")).or_else(|| closest(target, "a"))
    } else {
        closest(target, "a")
    }?;
    if link.class_list().contains(DISABLED_CLASS) {
        return None;
    }
    Some(link)
}

/// Absolute `href` of the link a click on `target` refers to.
pub fn link_href(target: &Element) -> Option<String> {
    let link = resolve_link(target)?;
    let href = match link.dyn_ref::<HtmlAnchorElement>() {
        Some(anchor) => anchor.href(),
        None => link.get_attribute("href")?,
    };
    (!href.is_empty()).then_some(href)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_decorations() {
        assert!(is_link_decoration("I"));
        assert!(is_link_decoration("SPAN"));
        assert!(is_link_decoration("span"));
        assert!(!is_link_decoration("A"));
        assert!(!is_link_decoration("svg"));
    }
}
