//! Page contract and configuration loading.
//!
//! Centralizes the selectors, class names and attributes the widget relies
//! on, plus reading [`FilterConfig`] from the root element.

use article_filter_core::FilterConfig;
use tracing::warn;
use web_sys::Element;

// =============================================================================
// Regions
// =============================================================================

/// Widget roots. Every match gets its own independent widget.
pub const ROOT_SELECTOR: &str = ".js-filter";

/// List container whose children are the article cards.
pub const CONTENT_SELECTOR: &str = ".js-filter-content";

/// Filter form.
pub const FORM_SELECTOR: &str = ".js-filter-form";

/// Result count.
pub const COUNT_SELECTOR: &str = ".js-filter-count";

/// Sort links.
pub const SORTING_SELECTOR: &str = ".js-filter-sorting";

/// Pagination links, or the "load more" control in incremental mode.
pub const PAGINATION_SELECTOR: &str = ".js-filter-pagination";

/// Loader inside the form.
pub const LOADER_SELECTOR: &str = ".js-loading";

/// Reset control inside the form.
pub const RESET_SELECTOR: &str = "#btn-reset-form";

// =============================================================================
// Classes & Attributes
// =============================================================================

/// Class set on the form while a request is in flight.
pub const LOADING_CLASS: &str = "is-loading";

/// Links carrying this class are inert.
pub const DISABLED_CLASS: &str = "disabled";

/// Attribute marking sort anchors; icon/text children resolve to it.
pub const DIRECTION_ATTR: &str = "direction";

/// Item key fallback when a card has no `id`.
pub const FLIP_ID_ATTR: &str = "data-flip-id";

/// Optional JSON configuration on the root element.
pub const CONFIG_ATTR: &str = "data-filter-config";

/// Wrapper class of the "load more" control.
pub const LOAD_MORE_WRAPPER_CLASS: &str = "text-center";

/// Button classes of the "load more" control.
pub const LOAD_MORE_BUTTON_CLASS: &str = "btn btn-primary mt-2";

// =============================================================================
// Loading
// =============================================================================

/// Read the widget configuration from `root`.
///
/// A missing attribute yields the defaults; an invalid one is logged and
/// also yields the defaults.
pub fn load_config(root: &Element) -> FilterConfig {
    let Some(raw) = root.get_attribute(CONFIG_ATTR) else {
        return FilterConfig::default();
    };
    match FilterConfig::from_json(&raw) {
        Ok(config) => config,
        Err(err) => {
            warn!(error = %err, "invalid {CONFIG_ATTR}, using defaults");
            FilterConfig::default()
        }
    }
}
