//! CSS transitions for list updates.
//!
//! Every transition is an inline `transition` on `opacity`/`transform`: the
//! start state is applied with transitions off, layout is forced, then the
//! end state is applied with the configured duration and easing.

use article_filter_core::{AnimationConfig, Bounds, ItemSnapshot, ListSurface, Transitioner};
use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::utils::dom;

/// Marks exiting items re-attached for their fade-out.
const EXITING_ATTR: &str = "data-filter-exiting";

/// Extra time before inline transition styles are cleaned up.
const CLEANUP_GRACE_MS: u32 = 50;

// =============================================================================
// DomList
// =============================================================================

/// The list container as a [`ListSurface`].
pub struct DomList {
    container: HtmlElement,
}

impl DomList {
    pub fn new(container: HtmlElement) -> Self {
        Self { container }
    }
}

impl ListSurface for DomList {
    type Element = HtmlElement;

    fn snapshot(&self) -> Vec<ItemSnapshot<HtmlElement>> {
        let origin = self.container.get_bounding_client_rect();
        dom::children(&self.container)
            .into_iter()
            .filter(|child| !child.has_attribute(EXITING_ATTR))
            .filter_map(|child| child.dyn_into::<HtmlElement>().ok())
            .map(|element| {
                let rect = element.get_bounding_client_rect();
                ItemSnapshot {
                    key: dom::item_key(&element),
                    bounds: Bounds {
                        top: rect.top() - origin.top(),
                        left: rect.left() - origin.left(),
                        width: rect.width(),
                        height: rect.height(),
                    },
                    element,
                }
            })
            .collect()
    }

    fn replace(&self, html: &str) {
        self.container.set_inner_html(html);
    }

    fn append(&self, html: &str) {
        // Existing nodes stay in place, unlike `innerHTML +=`.
        let _ = self.container.insert_adjacent_html("beforeend", html);
    }
}

// =============================================================================
// CssTransitioner
// =============================================================================

/// Plays enter/exit/reposition transitions with inline styles.
pub struct CssTransitioner {
    container: HtmlElement,
    config: AnimationConfig,
}

impl CssTransitioner {
    pub fn new(container: HtmlElement, config: AnimationConfig) -> Self {
        Self { container, config }
    }

    fn transition(&self, delay_ms: u32) -> String {
        let AnimationConfig {
            duration_ms,
            easing,
            ..
        } = &self.config;
        format!(
            "opacity {duration_ms}ms {easing} {delay_ms}ms, transform {duration_ms}ms {easing} {delay_ms}ms"
        )
    }

    fn lift(&self) -> String {
        format!("translateY(-{}px)", self.config.offset_px)
    }

    /// Clear the inline transition once it has finished.
    fn clean_up_after(&self, element: &HtmlElement, delay_ms: u32) {
        let element = element.clone();
        let wait = self
            .config
            .duration_ms
            .saturating_add(delay_ms)
            .saturating_add(CLEANUP_GRACE_MS);
        Timeout::new(wait, move || {
            let style = element.style();
            let _ = style.remove_property("transition");
            let _ = style.remove_property("transform");
            let _ = style.remove_property("opacity");
        })
        .forget();
    }
}

/// Apply pending styles before the next change transitions from them.
fn force_layout(element: &HtmlElement) {
    let _ = element.offset_height();
}

fn set_style(element: &HtmlElement, property: &str, value: &str) {
    let _ = element.style().set_property(property, value);
}

impl Transitioner for CssTransitioner {
    type Element = HtmlElement;

    fn enter(&self, element: &HtmlElement, delay_ms: u32) {
        set_style(element, "transition", "none");
        set_style(element, "opacity", "0");
        set_style(element, "transform", &self.lift());
        force_layout(element);

        set_style(element, "transition", &self.transition(delay_ms));
        set_style(element, "opacity", "1");
        set_style(element, "transform", "translateY(0)");
        self.clean_up_after(element, delay_ms);
    }

    fn exit(&self, item: &ItemSnapshot<HtmlElement>) {
        let element = &item.element;
        // Still attached: the update kept this node.
        if element.is_connected() {
            return;
        }

        let style = self.container.style();
        if style.get_property_value("position").unwrap_or_default().is_empty() {
            let _ = style.set_property("position", "relative");
        }

        let Bounds {
            top,
            left,
            width,
            height,
        } = item.bounds;
        let _ = element.set_attribute(EXITING_ATTR, "");
        set_style(element, "transition", "none");
        set_style(element, "position", "absolute");
        set_style(element, "margin", "0");
        set_style(element, "top", &format!("{top}px"));
        set_style(element, "left", &format!("{left}px"));
        set_style(element, "width", &format!("{width}px"));
        set_style(element, "height", &format!("{height}px"));
        set_style(element, "pointer-events", "none");
        set_style(element, "opacity", "1");
        set_style(element, "transform", "translateY(0)");
        if self.container.append_child(element).is_err() {
            return;
        }
        force_layout(element);

        set_style(element, "transition", &self.transition(0));
        set_style(element, "opacity", "0");
        set_style(element, "transform", &self.lift());

        let element = element.clone();
        let wait = self.config.duration_ms.saturating_add(CLEANUP_GRACE_MS);
        Timeout::new(wait, move || {
            if element.is_connected() {
                element.remove();
            }
        })
        .forget();
    }

    fn reposition(&self, element: &HtmlElement, dx: f64, dy: f64) {
        set_style(element, "transition", "none");
        set_style(element, "transform", &format!("translate({dx}px, {dy}px)"));
        force_layout(element);

        set_style(
            element,
            "transition",
            &format!(
                "transform {}ms {}",
                self.config.duration_ms, self.config.easing
            ),
        );
        set_style(element, "transform", "translate(0px, 0px)");
        self.clean_up_after(element, 0);
    }
}
