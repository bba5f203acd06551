//! [`Browser`] over `window.location`, `history` and scrolling.

use article_filter_core::Browser;
use wasm_bindgen::JsValue;

use crate::utils::dom;

#[derive(Clone, Copy, Debug, Default)]
pub struct WindowBrowser;

impl Browser for WindowBrowser {
    fn current_url(&self) -> String {
        dom::window()
            .and_then(|w| w.location().href().ok())
            .unwrap_or_default()
    }

    fn replace_url(&self, url: &str) {
        if let Some(window) = dom::window()
            && let Ok(history) = window.history()
        {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(url));
        }
    }

    fn scroll_to_top(&self) {
        if let Some(window) = dom::window() {
            window.scroll_to_with_x_and_y(0.0, 0.0);
        }
    }
}
