//! "Load more" control used in incremental navigation mode.
//!
//! The control is mounted into the pagination region and driven through
//! [`LoadMoreSignals`]; the widget owns the click handling.

use leptos::prelude::*;
use web_sys::HtmlElement;

use crate::config::{LOAD_MORE_BUTTON_CLASS, LOAD_MORE_WRAPPER_CLASS};

/// Reactive state of the control.
#[derive(Clone, Copy, Debug)]
pub struct LoadMoreSignals {
    /// Hidden once the last page is shown.
    pub visible: RwSignal<bool>,
    /// Disabled while a page is loading.
    pub enabled: RwSignal<bool>,
}

impl LoadMoreSignals {
    pub fn new() -> Self {
        Self {
            visible: RwSignal::new(true),
            enabled: RwSignal::new(true),
        }
    }
}

impl Default for LoadMoreSignals {
    fn default() -> Self {
        Self::new()
    }
}

#[component]
pub fn LoadMoreButton(label: String, signals: LoadMoreSignals) -> impl IntoView {
    let display = move || if signals.visible.get() { "block" } else { "none" };

    view! {
        <div class=LOAD_MORE_WRAPPER_CLASS style:display=display>
            <button
                type="button"
                class=LOAD_MORE_BUTTON_CLASS
                disabled=move || !signals.enabled.get()
            >
                {label}
            </button>
        </div>
    }
}

/// Replace the contents of `region` with the control.
pub fn mount_load_more(region: HtmlElement, label: String) -> LoadMoreSignals {
    let signals = LoadMoreSignals::new();
    region.set_inner_html("");
    leptos::mount::mount_to(region, move || {
        view! { <LoadMoreButton label=label.clone() signals=signals /> }
    })
    .forget();
    signals
}
