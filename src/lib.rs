//! Asynchronous article list filter for server-rendered listing pages.
//!
//! Every `.js-filter` root on the page gets a widget that re-fetches the
//! list as fragments, animates the update and keeps the address bar in sync.
//! The request cycle itself lives in `article-filter-core`; this crate is the
//! browser side:
//! - [`widget`] - DOM binding, events, animated rendering
//! - [`components`] - Leptos "load more" control
//! - [`utils`] - Fetch transport, timers, DOM helpers
//! - [`logging`] - `tracing` output to the browser console

pub mod components;
pub mod config;
pub mod logging;
pub mod utils;
pub mod widget;

use wasm_bindgen::prelude::*;

/// Entry point: installs panic and log hooks, then binds every widget.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    logging::init();
    widget::mount_all();
}
