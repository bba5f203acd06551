//! Leptos components mounted by the widget.

mod load_more;

pub use load_more::{LoadMoreButton, LoadMoreSignals, mount_load_more};
