//! Browser-independent core of the article list filter.
//!
//! This crate provides:
//! - [`query`] - Address-bar URL ⇄ path + parameters codec
//! - [`FilterState`], [`NavigationMode`] - Page/query state of one widget
//! - [`ListFetcher`] - Marked fragment requests and payload decoding
//! - [`correspondence`] - Keyed enter/exit/reposition planning for list updates
//! - [`PaginationController`] - Paged links vs. incremental "load more"
//! - [`Debouncer`], [`RequestSequencer`] - Input throttling and stale-response guard
//! - [`FormTriggers`] - Which form events start a cycle, and when
//! - [`FilterController`] - The cycle tying everything together
//!
//! DOM access, timers and the network are injected through traits so the
//! whole cycle runs under plain `cargo test`.

pub mod config;
pub mod controller;
pub mod correspondence;
pub mod debounce;
pub mod error;
pub mod fetcher;
pub mod form;
pub mod fragment;
pub mod pagination;
pub mod query;
pub mod sequence;
pub mod state;
pub mod triggers;

pub use config::{AnimationConfig, FilterConfig};
pub use controller::{Browser, CycleOutcome, FilterController, FilterView, Trigger};
pub use correspondence::{
    AnimationReport, Bounds, ItemSnapshot, ListSurface, Transitioner, render_animated,
};
pub use debounce::{Debouncer, Scheduler};
pub use error::{ConfigError, FetchError};
pub use fetcher::{FetchOutcome, HttpResponse, ListFetcher, ListSource};
pub use form::{FieldKind, FormField, ResetAction, collect_params};
pub use fragment::ListFragment;
pub use pagination::{PaginationController, PaginationUpdate};
pub use query::{ListUrl, QueryParams};
pub use sequence::{RequestSequencer, RequestTicket};
pub use state::{FilterState, NavigationMode};
pub use triggers::{Dispatch, FormAction, FormEvent, FormTriggers};
