//! Browser utilities.
//!
//! Provides:
//! - [`dom`] - Element lookup, link resolution, item keys
//! - [`WebSource`] - Fetch API transport with optional timeout
//! - [`TimeoutScheduler`] - `setTimeout`-backed debounce scheduler

pub mod dom;
mod fetch;
mod timer;

pub use fetch::{RaceResult, WebSource, race_with_timeout};
pub use timer::TimeoutScheduler;
