//! Browser timers for debouncing.

use article_filter_core::Scheduler;
use gloo_timers::callback::Timeout;

/// [`Scheduler`] over `setTimeout`. Dropping the [`Timeout`] clears it.
#[derive(Clone, Copy, Debug, Default)]
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    type Handle = Timeout;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, task)
    }
}
