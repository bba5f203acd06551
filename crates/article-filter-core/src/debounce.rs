//! Trailing-edge debouncing over an injected timer.

use std::cell::RefCell;

/// Deferred execution of a task.
///
/// Dropping the returned handle must cancel the task if it has not run yet.
/// `gloo_timers::callback::Timeout` behaves exactly like that.
pub trait Scheduler {
    type Handle;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Self::Handle;
}

/// Runs only the last task triggered within a quiet window.
pub struct Debouncer<S: Scheduler> {
    scheduler: S,
    delay_ms: u32,
    pending: RefCell<Option<S::Handle>>,
}

impl<S: Scheduler> Debouncer<S> {
    pub fn new(scheduler: S, delay_ms: u32) -> Self {
        Self {
            scheduler,
            delay_ms,
            pending: RefCell::new(None),
        }
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    /// Schedule `task`, cancelling whatever was pending.
    pub fn trigger(&self, task: impl FnOnce() + 'static) {
        let handle = self.scheduler.schedule(self.delay_ms, Box::new(task));
        // The replaced handle is dropped after the borrow ends.
        let previous = self.pending.replace(Some(handle));
        drop(previous);
    }

    /// Drop the pending task, if any.
    pub fn cancel(&self) {
        let previous = self.pending.take();
        drop(previous);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    /// Manual clock: tasks run when `advance` passes their deadline.
    #[derive(Clone, Default)]
    struct ManualClock {
        now: Rc<Cell<u32>>,
        tasks: Rc<RefCell<Vec<(u32, Rc<Cell<bool>>, Option<Box<dyn FnOnce()>>)>>>,
    }

    struct Handle(Rc<Cell<bool>>);

    impl Drop for Handle {
        fn drop(&mut self) {
            self.0.set(true);
        }
    }

    impl ManualClock {
        fn advance(&self, ms: u32) {
            self.now.set(self.now.get() + ms);
            let now = self.now.get();
            let due: Vec<_> = self
                .tasks
                .borrow_mut()
                .iter_mut()
                .filter(|(deadline, cancelled, task)| {
                    *deadline <= now && !cancelled.get() && task.is_some()
                })
                .filter_map(|(_, _, task)| task.take())
                .collect();
            for task in due {
                task();
            }
        }
    }

    impl Scheduler for ManualClock {
        type Handle = Handle;

        fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Handle {
            let cancelled = Rc::new(Cell::new(false));
            self.tasks
                .borrow_mut()
                .push((self.now.get() + delay_ms, cancelled.clone(), Some(task)));
            Handle(cancelled)
        }
    }

    #[test]
    fn test_only_last_trigger_runs() {
        let clock = ManualClock::default();
        let debouncer = Debouncer::new(clock.clone(), 400);
        let runs = Rc::new(RefCell::new(Vec::new()));

        for keystroke in ["S", "Sy", "Sym"] {
            let runs = runs.clone();
            debouncer.trigger(move || runs.borrow_mut().push(keystroke));
            clock.advance(100);
        }
        assert!(runs.borrow().is_empty());

        clock.advance(299);
        assert!(runs.borrow().is_empty());
        clock.advance(1);
        assert_eq!(runs.borrow().as_slice(), ["Sym"]);
    }

    #[test]
    fn test_quiet_windows_run_each() {
        let clock = ManualClock::default();
        let debouncer = Debouncer::new(clock.clone(), 1000);
        let count = Rc::new(Cell::new(0));

        for _ in 0..3 {
            let count = count.clone();
            debouncer.trigger(move || count.set(count.get() + 1));
            clock.advance(1000);
        }
        assert_eq!(count.get(), 3);
    }

    #[test]
    fn test_cancel() {
        let clock = ManualClock::default();
        let debouncer = Debouncer::new(clock.clone(), 400);
        let count = Rc::new(Cell::new(0));
        {
            let count = count.clone();
            debouncer.trigger(move || count.set(count.get() + 1));
        }
        debouncer.cancel();
        clock.advance(1000);
        assert_eq!(count.get(), 0);
        assert_eq!(debouncer.delay_ms(), 400);
    }
}
