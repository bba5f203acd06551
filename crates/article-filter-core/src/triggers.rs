//! Form events to cycles.
//!
//! Typing waits for a pause, toggling waits for a shorter burst to settle,
//! explicit submit and reset act at once and drop whatever was pending.

use std::rc::Rc;

use tracing::trace;

use crate::config::FilterConfig;
use crate::debounce::{Debouncer, Scheduler};
use crate::form::FieldKind;

/// A form event the widget listens for, tagged with the control it hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormEvent {
    KeyUp(FieldKind),
    Change(FieldKind),
    Submit,
    Reset,
}

/// Cycle a form event asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormAction {
    Submit,
    Reset,
}

/// How [`FormTriggers::dispatch`] handled an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// The action runs after `delay_ms` unless another event replaces it.
    Debounced { delay_ms: u32 },
    /// The action ran now; pending debounced actions were cancelled.
    Immediate(FormAction),
    /// Not an event that starts a cycle.
    Ignored,
}

/// Routes form events to an action callback through two debouncers.
pub struct FormTriggers<S: Scheduler> {
    text: Debouncer<S>,
    choice: Debouncer<S>,
    on_action: Rc<dyn Fn(FormAction)>,
}

impl<S: Scheduler + Clone> FormTriggers<S> {
    pub fn new(scheduler: S, config: &FilterConfig, on_action: impl Fn(FormAction) + 'static) -> Self {
        Self {
            text: Debouncer::new(scheduler.clone(), config.text_debounce_ms),
            choice: Debouncer::new(scheduler, config.checkbox_debounce_ms),
            on_action: Rc::new(on_action),
        }
    }
}

impl<S: Scheduler> FormTriggers<S> {
    pub fn dispatch(&self, event: FormEvent) -> Dispatch {
        let dispatch = match event {
            FormEvent::KeyUp(FieldKind::Text) => self.debounce(&self.text),
            FormEvent::Change(FieldKind::Checkbox | FieldKind::Radio | FieldKind::Select) => {
                self.debounce(&self.choice)
            }
            FormEvent::Submit => self.now(FormAction::Submit),
            FormEvent::Reset => self.now(FormAction::Reset),
            FormEvent::KeyUp(_) | FormEvent::Change(_) => Dispatch::Ignored,
        };
        trace!(?event, ?dispatch, "form event");
        dispatch
    }

    /// Drop pending debounced submissions.
    pub fn cancel(&self) {
        self.text.cancel();
        self.choice.cancel();
    }

    fn debounce(&self, debouncer: &Debouncer<S>) -> Dispatch {
        let on_action = self.on_action.clone();
        debouncer.trigger(move || on_action(FormAction::Submit));
        Dispatch::Debounced {
            delay_ms: debouncer.delay_ms(),
        }
    }

    fn now(&self, action: FormAction) -> Dispatch {
        self.cancel();
        (self.on_action)(action);
        Dispatch::Immediate(action)
    }
}
