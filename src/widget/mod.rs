//! Filter widget: binds a `.js-filter` root to a [`FilterController`].
//!
//! Event wiring follows the page contract:
//!
//! | Event | Handling |
//! |-------|----------|
//! | text control `keyup` | debounced submit |
//! | checkbox/radio/select `change` | debounced submit |
//! | form `submit` | submit now, default prevented |
//! | reset control `click` | reset |
//! | sort link `click` | follow link, scroll to top |
//! | pagination `click` | follow link (paged) or load more (incremental) |
//!
//! Listeners live as long as the page, so their closures are leaked with
//! `forget()`.

mod animation;
mod browser;
mod view;

use std::rc::Rc;

use article_filter_core::{
    FieldKind, FilterController, FormAction, FormEvent, FormTriggers, NavigationMode, Trigger,
};
use tracing::{debug, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, Event, EventTarget};

pub use animation::{CssTransitioner, DomList};
pub use browser::WindowBrowser;
pub use view::{BindError, DomView, Regions, control_kind};

use crate::config::{DIRECTION_ATTR, ROOT_SELECTOR, load_config};
use crate::utils::{TimeoutScheduler, WebSource, dom};

/// Controller type behind a bound widget.
pub type Controller = FilterController<DomView, WindowBrowser, WebSource>;

/// Form event routing for a bound widget.
pub type FormEvents = FormTriggers<TimeoutScheduler>;

// =============================================================================
// FilterWidget
// =============================================================================

/// One widget instance. Inert when its root is absent or incomplete.
pub struct FilterWidget {
    controller: Option<Rc<Controller>>,
}

impl FilterWidget {
    /// Bind `root`. Never fails: problems leave the widget inert.
    pub fn bind(root: Option<Element>) -> Self {
        let Some(root) = root else {
            debug!("no filter root, widget inert");
            return Self::inert();
        };
        match bind_root(&root) {
            Ok(controller) => Self {
                controller: Some(controller),
            },
            Err(err) => {
                warn!(error = %err, "filter root incomplete, widget inert");
                Self::inert()
            }
        }
    }

    fn inert() -> Self {
        Self { controller: None }
    }

    pub fn is_active(&self) -> bool {
        self.controller.is_some()
    }

    pub fn controller(&self) -> Option<&Rc<Controller>> {
        self.controller.as_ref()
    }
}

/// Bind every filter root in the document. Returns the active widgets.
pub fn mount_all() -> Vec<FilterWidget> {
    let Some(document) = dom::document() else {
        warn!("no document, nothing to bind");
        return Vec::new();
    };
    let Some(body) = document.document_element() else {
        return Vec::new();
    };

    let widgets: Vec<FilterWidget> = dom::query_all(&body, ROOT_SELECTOR)
        .into_iter()
        .map(|root| FilterWidget::bind(Some(root)))
        .filter(FilterWidget::is_active)
        .collect();
    info!(count = widgets.len(), "filter widgets bound");
    widgets
}

// =============================================================================
// Binding
// =============================================================================

fn bind_root(root: &Element) -> Result<Rc<Controller>, BindError> {
    let config = load_config(root);
    let regions = Regions::locate(root)?;
    let source = WebSource::new(config.fetch_timeout_ms);

    let view = DomView::new(regions.clone(), &config);
    let controller = Rc::new(FilterController::new(view, WindowBrowser, source, config));
    controller.bind();

    let handle = controller.clone();
    let triggers = FormTriggers::new(TimeoutScheduler, controller.config(), move |action| {
        run_form_action(handle.clone(), action)
    });
    listen_form(&regions, Rc::new(triggers));
    bind_sorting(&controller, &regions);
    bind_pagination(&controller, &regions);

    debug!(mode = ?controller.mode(), "filter widget bound");
    Ok(controller)
}

/// Route the form's `keyup`, `change`, `submit` and reset clicks into
/// `triggers`. Listeners sit on the form itself, so controls added later
/// are covered too.
pub fn listen_form(regions: &Regions, triggers: Rc<FormEvents>) {
    for (event_type, event) in [
        ("keyup", FormEvent::KeyUp as fn(FieldKind) -> FormEvent),
        ("change", FormEvent::Change),
    ] {
        let triggers = triggers.clone();
        listen(&regions.form, event_type, move |dom_event| {
            if let Some(kind) = event_element(&dom_event).as_ref().and_then(control_kind) {
                triggers.dispatch(event(kind));
            }
        });
    }

    {
        let triggers = triggers.clone();
        listen(&regions.form, "submit", move |event| {
            event.prevent_default();
            triggers.dispatch(FormEvent::Submit);
        });
    }

    if let Some(reset) = &regions.reset {
        listen(reset, "click", move |event| {
            event.prevent_default();
            triggers.dispatch(FormEvent::Reset);
        });
    }
}

fn bind_sorting(controller: &Rc<Controller>, regions: &Regions) {
    let controller = controller.clone();
    listen(&regions.sorting, "click", move |event| {
        follow_clicked_link(&controller, &event, Trigger::SortLink);
    });
}

fn bind_pagination(controller: &Rc<Controller>, regions: &Regions) {
    let handle = controller.clone();
    match controller.mode() {
        NavigationMode::Paged => {
            listen(&regions.pagination, "click", move |event| {
                follow_clicked_link(&handle, &event, Trigger::PageLink);
            });
        }
        NavigationMode::Incremental => {
            listen(&regions.pagination, "click", move |event| {
                let on_button = event_element(&event)
                    .and_then(|el| el.closest("button").ok().flatten())
                    .is_some();
                if !on_button {
                    return;
                }
                let controller = handle.clone();
                spawn_local(async move {
                    controller.load_more().await;
                });
            });
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn run_form_action(controller: Rc<Controller>, action: FormAction) {
    spawn_local(async move {
        match action {
            FormAction::Submit => controller.submit_form().await,
            FormAction::Reset => controller.reset_form().await,
        };
    });
}

fn event_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

/// Handle a click inside a link region. Clicks outside any link keep
/// their default behaviour.
fn follow_clicked_link(controller: &Rc<Controller>, event: &Event, trigger: Trigger) {
    let Some(target) = event_element(event) else {
        return;
    };
    let inside_link = target
        .closest(&format!("a, [{DIRECTION_ATTR}]"))
        .ok()
        .flatten()
        .is_some();
    if !inside_link {
        return;
    }
    event.prevent_default();

    let Some(href) = dom::link_href(&target) else {
        debug!("inert link clicked");
        return;
    };
    let controller = controller.clone();
    spawn_local(async move {
        controller.follow_link(&href, trigger).await;
    });
}

/// Attach `handler` for the page lifetime.
fn listen(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}
