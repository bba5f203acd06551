//! [`FilterView`] over the widget's DOM regions.

use std::cell::Cell;
use leptos::prelude::Set;

use article_filter_core::{
    AnimationConfig, FieldKind, FilterConfig, FilterView, FormField, QueryParams, ResetAction,
    collect_params, render_animated,
};
use thiserror::Error;
use tracing::trace;
use wasm_bindgen::JsCast;
use web_sys::{
    Element, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlOptionElement,
    HtmlSelectElement, HtmlTextAreaElement,
};

use super::animation::{CssTransitioner, DomList};
use crate::components::{LoadMoreSignals, mount_load_more};
use crate::config::{
    CONTENT_SELECTOR, COUNT_SELECTOR, FORM_SELECTOR, LOADER_SELECTOR, LOADING_CLASS,
    PAGINATION_SELECTOR, RESET_SELECTOR, SORTING_SELECTOR,
};
use crate::utils::dom;

/// Why a root could not be bound.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    /// A required region is absent from the root.
    #[error("missing region {0}")]
    MissingRegion(&'static str),
    /// A region exists but is not the expected kind of element.
    #[error("region {0} has an unexpected element type")]
    WrongElement(&'static str),
}

// =============================================================================
// Regions
// =============================================================================

/// The elements one widget works on.
#[derive(Clone, Debug)]
pub struct Regions {
    pub root: Element,
    pub content: HtmlElement,
    pub form: HtmlFormElement,
    pub count: Element,
    pub sorting: Element,
    pub pagination: HtmlElement,
    pub loader: Option<HtmlElement>,
    pub reset: Option<Element>,
}

impl Regions {
    pub fn locate(root: &Element) -> Result<Self, BindError> {
        Ok(Self {
            root: root.clone(),
            content: required(root, CONTENT_SELECTOR)?,
            form: required(root, FORM_SELECTOR)?,
            count: required(root, COUNT_SELECTOR)?,
            sorting: required(root, SORTING_SELECTOR)?,
            pagination: required(root, PAGINATION_SELECTOR)?,
            loader: dom::query(root, LOADER_SELECTOR).and_then(|el| el.dyn_into().ok()),
            reset: dom::query(root, RESET_SELECTOR),
        })
    }
}

fn required<T: JsCast>(root: &Element, selector: &'static str) -> Result<T, BindError> {
    dom::query(root, selector)
        .ok_or(BindError::MissingRegion(selector))?
        .dyn_into()
        .map_err(|_| BindError::WrongElement(selector))
}

// =============================================================================
// Form Controls
// =============================================================================

/// A serializable form control.
enum Control {
    Input(HtmlInputElement),
    Select(HtmlSelectElement),
    TextArea(HtmlTextAreaElement),
}

impl Control {
    fn from_element(element: Element) -> Option<Self> {
        let element = match element.dyn_into::<HtmlInputElement>() {
            Ok(input) => return Some(Self::Input(input)),
            Err(element) => element,
        };
        let element = match element.dyn_into::<HtmlSelectElement>() {
            Ok(select) => return Some(Self::Select(select)),
            Err(element) => element,
        };
        element.dyn_into::<HtmlTextAreaElement>().ok().map(Self::TextArea)
    }

    fn kind(&self) -> FieldKind {
        match self {
            Self::Input(input) => FieldKind::from_input_type(&input.type_()),
            Self::Select(_) => FieldKind::Select,
            Self::TextArea(_) => FieldKind::Text,
        }
    }

    /// One field per submitted value; a multiple select yields one per
    /// selected option.
    fn fields(&self) -> Vec<FormField> {
        match self {
            Self::Input(input) => vec![
                FormField::new(input.name(), self.kind(), input.value())
                    .checked(input.checked())
                    .disabled(input.disabled()),
            ],
            Self::Select(select) if select.multiple() => {
                let options = select.selected_options();
                (0..options.length())
                    .filter_map(|i| options.item(i))
                    .filter_map(|option| option.dyn_into::<HtmlOptionElement>().ok())
                    .map(|option| {
                        FormField::new(select.name(), FieldKind::Select, option.value())
                            .disabled(select.disabled())
                    })
                    .collect()
            }
            Self::Select(select) => vec![
                FormField::new(select.name(), FieldKind::Select, select.value())
                    .disabled(select.disabled()),
            ],
            Self::TextArea(area) => vec![
                FormField::new(area.name(), FieldKind::Text, area.value())
                    .disabled(area.disabled()),
            ],
        }
    }

    fn reset(&self) {
        let action = FormField::new("", self.kind(), "").reset_action();
        match (action, self) {
            (ResetAction::Uncheck, Self::Input(input)) => input.set_checked(false),
            (ResetAction::Blank, Self::Input(input)) => input.set_value(""),
            (ResetAction::Blank, Self::TextArea(area)) => area.set_value(""),
            (ResetAction::Blank, Self::Select(select)) if select.multiple() => {
                select.set_selected_index(-1)
            }
            // First option is the unfiltered choice.
            (ResetAction::Blank, Self::Select(select)) => select.set_selected_index(0),
            _ => {}
        }
    }
}

/// Kind of the form control `element` is, if it is one.
pub fn control_kind(element: &Element) -> Option<FieldKind> {
    Control::from_element(element.clone()).map(|control| control.kind())
}

fn controls(form: &HtmlFormElement) -> Vec<Control> {
    dom::query_all(form, "input, select, textarea")
        .into_iter()
        .filter_map(Control::from_element)
        .collect()
}

// =============================================================================
// DomView
// =============================================================================

/// Page side of one widget.
pub struct DomView {
    regions: Regions,
    list: DomList,
    transitioner: CssTransitioner,
    animation: AnimationConfig,
    load_more_label: String,
    load_more: Cell<Option<LoadMoreSignals>>,
}

impl DomView {
    pub fn new(regions: Regions, config: &FilterConfig) -> Self {
        Self {
            list: DomList::new(regions.content.clone()),
            transitioner: CssTransitioner::new(regions.content.clone(), config.animation.clone()),
            animation: config.animation.clone(),
            load_more_label: config.load_more_label.clone(),
            load_more: Cell::new(None),
            regions,
        }
    }

    /// Signals of the mounted "load more" control, if any.
    pub fn load_more(&self) -> Option<LoadMoreSignals> {
        self.load_more.get()
    }

    fn set_loader(&self, loading: bool) {
        let class_list = self.regions.form.class_list();
        let _ = if loading {
            class_list.add_1(LOADING_CLASS)
        } else {
            class_list.remove_1(LOADING_CLASS)
        };
        if let Some(loader) = &self.regions.loader {
            dom::set_displayed(loader, loading);
            let _ = loader.set_attribute("aria-hidden", if loading { "false" } else { "true" });
        }
    }
}

impl FilterView for DomView {
    fn show_loader(&self) {
        self.set_loader(true);
    }

    fn hide_loader(&self) {
        self.set_loader(false);
    }

    fn form_action(&self) -> Option<String> {
        self.regions
            .form
            .get_attribute("action")
            .filter(|action| !action.trim().is_empty())
    }

    fn form_params(&self) -> QueryParams {
        let fields: Vec<FormField> = controls(&self.regions.form)
            .iter()
            .flat_map(Control::fields)
            .collect();
        collect_params(&fields)
    }

    fn clear_form(&self) {
        for control in controls(&self.regions.form) {
            control.reset();
        }
    }

    fn render_content(&self, html: &str, append: bool) {
        let report = render_animated(
            &self.list,
            &self.transitioner,
            html,
            append,
            self.animation.stagger_ms,
        );
        trace!(?report, append, "content rendered");
    }

    fn set_sorting(&self, html: &str) {
        self.regions.sorting.set_inner_html(html);
    }

    fn set_count(&self, html: &str) {
        self.regions.count.set_inner_html(html);
    }

    fn set_pagination(&self, html: &str) {
        self.regions.pagination.set_inner_html(html);
    }

    fn install_load_more(&self) {
        let signals = mount_load_more(
            self.regions.pagination.clone(),
            self.load_more_label.clone(),
        );
        self.load_more.set(Some(signals));
    }

    fn set_load_more_visible(&self, visible: bool) {
        if let Some(signals) = self.load_more.get() {
            signals.visible.set(visible);
        }
    }

    fn set_load_more_enabled(&self, enabled: bool) {
        if let Some(signals) = self.load_more.get() {
            signals.enabled.set(enabled);
        }
    }
}
