//! Filter controller: the request → response → render → history cycle.
//!
//! The controller is DOM-agnostic. It talks to the page through
//! [`FilterView`], to the address bar through [`Browser`], and to the
//! network through a [`ListSource`]. All methods take `&self`; state sits in
//! cells so overlapping cycles (a sort click while "load more" is pending)
//! can run on a single-threaded executor. No borrow is held across an
//! `.await`.

use std::cell::RefCell;

use tracing::{debug, info, warn};

use crate::config::FilterConfig;
use crate::error::FetchError;
use crate::fetcher::{FetchOutcome, ListFetcher, ListSource};
use crate::fragment::ListFragment;
use crate::pagination::{PaginationController, PaginationUpdate};
use crate::query::{ListUrl, QueryParams, request_path, strip_transport_marker, to_request_url};
use crate::sequence::{RequestSequencer, RequestTicket};
use crate::state::{FilterState, NavigationMode};

// ============================================================================
// Capabilities
// ============================================================================

/// Address bar and viewport access.
pub trait Browser {
    /// Full URL currently shown in the address bar.
    fn current_url(&self) -> String;

    /// Rewrite the address bar without navigating or adding an entry.
    fn replace_url(&self, url: &str);

    fn scroll_to_top(&self);
}

/// The widget's regions on the page.
pub trait FilterView {
    fn show_loader(&self);
    fn hide_loader(&self);

    /// The form's `action` attribute, if set and non-empty.
    fn form_action(&self) -> Option<String>;

    /// Current form values in document order.
    fn form_params(&self) -> QueryParams;

    /// Uncheck checkboxes and blank text fields.
    fn clear_form(&self);

    /// Swap the list content, animating the difference.
    fn render_content(&self, html: &str, append: bool);

    fn set_sorting(&self, html: &str);
    fn set_count(&self, html: &str);
    fn set_pagination(&self, html: &str);

    /// Replace the pagination region with the "load more" control.
    fn install_load_more(&self);
    fn set_load_more_visible(&self, visible: bool);
    fn set_load_more_enabled(&self, enabled: bool);
}

// ============================================================================
// Cycle types
// ============================================================================

/// What started a cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    /// Debounced input, checkbox change or explicit submit.
    Form,
    Reset,
    SortLink,
    PageLink,
    LoadMore,
}

impl Trigger {
    /// The fragment is added after the current items instead of replacing them.
    pub fn appends(self) -> bool {
        self == Self::LoadMore
    }

    /// Link navigations bring the viewport back to the top of the list.
    pub fn scrolls_to_top(self) -> bool {
        matches!(self, Self::SortLink | Self::PageLink)
    }
}

/// How a cycle ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The page now shows the fragment.
    Applied,
    /// The server answered with a non-2xx status; nothing changed.
    NoUpdate { status: u16 },
    /// The request failed; nothing changed.
    Failed(FetchError),
    /// A newer cycle started before this one's response arrived.
    Superseded,
    /// The trigger is not available right now (busy load-more, wrong mode).
    Ignored,
}

// ============================================================================
// FilterController
// ============================================================================

/// State machine behind one filter widget.
pub struct FilterController<V, B, S> {
    view: V,
    browser: B,
    fetcher: ListFetcher<S>,
    config: FilterConfig,
    state: RefCell<FilterState>,
    pagination: RefCell<PaginationController>,
    sequencer: RequestSequencer,
}

impl<V, B, S> FilterController<V, B, S>
where
    V: FilterView,
    B: Browser,
    S: ListSource,
{
    /// Build a controller for the page currently shown by `browser`.
    ///
    /// The navigation mode is decided here, once.
    pub fn new(view: V, browser: B, source: S, config: FilterConfig) -> Self {
        let state = FilterState::from_url(&browser.current_url());
        let mode = NavigationMode::for_initial_page(state.page());
        debug!(page = state.page(), ?mode, "filter controller created");
        Self {
            view,
            browser,
            fetcher: ListFetcher::new(source),
            config,
            state: RefCell::new(state),
            pagination: RefCell::new(PaginationController::new(mode)),
            sequencer: RequestSequencer::new(),
        }
    }

    /// One-time view setup for the navigation mode.
    pub fn bind(&self) {
        if self.mode() == NavigationMode::Incremental {
            self.view.install_load_more();
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    pub fn mode(&self) -> NavigationMode {
        self.pagination.borrow().mode()
    }

    pub fn state(&self) -> FilterState {
        self.state.borrow().clone()
    }

    /// Pagination links are handled in place only in paged mode.
    pub fn intercepts_pagination_links(&self) -> bool {
        self.pagination.borrow().intercepts_links()
    }

    /// Rebuild the query from the whole form and load page 1.
    pub async fn submit_form(&self) -> CycleOutcome {
        let params = self.view.form_params();
        let path = self.form_path();
        self.state.borrow_mut().replace_query(&path, params.clone());
        let url = to_request_url(&path, &params);
        self.load(url, Trigger::Form).await
    }

    /// Clear the form and load the unfiltered listing.
    pub async fn reset_form(&self) -> CycleOutcome {
        self.view.clear_form();
        let path = self.form_path();
        self.state.borrow_mut().replace_query(&path, QueryParams::new());
        let url = to_request_url(&path, &QueryParams::new());
        self.load(url, Trigger::Reset).await
    }

    /// Load the target of a sort or pagination link.
    pub async fn follow_link(&self, href: &str, trigger: Trigger) -> CycleOutcome {
        let url = ListUrl::parse(href);
        self.state.borrow_mut().navigate_to(&url);
        self.load(url, trigger).await
    }

    /// Append the next page. Ignored outside incremental mode or while a
    /// previous activation is pending.
    pub async fn load_more(&self) -> CycleOutcome {
        if !self.pagination.borrow_mut().begin_load_more() {
            debug!("load more ignored");
            return CycleOutcome::Ignored;
        }
        self.view.set_load_more_enabled(false);

        let url = self.state.borrow_mut().advance_page();
        let outcome = self.load(url, Trigger::LoadMore).await;

        self.view.set_load_more_enabled(true);
        self.pagination.borrow_mut().finish_load_more();
        outcome
    }

    fn form_path(&self) -> String {
        let action = self
            .view
            .form_action()
            .filter(|action| !action.trim().is_empty())
            .unwrap_or_else(|| self.browser.current_url());
        request_path(&action)
    }

    async fn load(&self, url: ListUrl, trigger: Trigger) -> CycleOutcome {
        let ticket = self.sequencer.issue();
        debug!(ticket = ticket.id(), ?trigger, url = %url, "cycle started");
        self.view.show_loader();

        let outcome = match self.fetcher.fetch(&url).await {
            Ok(FetchOutcome::Fragment(fragment)) => {
                if self.is_stale(ticket) {
                    debug!(ticket = ticket.id(), "discarding superseded fragment");
                    return CycleOutcome::Superseded;
                }
                self.apply(&fragment, &url, trigger);
                CycleOutcome::Applied
            }
            Ok(FetchOutcome::NoUpdate { status }) => CycleOutcome::NoUpdate { status },
            Err(err) => {
                warn!(error = %err, url = %url, "list fragment request failed");
                CycleOutcome::Failed(err)
            }
        };

        if self.sequencer.is_latest(ticket) {
            self.view.hide_loader();
        }
        outcome
    }

    fn is_stale(&self, ticket: RequestTicket) -> bool {
        self.config.discard_stale_responses && !self.sequencer.is_latest(ticket)
    }

    fn apply(&self, fragment: &ListFragment, url: &ListUrl, trigger: Trigger) {
        self.view.set_sorting(&fragment.sorting);
        self.view.render_content(&fragment.content, trigger.appends());

        let page = self.state.borrow().page();
        let update = self.pagination.borrow().update_for(page, fragment);
        match update {
            PaginationUpdate::Replace(html) => self.view.set_pagination(&html),
            PaginationUpdate::LoadMoreVisible(visible) => self.view.set_load_more_visible(visible),
        }

        self.view.set_count(&fragment.count);

        let visible_url = strip_transport_marker(url).to_string();
        self.browser.replace_url(&visible_url);
        info!(url = %visible_url, page, total_page = fragment.total_page, "list updated");

        if trigger.scrolls_to_top() {
            self.browser.scroll_to_top();
        }
    }
}
