//! Filter state and navigation mode.

use crate::query::{ListUrl, QueryParams, request_path};

/// How further pages are reached.
///
/// Fixed for the lifetime of a widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationMode {
    /// Server-rendered pagination links replace the list.
    Paged,
    /// A "load more" control appends the next page to the list.
    Incremental,
}

impl NavigationMode {
    /// Mode for a widget whose page was loaded at `page`.
    ///
    /// A listing opened on its first page grows incrementally; one opened
    /// deeper (a shared `?page=4` link) keeps classic pagination so the
    /// earlier pages stay reachable.
    pub fn for_initial_page(page: u32) -> Self {
        if page == 1 {
            Self::Incremental
        } else {
            Self::Paged
        }
    }
}

/// Listing the widget currently targets: its path, query and page.
///
/// Updated when a cycle starts, so the next "load more" builds on the most
/// recent query even if the address bar still shows an older one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterState {
    page: u32,
    url: ListUrl,
}

impl FilterState {
    /// State described by an address-bar URL.
    pub fn from_url(url: &str) -> Self {
        let parsed = ListUrl::parse(url);
        Self {
            page: parsed.page(),
            url: ListUrl::new(request_path(url), parsed.params().clone()),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn params(&self) -> &QueryParams {
        self.url.params()
    }

    /// Listing path and query, page included when one was requested.
    pub fn url(&self) -> &ListUrl {
        &self.url
    }

    /// Install a new query for the listing at `path`. The page goes back to 1.
    pub fn replace_query(&mut self, path: &str, params: QueryParams) {
        self.url = ListUrl::new(path, params);
        self.page = 1;
    }

    /// Adopt the state a followed link points to.
    pub fn navigate_to(&mut self, url: &ListUrl) {
        self.page = url.page();
        self.url = ListUrl::new(request_path(&url.to_string()), url.params().clone());
    }

    /// Advance to the next page and return the URL that requests it.
    pub fn advance_page(&mut self) -> ListUrl {
        self.page = self.page.saturating_add(1);
        self.url = self.url.clone().with_page(self.page);
        self.url.clone()
    }
}
