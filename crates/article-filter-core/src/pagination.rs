//! Pagination state machine.
//!
//! [`NavigationMode::Paged`] mirrors the server's pagination links;
//! [`NavigationMode::Incremental`] owns a single "load more" control.

use crate::fragment::ListFragment;
use crate::state::NavigationMode;

/// What the pagination region should show after a successful fetch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PaginationUpdate {
    /// Replace the region with the server's pagination markup.
    Replace(String),
    /// Show or hide the "load more" control.
    LoadMoreVisible(bool),
}

/// Pagination mode plus the load-more busy flag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaginationController {
    mode: NavigationMode,
    busy: bool,
}

impl PaginationController {
    pub fn new(mode: NavigationMode) -> Self {
        Self { mode, busy: false }
    }

    pub fn mode(&self) -> NavigationMode {
        self.mode
    }

    /// Pagination links are intercepted only in paged mode.
    pub fn intercepts_links(&self) -> bool {
        self.mode == NavigationMode::Paged
    }

    /// Claim the load-more control. `false` when the mode has no such
    /// control or a previous activation is still in flight.
    pub fn begin_load_more(&mut self) -> bool {
        if self.mode != NavigationMode::Incremental || self.busy {
            return false;
        }
        self.busy = true;
        true
    }

    /// Release the load-more control.
    pub fn finish_load_more(&mut self) {
        self.busy = false;
    }

    /// Region update for a fragment received while on `page`.
    pub fn update_for(&self, page: u32, fragment: &ListFragment) -> PaginationUpdate {
        match self.mode {
            NavigationMode::Paged => PaginationUpdate::Replace(fragment.pagination.clone()),
            NavigationMode::Incremental => {
                PaginationUpdate::LoadMoreVisible(page < fragment.total_page)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(total_page: u32) -> ListFragment {
        ListFragment {
            pagination: "<nav>links</nav>".to_string(),
            total_page,
            ..ListFragment::default()
        }
    }

    #[test]
    fn test_paged_replaces_markup() {
        let pagination = PaginationController::new(NavigationMode::Paged);
        assert!(pagination.intercepts_links());
        assert_eq!(
            pagination.update_for(3, &fragment(5)),
            PaginationUpdate::Replace("<nav>links</nav>".to_string())
        );
    }

    #[test]
    fn test_paged_has_no_load_more() {
        let mut pagination = PaginationController::new(NavigationMode::Paged);
        assert!(!pagination.begin_load_more());
        assert!(!pagination.busy);
    }

    #[test]
    fn test_load_more_is_not_reentrant() {
        let mut pagination = PaginationController::new(NavigationMode::Incremental);
        assert!(pagination.begin_load_more());
        assert!(!pagination.begin_load_more());
        pagination.finish_load_more();
        assert!(pagination.begin_load_more());
    }

    #[test]
    fn test_hidden_exactly_on_last_page() {
        let pagination = PaginationController::new(NavigationMode::Incremental);
        for n in 1..6u32 {
            let total = n + 1;
            for page in 1..total {
                assert_eq!(
                    pagination.update_for(page, &fragment(total)),
                    PaginationUpdate::LoadMoreVisible(true),
                    "page {page} of {total}"
                );
            }
            assert_eq!(
                pagination.update_for(total, &fragment(total)),
                PaginationUpdate::LoadMoreVisible(false)
            );
        }
    }

    #[test]
    fn test_empty_result_hides_load_more() {
        let pagination = PaginationController::new(NavigationMode::Incremental);
        assert_eq!(
            pagination.update_for(1, &fragment(0)),
            PaginationUpdate::LoadMoreVisible(false)
        );
    }
}
