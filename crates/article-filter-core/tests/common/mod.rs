//! Test doubles for the filter controller.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use article_filter_core::{
    Browser, FetchError, FilterConfig, FilterController, FilterView, FormField, HttpResponse,
    ListSource, QueryParams, ResetAction, Scheduler, collect_params,
};
use tokio::sync::oneshot;

/// Ordered record of everything the doubles observed.
pub type Journal = Rc<RefCell<Vec<String>>>;

// ============================================================================
// Page
// ============================================================================

/// Rendered state of the fake page.
#[derive(Debug, Default)]
pub struct Page {
    pub content: String,
    pub sorting: String,
    pub count: String,
    pub pagination: String,
    pub loader_visible: bool,
    pub load_more_installed: bool,
    pub load_more_visible: Option<bool>,
    pub load_more_enabled: bool,
    pub action: Option<String>,
    pub fields: Vec<FormField>,
}

#[derive(Clone)]
pub struct FakeView {
    pub page: Rc<RefCell<Page>>,
    pub journal: Journal,
}

impl FakeView {
    fn note(&self, entry: impl Into<String>) {
        self.journal.borrow_mut().push(entry.into());
    }
}

impl FilterView for FakeView {
    fn show_loader(&self) {
        self.page.borrow_mut().loader_visible = true;
    }

    fn hide_loader(&self) {
        self.page.borrow_mut().loader_visible = false;
    }

    fn form_action(&self) -> Option<String> {
        self.page.borrow().action.clone()
    }

    fn form_params(&self) -> QueryParams {
        collect_params(&self.page.borrow().fields)
    }

    fn clear_form(&self) {
        self.note("clear form");
        for field in &mut self.page.borrow_mut().fields {
            match field.reset_action() {
                ResetAction::Uncheck => field.checked = false,
                ResetAction::Blank => field.value.clear(),
                ResetAction::Keep => {}
            }
        }
    }

    fn render_content(&self, html: &str, append: bool) {
        self.note(format!("render append={append}"));
        let mut page = self.page.borrow_mut();
        if append {
            page.content.push_str(html);
        } else {
            page.content = html.to_string();
        }
    }

    fn set_sorting(&self, html: &str) {
        self.page.borrow_mut().sorting = html.to_string();
    }

    fn set_count(&self, html: &str) {
        self.page.borrow_mut().count = html.to_string();
    }

    fn set_pagination(&self, html: &str) {
        self.page.borrow_mut().pagination = html.to_string();
    }

    fn install_load_more(&self) {
        self.note("install load more");
        let mut page = self.page.borrow_mut();
        page.load_more_installed = true;
        page.load_more_enabled = true;
        page.pagination = "<button>Voir plus</button>".to_string();
    }

    fn set_load_more_visible(&self, visible: bool) {
        self.page.borrow_mut().load_more_visible = Some(visible);
    }

    fn set_load_more_enabled(&self, enabled: bool) {
        self.note(format!("load more enabled={enabled}"));
        self.page.borrow_mut().load_more_enabled = enabled;
    }
}

// ============================================================================
// Browser
// ============================================================================

#[derive(Clone)]
pub struct FakeBrowser {
    pub url: Rc<RefCell<String>>,
    pub scrolls: Rc<Cell<u32>>,
}

impl FakeBrowser {
    pub fn at(url: &str) -> Self {
        Self {
            url: Rc::new(RefCell::new(url.to_string())),
            scrolls: Rc::new(Cell::new(0)),
        }
    }

    pub fn url(&self) -> String {
        self.url.borrow().clone()
    }
}

impl Browser for FakeBrowser {
    fn current_url(&self) -> String {
        self.url()
    }

    fn replace_url(&self, url: &str) {
        *self.url.borrow_mut() = url.to_string();
    }

    fn scroll_to_top(&self) {
        self.scrolls.set(self.scrolls.get() + 1);
    }
}

// ============================================================================
// Source
// ============================================================================

pub enum Reply {
    Ready(Result<HttpResponse, FetchError>),
    Gated(oneshot::Receiver<HttpResponse>),
}

#[derive(Clone)]
pub struct ScriptedSource {
    pub replies: Rc<RefCell<VecDeque<Reply>>>,
    pub journal: Journal,
}

impl ScriptedSource {
    pub fn push(&self, reply: Reply) {
        self.replies.borrow_mut().push_back(reply);
    }

    pub fn ok(&self, body: String) {
        self.push(Reply::Ready(Ok(HttpResponse::new(200, body))));
    }

    pub fn requests(&self) -> Vec<String> {
        self.journal
            .borrow()
            .iter()
            .filter_map(|entry| entry.strip_prefix("GET "))
            .map(str::to_string)
            .collect()
    }
}

impl ListSource for ScriptedSource {
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        self.journal.borrow_mut().push(format!("GET {url}"));
        let reply = self.replies.borrow_mut().pop_front();
        match reply {
            Some(Reply::Ready(result)) => result,
            Some(Reply::Gated(receiver)) => receiver
                .await
                .map_err(|_| FetchError::Network("gate dropped".to_string())),
            None => Err(FetchError::Network("no scripted reply".to_string())),
        }
    }
}

// ============================================================================
// Fixture
// ============================================================================

pub type Controller = FilterController<FakeView, FakeBrowser, ScriptedSource>;

pub struct Fixture {
    pub controller: Controller,
    pub page: Rc<RefCell<Page>>,
    pub browser: FakeBrowser,
    pub source: ScriptedSource,
    pub journal: Journal,
}

impl Fixture {
    pub fn new(url: &str, page: Page) -> Self {
        Self::with_config(url, page, FilterConfig::default())
    }

    pub fn with_config(url: &str, page: Page, config: FilterConfig) -> Self {
        let journal: Journal = Rc::default();
        let page = Rc::new(RefCell::new(page));
        let view = FakeView {
            page: page.clone(),
            journal: journal.clone(),
        };
        let browser = FakeBrowser::at(url);
        let source = ScriptedSource {
            replies: Rc::default(),
            journal: journal.clone(),
        };
        let controller = FilterController::new(view, browser.clone(), source.clone(), config);
        controller.bind();
        Self {
            controller,
            page,
            browser,
            source,
            journal,
        }
    }
}

/// Fragment payload as the listing endpoint sends it.
pub fn payload(content: &str, total_page: u32) -> String {
    serde_json::json!({
        "content": content,
        "sorting": format!("<a href=\"?sort=title\">sort {total_page}</a>"),
        "pagination": format!("<nav>{total_page} pages</nav>"),
        "count": format!("{total_page} pages of articles"),
        "totalPage": total_page,
    })
    .to_string()
}

// ============================================================================
// Clock
// ============================================================================

type Task = (u32, Rc<Cell<bool>>, Option<Box<dyn FnOnce()>>);

/// Manual timer for debounce tests.
#[derive(Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u32>>,
    tasks: Rc<RefCell<Vec<Task>>>,
}

pub struct ManualHandle(Rc<Cell<bool>>);

impl Drop for ManualHandle {
    fn drop(&mut self) {
        self.0.set(true);
    }
}

impl ManualClock {
    pub fn advance(&self, ms: u32) {
        self.now.set(self.now.get() + ms);
        let now = self.now.get();
        let due: Vec<_> = self
            .tasks
            .borrow_mut()
            .iter_mut()
            .filter(|(deadline, cancelled, _)| *deadline <= now && !cancelled.get())
            .filter_map(|(_, _, task)| task.take())
            .collect();
        for task in due {
            task();
        }
    }
}

impl Scheduler for ManualClock {
    type Handle = ManualHandle;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> ManualHandle {
        let cancelled = Rc::new(Cell::new(false));
        self.tasks
            .borrow_mut()
            .push((self.now.get() + delay_ms, cancelled.clone(), Some(task)));
        ManualHandle(cancelled)
    }
}
