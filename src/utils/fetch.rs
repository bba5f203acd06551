//! Network fetching with optional timeout.
//!
//! [`WebSource`] is the browser [`ListSource`]: one `GET` through the Fetch
//! API, status and body handed back as-is so the core decides what a
//! non-2xx answer means.

use article_filter_core::{FetchError, HttpResponse, ListSource};
use js_sys::{Array, Promise};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

// =============================================================================
// Promise Racing Utilities
// =============================================================================

/// Result of a promise race with timeout.
#[derive(Debug)]
pub enum RaceResult {
    /// The promise completed before timeout.
    Completed(JsValue),
    /// Timeout occurred before promise completed.
    TimedOut,
    /// Promise rejected with an error.
    Error(String),
}

/// Race a promise against a timeout using `Promise.race`.
pub async fn race_with_timeout(promise: Promise, timeout_ms: i32) -> RaceResult {
    let Some(window) = web_sys::window() else {
        return RaceResult::Error("Window not available".to_string());
    };

    // Resolves to undefined, which a fetch never does
    let timeout_promise = Promise::new(&mut |resolve, _| {
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, timeout_ms);
    });

    let race_array = Array::new();
    race_array.push(&promise);
    race_array.push(&timeout_promise);
    let race_promise = Promise::race(&race_array);

    match JsFuture::from(race_promise).await {
        Ok(result) => {
            if result.is_undefined() {
                RaceResult::TimedOut
            } else {
                RaceResult::Completed(result)
            }
        }
        Err(e) => RaceResult::Error(js_error_message(&e)),
    }
}

fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| String::from(err.message()))
        })
        .unwrap_or_else(|| "Unknown error".to_string())
}

// =============================================================================
// WebSource
// =============================================================================

/// Fetch API transport for list fragments.
#[derive(Clone, Copy, Debug, Default)]
pub struct WebSource {
    timeout_ms: Option<u32>,
}

impl WebSource {
    pub fn new(timeout_ms: Option<u32>) -> Self {
        Self { timeout_ms }
    }
}

impl ListSource for WebSource {
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        let window = web_sys::window().ok_or(FetchError::NoWindow)?;

        let opts = RequestInit::new();
        opts.set_method("GET");
        opts.set_mode(RequestMode::SameOrigin);

        let request = Request::new_with_str_and_init(url, &opts)
            .map_err(|_| FetchError::RequestCreationFailed)?;
        let fetch_promise = window.fetch_with_request(&request);

        let result = match self.timeout_ms {
            Some(timeout_ms) => {
                let timeout_ms = i32::try_from(timeout_ms).unwrap_or(i32::MAX);
                match race_with_timeout(fetch_promise, timeout_ms).await {
                    RaceResult::Completed(result) => result,
                    RaceResult::TimedOut => return Err(FetchError::Timeout),
                    RaceResult::Error(msg) => return Err(FetchError::Network(msg)),
                }
            }
            None => JsFuture::from(fetch_promise)
                .await
                .map_err(|e| FetchError::Network(js_error_message(&e)))?,
        };

        let resp: Response = result
            .dyn_into()
            .map_err(|_| FetchError::ResponseReadFailed)?;
        let status = resp.status();

        let text = JsFuture::from(resp.text().map_err(|_| FetchError::ResponseReadFailed)?)
            .await
            .map_err(|_| FetchError::ResponseReadFailed)?;
        let body = text.as_string().ok_or(FetchError::ResponseReadFailed)?;

        Ok(HttpResponse::new(status, body))
    }
}
