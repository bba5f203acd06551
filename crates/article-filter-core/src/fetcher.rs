//! Fragment requests against the listing endpoint.

use tracing::{debug, warn};

use crate::error::FetchError;
use crate::fragment::ListFragment;
use crate::query::{ListUrl, with_transport_marker};

/// Raw HTTP answer from a [`ListSource`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport used to issue a single GET request.
///
/// The browser implementation wraps `window.fetch`; tests substitute
/// scripted responses.
#[allow(async_fn_in_trait)]
pub trait ListSource {
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError>;
}

/// Result of a fragment request that reached the server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// 2xx with a decodable payload.
    Fragment(ListFragment),
    /// Any other status: the page keeps what it shows.
    NoUpdate { status: u16 },
}

/// Issues marked fragment requests and decodes the payload.
pub struct ListFetcher<S> {
    source: S,
}

impl<S: ListSource> ListFetcher<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Fetch the fragment for `url`. One request, no retry.
    pub async fn fetch(&self, url: &ListUrl) -> Result<FetchOutcome, FetchError> {
        let target = with_transport_marker(url).to_string();
        debug!(url = %target, "requesting list fragment");

        let response = self.source.get(&target).await?;
        if !response.is_success() {
            warn!(url = %target, status = response.status, "listing endpoint declined update");
            return Ok(FetchOutcome::NoUpdate {
                status: response.status,
            });
        }

        let fragment: ListFragment = serde_json::from_str(&response.body)?;
        debug!(total_page = fragment.total_page, "list fragment received");
        Ok(FetchOutcome::Fragment(fragment))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    struct Scripted {
        response: Result<HttpResponse, FetchError>,
        requested: RefCell<Vec<String>>,
    }

    impl ListSource for Scripted {
        async fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
            self.requested.borrow_mut().push(url.to_string());
            self.response.clone()
        }
    }

    fn fetcher(response: Result<HttpResponse, FetchError>) -> ListFetcher<Scripted> {
        ListFetcher::new(Scripted {
            response,
            requested: RefCell::new(Vec::new()),
        })
    }

    const BODY: &str =
        r#"{"content":"","sorting":"","pagination":"","count":"0","totalPage":1}"#;

    #[tokio::test]
    async fn test_marker_is_sent() {
        let fetcher = fetcher(Ok(HttpResponse::new(200, BODY)));
        let outcome = fetcher
            .fetch(&ListUrl::parse("/articles?title=x"))
            .await
            .unwrap();
        assert!(matches!(outcome, FetchOutcome::Fragment(f) if f.total_page == 1));
        assert_eq!(
            fetcher.source.requested.borrow().as_slice(),
            ["/articles?title=x&ajax=true"]
        );
    }

    #[tokio::test]
    async fn test_non_success_is_no_update() {
        for status in [199, 300, 304, 404, 500] {
            let fetcher = fetcher(Ok(HttpResponse::new(status, "<html>")));
            let outcome = fetcher.fetch(&ListUrl::parse("/articles")).await.unwrap();
            assert_eq!(outcome, FetchOutcome::NoUpdate { status });
        }
    }

    #[tokio::test]
    async fn test_bad_body_is_decode_error() {
        let fetcher = fetcher(Ok(HttpResponse::new(200, "<html>")));
        let err = fetcher.fetch(&ListUrl::parse("/articles")).await.unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let fetcher = fetcher(Err(FetchError::Timeout));
        let err = fetcher.fetch(&ListUrl::parse("/articles")).await.unwrap_err();
        assert_eq!(err, FetchError::Timeout);
    }
}
