//! Query string codec for listing URLs.
//!
//! Translates between the address-bar URL and the structured
//! path + parameters pair the controller works with. Every function here is
//! total: a malformed query degrades to whatever pairs can be recovered, never
//! to an error.

use std::fmt;

use url::form_urlencoded;

/// Parameter telling the backend to answer with a JSON fragment payload.
pub const TRANSPORT_MARKER: &str = "ajax";

/// Value sent with [`TRANSPORT_MARKER`].
pub const TRANSPORT_MARKER_VALUE: &str = "true";

/// Page number parameter.
pub const PAGE_PARAM: &str = "page";

// ============================================================================
// QueryParams
// ============================================================================

/// Insertion-ordered query parameters.
///
/// Keys may repeat (`tags[]=1&tags[]=3`), so this is a list of pairs rather
/// than a map. Serialization follows `application/x-www-form-urlencoded`,
/// the same rules the browser applies to a GET form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a query string, with or without its leading `?`.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect()
    }

    /// Encode the parameters in insertion order.
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.0.iter())
            .finish()
    }

    /// First value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Add a pair after the existing ones.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push((key.into(), value.into()));
    }

    /// Replace the first value of `key` in place and drop the others, or
    /// append the pair when the key is absent.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.0.iter().position(|(k, _)| k == key) {
            Some(first) => {
                self.0[first].1 = value;
                let mut index = 0;
                self.0.retain(|(k, _)| {
                    let keep = index <= first || k != key;
                    index += 1;
                    keep
                });
            }
            None => self.0.push((key.to_string(), value)),
        }
    }

    /// Remove every value of `key`.
    pub fn remove(&mut self, key: &str) {
        self.0.retain(|(k, _)| k != key);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

// ============================================================================
// ListUrl
// ============================================================================

/// A listing URL split into its base (everything before `?`) and parameters.
///
/// The base is kept verbatim, so relative (`/articles`) and absolute
/// (`https://blog.example/articles`) URLs both round-trip. Fragments are
/// dropped; the listing endpoint never uses them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListUrl {
    base: String,
    params: QueryParams,
}

impl ListUrl {
    pub fn new(base: impl Into<String>, params: QueryParams) -> Self {
        Self {
            base: base.into(),
            params,
        }
    }

    /// Split a URL string. Never fails.
    pub fn parse(url: &str) -> Self {
        let url = strip_fragment(url);
        match url.split_once('?') {
            Some((base, query)) => Self::new(base, QueryParams::parse(query)),
            None => Self::new(url, QueryParams::new()),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn params(&self) -> &QueryParams {
        &self.params
    }

    /// Page requested by this URL (see [`parse_page`]).
    pub fn page(&self) -> u32 {
        page_from_params(&self.params)
    }

    /// Same URL asking for `page`.
    pub fn with_page(mut self, page: u32) -> Self {
        self.params.set(PAGE_PARAM, page.to_string());
        self
    }
}

impl fmt::Display for ListUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.params.is_empty() {
            f.write_str(&self.base)
        } else {
            write!(f, "{}?{}", self.base, self.params)
        }
    }
}

// ============================================================================
// Codec operations
// ============================================================================

/// Page number carried by `url`, 1 when absent or not a positive integer.
pub fn parse_page(url: &str) -> u32 {
    ListUrl::parse(url).page()
}

fn page_from_params(params: &QueryParams) -> u32 {
    params
        .get(PAGE_PARAM)
        .and_then(|raw| raw.trim().parse::<u32>().ok())
        .filter(|page| *page >= 1)
        .unwrap_or(1)
}

/// Build the URL for `base` with `params` appended in insertion order.
pub fn to_request_url(base: &str, params: &QueryParams) -> ListUrl {
    ListUrl::new(strip_fragment(base).split('?').next().unwrap_or(""), params.clone())
}

/// Mark a URL as a fragment request (`ajax=true`).
pub fn with_transport_marker(url: &ListUrl) -> ListUrl {
    let mut marked = url.clone();
    marked
        .params
        .set(TRANSPORT_MARKER, TRANSPORT_MARKER_VALUE);
    marked
}

/// Remove the fragment-request marker, e.g. before writing browser history.
pub fn strip_transport_marker(url: &ListUrl) -> ListUrl {
    let mut stripped = url.clone();
    stripped.params.remove(TRANSPORT_MARKER);
    stripped
}

/// Path component of an absolute or relative URL, without query or fragment.
///
/// `https://blog.example/articles?x=1` → `/articles`
pub fn request_path(url: &str) -> String {
    let without_query = strip_fragment(url).split('?').next().unwrap_or("");
    match without_query.split_once("://") {
        Some((_, rest)) => match rest.find('/') {
            Some(start) => rest[start..].to_string(),
            None => "/".to_string(),
        },
        None => without_query.to_string(),
    }
}

fn strip_fragment(url: &str) -> &str {
    url.split('#').next().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_page_defaults() {
        assert_eq!(parse_page("/articles"), 1);
        assert_eq!(parse_page("/articles?title=foo"), 1);
        assert_eq!(parse_page("/articles?page="), 1);
        assert_eq!(parse_page("/articles?page=0"), 1);
        assert_eq!(parse_page("/articles?page=-3"), 1);
        assert_eq!(parse_page("/articles?page=abc"), 1);
        assert_eq!(parse_page(""), 1);
        assert_eq!(parse_page("%%%?page=%zz"), 1);
    }

    #[test]
    fn test_parse_page_reads_value() {
        assert_eq!(parse_page("/articles?page=3"), 3);
        assert_eq!(parse_page("https://blog.example/articles?title=x&page=12#top"), 12);
        assert_eq!(parse_page("?page=2&page=5"), 2);
    }

    #[test]
    fn test_request_url_encoding() {
        let params: QueryParams = [("title", "Symfony"), ("tags[]", "3")].into_iter().collect();
        let url = to_request_url("/articles", &params);
        assert_eq!(url.to_string(), "/articles?title=Symfony&tags%5B%5D=3");

        let params: QueryParams = [("title", "rust & wasm")].into_iter().collect();
        assert_eq!(
            to_request_url("/articles", &params).to_string(),
            "/articles?title=rust+%26+wasm"
        );
    }

    #[test]
    fn test_request_url_empty_params() {
        let url = to_request_url("/articles?stale=1", &QueryParams::new());
        assert_eq!(url.to_string(), "/articles");
    }

    #[test]
    fn test_transport_marker_appended_last() {
        let url = ListUrl::parse("/articles?title=Symfony&tags%5B%5D=3");
        assert_eq!(
            with_transport_marker(&url).to_string(),
            "/articles?title=Symfony&tags%5B%5D=3&ajax=true"
        );
    }

    #[test]
    fn test_transport_marker_replaces_in_place() {
        let url = ListUrl::parse("/articles?ajax=1&title=x&ajax=0");
        assert_eq!(
            with_transport_marker(&url).to_string(),
            "/articles?ajax=true&title=x"
        );
        assert_eq!(strip_transport_marker(&url).to_string(), "/articles?title=x");
    }

    #[test]
    fn test_strip_only_marker() {
        let url = ListUrl::parse("/articles?ajax=true");
        assert_eq!(strip_transport_marker(&url).to_string(), "/articles");
    }

    #[test]
    fn test_parse_keeps_repeated_keys() {
        let url = ListUrl::parse("/articles?tags%5B%5D=1&tags%5B%5D=3&q=a+b");
        assert_eq!(url.base(), "/articles");
        let expected: QueryParams = [("tags[]", "1"), ("tags[]", "3"), ("q", "a b")]
            .into_iter()
            .collect();
        assert_eq!(url.params(), &expected);
    }

    #[test]
    fn test_set_semantics() {
        let mut params = QueryParams::parse("a=1&page=2&b=2&page=7");
        params.set("page", "3");
        assert_eq!(params.encode(), "a=1&page=3&b=2");
        params.set("c", "x");
        assert_eq!(params.encode(), "a=1&page=3&b=2&c=x");
    }

    #[test]
    fn test_with_page() {
        let url = ListUrl::parse("/articles?title=x").with_page(4);
        assert_eq!(url.to_string(), "/articles?title=x&page=4");
        assert_eq!(url.page(), 4);
    }

    #[test]
    fn test_request_path() {
        assert_eq!(request_path("/articles"), "/articles");
        assert_eq!(request_path("/articles?title=x#list"), "/articles");
        assert_eq!(request_path("https://blog.example/articles?page=2"), "/articles");
        assert_eq!(request_path("https://blog.example"), "/");
        assert_eq!(request_path(""), "");
    }

    #[test]
    fn test_malformed_query_degrades() {
        let url = ListUrl::parse("/articles?&&=&%E0%A4%A=1");
        assert_eq!(url.base(), "/articles");
        assert_eq!(url.page(), 1);
    }

    fn param_key() -> impl Strategy<Value = String> {
        "[a-z_\\[\\]]{1,8}".prop_filter("marker key", |k| k != TRANSPORT_MARKER)
    }

    fn params() -> impl Strategy<Value = QueryParams> {
        prop::collection::vec((param_key(), "\\PC{0,12}"), 0..6)
            .prop_map(|pairs| pairs.into_iter().collect())
    }

    proptest! {
        #[test]
        fn prop_no_page_param_means_first_page(p in params()) {
            let mut p = p;
            p.remove(PAGE_PARAM);
            let url = to_request_url("/articles", &p).to_string();
            prop_assert_eq!(parse_page(&url), 1);
        }

        #[test]
        fn prop_marker_round_trip(p in params()) {
            let url = to_request_url("/articles", &p);
            let marked = with_transport_marker(&url);
            prop_assert_eq!(with_transport_marker(&marked), marked.clone());
            let restored = strip_transport_marker(&marked);
            prop_assert_eq!(strip_transport_marker(&restored), restored.clone());
            prop_assert_eq!(restored, url);
        }

        #[test]
        fn prop_display_parse_round_trip(p in params()) {
            let url = to_request_url("/articles", &p);
            prop_assert_eq!(ListUrl::parse(&url.to_string()), url);
        }
    }
}
