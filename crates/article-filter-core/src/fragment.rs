//! Fragment payload returned by the listing endpoint.

use serde::{Deserialize, Deserializer};

/// Markup for every region of the widget plus the page count.
///
/// Wire format:
/// `{"content": "...", "sorting": "...", "pagination": "...", "count": "...", "totalPage": 3}`
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFragment {
    /// Items of the list; top-level children carry their key.
    pub content: String,
    pub sorting: String,
    pub pagination: String,
    pub count: String,
    /// Number of pages for the current query.
    #[serde(deserialize_with = "lenient_page_count")]
    pub total_page: u32,
}

/// Accepts `3`, `3.0` and `2.4` (rounded up). Negative and non-finite
/// values become 0.
fn lenient_page_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    if !raw.is_finite() || raw <= 0.0 {
        return Ok(0);
    }
    Ok(raw.ceil().min(f64::from(u32::MAX)) as u32)
}
