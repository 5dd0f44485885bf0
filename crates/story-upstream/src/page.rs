//! Page payload decoding.

use serde::Deserialize;
use story_core::Record;

use crate::error::FetchError;

#[derive(Deserialize)]
struct WirePage {
    data: Vec<serde_json::Value>,
    #[serde(default)]
    meta: Option<PageMeta>,
}

/// Optional pagination metadata. Shapes differ between API versions, so
/// every field is optional and both spellings of the page count are accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct PageMeta {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default, alias = "pageCount")]
    pub page_count: Option<u32>,
    /// Number of items matching the filter across all pages.
    #[serde(default)]
    pub filter_count: Option<u64>,
}

impl PageMeta {
    /// Whether this metadata says `requested` (fetched with `limit`) was the
    /// last page.
    #[must_use]
    pub fn is_last(&self, requested: u32, limit: u32) -> bool {
        if let Some(page_count) = self.page_count {
            return self.page.unwrap_or(requested) >= page_count;
        }
        if let Some(total) = self.filter_count {
            return u64::from(requested) * u64::from(limit) >= total;
        }
        false
    }
}

/// One decoded page.
#[derive(Debug, Clone, Default)]
pub struct Page {
    /// Records that decoded successfully, in response order.
    pub records: Vec<Record>,
    /// Items the response carried, decodable or not.
    pub received: usize,
    pub meta: Option<PageMeta>,
}

impl Page {
    /// Build a page from already-decoded records.
    #[must_use]
    pub fn from_records(records: Vec<Record>, meta: Option<PageMeta>) -> Self {
        Self {
            received: records.len(),
            records,
            meta,
        }
    }

    /// Decode a `{data: [...], meta?: {...}}` response body.
    ///
    /// Items that are not decodable as a [`Record`] are dropped with a
    /// warning but still count toward [`Page::received`], so page-size
    /// termination is not fooled by a bad item.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Parse`] if the body is not JSON or has no
    /// `data` array.
    pub fn from_body(body: &[u8]) -> Result<Self, FetchError> {
        let wire: WirePage =
            serde_json::from_slice(body).map_err(|e| FetchError::Parse(e.to_string()))?;
        let received = wire.data.len();
        let mut records = Vec::with_capacity(received);
        for (index, item) in wire.data.into_iter().enumerate() {
            match serde_json::from_value::<Record>(item) {
                Ok(record) => records.push(record),
                Err(error) => tracing::warn!(index, %error, "dropping undecodable record"),
            }
        }
        Ok(Self {
            records,
            received,
            meta: wire.meta,
        })
    }
}
