//! Page sources: the seam between the fetch loop and the transport.

use std::future::Future;
use std::time::Duration;

use crate::error::FetchError;
use crate::http::check_response;
use crate::page::Page;

/// Parameters for a single page request.
#[derive(Debug, Clone, Copy)]
pub struct PageRequest<'a> {
    pub collection: &'a str,
    pub token: &'a str,
    /// 1-based page number.
    pub page: u32,
    pub limit: u32,
}

/// Anything that can return one page of a collection.
pub trait PageSource {
    fn fetch_page(
        &self,
        request: PageRequest<'_>,
    ) -> impl Future<Output = Result<Page, FetchError>> + Send;
}

/// HTTP page source for a Directus-style `/items/{collection}` endpoint.
pub struct DirectusSource {
    http: reqwest::Client,
    base_url: String,
    status: String,
}

impl DirectusSource {
    /// Create a source for `endpoint`, filtering on `status` (usually
    /// `published`) and bounding every request by `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the underlying client fails to build.
    pub fn new(endpoint: &str, status: &str, timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .user_agent("stories/0.1")
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: endpoint.trim_end_matches('/').to_string(),
            status: status.to_string(),
        })
    }

    fn page_url(&self, request: &PageRequest<'_>) -> String {
        format!(
            "{}/items/{}?filter[status][_eq]={}&limit={}&page={}&meta=filter_count",
            self.base_url,
            urlencoding::encode(request.collection),
            urlencoding::encode(&self.status),
            request.limit,
            request.page,
        )
    }
}

impl PageSource for DirectusSource {
    async fn fetch_page(&self, request: PageRequest<'_>) -> Result<Page, FetchError> {
        let url = self.page_url(&request);
        let resp = check_response(
            self.http
                .get(&url)
                .bearer_auth(request.token)
                .send()
                .await?,
        )
        .await?;
        let body = resp.bytes().await?;
        Page::from_body(&body)
    }
}
