//! HTTP product source backed by the listing API.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

use shopfeed_core::ProductPage;

use crate::source::{PageQuery, ProductSource, SourceError};

/// Wire shape of an error response body.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// A `ProductSource` that fetches pages from a catalog service over HTTP.
///
/// Requests take the shape
/// `GET {base}/api/products?page={int}&search={string?}&category={string?}`;
/// `search` is omitted when no term is committed and `category` is omitted
/// for the "all" selection.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpSource {
    /// Create a source against `base_url` (e.g. `http://localhost:3000`).
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Transport` if the base URL does not parse.
    pub fn new(base_url: &str) -> Result<Self, SourceError> {
        let endpoint = Url::parse(base_url)
            .and_then(|base| base.join("/api/products"))
            .map_err(|e| SourceError::Transport(format!("invalid base url: {e}")))?;

        Ok(Self {
            client: reqwest::Client::new(),
            endpoint,
        })
    }

    /// Build the request URL for `query`.
    fn url_for(&self, query: &PageQuery) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("page", &query.page.to_string());
            if let Some(term) = &query.filter.search {
                pairs.append_pair("search", term);
            }
            if let Some(category) = query.filter.category.as_query_param() {
                pairs.append_pair("category", category);
            }
        }
        url
    }
}

#[async_trait]
impl ProductSource for HttpSource {
    #[instrument(skip(self), fields(page = query.page))]
    async fn fetch_page(&self, query: &PageQuery) -> Result<ProductPage, SourceError> {
        let url = self.url_for(query);
        debug!(%url, "fetching page");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SourceError::Transport(e.to_string()))?;

        let status = response.status();

        // Read the body as text first for better error diagnostics
        let body = response
            .text()
            .await
            .map_err(|e| SourceError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map_or_else(|_| body.chars().take(200).collect(), |e| e.error);
            return Err(SourceError::Server {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| SourceError::Decode(e.to_string()))
    }
}
