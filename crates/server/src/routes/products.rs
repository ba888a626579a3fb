//! Product listing route handler.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use shopfeed_core::query::run_query;
use shopfeed_core::{CatalogFilter, CategoryFilter, ProductPage};

use crate::error::{ApiError, Result};
use crate::state::AppState;

/// Listing query parameters.
///
/// `page` is kept as a raw string so malformed values surface as the wire
/// error shape instead of an extractor rejection.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub search: Option<String>,
    pub category: Option<String>,
}

impl ListQuery {
    /// Validate the raw parameters into a page index and filter context.
    fn parse(self) -> Result<(u32, CatalogFilter)> {
        let page = match self.page.as_deref().map(str::trim) {
            None | Some("") => 0,
            Some(raw) => raw
                .parse::<u32>()
                .map_err(|_| ApiError::BadRequest(format!("invalid page: {raw}")))?,
        };

        let category = match self.category.as_deref().map(str::trim) {
            None | Some("") => CategoryFilter::All,
            Some(raw) => raw
                .parse::<CategoryFilter>()
                .map_err(|e| ApiError::BadRequest(e.to_string()))?,
        };

        // The minimum-length gate is the client's commit rule; the service
        // applies whatever term arrives, like the original interceptor.
        let search = self
            .search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok((page, CatalogFilter { search, category }))
    }
}

/// `GET /api/products?page={int}&search={string?}&category={string?}`
#[instrument(skip(state, query), fields(request_id = tracing::field::Empty))]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ProductPage>> {
    state.config().simulation.induce().await?;

    let (page, filter) = query.parse()?;
    let response = run_query(state.catalog().products(), &filter, page);

    tracing::debug!(
        page,
        total = response.total,
        returned = response.products.len(),
        has_more = response.has_more,
        "listing served"
    );

    Ok(Json(response))
}
