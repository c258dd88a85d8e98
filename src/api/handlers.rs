use axum::response::{IntoResponse, Response};
use axum::{Json, extract::Query, extract::State, http::StatusCode};
use std::sync::Arc;
use std::time::Instant;

use crate::data_models::SearchQuery;
use crate::error::SearchError;
use crate::pipeline::SearchPipeline;
use crate::platform::Platform;
use crate::refine::{Refinement, SortOption};

use super::models::{ErrorResponse, PlatformSummary, SearchParams, SearchResponse};

const INTERNAL_ERROR_MESSAGE: &str = "Search failed. Please try again.";

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            SearchError::InvalidInput(message) => (StatusCode::BAD_REQUEST, message),
            SearchError::Internal(e) => {
                // details stay in the log
                tracing::error!("search failed: {e:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
        };
        (status, Json(ErrorResponse { error })).into_response()
    }
}

pub async fn search_handler(
    State(pipeline): State<Arc<SearchPipeline>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, SearchError> {
    let start = Instant::now();

    let refinement = parse_refinement(&params)?;
    let query = SearchQuery::new(params.q, params.url);

    let results = pipeline.search(query.clone()).await?;
    let results = if refinement.is_noop() {
        results
    } else {
        refinement.apply(results)
    };

    tracing::info!(
        results = results.len(),
        first_id = results.first().map(|r| r.id.as_str()).unwrap_or(""),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "search complete"
    );

    Ok(Json(SearchResponse {
        total_results: results.len(),
        results,
        query,
    }))
}

pub async fn platforms_handler() -> Json<Vec<PlatformSummary>> {
    Json(Platform::registry().iter().map(PlatformSummary::from).collect())
}

pub async fn health_handler() -> &'static str {
    "ok"
}

fn parse_refinement(params: &SearchParams) -> Result<Refinement, SearchError> {
    let sort = match non_empty(&params.sort) {
        Some(raw) => raw
            .parse::<SortOption>()
            .map_err(|e| SearchError::InvalidInput(e.to_string()))?,
        None => SortOption::default(),
    };
    let platforms = match non_empty(&params.platforms) {
        Some(raw) => Refinement::parse_platforms(raw)
            .map_err(|e| SearchError::InvalidInput(e.to_string()))?,
        None => Vec::new(),
    };

    Ok(Refinement {
        sort,
        platforms,
        min_price: parse_price_bound("minPrice", &params.min_price)?,
        max_price: parse_price_bound("maxPrice", &params.max_price)?,
    })
}

fn parse_price_bound(name: &str, raw: &Option<String>) -> Result<Option<f64>, SearchError> {
    non_empty(raw)
        .map(|v| {
            v.trim()
                .parse::<f64>()
                .map_err(|_| SearchError::InvalidInput(format!("{name} must be a number")))
        })
        .transpose()
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}
