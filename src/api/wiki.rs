//! Wikipedia lookup endpoints used to autofill species entries.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::validation::{validate_article_title, validate_search_query};
use super::{ApiError, ApiResponse, AppState, ResolvedTitleDto};
use crate::services::LookupResult;

#[derive(Debug, Deserialize)]
pub struct QueryParams {
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct TitleParams {
    pub title: String,
}

/// `GET /api/wiki/resolve?q=`
pub async fn resolve_title(
    State(state): State<Arc<AppState>>,
    Query(params): Query<QueryParams>,
) -> Result<Json<ApiResponse<ResolvedTitleDto>>, ApiError> {
    let query = validate_search_query(&params.q)?;

    let title = state.lookup_service().resolve_title(query).await?;

    Ok(Json(ApiResponse::success(ResolvedTitleDto {
        query: query.to_string(),
        title,
    })))
}

/// `GET /api/wiki/summary?title=`
pub async fn fetch_summary(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TitleParams>,
) -> Result<Json<ApiResponse<LookupResult>>, ApiError> {
    let title = validate_article_title(&params.title)?;

    let result = state.lookup_service().fetch_content(title).await?;

    Ok(Json(ApiResponse::success(result)))
}

/// `GET /api/wiki/lookup?q=`
///
/// Resolves the query and fetches the article content in one call.
pub async fn lookup(
    State(state): State<Arc<AppState>>,
    Query(params): Query<QueryParams>,
) -> Result<Json<ApiResponse<LookupResult>>, ApiError> {
    let query = validate_search_query(&params.q)?;

    let result = state.lookup_service().lookup(query).await?;

    Ok(Json(ApiResponse::success(result)))
}
