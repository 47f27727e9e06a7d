//! Per-request spans and HTTP metrics.
//!
//! Handlers that fail through [`ApiError`](super::ApiError) tag the response
//! with a [`FailureKind`], which becomes the `outcome` label. Lookups under
//! `/api/wiki/` are also counted separately so resolver failures can be told
//! apart from bad input.

use axum::{
    extract::{MatchedPath, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

use super::AppState;

/// Response extension naming why a request failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailureKind(pub &'static str);

pub async fn get_metrics(State(state): State<Arc<AppState>>) -> Response {
    match state.prometheus_handle.as_ref() {
        Some(handle) => handle.render().into_response(),
        None => (StatusCode::SERVICE_UNAVAILABLE, "Metrics are disabled").into_response(),
    }
}

pub async fn track_request(req: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = req.method().clone();

    // matched route keeps label cardinality bounded
    let route = req.extensions().get::<MatchedPath>().map_or_else(
        || req.uri().path().to_string(),
        |path| path.as_str().to_string(),
    );

    let span = info_span!(
        "request",
        request_id = %Uuid::new_v4(),
        method = %method,
        route = %route,
    );

    async move {
        let response = next.run(req).await;
        let status = response.status();
        let outcome = outcome_of(&response);

        let labels = [
            ("method", method.to_string()),
            ("route", route.clone()),
            ("outcome", outcome.to_string()),
        ];
        metrics::counter!("http_requests_total", &labels).increment(1);
        metrics::histogram!("http_request_duration_seconds", &labels)
            .record(started.elapsed().as_secs_f64());

        if route.contains("/wiki/") {
            metrics::counter!(
                "species_lookups_total",
                "route" => route.clone(),
                "outcome" => outcome
            )
            .increment(1);
        }

        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        if status.is_server_error() {
            warn!(duration_ms, status = status.as_u16(), outcome, "Request failed");
        } else {
            info!(duration_ms, status = status.as_u16(), outcome, "Request finished");
        }

        response
    }
    .instrument(span)
    .await
}

fn outcome_of(response: &Response) -> &'static str {
    if let Some(kind) = response.extensions().get::<FailureKind>() {
        return kind.0;
    }

    let status = response.status();
    if status.is_server_error() {
        "error"
    } else if status.is_client_error() {
        "client_error"
    } else {
        "success"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::services::ResolverError;

    #[test]
    fn api_errors_label_their_outcome() {
        let cases = [
            (ResolverError::no_results("x"), "not_found"),
            (ResolverError::Search("timeout".to_string()), "upstream_error"),
            (
                ResolverError::InvalidImage {
                    url: "https://upload.example/page.html".to_string(),
                },
                "invalid_image",
            ),
        ];

        for (err, expected) in cases {
            let response = ApiError::from(err).into_response();
            assert_eq!(outcome_of(&response), expected);
        }

        let response = ApiError::validation("empty").into_response();
        assert_eq!(outcome_of(&response), "invalid_request");
    }

    #[test]
    fn untagged_responses_fall_back_to_status() {
        assert_eq!(outcome_of(&"ok".into_response()), "success");
        assert_eq!(outcome_of(&StatusCode::NOT_FOUND.into_response()), "client_error");
        assert_eq!(
            outcome_of(&StatusCode::SERVICE_UNAVAILABLE.into_response()),
            "error"
        );
    }
}
