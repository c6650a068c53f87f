//! Core HTTP route handlers: health and the call collection routes.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use callboard_core::{filter, sort, ApiResponse, CallRecord};
use sha2::{Digest, Sha256};

use super::json_error;
use super::state::{AppState, ViewQuery};

pub(crate) const LIST_FAILURE: &str = "Failed to fetch calls";
const GET_FAILURE: &str = "Failed to fetch call";
const NOT_FOUND: &str = "Call not found";
const POST_FAILURE: &str = "Failed to process POST request";

/// Fallback handler for unmatched routes.
pub(crate) async fn handle_not_found() -> impl IntoResponse {
    json_error(StatusCode::NOT_FOUND, "not found")
}

/// GET /health
pub(crate) async fn handle_health(State(state): State<Arc<AppState>>) -> Response {
    match state.source.list_calls().await {
        Ok(calls) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "status": "ok",
                "calls": calls.len(),
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("health check could not read calls: {}", e);
            json_error(StatusCode::SERVICE_UNAVAILABLE, "call source unavailable").into_response()
        }
    }
}

/// Failure envelope for list-shaped responses.
pub(crate) fn list_failure(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ApiResponse::failure(Vec::<CallRecord>::new(), message)),
    )
        .into_response()
}

/// Compute SHA-256 etag from the compact JSON form of the collection.
pub(crate) fn compute_etag(calls: &[CallRecord]) -> String {
    let canonical = serde_json::to_vec(calls).unwrap_or_default();
    format!("{:x}", Sha256::digest(&canonical))
}

/// GET /api/calls
///
/// Without query parameters the whole collection is returned with an ETag
/// and `If-None-Match` is honoured. With `search`/`outcome` the filter is
/// applied, and `sort` orders the result.
pub(crate) async fn handle_list_calls(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ViewQuery>,
    headers: HeaderMap,
) -> Response {
    let calls = match state.source.list_calls().await {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("failed to list calls: {}", e);
            return list_failure(StatusCode::INTERNAL_SERVER_ERROR, LIST_FAILURE);
        }
    };

    if query.is_empty() {
        return collection_response(calls, &headers);
    }

    let (params, sort_key) = match query.view() {
        Ok(v) => v,
        Err(msg) => return list_failure(StatusCode::BAD_REQUEST, &msg),
    };
    let mut selected = filter(&calls, &params);
    if let Some(key) = sort_key {
        sort(&mut selected, key);
    }
    tracing::debug!(
        search = %params.search_term,
        outcome = %params.outcome_filter,
        matched = selected.len(),
        "filtered calls"
    );

    let selected: Vec<CallRecord> = selected.into_iter().cloned().collect();
    (StatusCode::OK, Json(ApiResponse::ok(selected))).into_response()
}

/// The full collection with an ETag, or 304 when the client copy is current.
fn collection_response(calls: Vec<CallRecord>, headers: &HeaderMap) -> Response {
    let etag = compute_etag(&calls);
    let etag_quoted = format!("\"{}\"", etag);

    if let Some(inm) = headers.get(header::IF_NONE_MATCH) {
        if let Ok(inm_str) = inm.to_str() {
            if etag_matches(inm_str, &etag) {
                return StatusCode::NOT_MODIFIED.into_response();
            }
        }
    }

    let mut response = Json(ApiResponse::ok(calls)).into_response();
    if let Ok(val) = etag_quoted.parse() {
        response.headers_mut().insert(header::ETAG, val);
    }
    response
}

/// True when an `If-None-Match` value names `etag`.
///
/// Handles `*`, comma-separated lists, and weak `W/` tags; unquoted tags
/// are accepted as well.
fn etag_matches(if_none_match: &str, etag: &str) -> bool {
    if_none_match.split(',').map(str::trim).any(|candidate| {
        if candidate == "*" {
            return true;
        }
        let candidate = candidate.strip_prefix("W/").unwrap_or(candidate);
        candidate.trim_matches('"') == etag
    })
}

/// POST /api/calls
///
/// Nothing is persisted: the payload is logged and the existing collection
/// is returned. The body is read as raw bytes so any content type is
/// accepted and a malformed body still gets the envelope.
pub(crate) async fn handle_create_call(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Response {
    let payload: serde_json::Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(e) => {
            tracing::error!("failed to parse POST body: {}", e);
            return list_failure(StatusCode::INTERNAL_SERVER_ERROR, POST_FAILURE);
        }
    };
    tracing::info!(payload = %payload, "received call payload");

    match state.source.list_calls().await {
        Ok(calls) => (StatusCode::OK, Json(ApiResponse::ok(calls))).into_response(),
        Err(e) => {
            tracing::error!("failed to list calls after POST: {}", e);
            list_failure(StatusCode::INTERNAL_SERVER_ERROR, POST_FAILURE)
        }
    }
}

/// GET /api/calls/{id}
pub(crate) async fn handle_get_call(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    match state.source.get_call(&id).await {
        Ok(call) => (StatusCode::OK, Json(ApiResponse::ok(call))).into_response(),
        Err(e) if e.is_not_found() => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::failure(serde_json::json!({}), NOT_FOUND)),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(%id, "failed to fetch call: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::failure(serde_json::json!({}), GET_FAILURE)),
            )
                .into_response()
        }
    }
}
