//! Summary routes: aggregate stats and the dashboard snapshot.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use callboard_core::{aggregate, filter, ApiResponse, Dashboard, DashboardFilter};
use time::OffsetDateTime;

use super::state::{AppState, DashboardQuery, ViewQuery};
use crate::commands::stats::StatsReport;

/// Failure envelope with an empty object payload, matching the detail route.
fn failure(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ApiResponse::failure(serde_json::json!({}), message)),
    )
        .into_response()
}

/// GET /api/stats
pub(crate) async fn handle_stats(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ViewQuery>,
) -> Response {
    let (params, _) = match query.view() {
        Ok(v) => v,
        Err(msg) => return failure(StatusCode::BAD_REQUEST, &msg),
    };

    let calls = match state.source.list_calls().await {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("failed to list calls for stats: {}", e);
            return failure(StatusCode::INTERNAL_SERVER_ERROR, super::handlers::LIST_FAILURE);
        }
    };

    let report = StatsReport {
        overall: aggregate(&calls),
        filtered: aggregate(filter(&calls, &params)),
    };
    (StatusCode::OK, Json(ApiResponse::ok(report))).into_response()
}

/// GET /api/dashboard
pub(crate) async fn handle_dashboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DashboardQuery>,
) -> Response {
    let dashboard_filter: DashboardFilter = match query.filter.as_deref() {
        Some(f) => match f.parse() {
            Ok(parsed) => parsed,
            Err(msg) => return failure(StatusCode::BAD_REQUEST, &msg),
        },
        None => DashboardFilter::All,
    };

    let calls = match state.source.list_calls().await {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("failed to list calls for dashboard: {}", e);
            return failure(StatusCode::INTERNAL_SERVER_ERROR, super::handlers::LIST_FAILURE);
        }
    };

    let dashboard = Dashboard::build(
        &calls,
        dashboard_filter,
        query.show_all,
        OffsetDateTime::now_utc(),
    );
    (StatusCode::OK, Json(ApiResponse::ok(dashboard))).into_response()
}
