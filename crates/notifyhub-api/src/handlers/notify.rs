//! Producer notification ingest handler.

use axum::Json;
use axum::extract::State;

use crate::dto::request::NotifyRequest;
use crate::dto::response::{ApiResponse, NotifyResponse};
use crate::state::AppState;

/// POST /api/notify — producer entry point, one call per event.
///
/// Always acknowledges with the fixed id; delivery happens through the
/// per-client queues after this handler returns (the producer never waits
/// on consumer I/O).
pub async fn notify(
    State(state): State<AppState>,
    Json(req): Json<NotifyRequest>,
) -> Json<ApiResponse<NotifyResponse>> {
    let id = state.engine.ingest.notify(
        req.app_name,
        req.replaces_id,
        req.icon,
        req.summary,
        req.body,
        req.actions,
        req.hints,
        req.expire_timeout,
    );

    Json(ApiResponse::ok(NotifyResponse { id }))
}
