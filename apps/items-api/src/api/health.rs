//! Readiness probe.
//!
//! Liveness (`/health`) comes from `axum_helpers::health_router`; this
//! module adds `/ready`, which only reports ready when MongoDB answers.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
struct ReadinessResponse {
    status: &'static str,
    mongodb: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    response_time_ms: u64,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(readiness))
        .with_state(state)
}

async fn readiness(State(state): State<AppState>) -> Json<ReadinessResponse> {
    let health = database::mongodb::check_health_detailed(&state.mongo_client).await;

    Json(ReadinessResponse {
        status: if health.healthy { "ready" } else { "unhealthy" },
        mongodb: health.healthy,
        error: health.message,
        response_time_ms: health.response_time_ms,
    })
}
