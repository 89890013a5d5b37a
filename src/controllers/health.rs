use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::domain::speech::{SpeechService, SpeechServiceApi};
use crate::infrastructure::db::{check_connection, DbPool};

/// Dependencies probed by the readiness check
pub struct HealthState {
    pub pool: Arc<DbPool>,
    pub speech_service: Arc<SpeechService>,
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub async fn health_ready(State(state): State<Arc<HealthState>>) -> impl IntoResponse {
    let database_ok = check_connection(&state.pool).await.is_ok();
    let model_ok = state.speech_service.is_ready().await;

    let status = if database_ok && model_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(json!({
            "status": if status == StatusCode::OK { "ready" } else { "not_ready" },
            "database": if database_ok { "connected" } else { "disconnected" },
            "model": if model_ok { "available" } else { "unavailable" }
        })),
    )
}
