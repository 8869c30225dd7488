use axum::{extract::State, Json};
use std::sync::Arc;

use crate::models::HealthCheck;

// GET /healthcheck
pub async fn healthcheck(State(info): State<Arc<HealthCheck>>) -> Json<HealthCheck> {
    tracing::debug!("Health check for {} {}", info.service, info.version);
    Json(HealthCheck::clone(&info))
}
