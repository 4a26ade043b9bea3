use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    cache::CacheStatus,
    response::{ApiResponse, Meta},
    state::AppState,
};

#[derive(Serialize, ToSchema)]
pub struct HealthData {
    pub status: String,
}

#[derive(Serialize, ToSchema)]
pub struct Readiness {
    pub ready: bool,
    pub caches: Vec<CacheStatus>,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "OK", body = ApiResponse<HealthData>),
    ),
        tag = "Health"
)]
pub async fn health_check() -> Json<ApiResponse<HealthData>> {
    let data = HealthData {
        status: "ok".to_string(),
    };

    Json(ApiResponse::success(
        "Health check",
        data,
        Some(Meta::empty()),
    ))
}

/// Each list reports its own state; readiness is only composed here.
#[utoipa::path(
    get,
    path = "/health/ready",
    responses(
        (status = 200, description = "Every list is loaded", body = ApiResponse<Readiness>),
        (status = 503, description = "At least one list is not loaded", body = ApiResponse<Readiness>),
    ),
    tag = "Health"
)]
pub async fn readiness(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<Readiness>>) {
    let caches = state.caches.statuses().await;
    let ready = caches.iter().all(|cache| cache.loaded);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(ApiResponse::success(
            "Readiness",
            Readiness { ready, caches },
            Some(Meta::empty()),
        )),
    )
}
