use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    dto::loyalty::{TierResolution, TierTable},
    error::AppResult,
    response::ApiResponse,
    routes::params::PointsQuery,
    services::loyalty_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tiers", get(list_tiers))
        .route("/resolve", get(resolve_tier))
}

#[utoipa::path(
    get,
    path = "/api/loyalty/tiers",
    responses(
        (status = 200, description = "Tier table sorted by minimum points", body = ApiResponse<TierTable>),
    ),
    tag = "Loyalty"
)]
pub async fn list_tiers(State(state): State<AppState>) -> AppResult<Json<ApiResponse<TierTable>>> {
    let resp = loyalty_service::list_tiers(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/loyalty/resolve",
    params(PointsQuery),
    responses(
        (status = 200, description = "Tier for the balance", body = ApiResponse<TierResolution>),
        (status = 400, description = "Negative balance"),
        (status = 404, description = "No tiers configured"),
    ),
    tag = "Loyalty"
)]
pub async fn resolve_tier(
    State(state): State<AppState>,
    Query(query): Query<PointsQuery>,
) -> AppResult<Json<ApiResponse<TierResolution>>> {
    let resp = loyalty_service::resolve(&state, query.points).await?;
    Ok(Json(resp))
}
