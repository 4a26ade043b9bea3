use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    dto::dashboard::DashboardSummary,
    error::AppResult,
    response::ApiResponse,
    routes::params::DashboardQuery,
    services::dashboard_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(dashboard))
}

#[utoipa::path(
    get,
    path = "/api/dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Order, revenue, stock and agent figures", body = ApiResponse<DashboardSummary>),
        (status = 400, description = "Inverted date range"),
    ),
    tag = "Dashboard"
)]
pub async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> AppResult<Json<ApiResponse<DashboardSummary>>> {
    let resp = dashboard_service::dashboard(&state, query).await?;
    Ok(Json(resp))
}
