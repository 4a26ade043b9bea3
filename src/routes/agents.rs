use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, put},
};

use crate::{
    dto::agents::{AgentList, DriverEdit, EditDriverRequest},
    error::AppResult,
    response::ApiResponse,
    routes::{detached, params::AgentListQuery},
    services::agent_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_agents))
        .route("/{id}", put(edit_driver))
}

#[utoipa::path(
    get,
    path = "/api/agents",
    params(AgentListQuery),
    responses(
        (status = 200, description = "Agents", body = ApiResponse<AgentList>),
        (status = 400, description = "Unknown status"),
    ),
    tag = "Agents"
)]
pub async fn list_agents(
    State(state): State<AppState>,
    Query(query): Query<AgentListQuery>,
) -> AppResult<Json<ApiResponse<AgentList>>> {
    let resp = agent_service::list_agents(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/agents/{id}",
    params(("id" = i64, Path, description = "Agent ID")),
    request_body = EditDriverRequest,
    responses(
        (status = 200, description = "User and agent updated", body = ApiResponse<DriverEdit>),
        (status = 404, description = "Not Found"),
        (status = 502, description = "Only one of the two updates was applied"),
    ),
    tag = "Agents"
)]
pub async fn edit_driver(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<EditDriverRequest>,
) -> AppResult<Json<ApiResponse<DriverEdit>>> {
    let resp = detached(async move { agent_service::edit_driver(&state, id, payload).await }).await?;
    Ok(Json(resp))
}
