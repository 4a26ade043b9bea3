use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, patch, post},
};

use crate::{
    dto::{
        deliveries::{AssignDeliveryRequest, EligibleAgents},
        orders::{OrderList, UpdateOrderStatusRequest},
    },
    error::AppResult,
    models::{Delivery, Order},
    response::ApiResponse,
    routes::{detached, params::OrderListQuery},
    services::{delivery_service, order_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders))
        .route("/{id}", get(get_order))
        .route("/{id}/status", patch(update_order_status))
        .route("/{id}/eligible-agents", get(list_eligible_agents))
        .route("/{id}/deliveries", post(assign_delivery))
}

#[utoipa::path(
    get,
    path = "/api/orders",
    params(OrderListQuery),
    responses(
        (status = 200, description = "Orders matching every criterion", body = ApiResponse<OrderList>),
        (status = 400, description = "Unknown filter value"),
        (status = 502, description = "Backend unavailable"),
    ),
    tag = "Orders"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let resp = order_service::list_orders(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(("id" = i64, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order", body = ApiResponse<Order>),
        (status = 404, description = "Not Found"),
    ),
    tag = "Orders"
)]
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let resp = order_service::get_order(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/orders/{id}/status",
    params(("id" = i64, Path, description = "Order ID")),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Order updated", body = ApiResponse<Order>),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Another update of this order is in progress"),
    ),
    tag = "Orders"
)]
pub async fn update_order_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateOrderStatusRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let resp =
        detached(async move { order_service::update_order_status(&state, id, payload).await })
            .await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}/eligible-agents",
    params(("id" = i64, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Available agents serving the order's zone", body = ApiResponse<EligibleAgents>),
        (status = 404, description = "Not Found"),
    ),
    tag = "Deliveries"
)]
pub async fn list_eligible_agents(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<EligibleAgents>>> {
    let resp = delivery_service::list_eligible_agents(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/orders/{id}/deliveries",
    params(("id" = i64, Path, description = "Order ID")),
    request_body = AssignDeliveryRequest,
    responses(
        (status = 200, description = "Delivery created", body = ApiResponse<Delivery>),
        (status = 400, description = "Schedule in the past or agent not eligible"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Order already has an active delivery or an assignment is in progress"),
    ),
    tag = "Deliveries"
)]
pub async fn assign_delivery(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<AssignDeliveryRequest>,
) -> AppResult<Json<ApiResponse<Delivery>>> {
    let resp =
        detached(async move { delivery_service::assign_delivery(&state, id, payload).await })
            .await?;
    Ok(Json(resp))
}
