use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};

use crate::{
    dto::stocks::{CreateStockRequest, RestockRequest, StockCandidates, StockList},
    error::AppResult,
    models::Stock,
    response::ApiResponse,
    routes::{detached, params::StockListQuery},
    services::stock_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stocks", get(list_stocks).post(create_stock))
        .route("/stocks/{id}/restock", post(restock))
        .route("/shops/{id}/stock-candidates", get(stock_candidates))
}

#[utoipa::path(
    get,
    path = "/api/stocks",
    params(StockListQuery),
    responses(
        (status = 200, description = "Stock rows with their level", body = ApiResponse<StockList>),
        (status = 400, description = "Unknown level"),
    ),
    tag = "Stocks"
)]
pub async fn list_stocks(
    State(state): State<AppState>,
    Query(query): Query<StockListQuery>,
) -> AppResult<Json<ApiResponse<StockList>>> {
    let resp = stock_service::list_stocks(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/stocks",
    request_body = CreateStockRequest,
    responses(
        (status = 200, description = "Stock created", body = ApiResponse<Stock>),
        (status = 400, description = "Negative quantity or threshold"),
        (status = 409, description = "Variant already stocked in this shop"),
    ),
    tag = "Stocks"
)]
pub async fn create_stock(
    State(state): State<AppState>,
    Json(payload): Json<CreateStockRequest>,
) -> AppResult<Json<ApiResponse<Stock>>> {
    let resp = detached(async move { stock_service::create_stock(&state, payload).await }).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/stocks/{id}/restock",
    params(("id" = i64, Path, description = "Stock ID")),
    request_body = RestockRequest,
    responses(
        (status = 200, description = "Stock restocked", body = ApiResponse<Stock>),
        (status = 400, description = "Quantity is not positive"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "A restock of this row is in progress"),
    ),
    tag = "Stocks"
)]
pub async fn restock(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<RestockRequest>,
) -> AppResult<Json<ApiResponse<Stock>>> {
    let resp = detached(async move { stock_service::restock(&state, id, payload).await }).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/shops/{id}/stock-candidates",
    params(("id" = i64, Path, description = "Shop ID")),
    responses(
        (status = 200, description = "Variants without a stock row in the shop", body = ApiResponse<StockCandidates>),
    ),
    tag = "Stocks"
)]
pub async fn stock_candidates(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<StockCandidates>>> {
    let resp = stock_service::stock_candidates(&state, id).await?;
    Ok(Json(resp))
}
