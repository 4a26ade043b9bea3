//! Catalog, users and site content. Besides `/variants` these are thin
//! passthroughs to the backend; content resources also accept writes.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde_json::Value;

use crate::{
    error::AppResult,
    models::{
        Faq, Notification, Product, ProductVariant, Promotion, Role, Setting, Shop, Topic, User,
        Zone,
    },
    response::ApiResponse,
    routes::detached,
    services::catalog_service,
    state::AppState,
    upstream::Resource,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/variants", get(list_variants))
        .route("/products", get(list::<Product>))
        .route("/shops", get(list::<Shop>))
        .route("/zones", get(list::<Zone>))
        .route("/users", get(list::<User>))
        .route("/roles", get(list::<Role>))
        .route("/notifications", get(list::<Notification>))
        .nest("/settings", editable::<Setting>())
        .nest("/topics", editable::<Topic>())
        .nest("/faqs", editable::<Faq>())
        .nest("/promotions", editable::<Promotion>())
}

fn editable<T: Resource>() -> Router<AppState> {
    Router::new()
        .route("/", get(list::<T>).post(create::<T>))
        .route("/{id}", get(show::<T>).put(update::<T>).delete(remove::<T>))
}

#[utoipa::path(
    get,
    path = "/api/variants",
    responses(
        (status = 200, description = "Variants with resolved image URLs", body = ApiResponse<Vec<ProductVariant>>),
    ),
    tag = "Catalog"
)]
pub async fn list_variants(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<ProductVariant>>>> {
    let resp = catalog_service::list_variants(&state).await?;
    Ok(Json(resp))
}

async fn list<T: Resource>(State(state): State<AppState>) -> AppResult<Json<ApiResponse<Vec<T>>>> {
    let resp = catalog_service::list_resource::<T>(&state).await?;
    Ok(Json(resp))
}

async fn show<T: Resource>(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<T>>> {
    let resp = catalog_service::get_resource::<T>(&state, id).await?;
    Ok(Json(resp))
}

async fn create<T: Resource>(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> AppResult<Json<ApiResponse<T>>> {
    let resp = detached(async move { catalog_service::create_resource::<T>(&state, body).await })
        .await?;
    Ok(Json(resp))
}

async fn update<T: Resource>(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> AppResult<Json<ApiResponse<T>>> {
    let resp =
        detached(async move { catalog_service::update_resource::<T>(&state, id, body).await })
            .await?;
    Ok(Json(resp))
}

async fn remove<T: Resource>(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Value>>> {
    let resp = detached(async move { catalog_service::delete_resource::<T>(&state, id).await })
        .await?;
    Ok(Json(resp))
}
