use serde_json::Value;

use crate::{
    audit,
    error::AppResult,
    models::ProductVariant,
    response::{ApiResponse, Meta},
    state::AppState,
    upstream::Resource,
};

fn resource_name<T: Resource>() -> &'static str {
    T::PATH.trim_start_matches('/')
}

/// Variants with `imgUrl` resolved against the backend base URL.
pub async fn list_variants(state: &AppState) -> AppResult<ApiResponse<Vec<ProductVariant>>> {
    let snapshot = state.caches.variants.get(&state.client).await?;
    let items: Vec<ProductVariant> = snapshot
        .items
        .iter()
        .cloned()
        .map(|mut variant| {
            variant.img_url = variant.img_url.map(|path| state.client.asset_url(&path));
            variant
        })
        .collect();

    let meta = Meta::total(items.len()).fetched_at(snapshot.fetched_at);
    Ok(ApiResponse::success("Variants", items, Some(meta)))
}

pub async fn list_resource<T: Resource>(state: &AppState) -> AppResult<ApiResponse<Vec<T>>> {
    let items = state.client.query::<T>().list().await?;
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success(resource_name::<T>(), items, Some(meta)))
}

pub async fn get_resource<T: Resource>(state: &AppState, id: i64) -> AppResult<ApiResponse<T>> {
    let item = state.client.query::<T>().get(id).await?;
    Ok(ApiResponse::success(resource_name::<T>(), item, Some(Meta::empty())))
}

/// Same resource and same body. `Value` objects keep sorted keys, so the
/// rendering is stable for equal bodies.
pub fn creation_key(resource: &str, body: &Value) -> String {
    format!("creation in {resource}: {body}")
}

pub async fn create_resource<T: Resource>(
    state: &AppState,
    body: Value,
) -> AppResult<ApiResponse<T>> {
    let name = resource_name::<T>();
    let _pending = state.inflight.begin(creation_key(name, &body))?;

    let item = state.client.query::<T>().create(&body).await?;
    audit::record(state, "create", name, Some(item.id()), body).await;
    Ok(ApiResponse::success("Created", item, Some(Meta::empty())))
}

pub async fn update_resource<T: Resource>(
    state: &AppState,
    id: i64,
    body: Value,
) -> AppResult<ApiResponse<T>> {
    let name = resource_name::<T>();
    let _pending = state.inflight.begin(format!("update of {name} {id}"))?;

    let item = state.client.query::<T>().update(id, &body).await?;
    audit::record(state, "update", name, Some(id), body).await;
    Ok(ApiResponse::success("Updated", item, Some(Meta::empty())))
}

pub async fn delete_resource<T: Resource>(
    state: &AppState,
    id: i64,
) -> AppResult<ApiResponse<Value>> {
    let name = resource_name::<T>();
    let _pending = state.inflight.begin(format!("deletion of {name} {id}"))?;

    state.client.query::<T>().delete(id).await?;
    audit::record(state, "delete", name, Some(id), Value::Null).await;
    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({ "id": id }),
        Some(Meta::empty()),
    ))
}
