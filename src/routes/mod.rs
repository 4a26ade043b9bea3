use std::future::Future;

use axum::Router;

use crate::{
    error::{AppError, AppResult},
    state::AppState,
};

pub mod agents;
pub mod catalog;
pub mod dashboard;
pub mod doc;
pub mod health;
pub mod loyalty;
pub mod orders;
pub mod params;
pub mod stocks;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/orders", orders::router())
        .nest("/agents", agents::router())
        .nest("/loyalty", loyalty::router())
        .nest("/dashboard", dashboard::router())
        .merge(stocks::router())
        .merge(catalog::router())
}

/// Runs a mutation on its own task so it completes even if the client
/// goes away mid-request.
pub(crate) async fn detached<F, T>(task: F) -> AppResult<T>
where
    F: Future<Output = AppResult<T>> + Send + 'static,
    T: Send + 'static,
{
    tokio::spawn(task)
        .await
        .map_err(|err| AppError::Internal(anyhow::anyhow!("mutation task failed: {err}")))?
}
