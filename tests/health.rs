mod support;

use axum::{extract::State, http::StatusCode};
use loumo_admin::routes::health::{health_check, readiness};
use support::{FakeBackend, FakeData};

#[tokio::test]
async fn health_check_returns_ok() {
    let response = health_check().await;
    assert_eq!(response.0.message, "Health check");

    let data = response.0.data.expect("health data");
    assert_eq!(data.status, "ok");
}

#[tokio::test]
async fn readiness_reports_each_list_separately() -> anyhow::Result<()> {
    let backend = FakeBackend::spawn(FakeData::default()).await;
    let state = backend.state();

    let (status, body) = readiness(State(state.clone())).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    let data = body.0.data.expect("readiness");
    assert!(!data.ready);
    assert!(data.caches.iter().all(|c| !c.loaded));

    state.caches.orders.get(&state.client).await?;
    let (_, body) = readiness(State(state.clone())).await;
    let data = body.0.data.expect("readiness");
    let orders = data
        .caches
        .iter()
        .find(|c| c.name == "orders")
        .expect("orders cache");
    assert!(orders.loaded);
    assert!(orders.fetched_at.is_some());
    assert!(!data.ready, "other lists are still empty");

    Ok(())
}
