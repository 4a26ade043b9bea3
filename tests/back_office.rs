mod support;

use axum::http::StatusCode;
use chrono::NaiveDate;
use loumo_admin::{
    dto::{agents::EditDriverRequest, orders::UpdateOrderStatusRequest},
    error::AppError,
    models::{AgentStatus, AgentUpdate, Faq, OrderStatus, UserUpdate},
    routes::params::{DashboardQuery, OrderListQuery, SortOrder},
    services::{agent_service, catalog_service, dashboard_service, loyalty_service, order_service},
};
use support::{FakeBackend, FakeData, agent, at, order, stock, tier, user, zone};

async fn backend() -> FakeBackend {
    let akwa = zone(1, "Akwa");
    let bonapriso = zone(2, "Bonapriso");

    let mut completed = order(3, "Awa Nana", 1, 150_000, at(3, 9));
    completed.status = OrderStatus::Completed;
    let mut completed_late = order(4, "Chantal Ebi", 2, 100_000, at(3, 23));
    completed_late.status = OrderStatus::Completed;

    FakeBackend::spawn(FakeData {
        orders: vec![
            order(1, "Awa Bello", 1, 45_000, at(1, 10)),
            order(2, "Brice Kamga", 2, 12_000, at(2, 11)),
            completed,
            completed_late,
        ],
        agents: vec![
            agent(1, AgentStatus::Available, &[akwa.clone()]),
            agent(2, AgentStatus::Suspended, &[bonapriso.clone()]),
        ],
        users: vec![user(101, "Jules"), user(102, "Mireille")],
        stocks: vec![stock(1, 1, 10, 0, 5), stock(2, 1, 11, 50, 5)],
        zones: vec![akwa, bonapriso],
        loyalty_tiers: vec![
            tier(3, "Gold", 5000, None),
            tier(1, "Bronze", 0, Some(999)),
            tier(2, "Silver", 1000, Some(4999)),
        ],
        ..FakeData::default()
    })
    .await
}

fn ids(resp: &loumo_admin::response::ApiResponse<loumo_admin::dto::orders::OrderList>) -> Vec<i64> {
    resp.data
        .as_ref()
        .map(|list| list.items.iter().map(|o| o.id).collect())
        .unwrap_or_default()
}

#[tokio::test]
async fn order_list_combines_criteria_newest_first() -> anyhow::Result<()> {
    let backend = backend().await;
    let state = backend.state();

    let resp = order_service::list_orders(
        &state,
        OrderListQuery {
            search: Some("AWA".into()),
            zone: Some("1".into()),
            status: Some("all".into()),
            ..OrderListQuery::default()
        },
    )
    .await?;
    assert_eq!(ids(&resp), vec![3, 1]);
    assert_eq!(resp.meta.as_ref().and_then(|m| m.total), Some(2));

    let resp = order_service::list_orders(
        &state,
        OrderListQuery {
            amount: Some("100+".into()),
            sort_order: Some(SortOrder::Asc),
            ..OrderListQuery::default()
        },
    )
    .await?;
    assert_eq!(ids(&resp), vec![3, 4]);
    Ok(())
}

#[tokio::test]
async fn order_list_pages_after_filtering() -> anyhow::Result<()> {
    let backend = backend().await;
    let state = backend.state();

    let resp = order_service::list_orders(
        &state,
        OrderListQuery {
            from: NaiveDate::from_ymd_opt(2026, 3, 2),
            to: NaiveDate::from_ymd_opt(2026, 3, 3),
            page: Some(2),
            per_page: Some(2),
            ..OrderListQuery::default()
        },
    )
    .await?;
    assert_eq!(ids(&resp), vec![2]);
    let meta = resp.meta.expect("meta");
    assert_eq!((meta.page, meta.per_page, meta.total), (Some(2), Some(2), Some(3)));
    Ok(())
}

#[tokio::test]
async fn page_far_past_the_end_is_empty() -> anyhow::Result<()> {
    let backend = backend().await;
    let state = backend.state();

    let resp = order_service::list_orders(
        &state,
        OrderListQuery {
            page: Some(i64::MAX),
            per_page: Some(100),
            ..OrderListQuery::default()
        },
    )
    .await?;
    assert!(ids(&resp).is_empty());
    assert_eq!(resp.meta.as_ref().and_then(|m| m.total), Some(4));
    Ok(())
}

#[tokio::test]
async fn malformed_criteria_are_bad_requests() {
    let backend = backend().await;
    let state = backend.state();

    for query in [
        OrderListQuery {
            status: Some("SHIPPED".into()),
            ..OrderListQuery::default()
        },
        OrderListQuery {
            amount: Some("10-30".into()),
            ..OrderListQuery::default()
        },
        OrderListQuery {
            from: NaiveDate::from_ymd_opt(2026, 3, 5),
            to: NaiveDate::from_ymd_opt(2026, 3, 1),
            ..OrderListQuery::default()
        },
    ] {
        let result = order_service::list_orders(&state, query).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
    assert!(backend.data().calls.is_empty());
}

#[tokio::test]
async fn status_update_is_visible_in_the_list() -> anyhow::Result<()> {
    let backend = backend().await;
    let state = backend.state();

    order_service::list_orders(&state, OrderListQuery::default()).await?;
    let resp = order_service::update_order_status(
        &state,
        1,
        UpdateOrderStatusRequest {
            status: OrderStatus::Processing,
        },
    )
    .await?;
    assert_eq!(resp.data.map(|o| o.status), Some(OrderStatus::Processing));

    let listed = order_service::list_orders(
        &state,
        OrderListQuery {
            status: Some("processing".into()),
            ..OrderListQuery::default()
        },
    )
    .await?;
    assert_eq!(ids(&listed), vec![1]);
    Ok(())
}

fn driver_edit() -> EditDriverRequest {
    EditDriverRequest {
        user: UserUpdate {
            name: "Jules Mbida".into(),
            email: "jules@loumo.test".into(),
            tel: Some("+237600000000".into()),
        },
        agent: AgentUpdate {
            status: AgentStatus::Unavailable,
            zone_ids: vec![1, 2],
            transport: Some("voiture".into()),
        },
    }
}

#[tokio::test]
async fn driver_edit_updates_both_records() -> anyhow::Result<()> {
    let backend = backend().await;
    let state = backend.state();

    let resp = agent_service::edit_driver(&state, 1, driver_edit()).await?;
    let edit = resp.data.expect("driver edit");
    assert_eq!(edit.user.name, "Jules Mbida");
    assert_eq!(edit.agent.status, AgentStatus::Unavailable);
    assert!(edit.agent.serves_zone(2));
    assert_eq!(backend.calls_to("PUT /users/101"), 1);
    assert_eq!(backend.calls_to("PUT /agents/1"), 1);
    Ok(())
}

#[tokio::test]
async fn driver_edit_reports_the_half_that_failed() {
    let backend = backend().await;
    backend.data().fail_agent_updates = true;
    let state = backend.state();

    let err = agent_service::edit_driver(&state, 1, driver_edit())
        .await
        .expect_err("agent half fails");
    match &err {
        AppError::PartialUpdate { applied, failed } => {
            assert_eq!(applied, &vec!["user".to_string()]);
            assert_eq!(failed.len(), 1);
            assert!(failed[0].starts_with("agent"));
        }
        other => panic!("expected a partial update, got {other:?}"),
    }
    assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    assert_eq!(backend.data().users[0].name, "Jules Mbida");
}

#[tokio::test]
async fn loyalty_tiers_resolve_from_the_sorted_table() -> anyhow::Result<()> {
    let backend = backend().await;
    let state = backend.state();

    let table = loyalty_service::list_tiers(&state).await?.data.expect("tiers");
    assert!(table.valid);
    let names: Vec<&str> = table.tiers.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Bronze", "Silver", "Gold"]);

    for (points, expected) in [(0, "Bronze"), (1000, "Silver"), (250_000, "Gold")] {
        let resolved = loyalty_service::resolve(&state, points).await?;
        assert_eq!(resolved.data.map(|r| r.tier.name), Some(expected.to_string()));
    }

    let negative = loyalty_service::resolve(&state, -1).await;
    assert!(matches!(negative, Err(AppError::BadRequest(_))));
    Ok(())
}

#[tokio::test]
async fn inconsistent_tier_table_is_flagged_when_loaded() -> anyhow::Result<()> {
    let gapped = FakeBackend::spawn(FakeData {
        loyalty_tiers: vec![tier(2, "Silver", 1500, None), tier(1, "Bronze", 0, Some(999))],
        ..FakeData::default()
    })
    .await;
    let state = gapped.state();

    state.caches.loyalty_tiers.refresh(&state.client).await?;
    let status = state.caches.loyalty_tiers.status().await;
    let problem = status.problem.expect("gap reported at load");
    assert!(problem.contains("Bronze") && problem.contains("Silver"));

    let healthy = backend().await;
    let state = healthy.state();
    state.caches.loyalty_tiers.refresh(&state.client).await?;
    assert_eq!(state.caches.loyalty_tiers.status().await.problem, None);
    Ok(())
}

#[tokio::test]
async fn dashboard_summarizes_the_window() -> anyhow::Result<()> {
    let backend = backend().await;
    let state = backend.state();

    let summary = dashboard_service::dashboard(
        &state,
        DashboardQuery {
            from: NaiveDate::from_ymd_opt(2026, 3, 3),
            to: NaiveDate::from_ymd_opt(2026, 3, 3),
        },
    )
    .await?
    .data
    .expect("summary");

    assert_eq!(summary.order_count, 2);
    assert_eq!(summary.revenue, 250_000);
    assert_eq!(summary.revenue_by_zone[0].zone_name.as_deref(), Some("Akwa"));
    assert_eq!(summary.stock_alerts.out_of_stock, 1);
    assert_eq!(summary.available_agents, 1);
    Ok(())
}

#[tokio::test]
async fn content_creation_is_passed_through() -> anyhow::Result<()> {
    let backend = backend().await;
    let state = backend.state();

    let resp = catalog_service::create_resource::<Faq>(
        &state,
        serde_json::json!({
            "question": "Livrez-vous le dimanche ?",
            "answer": "Oui, de 9h à 14h.",
        }),
    )
    .await?;
    let faq = resp.data.expect("faq");
    assert_eq!(faq.id, 1001);
    assert_eq!(faq.topic_id, None);
    assert_eq!(backend.calls_to("POST /faqs"), 1);
    Ok(())
}

#[tokio::test]
async fn only_an_identical_pending_creation_conflicts() -> anyhow::Result<()> {
    let backend = backend().await;
    let state = backend.state();

    let pending_body = serde_json::json!({ "question": "Livraison gratuite ?", "answer": "Dès 50 000 FCFA." });
    let _pending = state
        .inflight
        .begin(catalog_service::creation_key("faqs", &pending_body))
        .expect("first submission");

    let other = catalog_service::create_resource::<Faq>(
        &state,
        serde_json::json!({ "question": "Paiement à la livraison ?", "answer": "Oui." }),
    )
    .await?;
    assert!(other.data.is_some());

    let repeat = catalog_service::create_resource::<Faq>(&state, pending_body).await;
    assert!(matches!(repeat, Err(AppError::Conflict(_))));
    assert_eq!(backend.calls_to("POST /faqs"), 1);
    Ok(())
}
