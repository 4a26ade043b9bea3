use chrono::{DateTime, Utc};

use crate::{
    audit,
    dto::deliveries::{AssignDeliveryRequest, EligibleAgents},
    error::{AppError, AppResult},
    models::{Agent, AgentStatus, Delivery, DeliveryStatus, NewDelivery, Order},
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Agents that may take `order`: available and serving the order's zone.
/// An order without a zone has no candidates.
pub fn eligible_agents<'a>(agents: &'a [Agent], order: &Order) -> Vec<&'a Agent> {
    let Some(zone_id) = order.zone_id() else {
        return Vec::new();
    };
    agents
        .iter()
        .filter(|agent| agent.status == AgentStatus::Available && agent.serves_zone(zone_id))
        .collect()
}

/// A delivery cannot be scheduled in the past.
pub fn validate_schedule(scheduled_time: DateTime<Utc>, now: DateTime<Utc>) -> AppResult<()> {
    if scheduled_time < now {
        return Err(AppError::BadRequest(
            "scheduled_time must not be earlier than now".into(),
        ));
    }
    Ok(())
}

pub async fn list_eligible_agents(
    state: &AppState,
    order_id: i64,
) -> AppResult<ApiResponse<EligibleAgents>> {
    let order = state.client.orders().get(order_id).await?;
    let agents = state.caches.agents.get(&state.client).await?;

    let candidates: Vec<Agent> = eligible_agents(&agents.items, &order)
        .into_iter()
        .cloned()
        .collect();
    let data = EligibleAgents::new(order.id, order.zone_id(), candidates);

    let meta = Meta::total(data.agents.len()).fetched_at(agents.fetched_at);
    Ok(ApiResponse::success("Eligible agents", data, Some(meta)))
}

/// Creates a STARTED delivery for `order_id` and refreshes the lists that
/// show it. Every local check runs before the backend is called.
pub async fn assign_delivery(
    state: &AppState,
    order_id: i64,
    payload: AssignDeliveryRequest,
) -> AppResult<ApiResponse<Delivery>> {
    validate_schedule(payload.scheduled_time, Utc::now())?;

    let _pending = state.inflight.begin(format!("delivery assignment for order {order_id}"))?;

    let order = state.client.orders().get(order_id).await?;
    if let Some(active) = order.active_delivery() {
        return Err(AppError::Conflict(format!(
            "order {order_id} already has active delivery {}",
            active.id
        )));
    }

    let agents = state.caches.agents.get(&state.client).await?;
    let eligible = eligible_agents(&agents.items, &order);
    if eligible.is_empty() {
        return Err(AppError::BadRequest(format!(
            "no eligible agent for order {order_id}"
        )));
    }
    if !eligible.iter().any(|agent| agent.id == payload.agent_id) {
        return Err(AppError::BadRequest(format!(
            "agent {} is not eligible for order {order_id}",
            payload.agent_id
        )));
    }

    let delivery = state
        .client
        .deliveries()
        .create(&NewDelivery {
            agent_id: payload.agent_id,
            order_id,
            scheduled_time: payload.scheduled_time,
            status: DeliveryStatus::Started,
        })
        .await?;

    tracing::info!(order_id, agent_id = payload.agent_id, delivery_id = delivery.id, "delivery assigned");

    tokio::join!(
        state.caches.agents.invalidate_and_refresh(&state.client),
        state.caches.orders.invalidate_and_refresh(&state.client),
        state.caches.deliveries.invalidate_and_refresh(&state.client),
    );

    audit::record(
        state,
        "delivery_assign",
        "deliveries",
        Some(delivery.id),
        serde_json::json!({
            "order_id": order_id,
            "agent_id": payload.agent_id,
            "scheduled_time": payload.scheduled_time,
        }),
    )
    .await;

    Ok(ApiResponse::success(
        "Delivery assigned",
        delivery,
        Some(Meta::empty()),
    ))
}
