use std::str::FromStr;

use crate::{
    audit,
    dto::agents::{AgentList, DriverEdit, EditDriverRequest},
    error::{AppError, AppResult},
    models::{Agent, AgentStatus},
    response::{ApiResponse, Meta},
    routes::params::{AgentListQuery, restricted},
    state::AppState,
};

pub fn filter_agents<'a>(
    agents: &'a [Agent],
    status: Option<AgentStatus>,
    zone_id: Option<i64>,
) -> Vec<&'a Agent> {
    agents
        .iter()
        .filter(|agent| status.is_none_or(|status| agent.status == status))
        .filter(|agent| zone_id.is_none_or(|zone| agent.serves_zone(zone)))
        .collect()
}

pub async fn list_agents(
    state: &AppState,
    query: AgentListQuery,
) -> AppResult<ApiResponse<AgentList>> {
    let status = restricted(query.status.as_deref())
        .map(AgentStatus::from_str)
        .transpose()
        .map_err(|err| AppError::BadRequest(err.to_string()))?;

    let snapshot = state.caches.agents.get(&state.client).await?;
    let items: Vec<Agent> = filter_agents(&snapshot.items, status, query.zone_id)
        .into_iter()
        .cloned()
        .collect();

    let meta = Meta::total(items.len()).fetched_at(snapshot.fetched_at);
    Ok(ApiResponse::success("Agents", AgentList { items }, Some(meta)))
}

/// Updates the driver's user record and agent record concurrently. When
/// only one half lands, the caller gets `PartialUpdate` naming each half;
/// nothing is rolled back.
pub async fn edit_driver(
    state: &AppState,
    agent_id: i64,
    payload: EditDriverRequest,
) -> AppResult<ApiResponse<DriverEdit>> {
    let _pending = state.inflight.begin(format!("edit of agent {agent_id}"))?;

    let agent = state.client.agents().get(agent_id).await?;

    let users = state.client.users();
    let agents = state.client.agents();
    let (user_result, agent_result) = tokio::join!(
        users.update(agent.user_id, &payload.user),
        agents.update(agent_id, &payload.agent),
    );

    state.caches.agents.invalidate_and_refresh(&state.client).await;

    match (user_result, agent_result) {
        (Ok(user), Ok(agent)) => {
            audit::record(
                state,
                "driver_edit",
                "agents",
                Some(agent_id),
                serde_json::json!({
                    "user_id": user.id,
                    "status": agent.status,
                    "zone_ids": payload.agent.zone_ids,
                }),
            )
            .await;
            Ok(ApiResponse::success(
                "Driver updated",
                DriverEdit { user, agent },
                Some(Meta::empty()),
            ))
        }
        (Ok(_), Err(err)) => {
            tracing::warn!(agent_id, error = %err, "driver edit: agent update failed after user update");
            audit::record(
                state,
                "driver_edit_partial",
                "agents",
                Some(agent_id),
                serde_json::json!({ "applied": ["user"], "failed": ["agent"] }),
            )
            .await;
            Err(AppError::PartialUpdate {
                applied: vec!["user".into()],
                failed: vec![format!("agent: {err}")],
            })
        }
        (Err(err), Ok(_)) => {
            tracing::warn!(agent_id, error = %err, "driver edit: user update failed after agent update");
            audit::record(
                state,
                "driver_edit_partial",
                "agents",
                Some(agent_id),
                serde_json::json!({ "applied": ["agent"], "failed": ["user"] }),
            )
            .await;
            Err(AppError::PartialUpdate {
                applied: vec!["agent".into()],
                failed: vec![format!("user: {err}")],
            })
        }
        (Err(user_err), Err(agent_err)) => {
            tracing::warn!(agent_id, error = %agent_err, "driver edit: agent update failed");
            Err(user_err.into())
        }
    }
}
