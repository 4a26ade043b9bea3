use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Agent;

#[derive(Debug, Deserialize, ToSchema)]
pub struct AssignDeliveryRequest {
    pub agent_id: i64,
    pub scheduled_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityState {
    Available,
    NoEligibleAgent,
}

/// Candidates for manual assignment. An empty list always comes with
/// `state = no_eligible_agent`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EligibleAgents {
    pub order_id: i64,
    pub zone_id: Option<i64>,
    pub state: EligibilityState,
    pub agents: Vec<Agent>,
}

impl EligibleAgents {
    pub fn new(order_id: i64, zone_id: Option<i64>, agents: Vec<Agent>) -> Self {
        let state = if agents.is_empty() {
            EligibilityState::NoEligibleAgent
        } else {
            EligibilityState::Available
        };
        Self {
            order_id,
            zone_id,
            state,
            agents,
        }
    }
}
