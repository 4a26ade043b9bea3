use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Agent, AgentUpdate, User, UserUpdate};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AgentList {
    pub items: Vec<Agent>,
}

/// Both halves are sent concurrently.
#[derive(Debug, Deserialize, ToSchema)]
pub struct EditDriverRequest {
    pub user: UserUpdate,
    pub agent: AgentUpdate,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DriverEdit {
    pub user: User,
    pub agent: Agent,
}
