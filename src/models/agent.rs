use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{ParseStatusError, User, Zone};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum AgentStatus {
    Available,
    Suspended,
    Full,
    Unavailable,
    Unverified,
}

impl AgentStatus {
    pub const ALL: [AgentStatus; 5] = [
        AgentStatus::Available,
        AgentStatus::Suspended,
        AgentStatus::Full,
        AgentStatus::Unavailable,
        AgentStatus::Unverified,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgentStatus::Available => "AVAILABLE",
            AgentStatus::Suspended => "SUSPENDED",
            AgentStatus::Full => "FULL",
            AgentStatus::Unavailable => "UNAVAILABLE",
            AgentStatus::Unverified => "UNVERIFIED",
        }
    }
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgentStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AgentStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseStatusError {
                kind: "agent status",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum DeliveryStatus {
    Started,
    Completed,
    Canceled,
    NotStarted,
    /// Any status this service does not know; never active.
    #[serde(other)]
    Unknown,
}

impl DeliveryStatus {
    /// A delivery still owned by its agent.
    pub fn is_active(self) -> bool {
        matches!(self, DeliveryStatus::Started | DeliveryStatus::NotStarted)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    pub id: i64,
    #[serde(default, rename = "ref")]
    pub reference: Option<String>,
    pub order_id: i64,
    #[serde(default)]
    pub agent_id: Option<i64>,
    pub status: DeliveryStatus,
    pub scheduled_time: DateTime<Utc>,
    #[serde(default)]
    pub delivered_time: Option<DateTime<Utc>>,
}

/// Body of the backend's delivery creation call.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewDelivery {
    pub agent_id: i64,
    pub order_id: i64,
    pub scheduled_time: DateTime<Utc>,
    pub status: DeliveryStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub user: Option<User>,
    pub status: AgentStatus,
    #[serde(default)]
    pub zone: Vec<Zone>,
    #[serde(default)]
    pub delivery: Vec<Delivery>,
    #[serde(default)]
    pub transport: Option<String>,
}

impl Agent {
    pub fn serves_zone(&self, zone_id: i64) -> bool {
        self.zone.iter().any(|zone| zone.id == zone_id)
    }

    pub fn active_deliveries(&self) -> usize {
        self.delivery.iter().filter(|d| d.status.is_active()).count()
    }
}

/// Agent-side half of a driver edit.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AgentUpdate {
    pub status: AgentStatus,
    pub zone_ids: Vec<i64>,
    #[serde(default)]
    pub transport: Option<String>,
}
