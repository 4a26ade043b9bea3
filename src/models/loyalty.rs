use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One band of the loyalty programme. `max_points == None` means unbounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoyaltyTier {
    pub id: i64,
    pub name: String,
    pub min_points: i64,
    #[serde(default)]
    pub max_points: Option<i64>,
    #[serde(default)]
    pub discount: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
}

impl LoyaltyTier {
    pub fn contains(&self, points: i64) -> bool {
        points >= self.min_points && self.max_points.is_none_or(|max| points <= max)
    }
}
