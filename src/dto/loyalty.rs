use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::LoyaltyTier;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TierTable {
    pub tiers: Vec<LoyaltyTier>,
    pub valid: bool,
    pub problem: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TierResolution {
    pub points: i64,
    pub tier: LoyaltyTier,
}
