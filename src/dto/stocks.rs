use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{ProductVariant, Stock, StockLevel};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StockView {
    #[serde(flatten)]
    pub stock: Stock,
    pub level: StockLevel,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StockList {
    pub items: Vec<StockView>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RestockRequest {
    /// Units to add; must be positive.
    pub quantity: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateStockRequest {
    pub shop_id: i64,
    pub product_variant_id: i64,
    pub quantity: i64,
    pub threshold: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StockCandidates {
    pub shop_id: i64,
    pub items: Vec<ProductVariant>,
}
