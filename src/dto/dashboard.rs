use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::OrderStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StatusCount {
    pub status: OrderStatus,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DailyRevenue {
    pub day: NaiveDate,
    pub revenue: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ZoneRevenue {
    pub zone_id: Option<i64>,
    pub zone_name: Option<String>,
    pub revenue: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StockAlerts {
    pub out_of_stock: usize,
    pub critical: usize,
    pub attention: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DashboardSummary {
    pub order_count: usize,
    pub orders_by_status: Vec<StatusCount>,
    /// Sum of `total` over completed orders.
    pub revenue: i64,
    pub delivery_fees: i64,
    pub revenue_by_day: Vec<DailyRevenue>,
    pub revenue_by_zone: Vec<ZoneRevenue>,
    pub stock_alerts: StockAlerts,
    pub available_agents: usize,
}
