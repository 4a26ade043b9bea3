use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Delivery, ParseStatusError, zone::Address};

/// Status shared by orders and their payments.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    Accepted,
    Completed,
    Failed,
    Pending,
    Processing,
    Rejected,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Accepted,
        OrderStatus::Completed,
        OrderStatus::Failed,
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Accepted => "ACCEPTED",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Failed => "FAILED",
            OrderStatus::Pending => "PENDING",
            OrderStatus::Processing => "PROCESSING",
            OrderStatus::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseStatusError {
                kind: "order status",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderCustomer {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub tel: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: i64,
    pub status: OrderStatus,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub total: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: i64,
    pub product_variant_id: i64,
    pub quantity: i64,
    #[serde(default)]
    pub total: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    #[serde(rename = "ref")]
    pub reference: String,
    pub user: OrderCustomer,
    #[serde(default)]
    pub address: Option<Address>,
    pub total: i64,
    #[serde(default)]
    pub delivery_fee: i64,
    #[serde(default)]
    pub weight: f64,
    pub status: OrderStatus,
    #[serde(default)]
    pub payment: Option<Payment>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub order_items: Vec<OrderItem>,
    #[serde(default)]
    pub delivery: Vec<Delivery>,
}

impl Order {
    /// Zone the order ships to, reached through its address.
    pub fn zone_id(&self) -> Option<i64> {
        self.address.as_ref().map(|address| address.zone_id)
    }

    pub fn active_delivery(&self) -> Option<&Delivery> {
        self.delivery.iter().find(|d| d.status.is_active())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_status_case_insensitively() {
        assert_eq!("completed".parse::<OrderStatus>(), Ok(OrderStatus::Completed));
        assert_eq!(" PENDING ".parse::<OrderStatus>(), Ok(OrderStatus::Pending));
        assert!("shipped".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn decodes_backend_order_json() {
        let raw = serde_json::json!({
            "id": 7,
            "ref": "ORD-7",
            "user": { "name": "Awa", "email": "awa@loumo.cm", "tel": "690000000" },
            "address": { "id": 3, "street": "Rue 1", "zoneId": 2, "published": true },
            "total": 45000,
            "deliveryFee": 1500,
            "weight": 2.5,
            "status": "PROCESSING",
            "createdAt": "2026-03-01T10:00:00Z",
            "orderItems": [{ "id": 1, "productVariantId": 9, "quantity": 2 }],
            "delivery": [{
                "id": 4,
                "orderId": 7,
                "agentId": 11,
                "status": "NOTSTARTED",
                "scheduledTime": "2026-03-02T08:00:00Z"
            }]
        });
        let order: Order = serde_json::from_value(raw).expect("order json");
        assert_eq!(order.reference, "ORD-7");
        assert_eq!(order.zone_id(), Some(2));
        assert!(order.payment.is_none());
        assert_eq!(order.active_delivery().map(|d| d.id), Some(4));
    }

    #[test]
    fn order_with_unlisted_delivery_status_still_decodes() {
        let raw = serde_json::json!({
            "id": 8,
            "ref": "ORD-8",
            "user": { "name": "Brice" },
            "total": 12000,
            "deliveryFee": 1500,
            "weight": 1.0,
            "status": "ACCEPTED",
            "createdAt": "2026-03-01T10:00:00Z",
            "delivery": [{
                "id": 5,
                "orderId": 8,
                "status": "FAILED",
                "scheduledTime": "2026-03-02T08:00:00Z"
            }]
        });
        let order: Order = serde_json::from_value(raw).expect("order json");
        assert!(order.active_delivery().is_none());
    }
}
