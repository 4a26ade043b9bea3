//! Wire models of the Loumo backend.
//!
//! Keys follow the backend's camelCase JSON. Collections the backend may omit
//! default to empty so partial `include`s still decode.

pub mod agent;
pub mod catalog;
pub mod content;
pub mod loyalty;
pub mod order;
pub mod stock;
pub mod user;
pub mod zone;

pub use agent::{Agent, AgentStatus, AgentUpdate, Delivery, DeliveryStatus, NewDelivery};
pub use catalog::{Product, ProductVariant, Shop};
pub use content::{Faq, Notification, Promotion, Setting, Topic};
pub use loyalty::LoyaltyTier;
pub use order::{Order, OrderCustomer, OrderItem, OrderStatus, OrderStatusUpdate, Payment};
pub use stock::{NewStock, Restock, Stock, StockLevel};
pub use user::{Permission, Role, User, UserUpdate};
pub use zone::{Address, Zone};

use thiserror::Error;

/// Returned when a status string from a query parameter matches no variant.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown {kind} `{value}`")]
pub struct ParseStatusError {
    pub kind: &'static str,
    pub value: String,
}
