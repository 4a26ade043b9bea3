use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{ParseStatusError, ProductVariant, Shop};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Stock {
    pub id: i64,
    pub product_variant_id: i64,
    pub shop_id: i64,
    pub quantity: i64,
    pub threshold: i64,
    pub restock_date: DateTime<Utc>,
    #[serde(default)]
    pub product_variant: Option<ProductVariant>,
    #[serde(default)]
    pub shop: Option<Shop>,
}

impl Stock {
    pub fn level(&self, attention_floor: i64) -> StockLevel {
        StockLevel::classify(self.quantity, self.threshold, attention_floor)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewStock {
    pub shop_id: i64,
    pub product_variant_id: i64,
    pub quantity: i64,
    pub threshold: i64,
}

/// Quantity delta added by the backend; never a new total.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Restock {
    pub quantity: i64,
}

/// Display badge of a stock row, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StockLevel {
    OutOfStock,
    Critical,
    Attention,
    Normal,
}

impl StockLevel {
    pub const ALL: [StockLevel; 4] = [
        StockLevel::OutOfStock,
        StockLevel::Critical,
        StockLevel::Attention,
        StockLevel::Normal,
    ];

    /// Severity wins: empty, then at/below the row's threshold, then below
    /// the global attention floor.
    pub fn classify(quantity: i64, threshold: i64, attention_floor: i64) -> Self {
        if quantity <= 0 {
            StockLevel::OutOfStock
        } else if quantity <= threshold {
            StockLevel::Critical
        } else if quantity < attention_floor {
            StockLevel::Attention
        } else {
            StockLevel::Normal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StockLevel::OutOfStock => "out_of_stock",
            StockLevel::Critical => "critical",
            StockLevel::Attention => "attention",
            StockLevel::Normal => "normal",
        }
    }
}

impl fmt::Display for StockLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StockLevel {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StockLevel::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseStatusError {
                kind: "stock level",
                value: s.to_string(),
            })
    }
}
