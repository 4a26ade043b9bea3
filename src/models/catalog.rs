use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Address;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    pub id: i64,
    pub name: String,
    pub product_id: i64,
    pub price: i64,
    #[serde(default)]
    pub weight: Option<f64>,
    /// Usually relative to the backend base URL.
    #[serde(default)]
    pub img_url: Option<String>,
    #[serde(default)]
    pub status: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub variants: Vec<ProductVariant>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Shop {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub address_id: Option<i64>,
    #[serde(default)]
    pub address: Option<Address>,
}
