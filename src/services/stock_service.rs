use std::{collections::HashSet, str::FromStr};

use crate::{
    audit,
    dto::stocks::{CreateStockRequest, RestockRequest, StockCandidates, StockList, StockView},
    error::{AppError, AppResult},
    models::{NewStock, ProductVariant, Stock, StockLevel},
    response::{ApiResponse, Meta},
    routes::params::{StockListQuery, restricted},
    state::AppState,
};

/// Variants that may still get a stock row in `shop_id`.
pub fn candidate_variants<'a>(
    variants: &'a [ProductVariant],
    stocks: &[Stock],
    shop_id: i64,
) -> Vec<&'a ProductVariant> {
    let stocked: HashSet<i64> = stocks
        .iter()
        .filter(|stock| stock.shop_id == shop_id)
        .map(|stock| stock.product_variant_id)
        .collect();
    variants
        .iter()
        .filter(|variant| !stocked.contains(&variant.id))
        .collect()
}

pub fn stock_exists(stocks: &[Stock], shop_id: i64, product_variant_id: i64) -> bool {
    stocks
        .iter()
        .any(|s| s.shop_id == shop_id && s.product_variant_id == product_variant_id)
}

pub async fn list_stocks(
    state: &AppState,
    query: StockListQuery,
) -> AppResult<ApiResponse<StockList>> {
    let level = restricted(query.level.as_deref())
        .map(StockLevel::from_str)
        .transpose()
        .map_err(|err| AppError::BadRequest(err.to_string()))?;

    let snapshot = state.caches.stocks.get(&state.client).await?;
    let floor = state.stock_attention_floor;

    let items: Vec<StockView> = snapshot
        .items
        .iter()
        .filter(|stock| query.shop_id.is_none_or(|shop| stock.shop_id == shop))
        .map(|stock| StockView {
            level: stock.level(floor),
            stock: stock.clone(),
        })
        .filter(|view| level.is_none_or(|level| view.level == level))
        .collect();

    let meta = Meta::total(items.len()).fetched_at(snapshot.fetched_at);
    Ok(ApiResponse::success("Stocks", StockList { items }, Some(meta)))
}

pub async fn stock_candidates(
    state: &AppState,
    shop_id: i64,
) -> AppResult<ApiResponse<StockCandidates>> {
    let (variants, stocks) = tokio::try_join!(
        state.caches.variants.get(&state.client),
        state.caches.stocks.get(&state.client),
    )?;

    let items = candidate_variants(&variants.items, &stocks.items, shop_id)
        .into_iter()
        .cloned()
        .map(|mut variant| {
            variant.img_url = variant.img_url.map(|path| state.client.asset_url(&path));
            variant
        })
        .collect::<Vec<_>>();

    let meta = Meta::total(items.len()).fetched_at(stocks.fetched_at);
    Ok(ApiResponse::success(
        "Stock candidates",
        StockCandidates { shop_id, items },
        Some(meta),
    ))
}

/// Sends the delta only; the backend adds it and stamps the restock date.
pub async fn restock(
    state: &AppState,
    id: i64,
    payload: RestockRequest,
) -> AppResult<ApiResponse<Stock>> {
    if payload.quantity <= 0 {
        return Err(AppError::BadRequest("quantity must be a positive integer".into()));
    }

    let _pending = state.inflight.begin(format!("restock of stock {id}"))?;

    let stock = state.client.stocks().restock(id, payload.quantity).await?;
    tracing::info!(stock_id = id, delta = payload.quantity, quantity = stock.quantity, "stock restocked");

    state.caches.stocks.invalidate_and_refresh(&state.client).await;

    audit::record(
        state,
        "stock_restock",
        "stocks",
        Some(id),
        serde_json::json!({ "delta": payload.quantity }),
    )
    .await;

    Ok(ApiResponse::success("Stock restocked", stock, Some(Meta::empty())))
}

pub async fn create_stock(
    state: &AppState,
    payload: CreateStockRequest,
) -> AppResult<ApiResponse<Stock>> {
    if payload.quantity < 0 || payload.threshold < 0 {
        return Err(AppError::BadRequest(
            "quantity and threshold must not be negative".into(),
        ));
    }

    let _pending = state.inflight.begin(format!(
        "stock creation for variant {} in shop {}",
        payload.product_variant_id, payload.shop_id
    ))?;

    let stocks = state.caches.stocks.refresh(&state.client).await?;
    if stock_exists(&stocks.items, payload.shop_id, payload.product_variant_id) {
        return Err(AppError::Conflict(format!(
            "variant {} is already stocked in shop {}",
            payload.product_variant_id, payload.shop_id
        )));
    }

    let stock = state
        .client
        .stocks()
        .create(&NewStock {
            shop_id: payload.shop_id,
            product_variant_id: payload.product_variant_id,
            quantity: payload.quantity,
            threshold: payload.threshold,
        })
        .await?;

    state.caches.stocks.invalidate_and_refresh(&state.client).await;

    audit::record(
        state,
        "stock_create",
        "stocks",
        Some(stock.id),
        serde_json::json!({
            "shop_id": stock.shop_id,
            "product_variant_id": stock.product_variant_id,
            "quantity": stock.quantity,
        }),
    )
    .await;

    Ok(ApiResponse::success("Stock created", stock, Some(Meta::empty())))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn variant(id: i64) -> ProductVariant {
        ProductVariant {
            id,
            name: format!("Variant {id}"),
            product_id: 1,
            price: 1000,
            weight: None,
            img_url: None,
            status: true,
        }
    }

    fn stock(id: i64, shop_id: i64, product_variant_id: i64) -> Stock {
        Stock {
            id,
            product_variant_id,
            shop_id,
            quantity: 5,
            threshold: 2,
            restock_date: Utc::now(),
            product_variant: None,
            shop: None,
        }
    }

    #[test]
    fn variant_stocked_in_shop_is_not_a_candidate() {
        let variants = vec![variant(1), variant(2), variant(3)];
        let stocks = vec![stock(1, 10, 2)];
        let ids: Vec<i64> = candidate_variants(&variants, &stocks, 10)
            .iter()
            .map(|v| v.id)
            .collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn stock_in_another_shop_does_not_hide_the_variant() {
        let variants = vec![variant(1), variant(2)];
        let stocks = vec![stock(1, 11, 2)];
        assert_eq!(candidate_variants(&variants, &stocks, 10).len(), 2);
        assert!(stock_exists(&stocks, 11, 2));
        assert!(!stock_exists(&stocks, 10, 2));
    }
}
