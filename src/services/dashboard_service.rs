use std::collections::{BTreeMap, HashMap};

use chrono::{FixedOffset, NaiveDate};

use crate::{
    dto::dashboard::{DailyRevenue, DashboardSummary, StatusCount, StockAlerts, ZoneRevenue},
    error::{AppError, AppResult},
    models::{Agent, AgentStatus, Order, OrderStatus, Stock, StockLevel, Zone},
    response::{ApiResponse, Meta},
    routes::params::DashboardQuery,
    services::order_service::{OrderFilter, filter_orders},
    state::AppState,
};

/// Revenue counts completed orders only.
fn earns_revenue(order: &Order) -> bool {
    order.status == OrderStatus::Completed
}

pub fn status_counts(orders: &[Order]) -> Vec<StatusCount> {
    OrderStatus::ALL
        .into_iter()
        .map(|status| StatusCount {
            status,
            count: orders.iter().filter(|o| o.status == status).count(),
        })
        .collect()
}

pub fn revenue_by_day(orders: &[Order], offset: FixedOffset) -> Vec<DailyRevenue> {
    let mut days: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    for order in orders.iter().filter(|o| earns_revenue(o)) {
        let day = order.created_at.with_timezone(&offset).date_naive();
        *days.entry(day).or_default() += order.total;
    }
    days.into_iter()
        .map(|(day, revenue)| DailyRevenue { day, revenue })
        .collect()
}

/// Highest revenue first; orders without an address land in a `None` zone.
pub fn revenue_by_zone(orders: &[Order], zones: &[Zone]) -> Vec<ZoneRevenue> {
    let names: HashMap<i64, &str> = zones.iter().map(|z| (z.id, z.name.as_str())).collect();
    let mut totals: BTreeMap<Option<i64>, i64> = BTreeMap::new();
    for order in orders.iter().filter(|o| earns_revenue(o)) {
        *totals.entry(order.zone_id()).or_default() += order.total;
    }

    let mut rows: Vec<ZoneRevenue> = totals
        .into_iter()
        .map(|(zone_id, revenue)| ZoneRevenue {
            zone_id,
            zone_name: zone_id
                .and_then(|id| names.get(&id))
                .map(|name| name.to_string()),
            revenue,
        })
        .collect();
    rows.sort_by(|a, b| b.revenue.cmp(&a.revenue));
    rows
}

pub fn stock_alerts(stocks: &[Stock], attention_floor: i64) -> StockAlerts {
    stocks
        .iter()
        .fold(StockAlerts::default(), |mut alerts, stock| {
            match stock.level(attention_floor) {
                StockLevel::OutOfStock => alerts.out_of_stock += 1,
                StockLevel::Critical => alerts.critical += 1,
                StockLevel::Attention => alerts.attention += 1,
                StockLevel::Normal => {}
            }
            alerts
        })
}

pub fn summarize(
    orders: &[Order],
    zones: &[Zone],
    stocks: &[Stock],
    agents: &[Agent],
    attention_floor: i64,
    offset: FixedOffset,
) -> DashboardSummary {
    let completed = orders.iter().filter(|o| earns_revenue(o));
    let (revenue, delivery_fees) = completed.fold((0i64, 0i64), |(revenue, fees), order| {
        (revenue + order.total, fees + order.delivery_fee)
    });

    DashboardSummary {
        order_count: orders.len(),
        orders_by_status: status_counts(orders),
        revenue,
        delivery_fees,
        revenue_by_day: revenue_by_day(orders, offset),
        revenue_by_zone: revenue_by_zone(orders, zones),
        stock_alerts: stock_alerts(stocks, attention_floor),
        available_agents: agents
            .iter()
            .filter(|a| a.status == AgentStatus::Available)
            .count(),
    }
}

pub async fn dashboard(
    state: &AppState,
    query: DashboardQuery,
) -> AppResult<ApiResponse<DashboardSummary>> {
    if let (Some(from), Some(to)) = (query.from, query.to) {
        if from > to {
            return Err(AppError::BadRequest("`from` is after `to`".into()));
        }
    }

    let caches = &state.caches;
    let (orders, zones, stocks, agents) = tokio::try_join!(
        caches.orders.get(&state.client),
        caches.zones.get(&state.client),
        caches.stocks.get(&state.client),
        caches.agents.get(&state.client),
    )?;

    let window = OrderFilter {
        from: query.from,
        to: query.to,
        ..OrderFilter::default()
    };
    let in_range = filter_orders(&orders.items, &window, state.business_offset);

    let summary = summarize(
        &in_range,
        &zones.items,
        &stocks.items,
        &agents.items,
        state.stock_attention_floor,
        state.business_offset,
    );

    let meta = Meta::total(summary.order_count).fetched_at(orders.fetched_at);
    Ok(ApiResponse::success("Dashboard", summary, Some(meta)))
}
