use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

use crate::{
    audit,
    dto::orders::{OrderList, UpdateOrderStatusRequest},
    error::{AppError, AppResult},
    models::{Order, OrderStatus, OrderStatusUpdate},
    response::{ApiResponse, Meta},
    routes::params::{OrderListQuery, SortOrder, restricted},
    state::AppState,
};

/// Fixed brackets over `Order::total`, half-open on the upper bound.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum AmountBracket {
    #[default]
    All,
    Under20k,
    From20kTo50k,
    From50kTo100k,
    From100k,
}

impl AmountBracket {
    pub fn contains(self, total: i64) -> bool {
        match self {
            AmountBracket::All => true,
            AmountBracket::Under20k => total < 20_000,
            AmountBracket::From20kTo50k => (20_000..50_000).contains(&total),
            AmountBracket::From50kTo100k => (50_000..100_000).contains(&total),
            AmountBracket::From100k => total >= 100_000,
        }
    }
}

impl FromStr for AmountBracket {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some(bracket) = restricted(Some(s)) else {
            return Ok(AmountBracket::All);
        };
        match bracket {
            "0-20" => Ok(AmountBracket::Under20k),
            "20-50" => Ok(AmountBracket::From20kTo50k),
            "50-100" => Ok(AmountBracket::From50kTo100k),
            "100+" | "100-" => Ok(AmountBracket::From100k),
            other => Err(AppError::BadRequest(format!("unknown amount bracket `{other}`"))),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PaymentFilter {
    #[default]
    All,
    /// The order has no payment record.
    Missing,
    Status(OrderStatus),
}

impl PaymentFilter {
    fn matches(self, order: &Order) -> bool {
        match self {
            PaymentFilter::All => true,
            PaymentFilter::Missing => order.payment.is_none(),
            PaymentFilter::Status(status) => {
                order.payment.as_ref().is_some_and(|p| p.status == status)
            }
        }
    }
}

impl FromStr for PaymentFilter {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some(payment) = restricted(Some(s)) else {
            return Ok(PaymentFilter::All);
        };
        if payment.eq_ignore_ascii_case("undefined") {
            return Ok(PaymentFilter::Missing);
        }
        payment
            .parse::<OrderStatus>()
            .map(PaymentFilter::Status)
            .map_err(|err| AppError::BadRequest(err.to_string()))
    }
}

/// Independent criteria over the order list; an order must satisfy all of
/// them. The default filter restricts nothing.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct OrderFilter {
    pub search: Option<String>,
    pub status: Option<OrderStatus>,
    pub payment: PaymentFilter,
    pub zone_id: Option<i64>,
    pub amount: AmountBracket,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub sort: SortOrder,
}

impl OrderFilter {
    pub fn from_query(query: &OrderListQuery) -> AppResult<Self> {
        let status = restricted(query.status.as_deref())
            .map(OrderStatus::from_str)
            .transpose()
            .map_err(|err| AppError::BadRequest(err.to_string()))?;

        let zone_id = restricted(query.zone.as_deref())
            .map(|zone| {
                zone.parse::<i64>()
                    .map_err(|_| AppError::BadRequest(format!("invalid zone `{zone}`")))
            })
            .transpose()?;

        let payment = query
            .payment
            .as_deref()
            .map(PaymentFilter::from_str)
            .transpose()?
            .unwrap_or_default();

        let amount = query
            .amount
            .as_deref()
            .map(AmountBracket::from_str)
            .transpose()?
            .unwrap_or_default();

        if let (Some(from), Some(to)) = (query.from, query.to) {
            if from > to {
                return Err(AppError::BadRequest("`from` is after `to`".into()));
            }
        }

        Ok(Self {
            search: query
                .search
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_lowercase),
            status,
            payment,
            zone_id,
            amount,
            from: query.from,
            to: query.to,
            sort: query.sort_order.unwrap_or_default(),
        })
    }

    /// Inclusive instant bounds: `from` at 00:00:00.000 and `to` at
    /// 23:59:59.999 in `offset`.
    pub fn date_bounds(
        &self,
        offset: FixedOffset,
    ) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
        let start = self
            .from
            .and_then(|day| day.and_hms_milli_opt(0, 0, 0, 0))
            .and_then(|local| local.and_local_timezone(offset).single())
            .map(|at| at.with_timezone(&Utc));
        let end = self
            .to
            .and_then(|day| day.and_hms_milli_opt(23, 59, 59, 999))
            .and_then(|local| local.and_local_timezone(offset).single())
            .map(|at| at.with_timezone(&Utc));
        (start, end)
    }

    fn matches_search(&self, order: &Order) -> bool {
        let Some(needle) = self.search.as_deref() else {
            return true;
        };
        order.user.name.to_lowercase().contains(needle)
            || order.id.to_string().contains(needle)
            || order.reference.to_lowercase().contains(needle)
    }

    pub fn matches(&self, order: &Order, offset: FixedOffset) -> bool {
        let (start, end) = self.date_bounds(offset);
        self.matches_within(order, start, end)
    }

    fn matches_within(
        &self,
        order: &Order,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> bool {
        self.matches_search(order)
            && self.status.is_none_or(|status| order.status == status)
            && self.payment.matches(order)
            && self.zone_id.is_none_or(|zone| order.zone_id() == Some(zone))
            && self.amount.contains(order.total)
            && start.is_none_or(|start| order.created_at >= start)
            && end.is_none_or(|end| order.created_at <= end)
    }
}

/// Orders satisfying every criterion, stably sorted by creation time.
pub fn filter_orders(orders: &[Order], filter: &OrderFilter, offset: FixedOffset) -> Vec<Order> {
    let (start, end) = filter.date_bounds(offset);
    let mut matched: Vec<Order> = orders
        .iter()
        .filter(|order| filter.matches_within(order, start, end))
        .cloned()
        .collect();

    match filter.sort {
        SortOrder::Asc => matched.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortOrder::Desc => matched.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    }
    matched
}

pub async fn list_orders(
    state: &AppState,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    let filter = OrderFilter::from_query(&query)?;
    let snapshot = state.caches.orders.get(&state.client).await?;

    let matched = filter_orders(&snapshot.items, &filter, state.business_offset);
    let total = matched.len() as i64;

    let (page, limit, offset) = query.pagination().normalize();
    let items = matched
        .into_iter()
        .skip(usize::try_from(offset).unwrap_or(usize::MAX))
        .take(usize::try_from(limit).unwrap_or(0))
        .collect();

    let meta = Meta::new(page, limit, total).fetched_at(snapshot.fetched_at);
    Ok(ApiResponse::success("Orders", OrderList { items }, Some(meta)))
}

pub async fn get_order(state: &AppState, id: i64) -> AppResult<ApiResponse<Order>> {
    let order = state.client.orders().get(id).await?;
    Ok(ApiResponse::success("Order found", order, Some(Meta::empty())))
}

pub async fn update_order_status(
    state: &AppState,
    id: i64,
    payload: UpdateOrderStatusRequest,
) -> AppResult<ApiResponse<Order>> {
    let _pending = state.inflight.begin(format!("order {id}"))?;

    let order = state
        .client
        .orders()
        .patch(
            id,
            &OrderStatusUpdate {
                status: payload.status,
            },
        )
        .await?;

    state.caches.orders.invalidate_and_refresh(&state.client).await;

    audit::record(
        state,
        "order_status_update",
        "orders",
        Some(order.id),
        serde_json::json!({ "status": order.status }),
    )
    .await;

    Ok(ApiResponse::success("Order updated", order, Some(Meta::empty())))
}
