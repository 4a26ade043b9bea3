//! List caches for backend collections.
//!
//! A cache is filled lazily on first read, refreshed by a background poller
//! and refreshed again after every mutation that touches it. Poll and
//! mutation refreshes are not ordered: the last completed fetch wins.

use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::{
    sync::RwLock,
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use utoipa::ToSchema;

use crate::{
    config::PollingConfig,
    models::{Agent, Delivery, LoyaltyTier, Order, ProductVariant, Stock, Zone},
    services::loyalty_service,
    upstream::{LoumoClient, Resource, UpstreamError},
};

/// Consistency check run on every fetched list; `Some` describes the problem.
pub type ListCheck<T> = fn(&[T]) -> Option<String>;

#[derive(Debug)]
pub struct Snapshot<T> {
    pub items: Arc<Vec<T>>,
    pub fetched_at: DateTime<Utc>,
}

impl<T> Clone for Snapshot<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
            fetched_at: self.fetched_at,
        }
    }
}

#[derive(Debug)]
struct Slot<T> {
    snapshot: Option<Snapshot<T>>,
    last_error: Option<String>,
    problem: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CacheStatus {
    pub name: String,
    pub loaded: bool,
    pub items: usize,
    pub fetched_at: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
    /// Inconsistency found in the last fetched list.
    pub problem: Option<String>,
}

#[derive(Debug)]
pub struct ListCache<T> {
    name: &'static str,
    slot: RwLock<Slot<T>>,
    check: Option<ListCheck<T>>,
}

impl<T: Resource> ListCache<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            slot: RwLock::new(Slot {
                snapshot: None,
                last_error: None,
                problem: None,
            }),
            check: None,
        }
    }

    pub fn with_check(mut self, check: ListCheck<T>) -> Self {
        self.check = Some(check);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Current snapshot, fetching it first if nothing has been loaded yet or
    /// the last mutation invalidated it.
    pub async fn get(&self, client: &LoumoClient) -> Result<Snapshot<T>, UpstreamError> {
        if let Some(snapshot) = self.slot.read().await.snapshot.clone() {
            return Ok(snapshot);
        }
        self.refresh(client).await
    }

    /// Refetches the list. A failed fetch keeps the previous snapshot.
    pub async fn refresh(&self, client: &LoumoClient) -> Result<Snapshot<T>, UpstreamError> {
        match client.query::<T>().list().await {
            Ok(items) => {
                let problem = self.check.and_then(|check| check(&items));
                if let Some(problem) = &problem {
                    tracing::warn!(cache = self.name, %problem, "fetched list is inconsistent");
                }
                let snapshot = Snapshot {
                    items: Arc::new(items),
                    fetched_at: Utc::now(),
                };
                let mut slot = self.slot.write().await;
                slot.snapshot = Some(snapshot.clone());
                slot.last_error = None;
                slot.problem = problem;
                tracing::debug!(cache = self.name, items = snapshot.items.len(), "cache refreshed");
                Ok(snapshot)
            }
            Err(err) => {
                self.slot.write().await.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    pub async fn invalidate(&self) {
        self.slot.write().await.snapshot = None;
    }

    /// Marks the list stale and refetches it. If the refetch fails the list
    /// stays stale and the next read retries.
    pub async fn invalidate_and_refresh(&self, client: &LoumoClient) {
        self.invalidate().await;
        if let Err(err) = self.refresh(client).await {
            tracing::warn!(cache = self.name, error = %err, "refresh after mutation failed");
        }
    }

    pub async fn status(&self) -> CacheStatus {
        let slot = self.slot.read().await;
        CacheStatus {
            name: self.name.to_string(),
            loaded: slot.snapshot.is_some(),
            items: slot.snapshot.as_ref().map_or(0, |s| s.items.len()),
            fetched_at: slot.snapshot.as_ref().map(|s| s.fetched_at),
            last_error: slot.last_error.clone(),
            problem: slot.problem.clone(),
        }
    }
}

/// Every list the back-office keeps warm.
#[derive(Debug)]
pub struct Caches {
    pub orders: ListCache<Order>,
    pub agents: ListCache<Agent>,
    pub deliveries: ListCache<Delivery>,
    pub stocks: ListCache<Stock>,
    pub variants: ListCache<ProductVariant>,
    pub zones: ListCache<Zone>,
    pub loyalty_tiers: ListCache<LoyaltyTier>,
}

impl Default for Caches {
    fn default() -> Self {
        Self {
            orders: ListCache::new("orders"),
            agents: ListCache::new("agents"),
            deliveries: ListCache::new("deliveries"),
            stocks: ListCache::new("stocks"),
            variants: ListCache::new("variants"),
            zones: ListCache::new("zones"),
            loyalty_tiers: ListCache::new("loyalty_tiers")
                .with_check(loyalty_service::table_problem),
        }
    }
}

impl Caches {
    pub async fn statuses(&self) -> Vec<CacheStatus> {
        vec![
            self.orders.status().await,
            self.agents.status().await,
            self.deliveries.status().await,
            self.stocks.status().await,
            self.variants.status().await,
            self.zones.status().await,
            self.loyalty_tiers.status().await,
        ]
    }
}

pub fn spawn_poller<T: Resource>(
    caches: Arc<Caches>,
    client: LoumoClient,
    every: Duration,
    select: fn(&Caches) -> &ListCache<T>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let cache = select(&caches);
        tracing::info!(cache = cache.name(), secs = every.as_secs(), "poller started");
        let mut interval = time::interval(every);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            if let Err(err) = cache.refresh(&client).await {
                tracing::warn!(cache = cache.name(), error = %err, "poll refresh failed");
            }
        }
    })
}

pub fn spawn_pollers(
    caches: &Arc<Caches>,
    client: &LoumoClient,
    polling: &PollingConfig,
) -> Vec<JoinHandle<()>> {
    vec![
        spawn_poller(caches.clone(), client.clone(), polling.orders, |c| &c.orders),
        spawn_poller(caches.clone(), client.clone(), polling.agents, |c| &c.agents),
        spawn_poller(caches.clone(), client.clone(), polling.agents, |c| &c.deliveries),
        spawn_poller(caches.clone(), client.clone(), polling.stocks, |c| &c.stocks),
        spawn_poller(caches.clone(), client.clone(), polling.catalog, |c| &c.variants),
        spawn_poller(caches.clone(), client.clone(), polling.catalog, |c| &c.zones),
        spawn_poller(caches.clone(), client.clone(), polling.catalog, |c| &c.loyalty_tiers),
    ]
}
