use std::sync::Arc;

use chrono::{FixedOffset, Offset, Utc};
use sea_orm::DatabaseConnection;

use crate::{cache::Caches, config::AppConfig, inflight::InFlight, upstream::LoumoClient};

#[derive(Clone)]
pub struct AppState {
    pub client: LoumoClient,
    pub caches: Arc<Caches>,
    pub inflight: InFlight,
    /// Audit log sink; `None` disables auditing.
    pub orm: Option<DatabaseConnection>,
    pub stock_attention_floor: i64,
    pub business_offset: FixedOffset,
}

impl AppState {
    pub fn new(client: LoumoClient) -> Self {
        Self {
            client,
            caches: Arc::new(Caches::default()),
            inflight: InFlight::default(),
            orm: None,
            stock_attention_floor: 20,
            business_offset: Utc.fix(),
        }
    }

    pub fn from_config(
        config: &AppConfig,
        client: LoumoClient,
        orm: Option<DatabaseConnection>,
    ) -> Self {
        Self {
            orm,
            stock_attention_floor: config.stock_attention_floor,
            business_offset: config.business_offset,
            ..Self::new(client)
        }
    }
}
