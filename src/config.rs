use std::{env, time::Duration};

use anyhow::Context;
use chrono::FixedOffset;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_url: String,
    pub api_token: Option<String>,
    pub api_timeout: Duration,
    pub database_url: Option<String>,
    pub host: String,
    pub port: u16,
    pub polling: PollingConfig,
    pub stock_attention_floor: i64,
    pub business_offset: FixedOffset,
}

/// Background refresh interval per cached list.
#[derive(Debug, Clone, Copy)]
pub struct PollingConfig {
    pub orders: Duration,
    pub agents: Duration,
    pub stocks: Duration,
    pub catalog: Duration,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            orders: Duration::from_secs(30),
            agents: Duration::from_secs(30),
            stocks: Duration::from_secs(60),
            catalog: Duration::from_secs(60),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let api_url = env::var("LOUMO_API_URL").context("LOUMO_API_URL is not set")?;
        let api_token = env::var("LOUMO_API_TOKEN").ok().filter(|t| !t.is_empty());
        let database_url = env::var("DATABASE_URL").ok().filter(|u| !u.is_empty());
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);

        let defaults = PollingConfig::default();
        let polling = PollingConfig {
            orders: secs_var("ORDERS_POLL_SECS").unwrap_or(defaults.orders),
            agents: secs_var("AGENTS_POLL_SECS").unwrap_or(defaults.agents),
            stocks: secs_var("STOCKS_POLL_SECS").unwrap_or(defaults.stocks),
            catalog: secs_var("CATALOG_POLL_SECS").unwrap_or(defaults.catalog),
        };

        let stock_attention_floor = env::var("STOCK_ATTENTION_FLOOR")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(20);

        let offset_minutes = env::var("BUSINESS_UTC_OFFSET_MINUTES")
            .ok()
            .and_then(|v| v.parse::<i32>().ok())
            .unwrap_or(60);
        let business_offset = FixedOffset::east_opt(offset_minutes * 60)
            .context("BUSINESS_UTC_OFFSET_MINUTES is out of range")?;

        Ok(Self {
            api_url,
            api_token,
            api_timeout: secs_var("LOUMO_API_TIMEOUT_SECS").unwrap_or(Duration::from_secs(15)),
            database_url,
            host,
            port,
            polling,
            stock_attention_floor,
            business_offset,
        })
    }
}

fn secs_var(name: &str) -> Option<Duration> {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
}
