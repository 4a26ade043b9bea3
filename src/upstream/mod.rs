//! Typed access to the Loumo REST backend.

pub mod client;
pub mod query;

pub use client::{LoumoClient, UpstreamError, resolve_asset_url};
pub use query::{Resource, ResourceQuery};
