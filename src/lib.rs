//! Back-office service for the Loumo shops: order triage, delivery
//! assignment, stock upkeep and loyalty, on top of the Loumo REST backend.

pub mod audit;
pub mod cache;
pub mod config;
pub mod db;
pub mod dto;
pub mod entity;
pub mod error;
pub mod inflight;
pub mod models;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;
pub mod upstream;
