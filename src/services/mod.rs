pub mod agent_service;
pub mod catalog_service;
pub mod dashboard_service;
pub mod delivery_service;
pub mod loyalty_service;
pub mod order_service;
pub mod stock_service;
