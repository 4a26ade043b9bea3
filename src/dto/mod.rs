pub mod agents;
pub mod dashboard;
pub mod deliveries;
pub mod loyalty;
pub mod orders;
pub mod stocks;
