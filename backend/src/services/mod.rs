//! Business logic services for the Production Balance Platform

pub mod balance;
pub mod cost_strategy;
pub mod material_cost;
pub mod orders;
pub mod piecework;
pub mod produced_quantities;

pub use balance::BalanceCalculationService;
pub use cost_strategy::{dedupe_min, CostFigures, CostFormula};
pub use orders::OrderService;
