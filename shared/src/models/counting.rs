//! Production counting models
//!
//! Counting quantities define the planned side of a balance: which materials
//! an order is expected to consume or produce, and in what amounts.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Whether a counted quantity is consumed or produced
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CountingRole {
    Used,
    Produced,
}

impl CountingRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            CountingRole::Used => "used",
            CountingRole::Produced => "produced",
        }
    }
}

/// Classification of a counted material
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MaterialType {
    Component,
    Intermediate,
    FinalProduct,
    Waste,
}

impl MaterialType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaterialType::Component => "component",
            MaterialType::Intermediate => "intermediate",
            MaterialType::FinalProduct => "final_product",
            MaterialType::Waste => "waste",
        }
    }
}

/// A planned material quantity for an order, optionally pinned to an
/// operation of the order's routing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductionCountingQuantity {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub technology_operation_component_id: Option<Uuid>,
    pub role: CountingRole,
    pub material_type: MaterialType,
    pub is_non_component: bool,
    pub planned_quantity: Decimal,
}

/// The single per-order/per-product usage figure recorded in cumulated mode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasicProductionCounting {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub used_quantity: Option<Decimal>,
}
