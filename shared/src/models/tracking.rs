//! Production tracking models
//!
//! Tracking records capture what actually happened on the shop floor. Only
//! accepted records count toward any balance figure.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state of a tracking record
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TrackingState {
    Draft,
    Accepted,
    Rejected,
}

impl TrackingState {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackingState::Draft => "draft",
            TrackingState::Accepted => "accepted",
            TrackingState::Rejected => "rejected",
        }
    }
}

/// A shop-floor production report for an order, optionally pinned to an
/// operation in for-each recording mode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductionTracking {
    pub id: Uuid,
    pub order_id: Uuid,
    pub technology_operation_component_id: Option<Uuid>,
    pub state: TrackingState,
    pub executed_operation_cycles: Option<Decimal>,
}

/// Per-operation material consumption detail attached to a tracking record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingOperationProductInComponent {
    pub id: Uuid,
    pub production_tracking_id: Uuid,
    pub product_id: Uuid,
    pub used_quantity: Option<Decimal>,
    pub waste_used_quantity: Option<Decimal>,
    pub waste_unit: Option<String>,
}

/// Per-operation output detail attached to a tracking record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingOperationProductOutComponent {
    pub id: Uuid,
    pub production_tracking_id: Uuid,
    pub product_id: Uuid,
    pub used_quantity: Option<Decimal>,
    pub wastes_quantity: Option<Decimal>,
}
