//! Technology models: operations and their placement in a routing

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A manufacturing operation (e.g., cutting, welding)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operation {
    pub id: Uuid,
    /// Human-facing operation number (e.g., "OP-10")
    pub number: String,
    pub name: String,
}

/// An operation's occurrence within an order's technology routing
///
/// Counting quantities and tracking records reference the component, not the
/// operation directly, so the same operation can appear at several points of
/// one routing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechnologyOperationComponent {
    pub id: Uuid,
    pub operation_id: Uuid,
}
