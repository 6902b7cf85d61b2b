//! Product catalog models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A product with its unit-price catalog
///
/// The five cost fields feed the balance cost formulas; any of them may be
/// absent for products that have never been priced through that channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub number: String,
    pub name: String,
    /// Unit of measure (e.g., "kg", "pcs")
    pub unit: String,
    pub nominal_cost: Option<Decimal>,
    pub average_cost: Option<Decimal>,
    pub last_purchase_cost: Option<Decimal>,
    pub average_offer_cost: Option<Decimal>,
    pub last_offer_cost: Option<Decimal>,
}
