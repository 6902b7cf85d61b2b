//! Entity store access for the balance engine
//!
//! The engine never owns the entities it reads; it depends on one narrow
//! contract: fetch the typed row sets the aggregators consume, all from one
//! consistent snapshot, and read a stored balance configuration by id. Any
//! implementation of [`BalanceStore`] is substitutable; production uses
//! [`postgres::PgBalanceStore`], tests use an in-memory store.

pub mod postgres;

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::BalanceConfig;

pub use postgres::PgBalanceStore;

/// The five catalog price fields of a product, as joined onto a material row
#[derive(Debug, Clone, Default, PartialEq, FromRow)]
pub struct UnitPriceSet {
    pub nominal_cost: Option<Decimal>,
    pub average_cost: Option<Decimal>,
    pub last_purchase_cost: Option<Decimal>,
    pub average_offer_cost: Option<Decimal>,
    pub last_offer_cost: Option<Decimal>,
}

/// One joined row of the cumulated material-cost branch: a planned counting
/// quantity of a cumulated order, with the order's single recorded usage
/// figure repeated on every row of the same (order, product) group
#[derive(Debug, Clone, FromRow)]
pub struct CumulatedMaterialRow {
    pub order_number: String,
    pub product_number: String,
    pub product_name: String,
    pub product_unit: String,
    pub planned_quantity: Option<Decimal>,
    pub recorded_used_quantity: Option<Decimal>,
    #[sqlx(flatten)]
    pub prices: UnitPriceSet,
}

/// One joined row of the for-each material-cost branch: a planned counting
/// quantity pinned to an operation of a for-each order
#[derive(Debug, Clone, FromRow)]
pub struct ForEachMaterialRow {
    pub order_number: String,
    pub operation_number: String,
    pub product_number: String,
    pub product_name: String,
    pub product_unit: String,
    pub planned_quantity: Option<Decimal>,
    #[sqlx(flatten)]
    pub prices: UnitPriceSet,
}

/// One in-component consumption detail reached through an ACCEPTED tracking
/// record; the only rows that count toward actual material usage
#[derive(Debug, Clone, FromRow)]
pub struct MaterialTrackingRow {
    pub order_number: String,
    /// Absent for trackings of cumulated orders
    pub operation_number: Option<String>,
    pub product_number: String,
    pub used_quantity: Option<Decimal>,
    pub waste_used_quantity: Option<Decimal>,
    pub waste_unit: Option<String>,
}

/// Everything the material cost aggregator consumes
#[derive(Debug, Clone, Default)]
pub struct MaterialRows {
    pub cumulated: Vec<CumulatedMaterialRow>,
    pub for_each: Vec<ForEachMaterialRow>,
    pub tracking: Vec<MaterialTrackingRow>,
}

/// One out-component row for an order's own product, through ACCEPTED
/// trackings; orders with no accepted trackings still contribute one row
/// with absent quantities
#[derive(Debug, Clone, FromRow)]
pub struct ProducedRow {
    pub order_number: String,
    pub product_number: String,
    pub product_name: String,
    pub product_unit: String,
    pub order_planned_quantity: Decimal,
    pub used_quantity: Option<Decimal>,
    pub wastes_quantity: Option<Decimal>,
}

/// One out-component row whose product is registered as produced waste for
/// the order
#[derive(Debug, Clone, FromRow)]
pub struct ProducedWasteRow {
    pub order_number: String,
    pub used_quantity: Option<Decimal>,
}

/// Rows consumed by the produced quantity aggregator
#[derive(Debug, Clone, Default)]
pub struct ProducedRows {
    pub output: Vec<ProducedRow>,
    pub waste: Vec<ProducedWasteRow>,
}

/// One ACCEPTED tracking record of a for-each order, with its operation
#[derive(Debug, Clone, FromRow)]
pub struct PieceworkRow {
    pub order_number: String,
    pub operation_number: String,
    pub executed_operation_cycles: Option<Decimal>,
}

/// The full snapshot one calculation run aggregates over
#[derive(Debug, Clone, Default)]
pub struct BalanceRows {
    pub material: MaterialRows,
    pub produced: ProducedRows,
    pub piecework: Vec<PieceworkRow>,
}

/// Read-only query execution against the entity store
///
/// Injected into the balance calculation service at construction; the
/// engine itself holds no connection state.
#[async_trait]
pub trait BalanceStore: Send + Sync {
    /// Fetch every row set one calculation consumes, bounded by the order-id
    /// set, from a single consistent snapshot so that the three aggregations
    /// cannot observe skew between each other.
    async fn fetch_balance_rows(&self, order_ids: &[Uuid]) -> AppResult<BalanceRows>;

    /// Read a stored balance configuration record by id
    async fn fetch_balance_config(&self, balance_id: Uuid) -> AppResult<BalanceConfig>;
}
