//! Balance report configuration and result records

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Where unit costs for consumed materials come from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SourceOfMaterialCosts {
    /// Unit prices taken from the global product catalog
    GlobalDefinitions,
    /// Unit prices taken from the orders themselves; the cost formula for
    /// this source is an intentional placeholder (see the cost strategy
    /// resolver) and yields zero-valued costs
    OrdersMaterialCosts,
}

impl SourceOfMaterialCosts {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceOfMaterialCosts::GlobalDefinitions => "global_definitions",
            SourceOfMaterialCosts::OrdersMaterialCosts => "orders_material_costs",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "global_definitions" => Some(SourceOfMaterialCosts::GlobalDefinitions),
            "orders_material_costs" => Some(SourceOfMaterialCosts::OrdersMaterialCosts),
            _ => None,
        }
    }
}

/// Which catalog price field a global-definitions calculation uses
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CostMode {
    Nominal,
    Average,
    LastPurchase,
    AverageOfferCost,
    LastOfferCost,
}

impl CostMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CostMode::Nominal => "nominal",
            CostMode::Average => "average",
            CostMode::LastPurchase => "last_purchase",
            CostMode::AverageOfferCost => "average_offer_cost",
            CostMode::LastOfferCost => "last_offer_cost",
        }
    }

    /// Parse a stored cost-mode literal. Returns `None` for anything outside
    /// the closed set; the caller decides whether that is an error.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "nominal" => Some(CostMode::Nominal),
            "average" => Some(CostMode::Average),
            "last_purchase" => Some(CostMode::LastPurchase),
            "average_offer_cost" => Some(CostMode::AverageOfferCost),
            "last_offer_cost" => Some(CostMode::LastOfferCost),
            _ => None,
        }
    }
}

/// The pair of settings selecting how material costs are priced for one
/// calculation run
///
/// `cost_mode` stays a free-form string here because configuration records
/// are externally owned; it is parsed into [`CostMode`] exactly once, by the
/// cost strategy resolver, which rejects unrecognized literals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceConfig {
    pub source_of_material_costs: SourceOfMaterialCosts,
    pub cost_mode: String,
}

/// One material-cost row of a balance report
///
/// Keyed by order for cumulated orders and by (order, operation) for
/// for-each orders; `operation_number` is `None` in the cumulated case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialCost {
    pub order_number: String,
    pub operation_number: Option<String>,
    pub product_number: String,
    pub product_name: String,
    pub product_unit: String,
    pub planned_quantity: Decimal,
    pub used_quantity: Decimal,
    pub quantitative_deviation: Decimal,
    pub planned_cost: Decimal,
    pub real_cost: Decimal,
    pub value_deviation: Decimal,
    /// `false` when the configured cost source cannot price materials yet
    /// (the orders-material-costs placeholder); cost fields are zero then
    pub costs_available: bool,
    pub used_waste_quantity: Decimal,
    pub used_waste_unit: Option<String>,
}

/// One produced-quantity reconciliation row, keyed by (order, product)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProducedQuantities {
    pub order_number: String,
    pub product_number: String,
    pub product_name: String,
    pub product_unit: String,
    pub planned_quantity: Decimal,
    pub produced_quantity: Decimal,
    pub wastes_quantity: Decimal,
    pub produced_wastes: Decimal,
    pub deviation: Decimal,
}

/// One piecework row, keyed by (order, operation); for-each orders only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieceworkDetails {
    pub order_number: String,
    pub operation_number: String,
    pub total_executed_operation_cycles: Decimal,
}

/// The three independent result collections of one calculation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceReport {
    pub material_costs: Vec<MaterialCost>,
    pub produced_quantities: Vec<ProducedQuantities>,
    pub piecework_details: Vec<PieceworkDetails>,
}
