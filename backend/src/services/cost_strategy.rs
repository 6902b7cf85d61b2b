//! Cost strategy resolution for balance calculations
//!
//! A calculation run selects exactly one cost formula up front; every
//! material-cost row is then priced through it. Resolution is the only place
//! a stored cost-mode literal is parsed, and the only component allowed to
//! reject a configuration.

use rust_decimal::Decimal;

use crate::error::AppError;
use crate::models::{BalanceConfig, CostMode, SourceOfMaterialCosts};
use crate::store::UnitPriceSet;

/// Computed cost figures for one material-cost row
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CostFigures {
    pub planned_cost: Decimal,
    pub real_cost: Decimal,
    pub value_deviation: Decimal,
}

/// The cost formula selected once per calculation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostFormula {
    /// Price each material with one catalog price field of the product
    UnitPrice(CostMode),
    /// Placeholder for the orders-material-costs source. The upstream system
    /// never finished this branch; it intentionally yields zero-valued cost
    /// figures, and rows computed under it carry `costs_available = false`
    /// so consumers are not misled by the zeros. Do not substitute a guessed
    /// formula here.
    OrdersMaterialCosts,
}

impl CostFormula {
    /// Resolve the formula for one configuration, rejecting unrecognized
    /// cost modes under the global-definitions source before any row is
    /// produced.
    pub fn resolve(config: &BalanceConfig) -> Result<Self, AppError> {
        match config.source_of_material_costs {
            SourceOfMaterialCosts::GlobalDefinitions => {
                let mode = CostMode::parse(&config.cost_mode)
                    .ok_or_else(|| AppError::UnsupportedCostMode(config.cost_mode.clone()))?;
                Ok(CostFormula::UnitPrice(mode))
            }
            SourceOfMaterialCosts::OrdersMaterialCosts => Ok(CostFormula::OrdersMaterialCosts),
        }
    }

    /// Whether rows computed under this formula carry real cost figures
    pub fn costs_available(&self) -> bool {
        matches!(self, CostFormula::UnitPrice(_))
    }

    /// The unit-price candidate this formula reads from one joined row
    pub fn select_price(&self, prices: &UnitPriceSet) -> Option<Decimal> {
        match self {
            CostFormula::UnitPrice(mode) => match mode {
                CostMode::Nominal => prices.nominal_cost,
                CostMode::Average => prices.average_cost,
                CostMode::LastPurchase => prices.last_purchase_cost,
                CostMode::AverageOfferCost => prices.average_offer_cost,
                CostMode::LastOfferCost => prices.last_offer_cost,
            },
            CostFormula::OrdersMaterialCosts => None,
        }
    }

    /// Cost figures for one result row, from zero-defaulted quantities and
    /// the group's deduplicated unit price
    pub fn cost_figures(
        &self,
        planned_quantity: Decimal,
        used_quantity: Decimal,
        unit_price: Decimal,
    ) -> CostFigures {
        match self {
            CostFormula::UnitPrice(_) => {
                let planned_cost = planned_quantity * unit_price;
                let real_cost = used_quantity * unit_price;
                CostFigures {
                    planned_cost,
                    real_cost,
                    value_deviation: real_cost - planned_cost,
                }
            }
            CostFormula::OrdersMaterialCosts => CostFigures::default(),
        }
    }
}

/// Collapse duplicate values produced by join fan-out.
///
/// A grouped join repeats the same source value once per joined row: the
/// recorded cumulated usage figure repeats per counting row, a per-operation
/// planned value repeats per tracking row, a catalog price repeats per
/// anything. Taking the minimum of the duplicates recovers the single
/// underlying value deterministically. This is a deduplication device, not a
/// "cheapest value" business rule.
pub fn dedupe_min<I>(values: I) -> Option<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    values.into_iter().min()
}
