//! Balance calculation orchestration

use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{BalanceConfig, BalanceReport};
use crate::store::BalanceStore;

use super::cost_strategy::CostFormula;
use super::{material_cost, piecework, produced_quantities};

/// Orchestrates one balance calculation run against an injected store
///
/// The service is stateless: it holds only the store handle, resolves the
/// cost strategy once per run, and hands typed snapshot rows to the three
/// aggregators.
#[derive(Clone)]
pub struct BalanceCalculationService<S> {
    store: S,
}

impl<S: BalanceStore> BalanceCalculationService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Compute the three balance collections for one order-id set.
    ///
    /// The cost strategy resolves before anything is fetched, so a
    /// misconfigured report fails without producing any partial collection.
    /// An empty id set is valid input and yields empty collections without
    /// touching the store.
    pub async fn calculate(
        &self,
        order_ids: &[Uuid],
        config: &BalanceConfig,
    ) -> AppResult<BalanceReport> {
        let formula = CostFormula::resolve(config)?;

        if order_ids.is_empty() {
            return Ok(BalanceReport {
                material_costs: Vec::new(),
                produced_quantities: Vec::new(),
                piecework_details: Vec::new(),
            });
        }

        let rows = self.store.fetch_balance_rows(order_ids).await?;
        tracing::debug!(
            orders = order_ids.len(),
            cumulated_material_rows = rows.material.cumulated.len(),
            for_each_material_rows = rows.material.for_each.len(),
            tracking_rows = rows.material.tracking.len(),
            produced_rows = rows.produced.output.len(),
            piecework_rows = rows.piecework.len(),
            "fetched balance snapshot"
        );

        Ok(BalanceReport {
            material_costs: material_cost::material_costs(&rows.material, &formula),
            produced_quantities: produced_quantities::produced_quantities(&rows.produced),
            piecework_details: piecework::piecework_details(&rows.piecework),
        })
    }
}
