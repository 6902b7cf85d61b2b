//! Produced quantity aggregation
//!
//! One reconciliation row per (order, product): what the order planned to
//! produce against what accepted trackings actually reported, including
//! ordinary output waste and separately-registered produced wastes.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;

use crate::models::ProducedQuantities;
use crate::store::ProducedRows;

struct GroupAcc {
    product_name: String,
    product_unit: String,
    planned: Decimal,
    produced: Decimal,
    wastes: Decimal,
}

/// Aggregate produced-quantity rows for one snapshot
///
/// Orders without a single accepted tracking still emit a row; every sum
/// zero-defaults, so such a row reads planned vs. nothing produced.
pub fn produced_quantities(rows: &ProducedRows) -> Vec<ProducedQuantities> {
    let mut waste_by_order: HashMap<String, Decimal> = HashMap::new();
    for row in &rows.waste {
        *waste_by_order.entry(row.order_number.clone()).or_default() +=
            row.used_quantity.unwrap_or_default();
    }

    let mut groups: BTreeMap<(String, String), GroupAcc> = BTreeMap::new();
    for row in &rows.output {
        let acc = groups
            .entry((row.order_number.clone(), row.product_number.clone()))
            .or_insert_with(|| GroupAcc {
                product_name: row.product_name.clone(),
                product_unit: row.product_unit.clone(),
                planned: row.order_planned_quantity,
                produced: Decimal::ZERO,
                wastes: Decimal::ZERO,
            });
        acc.produced += row.used_quantity.unwrap_or_default();
        acc.wastes += row.wastes_quantity.unwrap_or_default();
    }

    groups
        .into_iter()
        .map(|((order_number, product_number), acc)| {
            let produced_wastes = waste_by_order
                .get(&order_number)
                .copied()
                .unwrap_or_default();
            ProducedQuantities {
                deviation: acc.produced - acc.planned,
                order_number,
                product_number,
                product_name: acc.product_name,
                product_unit: acc.product_unit,
                planned_quantity: acc.planned,
                produced_quantity: acc.produced,
                wastes_quantity: acc.wastes,
                produced_wastes,
            }
        })
        .collect()
}
