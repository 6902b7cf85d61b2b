//! Material cost aggregation
//!
//! Produces one row per (order) for cumulated orders and one per
//! (order, operation) for for-each orders, restricted to consumed component
//! materials. The two recording modes have different quantity semantics and
//! are aggregated independently; their rows share one ordered result
//! collection.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;

use crate::models::MaterialCost;
use crate::store::{MaterialRows, MaterialTrackingRow};

use super::cost_strategy::{dedupe_min, CostFormula};

/// Result ordering key; cumulated rows carry no operation number and sort
/// ahead of any operation-scoped row of the same order
type GroupKey = (String, Option<String>, String);

/// Actual consumption reached through accepted trackings, indexed at both
/// granularities the two branches need
struct TrackingUsage {
    per_order: HashMap<(String, String), UsageTotals>,
    per_operation: HashMap<(String, String, String), UsageTotals>,
}

#[derive(Default)]
struct UsageTotals {
    used: Decimal,
    waste: Decimal,
    waste_unit: Option<String>,
}

impl UsageTotals {
    fn add(&mut self, row: &MaterialTrackingRow) {
        self.used += row.used_quantity.unwrap_or_default();
        self.waste += row.waste_used_quantity.unwrap_or_default();
        if self.waste_unit.is_none() {
            self.waste_unit = row.waste_unit.clone();
        }
    }
}

impl TrackingUsage {
    fn index(rows: &[MaterialTrackingRow]) -> Self {
        let mut per_order: HashMap<(String, String), UsageTotals> = HashMap::new();
        let mut per_operation: HashMap<(String, String, String), UsageTotals> = HashMap::new();
        for row in rows {
            per_order
                .entry((row.order_number.clone(), row.product_number.clone()))
                .or_default()
                .add(row);
            if let Some(operation) = &row.operation_number {
                per_operation
                    .entry((
                        row.order_number.clone(),
                        operation.clone(),
                        row.product_number.clone(),
                    ))
                    .or_default()
                    .add(row);
            }
        }
        Self {
            per_order,
            per_operation,
        }
    }
}

/// Per-group accumulator shared by both branches
struct GroupAcc {
    product_name: String,
    product_unit: String,
    planned_sum: Decimal,
    planned_candidates: Vec<Decimal>,
    recorded_used: Vec<Decimal>,
    prices: Vec<Decimal>,
}

impl GroupAcc {
    fn new(product_name: &str, product_unit: &str) -> Self {
        Self {
            product_name: product_name.to_string(),
            product_unit: product_unit.to_string(),
            planned_sum: Decimal::ZERO,
            planned_candidates: Vec::new(),
            recorded_used: Vec::new(),
            prices: Vec::new(),
        }
    }
}

/// Aggregate material-cost rows for one snapshot under one resolved formula
pub fn material_costs(rows: &MaterialRows, formula: &CostFormula) -> Vec<MaterialCost> {
    let usage = TrackingUsage::index(&rows.tracking);
    let mut result: BTreeMap<GroupKey, MaterialCost> = BTreeMap::new();

    // Cumulated branch: group by (order, product). Planned quantities sum
    // across the order's operations; usage is the order's single recorded
    // figure, deduplicated rather than summed.
    let mut cumulated: BTreeMap<(String, String), GroupAcc> = BTreeMap::new();
    for row in &rows.cumulated {
        let acc = cumulated
            .entry((row.order_number.clone(), row.product_number.clone()))
            .or_insert_with(|| GroupAcc::new(&row.product_name, &row.product_unit));
        acc.planned_sum += row.planned_quantity.unwrap_or_default();
        if let Some(recorded) = row.recorded_used_quantity {
            acc.recorded_used.push(recorded);
        }
        if let Some(price) = formula.select_price(&row.prices) {
            acc.prices.push(price);
        }
    }
    for ((order_number, product_number), acc) in cumulated {
        let planned = acc.planned_sum;
        let used = dedupe_min(acc.recorded_used).unwrap_or_default();
        let unit_price = dedupe_min(acc.prices).unwrap_or_default();
        let totals = usage
            .per_order
            .get(&(order_number.clone(), product_number.clone()));
        let key: GroupKey = (order_number, None, product_number);
        let row = finish_row(&key, acc.product_name, acc.product_unit, planned, used, totals, formula, unit_price);
        result.insert(key, row);
    }

    // For-each branch: group by (order, operation, product). The planned
    // value is a single per-operation figure, deduplicated; usage sums the
    // operation's accepted consumption details.
    let mut for_each: BTreeMap<(String, String, String), GroupAcc> = BTreeMap::new();
    for row in &rows.for_each {
        let acc = for_each
            .entry((
                row.order_number.clone(),
                row.operation_number.clone(),
                row.product_number.clone(),
            ))
            .or_insert_with(|| GroupAcc::new(&row.product_name, &row.product_unit));
        if let Some(planned) = row.planned_quantity {
            acc.planned_candidates.push(planned);
        }
        if let Some(price) = formula.select_price(&row.prices) {
            acc.prices.push(price);
        }
    }
    for ((order_number, operation_number, product_number), acc) in for_each {
        let planned = dedupe_min(acc.planned_candidates).unwrap_or_default();
        let unit_price = dedupe_min(acc.prices).unwrap_or_default();
        let totals = usage.per_operation.get(&(
            order_number.clone(),
            operation_number.clone(),
            product_number.clone(),
        ));
        let used = totals.map(|t| t.used).unwrap_or_default();
        let key: GroupKey = (order_number, Some(operation_number), product_number);
        let row = finish_row(&key, acc.product_name, acc.product_unit, planned, used, totals, formula, unit_price);
        result.insert(key, row);
    }

    result.into_values().collect()
}

#[allow(clippy::too_many_arguments)]
fn finish_row(
    key: &GroupKey,
    product_name: String,
    product_unit: String,
    planned_quantity: Decimal,
    used_quantity: Decimal,
    totals: Option<&UsageTotals>,
    formula: &CostFormula,
    unit_price: Decimal,
) -> MaterialCost {
    let costs = formula.cost_figures(planned_quantity, used_quantity, unit_price);
    MaterialCost {
        order_number: key.0.clone(),
        operation_number: key.1.clone(),
        product_number: key.2.clone(),
        product_name,
        product_unit,
        planned_quantity,
        used_quantity,
        quantitative_deviation: used_quantity - planned_quantity,
        planned_cost: costs.planned_cost,
        real_cost: costs.real_cost,
        value_deviation: costs.value_deviation,
        costs_available: formula.costs_available(),
        used_waste_quantity: totals.map(|t| t.waste).unwrap_or_default(),
        used_waste_unit: totals.and_then(|t| t.waste_unit.clone()),
    }
}
