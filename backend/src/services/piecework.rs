//! Piecework aggregation
//!
//! Executed operation cycles summed per (order, operation). Only for-each
//! orders report cycles per operation, so the snapshot contains no rows for
//! cumulated orders and none are emitted for them.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::models::PieceworkDetails;
use crate::store::PieceworkRow;

/// Aggregate piecework rows for one snapshot
pub fn piecework_details(rows: &[PieceworkRow]) -> Vec<PieceworkDetails> {
    let mut groups: BTreeMap<(String, String), Decimal> = BTreeMap::new();
    for row in rows {
        *groups
            .entry((row.order_number.clone(), row.operation_number.clone()))
            .or_default() += row.executed_operation_cycles.unwrap_or_default();
    }

    groups
        .into_iter()
        .map(
            |((order_number, operation_number), total)| PieceworkDetails {
                order_number,
                operation_number,
                total_executed_operation_cycles: total,
            },
        )
        .collect()
}
