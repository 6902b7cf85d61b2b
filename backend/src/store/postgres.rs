//! PostgreSQL implementation of the balance store

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{BalanceConfig, SourceOfMaterialCosts};

use super::{
    BalanceRows, BalanceStore, CumulatedMaterialRow, ForEachMaterialRow, MaterialRows,
    MaterialTrackingRow, PieceworkRow, ProducedRow, ProducedRows, ProducedWasteRow,
};

/// Balance store backed by the platform's PostgreSQL database
#[derive(Clone)]
pub struct PgBalanceStore {
    db: PgPool,
}

impl PgBalanceStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BalanceStore for PgBalanceStore {
    async fn fetch_balance_rows(&self, order_ids: &[Uuid]) -> AppResult<BalanceRows> {
        // All six queries run inside one repeatable-read, read-only
        // transaction: a tracking record accepted mid-calculation must not be
        // visible to some aggregations and invisible to others.
        let mut tx = self.db.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
            .execute(&mut *tx)
            .await?;

        let cumulated = sqlx::query_as::<_, CumulatedMaterialRow>(
            r#"
            SELECT
                o.number AS order_number,
                p.number AS product_number,
                p.name AS product_name,
                p.unit AS product_unit,
                pcq.planned_quantity,
                bpc.used_quantity AS recorded_used_quantity,
                p.nominal_cost,
                p.average_cost,
                p.last_purchase_cost,
                p.average_offer_cost,
                p.last_offer_cost
            FROM orders o
            JOIN production_counting_quantities pcq ON pcq.order_id = o.id
            JOIN products p ON pcq.product_id = p.id
            LEFT JOIN basic_production_countings bpc
                ON bpc.order_id = o.id AND bpc.product_id = p.id
            WHERE o.id = ANY($1)
              AND o.recording_mode = 'cumulated'
              AND pcq.role = 'used'
              AND pcq.material_type = 'component'
              AND pcq.is_non_component = true
            "#,
        )
        .bind(order_ids)
        .fetch_all(&mut *tx)
        .await?;

        let for_each = sqlx::query_as::<_, ForEachMaterialRow>(
            r#"
            SELECT
                o.number AS order_number,
                op.number AS operation_number,
                p.number AS product_number,
                p.name AS product_name,
                p.unit AS product_unit,
                pcq.planned_quantity,
                p.nominal_cost,
                p.average_cost,
                p.last_purchase_cost,
                p.average_offer_cost,
                p.last_offer_cost
            FROM orders o
            JOIN production_counting_quantities pcq ON pcq.order_id = o.id
            JOIN technology_operation_components toc
                ON pcq.technology_operation_component_id = toc.id
            JOIN operations op ON toc.operation_id = op.id
            JOIN products p ON pcq.product_id = p.id
            WHERE o.id = ANY($1)
              AND o.recording_mode = 'for_each'
              AND pcq.role = 'used'
              AND pcq.material_type = 'component'
              AND pcq.is_non_component = true
            "#,
        )
        .bind(order_ids)
        .fetch_all(&mut *tx)
        .await?;

        let tracking = sqlx::query_as::<_, MaterialTrackingRow>(
            r#"
            SELECT
                o.number AS order_number,
                op.number AS operation_number,
                p.number AS product_number,
                tic.used_quantity,
                tic.waste_used_quantity,
                tic.waste_unit
            FROM production_trackings pt
            JOIN orders o ON pt.order_id = o.id
            JOIN tracking_operation_product_in_components tic
                ON tic.production_tracking_id = pt.id
            JOIN products p ON tic.product_id = p.id
            LEFT JOIN technology_operation_components toc
                ON pt.technology_operation_component_id = toc.id
            LEFT JOIN operations op ON toc.operation_id = op.id
            WHERE o.id = ANY($1)
              AND pt.state = 'accepted'
            "#,
        )
        .bind(order_ids)
        .fetch_all(&mut *tx)
        .await?;

        let output = sqlx::query_as::<_, ProducedRow>(
            r#"
            SELECT
                o.number AS order_number,
                p.number AS product_number,
                p.name AS product_name,
                p.unit AS product_unit,
                o.planned_quantity AS order_planned_quantity,
                topoc.used_quantity,
                topoc.wastes_quantity
            FROM orders o
            JOIN products p ON o.product_id = p.id
            LEFT JOIN production_trackings pt
                ON pt.order_id = o.id AND pt.state = 'accepted'
            LEFT JOIN tracking_operation_product_out_components topoc
                ON topoc.production_tracking_id = pt.id AND topoc.product_id = p.id
            WHERE o.id = ANY($1)
            "#,
        )
        .bind(order_ids)
        .fetch_all(&mut *tx)
        .await?;

        let waste = sqlx::query_as::<_, ProducedWasteRow>(
            r#"
            SELECT
                o.number AS order_number,
                topoc.used_quantity
            FROM orders o
            JOIN production_trackings pt
                ON pt.order_id = o.id AND pt.state = 'accepted'
            JOIN tracking_operation_product_out_components topoc
                ON topoc.production_tracking_id = pt.id
            WHERE o.id = ANY($1)
              AND EXISTS (
                  SELECT 1
                  FROM production_counting_quantities pcq
                  WHERE pcq.order_id = o.id
                    AND pcq.role = 'produced'
                    AND pcq.material_type = 'waste'
                    AND pcq.product_id = topoc.product_id
              )
            "#,
        )
        .bind(order_ids)
        .fetch_all(&mut *tx)
        .await?;

        let piecework = sqlx::query_as::<_, PieceworkRow>(
            r#"
            SELECT
                o.number AS order_number,
                op.number AS operation_number,
                pt.executed_operation_cycles
            FROM production_trackings pt
            JOIN orders o ON pt.order_id = o.id
            JOIN technology_operation_components toc
                ON pt.technology_operation_component_id = toc.id
            JOIN operations op ON toc.operation_id = op.id
            WHERE o.id = ANY($1)
              AND o.recording_mode = 'for_each'
              AND pt.state = 'accepted'
            "#,
        )
        .bind(order_ids)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(BalanceRows {
            material: MaterialRows {
                cumulated,
                for_each,
                tracking,
            },
            produced: ProducedRows { output, waste },
            piecework,
        })
    }

    async fn fetch_balance_config(&self, balance_id: Uuid) -> AppResult<BalanceConfig> {
        let row = sqlx::query(
            r#"
            SELECT source_of_material_costs, cost_mode
            FROM balance_configs
            WHERE id = $1
            "#,
        )
        .bind(balance_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Balance configuration".to_string()))?;

        let source: String = row.try_get("source_of_material_costs")?;
        let cost_mode: String = row.try_get("cost_mode")?;

        let source_of_material_costs = SourceOfMaterialCosts::parse(&source).ok_or_else(|| {
            AppError::Configuration(format!("Unknown source of material costs: {}", source))
        })?;

        Ok(BalanceConfig {
            source_of_material_costs,
            cost_mode,
        })
    }
}
