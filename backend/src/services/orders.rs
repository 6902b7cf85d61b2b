//! Read-only order lookup service
//!
//! Orders are created and maintained by the wider MES; this service only
//! lists them so report callers can assemble an order-id set.

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use shared::{PaginatedResponse, Pagination, PaginationMeta};

use crate::error::{AppError, AppResult};

/// Order service for read-only access to production orders
#[derive(Clone)]
pub struct OrderService {
    db: PgPool,
}

/// Order listing entry
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct OrderSummary {
    pub id: Uuid,
    pub number: String,
    pub name: Option<String>,
    pub planned_quantity: Decimal,
    pub recording_mode: String,
    pub product_number: String,
    pub product_name: String,
}

impl OrderService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List orders, newest numbers first
    pub async fn list_orders(
        &self,
        pagination: &Pagination,
    ) -> AppResult<PaginatedResponse<OrderSummary>> {
        let total_items: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.db)
            .await?;

        let orders = sqlx::query_as::<_, OrderSummary>(
            r#"
            SELECT
                o.id,
                o.number,
                o.name,
                o.planned_quantity,
                o.recording_mode,
                p.number AS product_number,
                p.name AS product_name
            FROM orders o
            JOIN products p ON o.product_id = p.id
            ORDER BY o.number DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(pagination.per_page as i64)
        .bind(pagination.offset() as i64)
        .fetch_all(&self.db)
        .await?;

        let total_pages = if pagination.per_page == 0 {
            0
        } else {
            ((total_items as u64).div_ceil(pagination.per_page as u64)) as u32
        };

        Ok(PaginatedResponse {
            data: orders,
            pagination: PaginationMeta {
                page: pagination.page,
                per_page: pagination.per_page,
                total_items: total_items as u64,
                total_pages,
            },
        })
    }

    /// Fetch one order by id
    pub async fn get_order(&self, order_id: Uuid) -> AppResult<OrderSummary> {
        sqlx::query_as::<_, OrderSummary>(
            r#"
            SELECT
                o.id,
                o.number,
                o.name,
                o.planned_quantity,
                o.recording_mode,
                p.number AS product_number,
                p.name AS product_name
            FROM orders o
            JOIN products p ON o.product_id = p.id
            WHERE o.id = $1
            "#,
        )
        .bind(order_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Order".to_string()))
    }
}
