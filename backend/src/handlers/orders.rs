//! Order lookup handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use shared::{PaginatedResponse, Pagination};

use crate::error::AppResult;
use crate::services::orders::{OrderService, OrderSummary};
use crate::AppState;

#[derive(Deserialize)]
pub struct ListOrdersQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// List orders for report selection
pub async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<ListOrdersQuery>,
) -> AppResult<Json<PaginatedResponse<OrderSummary>>> {
    let defaults = Pagination::default();
    let pagination = Pagination {
        page: query.page.unwrap_or(defaults.page).max(1),
        per_page: query.per_page.unwrap_or(defaults.per_page).clamp(1, 100),
    };

    let service = OrderService::new(state.db.clone());
    let orders = service.list_orders(&pagination).await?;
    Ok(Json(orders))
}

/// Get one order
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<OrderSummary>> {
    let service = OrderService::new(state.db.clone());
    let order = service.get_order(order_id).await?;
    Ok(Json(order))
}
