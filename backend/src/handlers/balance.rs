//! Balance calculation handlers

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use shared::validation::validate_order_batch;

use crate::error::{AppError, AppResult};
use crate::models::{BalanceConfig, BalanceReport, SourceOfMaterialCosts};
use crate::services::BalanceCalculationService;
use crate::store::{BalanceStore, PgBalanceStore};
use crate::AppState;

/// Calculation request with an inline configuration
#[derive(Debug, Deserialize, Validate)]
pub struct CalculateBalanceRequest {
    pub order_ids: Vec<Uuid>,
    pub source_of_material_costs: SourceOfMaterialCosts,
    #[validate(length(min = 1, max = 64))]
    pub cost_mode: String,
}

/// Calculation request against a stored configuration
#[derive(Debug, Deserialize)]
pub struct CalculateSavedBalanceRequest {
    pub order_ids: Vec<Uuid>,
}

fn check_batch_size(state: &AppState, order_ids: &[Uuid]) -> AppResult<()> {
    validate_order_batch(order_ids.len(), state.config.balance.max_orders_per_report).map_err(
        |message| AppError::Validation {
            field: "order_ids".to_string(),
            message: message.to_string(),
        },
    )
}

/// Calculate a balance report from an inline configuration
pub async fn calculate_balance(
    State(state): State<AppState>,
    Json(req): Json<CalculateBalanceRequest>,
) -> AppResult<Json<BalanceReport>> {
    req.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;
    check_batch_size(&state, &req.order_ids)?;

    let config = BalanceConfig {
        source_of_material_costs: req.source_of_material_costs,
        cost_mode: req.cost_mode,
    };
    let service = BalanceCalculationService::new(PgBalanceStore::new(state.db.clone()));
    let report = service.calculate(&req.order_ids, &config).await?;
    Ok(Json(report))
}

/// Calculate a balance report from a stored configuration
pub async fn calculate_saved_balance(
    State(state): State<AppState>,
    Path(balance_id): Path<Uuid>,
    Json(req): Json<CalculateSavedBalanceRequest>,
) -> AppResult<Json<BalanceReport>> {
    check_batch_size(&state, &req.order_ids)?;

    let store = PgBalanceStore::new(state.db.clone());
    let config = store.fetch_balance_config(balance_id).await?;
    let service = BalanceCalculationService::new(store);
    let report = service.calculate(&req.order_ids, &config).await?;
    Ok(Json(report))
}

/// Fetch a stored balance configuration
pub async fn get_balance_config(
    State(state): State<AppState>,
    Path(balance_id): Path<Uuid>,
) -> AppResult<Json<BalanceConfig>> {
    let store = PgBalanceStore::new(state.db.clone());
    let config = store.fetch_balance_config(balance_id).await?;
    Ok(Json(config))
}
