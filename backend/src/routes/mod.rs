//! Route definitions for the Production Balance Platform

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Order lookup for report selection
        .nest("/orders", order_routes())
        // Balance calculation
        .nest("/balances", balance_routes())
}

/// Order lookup routes (read-only)
fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_orders))
        .route("/:order_id", get(handlers::get_order))
}

/// Balance configuration and calculation routes
fn balance_routes() -> Router<AppState> {
    Router::new()
        .route("/calculate", post(handlers::calculate_balance))
        .route("/:balance_id", get(handlers::get_balance_config))
        .route(
            "/:balance_id/calculate",
            post(handlers::calculate_saved_balance),
        )
}
