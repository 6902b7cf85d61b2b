//! Validation utilities for the Production Balance Platform

use rust_decimal::Decimal;

// ============================================================================
// Balance Input Validations
// ============================================================================

/// Validate an order/operation/product number literal
///
/// Numbers come from external master data; we only require them to be
/// non-empty and free of control characters so they are safe as grouping
/// keys and report labels.
pub fn validate_reference_number(number: &str) -> Result<(), &'static str> {
    if number.trim().is_empty() {
        return Err("Reference number must not be empty");
    }
    if number.len() > 255 {
        return Err("Reference number must be at most 255 characters");
    }
    if number.chars().any(|c| c.is_control()) {
        return Err("Reference number must not contain control characters");
    }
    Ok(())
}

/// Validate that a planned or recorded quantity is non-negative
pub fn validate_quantity(quantity: Decimal) -> Result<(), &'static str> {
    if quantity < Decimal::ZERO {
        return Err("Quantity must not be negative");
    }
    Ok(())
}

/// Validate the size of an order-id batch against the configured bound
///
/// Callers must batch very large order sets themselves; the engine refuses
/// unbounded input instead of issuing unbounded queries.
pub fn validate_order_batch(len: usize, max: usize) -> Result<(), &'static str> {
    if len > max {
        return Err("Too many orders in one calculation; split into batches");
    }
    Ok(())
}
