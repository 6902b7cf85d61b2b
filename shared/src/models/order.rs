//! Production order models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A production order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    /// Human-facing order number (e.g., "PB-2025-0001")
    pub number: String,
    pub name: Option<String>,
    /// Quantity of the ordered product planned for production
    pub planned_quantity: Decimal,
    pub recording_mode: RecordingMode,
    /// The product this order produces
    pub product_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// How material usage is recorded for an order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RecordingMode {
    /// Usage recorded once, in aggregate, for the whole order
    Cumulated,
    /// Usage recorded separately for each technology operation
    ForEach,
}

impl RecordingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordingMode::Cumulated => "cumulated",
            RecordingMode::ForEach => "for_each",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "cumulated" => Some(RecordingMode::Cumulated),
            "for_each" => Some(RecordingMode::ForEach),
            _ => None,
        }
    }
}

impl std::fmt::Display for RecordingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
