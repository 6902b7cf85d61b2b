//! Shared types and models for the Production Balance Platform
//!
//! This crate contains the domain entities read by the balance engine and the
//! flat result records it produces, shared between the backend and any
//! downstream consumers of the report payloads.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
