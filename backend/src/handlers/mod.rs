//! HTTP handlers for the Production Balance Platform

pub mod balance;
pub mod health;
pub mod orders;

pub use balance::*;
pub use health::*;
pub use orders::*;
