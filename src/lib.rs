//! Seedcycle - seed-cycling order desk
//!
//! Works out where a customer is in their cycle, which seed blend they
//! need and for how many days, and turns that into an order record and a
//! WhatsApp message. The calculator is pure; everything that touches disk
//! sits in the `order` and `log` modules.

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

pub mod cli;
pub mod config;
pub mod cycle;
pub mod error;
pub mod log;
pub mod order;
pub mod share;

#[cfg(test)]
pub mod testutil;

// Re-export commonly used types
pub use config::{IntakeLimits, ShopConfig};
pub use cycle::{compute_plan, CycleInput, Phase, PlanRequest, PlanResult};
pub use error::InvalidInputError;
pub use log::{PlanLog, PlanLogEntry};
pub use order::{DashboardStats, OrderStatus, OrderStore, OrderSubmission};
