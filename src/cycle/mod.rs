//! Cycle-phase planning
//!
//! This module holds the calculator, its pricing rules, the customer
//! message templates and form intake.

pub mod calculator;
pub mod intake;
pub mod message;
pub mod pricing;

pub use calculator::{compute_plan, CycleInput, Milestones, Phase, PlanResult};
pub use intake::PlanRequest;
pub use pricing::OrderSize;
