//! Logging and persistence files
//!
//! JSON Lines history of computed plans, and the JSONL file type the
//! order store writes through.

pub mod jsonl;

pub use jsonl::{JsonlFile, PlanLog, PlanLogEntry};
