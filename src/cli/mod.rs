//! CLI output formatting
//!
//! Human-readable, colored terminal display for plans, orders, customers
//! and the dashboard.

pub mod display;

pub use display::{
    render_customers, render_history, render_order, render_order_page, render_plan,
    render_profile, render_stats,
};
