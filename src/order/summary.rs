//! Dashboard statistics over stored orders

use std::collections::BTreeMap;

use serde::Serialize;

use super::record::{Order, OrderStatus};
use crate::cycle::Phase;

/// Headline numbers for the admin dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Number of orders
    pub total_orders: usize,
    /// Sum of order prices in rupees
    pub total_revenue: u64,
    /// Orders awaiting confirmation
    pub pending: usize,
    /// Orders handed over
    pub delivered: usize,
    /// Order count per status; statuses with no orders are absent
    pub by_status: BTreeMap<OrderStatus, usize>,
    /// Order count per phase
    pub by_phase: BTreeMap<Phase, usize>,
}

impl DashboardStats {
    /// Tally `orders`
    #[must_use]
    pub fn from_orders(orders: &[Order]) -> Self {
        let mut stats = Self {
            total_orders: orders.len(),
            ..Self::default()
        };
        for order in orders {
            stats.total_revenue += u64::from(order.total_price);
            *stats.by_status.entry(order.order_status).or_insert(0) += 1;
            *stats.by_phase.entry(order.phase).or_insert(0) += 1;
        }
        stats.pending = stats.count(OrderStatus::Pending);
        stats.delivered = stats.count(OrderStatus::Delivered);
        stats
    }

    /// Orders in `status`
    #[must_use]
    pub fn count(&self, status: OrderStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }
}
