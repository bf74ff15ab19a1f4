//! Order sizing and pricing
//!
//! A regular order covers the days left in the current phase. Inside the
//! pre-order window the customer gets a fixed bundle for the next phase.

use serde::{Deserialize, Serialize};

/// Weight of one laddu in grams
pub const UNIT_WEIGHT_GRAMS: u32 = 30;

/// Price per gram in rupees
pub const RATE_PER_GRAM: f64 = 0.866;

/// Days remaining at or below which the pre-order bundle applies
pub const PRE_ORDER_THRESHOLD_DAYS: u32 = 8;

/// Flat packaging allowance added to regular order weights
const REGULAR_WEIGHT_OFFSET_GRAMS: u32 = 15;

/// Fixed pre-order bundle: quantity, weight and price
pub const PRE_ORDER_BUNDLE: OrderSize = OrderSize {
    quantity: 15,
    weight_grams: 450,
    total_price: 390,
};

/// Quantity, weight and price of a single order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSize {
    /// Number of units to deliver
    pub quantity: u32,
    /// Total weight in grams
    pub weight_grams: u32,
    /// Total price in whole rupees
    pub total_price: u32,
}

/// Whether `days_remaining` falls inside the pre-order window.
#[must_use]
pub const fn is_pre_order(days_remaining: u32) -> bool {
    days_remaining <= PRE_ORDER_THRESHOLD_DAYS
}

/// Size an order for the given number of days left in the phase.
///
/// Inside the pre-order window this is always [`PRE_ORDER_BUNDLE`]. Outside
/// it, the weight carries a flat +15 g that the price does not.
#[must_use]
pub fn order_size(days_remaining: u32) -> OrderSize {
    if is_pre_order(days_remaining) {
        return PRE_ORDER_BUNDLE;
    }

    OrderSize {
        quantity: days_remaining,
        weight_grams: days_remaining * UNIT_WEIGHT_GRAMS + REGULAR_WEIGHT_OFFSET_GRAMS,
        total_price: regular_price(days_remaining),
    }
}

/// `round(30 g × ₹0.866 × units)`, evaluated left to right in `f64`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn regular_price(units: u32) -> u32 {
    (f64::from(UNIT_WEIGHT_GRAMS) * RATE_PER_GRAM * f64::from(units)).round() as u32
}
