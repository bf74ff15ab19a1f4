//! Shared test utilities
//!
//! Common fixtures used across test modules. Only compiled in test builds.

use chrono::{NaiveDate, TimeZone, Utc};

use crate::cycle::Phase;
use crate::order::{Address, Order, OrderStatus, OrderSubmission, PaymentMethod};

/// A complete delivery address
#[must_use]
pub fn make_test_address() -> Address {
    Address {
        house: "Flat 302, Lotus Residency".to_string(),
        area: "Gachibowli".to_string(),
        landmark: Some("Near DLF gate".to_string()),
        pincode: "500032".to_string(),
        map_link: None,
        label: "Home".to_string(),
    }
}

/// A valid Phase-1 submission for `phone`.
///
/// Sized like a cycle-day-1 plan on a 28-day cycle: 13 laddus, 405 g, ₹338.
#[must_use]
pub fn make_test_submission(phone: &str) -> OrderSubmission {
    OrderSubmission {
        full_name: "Test Customer".to_string(),
        phone: phone.to_string(),
        age: Some(29),
        periods_started: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        cycle_length: 28,
        phase: Phase::One,
        total_quantity: 13,
        total_weight: 405,
        total_price: 338,
        address: make_test_address(),
        payment_method: PaymentMethod::CashOnDelivery,
        message: "Hi Test ma’am! 🌸".to_string(),
    }
}

/// A stored Phase-1 pending order with the given id and price
#[must_use]
pub fn make_test_order(order_id: &str, total_price: u32) -> Order {
    let placed = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
    Order {
        order_id: order_id.to_string(),
        customer_id: order_id.chars().take(4).collect(),
        full_name: "Test Customer".to_string(),
        phone: "9000000001".to_string(),
        periods_started: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        cycle_length: 28,
        phase: Phase::One,
        total_quantity: 13,
        total_weight: 405,
        total_price,
        address: make_test_address(),
        payment_method: PaymentMethod::CashOnDelivery,
        order_status: OrderStatus::Pending,
        message: String::new(),
        order_date: placed,
        updated_at: placed,
    }
}
