//! Order and customer records
//!
//! Field names serialize in camelCase to match the order-submission
//! contract consumed by the storefront.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::cycle::{CycleInput, Phase, PlanResult};
use crate::error::UnknownVariant;

fn default_label() -> String {
    "Home".to_string()
}

/// Delivery address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// House / flat number
    pub house: String,
    /// Area or locality
    pub area: String,
    /// Nearby landmark
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landmark: Option<String>,
    /// Postal code
    pub pincode: String,
    /// Maps link for the rider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_link: Option<String>,
    /// Free-form label such as "Home" or "Work"
    #[serde(default = "default_label")]
    pub label: String,
}

impl Address {
    /// Names of required fields that are blank
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("house", &self.house),
            ("area", &self.area),
            ("pincode", &self.pincode),
        ]
        .into_iter()
        .filter(|(_, v)| v.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    /// Trim every field, drop empty optionals and default a blank label
    #[must_use]
    pub fn normalized(&self) -> Self {
        let opt = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        let label = self.label.trim();
        Self {
            house: self.house.trim().to_string(),
            area: self.area.trim().to_string(),
            landmark: opt(&self.landmark),
            pincode: self.pincode.trim().to_string(),
            map_link: opt(&self.map_link),
            label: if label.is_empty() {
                default_label()
            } else {
                label.to_string()
            },
        }
    }
}

/// How the customer pays
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Pay the rider
    #[default]
    #[serde(rename = "Cash on Delivery")]
    CashOnDelivery,
    /// UPI transfer
    #[serde(rename = "UPI")]
    Upi,
    /// Card
    Card,
    /// Net banking
    #[serde(rename = "Net Banking")]
    NetBanking,
}

impl PaymentMethod {
    const NAMES: [&'static str; 4] = ["Cash on Delivery", "UPI", "Card", "Net Banking"];

    /// Display label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CashOnDelivery => "Cash on Delivery",
            Self::Upi => "UPI",
            Self::Card => "Card",
            Self::NetBanking => "Net Banking",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cash on delivery" | "cod" => Ok(Self::CashOnDelivery),
            "upi" => Ok(Self::Upi),
            "card" => Ok(Self::Card),
            "net banking" | "netbanking" => Ok(Self::NetBanking),
            _ => Err(UnknownVariant::new("payment method", s, &Self::NAMES)),
        }
    }
}

/// Fulfillment status of an order
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum OrderStatus {
    /// Received, not yet confirmed
    #[default]
    Pending,
    /// Confirmed with the customer
    Confirmed,
    /// Being prepared
    Processing,
    /// Out for delivery
    Shipped,
    /// Handed over
    Delivered,
    /// Cancelled
    Cancelled,
}

impl OrderStatus {
    /// Every status, in lifecycle order
    pub const ALL: [Self; 6] = [
        Self::Pending,
        Self::Confirmed,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// Display label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::Processing => "Processing",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                UnknownVariant::new("order status", s, &Self::ALL.map(Self::as_str))
            })
    }
}

/// Contact and delivery details collected at checkout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    /// Full name for delivery
    pub full_name: String,
    /// Phone number
    pub phone: String,
    /// Age in years, if given
    pub age: Option<u32>,
    /// Delivery address
    pub address: Address,
    /// Payment method
    pub payment_method: PaymentMethod,
}

/// An order as submitted, before it is assigned identifiers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSubmission {
    /// Customer full name
    pub full_name: String,
    /// Customer phone
    pub phone: String,
    /// Customer age in years
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Last period start the plan was computed from
    pub periods_started: NaiveDate,
    /// Cycle length the plan was computed with
    pub cycle_length: u32,
    /// Phase being ordered
    pub phase: Phase,
    /// Units ordered
    pub total_quantity: u32,
    /// Grams ordered
    pub total_weight: u32,
    /// Price in rupees
    pub total_price: u32,
    /// Delivery address
    pub address: Address,
    /// Payment method
    #[serde(default)]
    pub payment_method: PaymentMethod,
    /// Customer-facing plan message
    #[serde(default)]
    pub message: String,
}

impl OrderSubmission {
    /// Build a submission from a computed plan and checkout details
    #[must_use]
    pub fn from_plan(plan: &PlanResult, input: &CycleInput, contact: Contact) -> Self {
        Self {
            full_name: contact.full_name,
            phone: contact.phone,
            age: contact.age,
            periods_started: input.last_period_date,
            cycle_length: input.average_cycle_length,
            phase: plan.phase,
            total_quantity: plan.quantity,
            total_weight: plan.weight_grams,
            total_price: plan.total_price,
            address: contact.address,
            payment_method: contact.payment_method,
            message: plan.message.clone(),
        }
    }

    /// Names of required fields that are blank or zero
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.full_name.trim().is_empty() {
            missing.push("fullName");
        }
        if self.phone.trim().is_empty() {
            missing.push("phone");
        }
        if self.cycle_length == 0 {
            missing.push("cycleLength");
        }
        if self.total_quantity == 0 {
            missing.push("totalQuantity");
        }
        if self.total_weight == 0 {
            missing.push("totalWeight");
        }
        if self.total_price == 0 {
            missing.push("totalPrice");
        }
        missing
    }
}

/// A stored order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Order identifier, e.g. `A001A01`
    pub order_id: String,
    /// Owning customer, e.g. `A001`
    pub customer_id: String,
    /// Customer full name
    pub full_name: String,
    /// Customer phone
    pub phone: String,
    /// Last period start the plan was computed from
    pub periods_started: NaiveDate,
    /// Cycle length the plan was computed with
    pub cycle_length: u32,
    /// Phase being ordered
    pub phase: Phase,
    /// Units ordered
    pub total_quantity: u32,
    /// Grams ordered
    pub total_weight: u32,
    /// Price in rupees
    pub total_price: u32,
    /// Delivery address
    pub address: Address,
    /// Payment method
    pub payment_method: PaymentMethod,
    /// Fulfillment status
    #[serde(default)]
    pub order_status: OrderStatus,
    /// Customer-facing plan message
    #[serde(default)]
    pub message: String,
    /// When the order was placed
    pub order_date: DateTime<Utc>,
    /// Last modification
    pub updated_at: DateTime<Utc>,
}

/// Partial update of an order; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderPatch {
    /// New phase
    pub phase: Option<Phase>,
    /// New quantity
    pub total_quantity: Option<u32>,
    /// New weight
    pub total_weight: Option<u32>,
    /// New price
    pub total_price: Option<u32>,
    /// New address
    pub address: Option<Address>,
    /// New payment method
    pub payment_method: Option<PaymentMethod>,
    /// New message
    pub message: Option<String>,
}

impl OrderPatch {
    /// Apply the set fields to `order`
    pub fn apply(self, order: &mut Order) {
        if let Some(phase) = self.phase {
            order.phase = phase;
        }
        if let Some(q) = self.total_quantity {
            order.total_quantity = q;
        }
        if let Some(w) = self.total_weight {
            order.total_weight = w;
        }
        if let Some(p) = self.total_price {
            order.total_price = p;
        }
        if let Some(address) = self.address {
            order.address = address.normalized();
        }
        if let Some(method) = self.payment_method {
            order.payment_method = method;
        }
        if let Some(message) = self.message {
            order.message = message;
        }
    }
}

/// A stored customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Customer identifier, e.g. `A001`; absent on legacy records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    /// Phone number, unique per customer
    pub phone: String,
    /// Display name
    pub name: String,
    /// Age in years, 0 when unknown
    #[serde(default)]
    pub age: u32,
    /// Most recent last-period date seen on an order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_period_date: Option<NaiveDate>,
    /// Most recent cycle length seen on an order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_cycle_length: Option<u32>,
    /// Delivery addresses, oldest first
    #[serde(default)]
    pub addresses: Vec<Address>,
    /// Order ids, oldest first
    #[serde(default)]
    pub orders: Vec<String>,
    /// When the customer was first stored
    pub created_at: DateTime<Utc>,
    /// Last modification
    pub updated_at: DateTime<Utc>,
}

/// Partial update of a customer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerPatch {
    /// New name
    pub name: Option<String>,
    /// New age
    pub age: Option<u32>,
    /// New last-period date
    pub last_period_date: Option<NaiveDate>,
    /// New cycle length
    pub average_cycle_length: Option<u32>,
}

impl CustomerPatch {
    /// Apply the set fields to `customer`
    pub fn apply(self, customer: &mut Customer) {
        if let Some(name) = self.name {
            customer.name = name;
        }
        if let Some(age) = self.age {
            customer.age = age;
        }
        if let Some(date) = self.last_period_date {
            customer.last_period_date = Some(date);
        }
        if let Some(length) = self.average_cycle_length {
            customer.average_cycle_length = Some(length);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::make_test_address;

    #[test]
    fn test_status_parse_case_insensitive() {
        assert_eq!("shipped".parse::<OrderStatus>().unwrap(), OrderStatus::Shipped);
        assert_eq!(" Delivered ".parse::<OrderStatus>().unwrap(), OrderStatus::Delivered);
        let err = "lost".parse::<OrderStatus>().unwrap_err();
        assert!(err.to_string().contains("Pending, Confirmed"));
    }

    #[test]
    fn test_payment_method_aliases() {
        assert_eq!("COD".parse::<PaymentMethod>().unwrap(), PaymentMethod::CashOnDelivery);
        assert_eq!("upi".parse::<PaymentMethod>().unwrap(), PaymentMethod::Upi);
        assert_eq!("Net Banking".parse::<PaymentMethod>().unwrap(), PaymentMethod::NetBanking);
        assert!("cheque".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_payment_method_wire_names() {
        let json = serde_json::to_string(&PaymentMethod::CashOnDelivery).unwrap();
        assert_eq!(json, "\"Cash on Delivery\"");
        let method: PaymentMethod = serde_json::from_str("\"Net Banking\"").unwrap();
        assert_eq!(method, PaymentMethod::NetBanking);
    }

    #[test]
    fn test_address_defaults_label_on_deserialize() {
        let address: Address =
            serde_json::from_str(r#"{"house":"12","area":"Banjara Hills","pincode":"500034"}"#)
                .unwrap();
        assert_eq!(address.label, "Home");
        assert!(address.landmark.is_none());
    }

    #[test]
    fn test_address_missing_fields() {
        let mut address = make_test_address();
        assert!(address.missing_fields().is_empty());
        address.area = "  ".to_string();
        address.pincode = String::new();
        assert_eq!(address.missing_fields(), vec!["area", "pincode"]);
    }

    #[test]
    fn test_address_normalized() {
        let address = Address {
            house: " 4B ".to_string(),
            area: "Madhapur".to_string(),
            landmark: Some("  ".to_string()),
            pincode: "500081".to_string(),
            map_link: Some(" https://maps.example/x ".to_string()),
            label: String::new(),
        }
        .normalized();
        assert_eq!(address.house, "4B");
        assert_eq!(address.landmark, None);
        assert_eq!(address.map_link.as_deref(), Some("https://maps.example/x"));
        assert_eq!(address.label, "Home");
    }

    #[test]
    fn test_submission_uses_camel_case() {
        let submission = crate::testutil::make_test_submission("9000000001");
        let value = serde_json::to_value(&submission).unwrap();
        assert!(value.get("fullName").is_some());
        assert!(value.get("periodsStarted").is_some());
        assert_eq!(value["phase"], "Phase-1");
        assert_eq!(value["paymentMethod"], "Cash on Delivery");
    }

    #[test]
    fn test_submission_missing_fields() {
        let mut submission = crate::testutil::make_test_submission("9000000001");
        assert!(submission.missing_fields().is_empty());
        submission.phone = String::new();
        submission.total_price = 0;
        assert_eq!(submission.missing_fields(), vec!["phone", "totalPrice"]);
    }
}
