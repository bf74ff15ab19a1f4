//! WhatsApp hand-off
//!
//! Formats the confirmed order as chat text and wraps it in a `wa.me`
//! deep link.

use anyhow::{bail, Context, Result};
use url::Url;

use crate::cycle::PlanResult;
use crate::order::Contact;

/// Delivery block: one `Label: value` line per filled-in field
#[must_use]
pub fn delivery_details(contact: &Contact) -> String {
    let address = &contact.address;
    let mut lines = vec![format!("Full Name: {}", contact.full_name)];
    if let Some(age) = contact.age {
        lines.push(format!("Age: {age}"));
    }
    lines.push(format!("Phone: {}", contact.phone));
    lines.push(format!("House/Flat No.: {}", address.house));

    let optional = [
        ("Area", Some(address.area.as_str())),
        ("Landmark", address.landmark.as_deref()),
        ("Pincode", Some(address.pincode.as_str())),
        ("Map Link", address.map_link.as_deref()),
    ];
    for (label, value) in optional {
        if let Some(v) = value.filter(|v| !v.trim().is_empty()) {
            lines.push(format!("{label}: {v}"));
        }
    }

    lines.push(format!("Address Label: {}", address.label));
    lines.push(format!("Payment method: {}", contact.payment_method));
    lines.join("\n")
}

/// Full chat text: plan message, order summary and delivery block.
#[must_use]
pub fn order_text(plan: &PlanResult, contact: &Contact) -> String {
    format!(
        "{}\n\nPhase: {}\nTotal Quantity 🍪: {} laddus\nTotal Weight ⚖️: {}g\nTotal Price 💰: ₹{}\
         \n\nDelivery Details:\n{}\n\nOrder Confirmed 📦",
        plan.message,
        plan.phase,
        plan.quantity,
        plan.weight_grams,
        plan.total_price,
        delivery_details(contact),
    )
}

/// `https://wa.me/{number}?text=...` with `text` query-encoded.
pub fn deep_link(number: &str, text: &str) -> Result<Url> {
    if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit()) {
        bail!("WhatsApp number '{number}' must be digits only");
    }
    Url::parse_with_params(&format!("https://wa.me/{number}"), &[("text", text)])
        .context("Failed to build WhatsApp link")
}
