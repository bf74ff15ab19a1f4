//! Customer and order identifier sequences
//!
//! Customers are `A001`, `A002`, ... and each customer's orders are
//! `{customer}A01`, `{customer}A02`, ...

const CUSTOMER_PREFIX: &str = "A";
const CUSTOMER_WIDTH: usize = 3;
const ORDER_SEPARATOR: &str = "A";
const ORDER_WIDTH: usize = 2;

/// Numeric suffix of `id` after `prefix`, if it is at least `min_digits` ASCII digits.
fn sequence_of(id: &str, prefix: &str, min_digits: usize) -> Option<u64> {
    let digits = id.strip_prefix(prefix)?;
    if digits.len() < min_digits || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Next customer id after the highest of `existing`.
///
/// Ids that do not follow the `A` + digits pattern are ignored, as are ids
/// whose sequence has no successor.
pub fn next_customer_id<'a, I>(existing: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let next = existing
        .into_iter()
        .filter_map(|id| sequence_of(id, CUSTOMER_PREFIX, CUSTOMER_WIDTH)?.checked_add(1))
        .max()
        .unwrap_or(1);
    format!("{CUSTOMER_PREFIX}{next:0width$}", width = CUSTOMER_WIDTH)
}

/// Next order id for `customer_id` after the highest of `existing`.
///
/// Only ids of the form `{customer_id}A` + digits count.
pub fn next_order_id<'a, I>(customer_id: &str, existing: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let prefix = format!("{customer_id}{ORDER_SEPARATOR}");
    let next = existing
        .into_iter()
        .filter_map(|id| sequence_of(id, &prefix, ORDER_WIDTH)?.checked_add(1))
        .max()
        .unwrap_or(1);
    format!("{prefix}{next:0width$}", width = ORDER_WIDTH)
}
