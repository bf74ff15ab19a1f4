//! Form intake
//!
//! Turns loosely-typed form fields into a [`CycleInput`] before the
//! calculator sees them. Range checks on the cycle length live here, not in
//! the calculator.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;

use super::calculator::CycleInput;
use crate::config::IntakeLimits;

/// Date format accepted on input
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw plan request as submitted from a form or the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanRequest {
    /// Last period start, `YYYY-MM-DD`
    pub last_period_date: String,
    /// Reference date, `YYYY-MM-DD`; falls back to the caller's date when absent
    pub today: Option<String>,
    /// Average cycle length as typed
    pub average_cycle: String,
    /// Customer name
    pub name: String,
}

impl PlanRequest {
    /// Validate and convert into a calculator input.
    ///
    /// `fallback_today` is used when the request carries no reference date.
    pub fn into_input(self, limits: &IntakeLimits, fallback_today: NaiveDate) -> Result<CycleInput> {
        let name = self.name.trim();
        let last_period = self.last_period_date.trim();
        let cycle = self.average_cycle.trim();
        if name.is_empty() || last_period.is_empty() || cycle.is_empty() {
            bail!("Missing information: please fill in all fields");
        }

        let last_period_date = parse_date(last_period).context("Invalid last period date")?;
        let today = match self.today.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => parse_date(t).context("Invalid reference date")?,
            _ => fallback_today,
        };

        let average_cycle_length: u32 = cycle
            .parse()
            .with_context(|| format!("Average cycle length '{cycle}' is not a whole number"))?;
        limits.check(average_cycle_length)?;

        Ok(CycleInput {
            last_period_date,
            today,
            average_cycle_length,
            name: name.to_string(),
        })
    }
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .with_context(|| format!("'{s}' is not a date in YYYY-MM-DD form"))
}
