//! Cycle-phase calculator
//!
//! Maps a last-period date, a reference date and an average cycle length to
//! the current cycle day, the active fulfillment phase, the days left in it,
//! and the order that should be placed. Pure: no clock reads, no I/O.

use std::fmt;
use std::str::FromStr;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::message::{self, MessageContext};
use super::pricing::{self, OrderSize};
use crate::error::{InvalidInputError, UnknownVariant};

/// Fulfillment phase of a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// First half: flax + pumpkin
    #[serde(rename = "Phase-1")]
    One,
    /// Second half: sesame + sunflower
    #[serde(rename = "Phase-2")]
    Two,
}

impl Phase {
    /// Canonical label, `Phase-1` or `Phase-2`
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::One => "Phase-1",
            Self::Two => "Phase-2",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "phase-1" | "phase1" | "1" => Ok(Self::One),
            "phase-2" | "phase2" | "2" => Ok(Self::Two),
            _ => Err(UnknownVariant::new("phase", s, &["Phase-1", "Phase-2"])),
        }
    }
}

/// Calculator input, already parsed and typed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleInput {
    /// First day of the most recent period
    pub last_period_date: NaiveDate,
    /// Reference date the plan is evaluated against
    pub today: NaiveDate,
    /// Typical cycle length in days
    pub average_cycle_length: u32,
    /// Display name for the message
    pub name: String,
}

/// Key dates of the cycle that contains `today`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestones {
    /// Last day of Phase-1
    pub phase1_end: NaiveDate,
    /// First day of Phase-2
    pub phase2_start: NaiveDate,
    /// Last day of the cycle
    pub cycle_end: NaiveDate,
}

impl Milestones {
    /// Date Phase-1 deliveries resume for the next cycle.
    ///
    /// This is the cycle-end date itself, not the day after it.
    #[must_use]
    pub const fn next_cycle_start(&self) -> NaiveDate {
        self.cycle_end
    }
}

/// Result of [`compute_plan`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResult {
    /// Day of cycle as of `today` (A), 1-based
    pub cycle_day: u32,
    /// Last day of Phase-1 (B), `ceil(L / 2)`
    pub half_cycle_day: u32,
    /// Cycle length the plan was computed for (BB)
    pub average_cycle_length: u32,
    /// Days left until the current phase ends (D)
    pub days_remaining_in_phase: u32,
    /// Active phase
    pub phase: Phase,
    /// Whether the fixed pre-order bundle applies
    pub is_pre_order: bool,
    /// Units to deliver
    pub quantity: u32,
    /// Total weight in grams
    pub weight_grams: u32,
    /// Total price in whole rupees
    pub total_price: u32,
    /// Milestone dates used in the message
    pub milestones: Milestones,
    /// Customer-facing text
    pub message: String,
}

impl PlanResult {
    /// Billed order size
    #[must_use]
    pub const fn order_size(&self) -> OrderSize {
        OrderSize {
            quantity: self.quantity,
            weight_grams: self.weight_grams,
            total_price: self.total_price,
        }
    }
}

/// Compute the delivery plan for `input`.
///
/// Stale anchors are rolled forward by whole cycles, so the returned
/// `cycle_day` is always in `1..=average_cycle_length`.
pub fn compute_plan(input: &CycleInput) -> Result<PlanResult, InvalidInputError> {
    let length = input.average_cycle_length;
    if length == 0 {
        return Err(InvalidInputError::ZeroCycleLength);
    }

    let raw_day = day_of(input.last_period_date, input.today);
    if raw_day < 1 {
        return Err(InvalidInputError::FutureLastPeriod {
            last_period_date: input.last_period_date,
            today: input.today,
        });
    }

    let half_cycle_day = length.div_ceil(2);

    let mut anchor = input.last_period_date;
    let mut cycle_day = raw_day;
    if raw_day > i64::from(length) {
        let cycles_elapsed = u64::try_from((raw_day - 1) / i64::from(length))
            .map_err(|_| InvalidInputError::DateOutOfRange)?;
        anchor = shift(anchor, cycles_elapsed * u64::from(length))?;
        cycle_day = day_of(anchor, input.today);
    }
    let cycle_day = u32::try_from(cycle_day).map_err(|_| InvalidInputError::DateOutOfRange)?;

    let (phase, days_remaining) = if cycle_day <= half_cycle_day {
        (Phase::One, half_cycle_day.saturating_sub(cycle_day))
    } else {
        (Phase::Two, length.saturating_sub(cycle_day))
    };

    let phase1_end = shift(anchor, u64::from(half_cycle_day - 1))?;
    let milestones = Milestones {
        phase1_end,
        phase2_start: shift(phase1_end, 1)?,
        cycle_end: shift(anchor, u64::from(length - 1))?,
    };

    let is_pre_order = pricing::is_pre_order(days_remaining);
    let size = pricing::order_size(days_remaining);

    let message = message::compose(&MessageContext {
        name: &input.name,
        cycle_day,
        days_remaining,
        phase,
        is_pre_order,
        size,
        milestones,
    });

    Ok(PlanResult {
        cycle_day,
        half_cycle_day,
        average_cycle_length: length,
        days_remaining_in_phase: days_remaining,
        phase,
        is_pre_order,
        quantity: size.quantity,
        weight_grams: size.weight_grams,
        total_price: size.total_price,
        milestones,
        message,
    })
}

/// 1-based day number of `today` counted from `anchor`.
fn day_of(anchor: NaiveDate, today: NaiveDate) -> i64 {
    (today - anchor).num_days() + 1
}

fn shift(date: NaiveDate, days: u64) -> Result<NaiveDate, InvalidInputError> {
    date.checked_add_days(Days::new(days))
        .ok_or(InvalidInputError::DateOutOfRange)
}
