//! Customer message templates
//!
//! One template per `(phase, pre-order)` pair. The Phase-1 templates show
//! one more laddu than the billed quantity; billed fields are never changed
//! to match.

use chrono::NaiveDate;

use super::calculator::{Milestones, Phase};
use super::pricing::OrderSize;

/// Everything a template interpolates
#[derive(Debug, Clone, Copy)]
pub struct MessageContext<'a> {
    /// Customer display name
    pub name: &'a str,
    /// Day of cycle (A)
    pub cycle_day: u32,
    /// Days left in the current phase (D)
    pub days_remaining: u32,
    /// Active phase
    pub phase: Phase,
    /// Pre-order window flag
    pub is_pre_order: bool,
    /// Billed order size
    pub size: OrderSize,
    /// Milestone dates of the current cycle
    pub milestones: Milestones,
}

/// Render the customer message for a plan.
#[must_use]
pub fn compose(ctx: &MessageContext<'_>) -> String {
    let greeting = format!(
        "Hi {} ma’am! 🌸\n Today is Day {} of your menstrual cycle.\n",
        ctx.name, ctx.cycle_day
    );
    let body = match (ctx.phase, ctx.is_pre_order) {
        (Phase::One, true) => phase_one_pre_order(ctx),
        (Phase::One, false) => phase_one_regular(ctx),
        (Phase::Two, true) => phase_two_pre_order(ctx),
        (Phase::Two, false) => phase_two_regular(ctx),
    };
    greeting + &body
}

fn ymd(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn phase_one_pre_order(ctx: &MessageContext<'_>) -> String {
    let end = ymd(ctx.milestones.phase1_end);
    let next = ymd(ctx.milestones.phase2_start);
    format!(
        " You have only {} days left to complete Phase 1 (ends on {end}).\n\
         Phase 2 laddus will start from {next}.\n\
         Pre-orders are now open — place your order today to reserve your Phase 2 laddus.\n \
         📦 Delivery Date: {end}\n \
         📦 Quantity: 15 laddus\n \
         ⚖️ Weight: 450 g\n \
         💰 Total Price:\n \
         30 g (per laddu) × ₹0.866 (per g) × 15 laddus = ₹390\n",
        ctx.days_remaining + 1,
    )
}

fn phase_one_regular(ctx: &MessageContext<'_>) -> String {
    let shown = ctx.days_remaining + 1;
    format!(
        " We will deliver {shown} Phase-1 laddus (Flax + Pumpkin).\n \
         Quantity: {} laddus\n \
         Weight: {} g\n \
         Total Price: 30 g (per laddu) × ₹0.866 (per g) × {shown} laddus = ₹{}",
        ctx.size.quantity + 1,
        ctx.size.weight_grams,
        ctx.size.total_price,
    )
}

fn phase_two_pre_order(ctx: &MessageContext<'_>) -> String {
    let end = ymd(ctx.milestones.cycle_end);
    let next = ymd(ctx.milestones.next_cycle_start());
    format!(
        " You have only {} days left to complete Phase 2 (ends on {end}).\n \
         Phase 1 laddus will start from {next}.\n \
         Pre-orders are now open — place your order today to reserve your Phase 1 laddus.\n \
         📦 Delivery Date: {next}\n \
         📦 Quantity: 15 laddus\n \
         ⚖️ Weight: 450 g\n \
         💰 Total Price:30 g (per laddu) × ₹0.866 (per g) × 15 laddus = ₹390\n",
        ctx.days_remaining,
    )
}

fn phase_two_regular(ctx: &MessageContext<'_>) -> String {
    let days = ctx.days_remaining;
    format!(
        " We'll deliver {days} Phase-2 laddus (Sunflower + Sesame).\n\
         Quantity = {} laddus\n\
         Weight : {} g\n\
         Total price = 30 g(per laddu) × ₹0.866(per g) × {days}(laddus) = ₹{}",
        ctx.size.quantity, ctx.size.weight_grams, ctx.size.total_price,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycle::pricing::{order_size, PRE_ORDER_BUNDLE};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn milestones() -> Milestones {
        Milestones {
            phase1_end: date(2024, 1, 14),
            phase2_start: date(2024, 1, 15),
            cycle_end: date(2024, 1, 28),
        }
    }

    fn context(phase: Phase, days_remaining: u32) -> MessageContext<'static> {
        MessageContext {
            name: "Asha",
            cycle_day: 5,
            days_remaining,
            phase,
            is_pre_order: days_remaining <= 8,
            size: order_size(days_remaining),
            milestones: milestones(),
        }
    }

    #[test]
    fn test_greeting_names_customer_and_day() {
        let text = compose(&context(Phase::One, 13));
        assert!(text.starts_with("Hi Asha ma’am! 🌸\n Today is Day 5 of your menstrual cycle.\n"));
    }

    #[test]
    fn test_phase_one_regular_shows_one_extra_laddu() {
        let text = compose(&context(Phase::One, 13));
        assert!(text.contains("We will deliver 14 Phase-1 laddus (Flax + Pumpkin)."));
        assert!(text.contains("Quantity: 14 laddus"));
        assert!(text.contains("Weight: 405 g"));
        assert!(text.ends_with("× 14 laddus = ₹338"));
    }

    #[test]
    fn test_phase_one_pre_order_names_milestones() {
        let text = compose(&context(Phase::One, 6));
        assert!(text.contains("You have only 7 days left to complete Phase 1 (ends on 2024-01-14)."));
        assert!(text.contains("Phase 2 laddus will start from 2024-01-15."));
        assert!(text.contains("📦 Delivery Date: 2024-01-14"));
        assert!(text.contains(&format!("= ₹{}", PRE_ORDER_BUNDLE.total_price)));
    }

    #[test]
    fn test_phase_two_pre_order_uses_cycle_end() {
        let text = compose(&context(Phase::Two, 3));
        assert!(text.contains("You have only 3 days left to complete Phase 2 (ends on 2024-01-28)."));
        assert!(text.contains("Phase 1 laddus will start from 2024-01-28."));
        assert!(text.contains("reserve your Phase 1 laddus"));
    }

    #[test]
    fn test_phase_two_regular_names_seeds() {
        let text = compose(&context(Phase::Two, 10));
        assert!(text.contains("We'll deliver 10 Phase-2 laddus (Sunflower + Sesame)."));
        assert!(text.contains("Quantity = 10 laddus"));
        assert!(text.contains("Weight : 315 g"));
        assert!(text.ends_with("× 10(laddus) = ₹260"));
    }
}
