//! Terminal display for plans, orders and the dashboard
//!
//! All output goes to stderr so stdout remains clean for piping JSON.

use colored::{ColoredString, Colorize};

use crate::cycle::{Phase, PlanResult};
use crate::log::PlanLogEntry;
use crate::order::{Customer, CustomerProfile, DashboardStats, Order, OrderPage, OrderStatus};

const RULE_WIDTH: usize = 50;

fn rule() -> String {
    "─".repeat(RULE_WIDTH).dimmed().to_string()
}

fn header(title: &str) {
    eprintln!("\n{} {}", "===".bold().cyan(), title.bold().cyan());
    eprintln!("{}", rule());
}

/// Phase label colored by phase
#[must_use]
pub fn phase_badge(phase: Phase) -> ColoredString {
    match phase {
        Phase::One => phase.as_str().magenta().bold(),
        Phase::Two => phase.as_str().yellow().bold(),
    }
}

/// Status label colored by how far along the order is
#[must_use]
pub fn status_badge(status: OrderStatus) -> ColoredString {
    let label = status.as_str();
    match status {
        OrderStatus::Pending => label.yellow(),
        OrderStatus::Confirmed | OrderStatus::Processing => label.blue(),
        OrderStatus::Shipped => label.cyan(),
        OrderStatus::Delivered => label.green().bold(),
        OrderStatus::Cancelled => label.red(),
    }
}

/// Cut `text` to at most `max` characters, marking the cut with `...`
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// One-line summary of an order for listings
#[must_use]
pub fn order_line(order: &Order) -> String {
    format!(
        "{:<10} {} {:<22} {:>3} laddus  ₹{:<5} {}",
        order.order_id,
        order.order_date.format("%Y-%m-%d"),
        truncate(&order.full_name, 22),
        order.total_quantity,
        order.total_price,
        order.phase,
    )
}

/// Print a computed plan
pub fn render_plan(plan: &PlanResult) {
    header("Your cycle plan");
    eprintln!(
        "  {} {} of {}   {} {}",
        "Day:".dimmed(),
        plan.cycle_day.to_string().bold(),
        plan.average_cycle_length,
        "Phase:".dimmed(),
        phase_badge(plan.phase)
    );
    eprintln!(
        "  {} {} (Phase-1 ends on day {})",
        "Days left in phase:".dimmed(),
        plan.days_remaining_in_phase,
        plan.half_cycle_day
    );
    if plan.is_pre_order {
        eprintln!("  {} pre-order bundle", "▶".blue());
    }
    eprintln!(
        "  {} {} laddus | {} g | ₹{}",
        "Order:".dimmed(),
        plan.quantity,
        plan.weight_grams,
        plan.total_price
    );
    eprintln!("{}", rule());
    for line in plan.message.lines() {
        eprintln!("  {}", line.trim_start());
    }
    eprintln!();
}

/// Print a single order in full
pub fn render_order(order: &Order) {
    header(&format!("Order {}", order.order_id));
    eprintln!("  {} {}", "Status:".dimmed(), status_badge(order.order_status));
    eprintln!(
        "  {} {} ({}) [{}]",
        "Customer:".dimmed(),
        order.full_name,
        order.phone,
        order.customer_id
    );
    eprintln!(
        "  {} {} | {} laddus | {} g | ₹{}",
        "Order:".dimmed(),
        phase_badge(order.phase),
        order.total_quantity,
        order.total_weight,
        order.total_price
    );
    eprintln!(
        "  {} periods started {}, {}-day cycle",
        "Cycle:".dimmed(),
        order.periods_started,
        order.cycle_length
    );

    let address = &order.address;
    let mut parts = vec![address.house.as_str(), address.area.as_str()];
    if let Some(landmark) = address.landmark.as_deref() {
        parts.push(landmark);
    }
    parts.push(address.pincode.as_str());
    eprintln!(
        "  {} {} ({})",
        "Deliver to:".dimmed(),
        parts.join(", "),
        address.label
    );
    if let Some(link) = address.map_link.as_deref() {
        eprintln!("  {} {link}", "Map:".dimmed());
    }
    eprintln!("  {} {}", "Payment:".dimmed(), order.payment_method);
    eprintln!(
        "  {} {}",
        "Placed:".dimmed(),
        order.order_date.format("%Y-%m-%d %H:%M UTC")
    );
    eprintln!();
}

/// Print a page of orders
pub fn render_order_page(page: &OrderPage) {
    header("Orders");
    if page.orders.is_empty() {
        eprintln!("  {}", "No orders found.".dimmed());
    }
    for order in &page.orders {
        eprintln!("  {}  {}", order_line(order), status_badge(order.order_status));
    }
    eprintln!("{}", rule());
    eprintln!(
        "  {} page {} of {} ({} orders)",
        "Showing".dimmed(),
        page.current_page,
        page.total_pages.max(1),
        page.total_orders
    );
    eprintln!();
}

/// Print the customer list
pub fn render_customers(customers: &[Customer]) {
    header("Customers");
    if customers.is_empty() {
        eprintln!("  {}", "No customers yet.".dimmed());
    }
    for customer in customers {
        eprintln!(
            "  {:<6} {:<22} {:<14} {} order(s)",
            customer.customer_id.as_deref().unwrap_or("-"),
            truncate(&customer.name, 22),
            customer.phone,
            customer.orders.len()
        );
    }
    eprintln!();
}

/// Print a customer and their orders
pub fn render_profile(profile: &CustomerProfile) {
    let customer = &profile.customer;
    header(&format!(
        "Customer {}",
        customer.customer_id.as_deref().unwrap_or("(no id)")
    ));
    eprintln!("  {} {}", "Name:".dimmed(), customer.name);
    eprintln!("  {} {}", "Phone:".dimmed(), customer.phone);
    if customer.age > 0 {
        eprintln!("  {} {}", "Age:".dimmed(), customer.age);
    }
    if let (Some(date), Some(length)) = (customer.last_period_date, customer.average_cycle_length) {
        eprintln!(
            "  {} last period {date}, {length}-day cycle",
            "Cycle:".dimmed()
        );
    }
    eprintln!("  {} {}", "Addresses:".dimmed(), customer.addresses.len());
    eprintln!("{}", rule());
    for order in &profile.orders {
        eprintln!("  {}  {}", order_line(order), status_badge(order.order_status));
    }
    eprintln!();
}

/// Print dashboard statistics
pub fn render_stats(stats: &DashboardStats) {
    header("Dashboard");
    eprintln!("  {} {}", "Total orders:".dimmed(), stats.total_orders);
    eprintln!("  {} ₹{}", "Revenue:".dimmed(), stats.total_revenue);
    eprintln!(
        "  {} {}   {} {}",
        "Pending:".dimmed(),
        stats.pending.to_string().yellow(),
        "Delivered:".dimmed(),
        stats.delivered.to_string().green()
    );
    eprintln!("{}", rule());
    for status in OrderStatus::ALL {
        eprintln!("  {:<12} {}", status_badge(status), stats.count(status));
    }
    for (phase, count) in &stats.by_phase {
        eprintln!("  {:<12} {count}", phase_badge(*phase));
    }
    eprintln!();
}

/// Print the plan history
pub fn render_history(entries: &[PlanLogEntry]) {
    header("Plan history");
    if entries.is_empty() {
        eprintln!("  {}", "No plans computed yet.".dimmed());
    }
    for entry in entries {
        let bundle = if entry.pre_order { " pre-order" } else { "" };
        eprintln!(
            "  {} {:<18} day {:>2}/{:<2} {} {:>2} left  {} laddus ₹{}{}",
            entry.timestamp.format("%Y-%m-%d %H:%M"),
            truncate(&entry.name, 18),
            entry.cycle_day,
            entry.cycle_length,
            phase_badge(entry.phase),
            entry.days_remaining,
            entry.quantity,
            entry.total_price,
            bundle.dimmed()
        );
    }
    eprintln!();
}
