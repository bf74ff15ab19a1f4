//! Seedcycle - seed-cycling order desk
//!
//! CLI entry point.

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use serde::Serialize;

use seedcycle::cli;
use seedcycle::config::ShopConfig;
use seedcycle::cycle::{compute_plan, CycleInput, Phase, PlanRequest, PlanResult};
use seedcycle::log::{PlanLog, PlanLogEntry};
use seedcycle::order::{
    Address, Contact, CustomerPatch, DashboardStats, Order, OrderFilter, OrderPatch, OrderStatus,
    OrderStore, OrderSubmission, PaymentMethod,
};
use seedcycle::share;

/// Seed-cycling order desk
///
/// Computes cycle-phase delivery plans, records orders and customers, and
/// prepares the WhatsApp confirmation message.
#[derive(Parser, Debug)]
#[command(name = "seedcycle", version, about)]
struct Cli {
    /// Path to the seedcycle.toml configuration file
    #[arg(long, global = true, default_value = "seedcycle.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

/// Inputs of the cycle calculator
#[derive(Args, Debug, Clone)]
struct PlanArgs {
    /// First day of the last period (YYYY-MM-DD)
    #[arg(long)]
    last_period: String,

    /// Average cycle length in days
    #[arg(long)]
    cycle_length: String,

    /// Customer name used in the message
    #[arg(long)]
    name: String,

    /// Evaluate as of this date instead of today (YYYY-MM-DD)
    #[arg(long)]
    today: Option<String>,
}

impl PlanArgs {
    fn request(&self) -> PlanRequest {
        PlanRequest {
            last_period_date: self.last_period.clone(),
            today: self.today.clone(),
            average_cycle: self.cycle_length.clone(),
            name: self.name.clone(),
        }
    }
}

/// Checkout details for an order
#[derive(Args, Debug, Clone)]
struct CheckoutArgs {
    /// Customer phone number
    #[arg(long)]
    phone: String,

    /// Full name for delivery (defaults to --name)
    #[arg(long)]
    full_name: Option<String>,

    /// Customer age in years
    #[arg(long)]
    age: Option<u32>,

    /// House / flat number
    #[arg(long)]
    house: String,

    /// Area or locality
    #[arg(long)]
    area: String,

    /// Nearby landmark
    #[arg(long)]
    landmark: Option<String>,

    /// Postal code
    #[arg(long)]
    pincode: String,

    /// Maps link for the rider
    #[arg(long)]
    map_link: Option<String>,

    /// Address label
    #[arg(long, default_value = "Home")]
    label: String,

    /// Payment method: "Cash on Delivery", UPI, Card or "Net Banking"
    #[arg(long, default_value = "Cash on Delivery")]
    payment: PaymentMethod,
}

impl CheckoutArgs {
    fn contact(&self, name: &str) -> Contact {
        Contact {
            full_name: self
                .full_name
                .clone()
                .unwrap_or_else(|| name.trim().to_string()),
            phone: self.phone.trim().to_string(),
            age: self.age,
            address: Address {
                house: self.house.clone(),
                area: self.area.clone(),
                landmark: self.landmark.clone(),
                pincode: self.pincode.clone(),
                map_link: self.map_link.clone(),
                label: self.label.clone(),
            }
            .normalized(),
            payment_method: self.payment,
        }
    }
}

/// Fields of an order to change; omitted flags are left as they are
#[derive(Args, Debug, Clone, Default)]
struct OrderEditArgs {
    /// Phase being ordered (Phase-1 or Phase-2)
    #[arg(long)]
    phase: Option<Phase>,

    /// Units ordered
    #[arg(long)]
    quantity: Option<u32>,

    /// Grams ordered
    #[arg(long)]
    weight: Option<u32>,

    /// Price in rupees
    #[arg(long)]
    price: Option<u32>,

    /// Payment method
    #[arg(long)]
    payment: Option<PaymentMethod>,

    /// House / flat number
    #[arg(long)]
    house: Option<String>,

    /// Area or locality
    #[arg(long)]
    area: Option<String>,

    /// Nearby landmark
    #[arg(long)]
    landmark: Option<String>,

    /// Postal code
    #[arg(long)]
    pincode: Option<String>,

    /// Maps link for the rider
    #[arg(long)]
    map_link: Option<String>,

    /// Address label
    #[arg(long)]
    label: Option<String>,

    /// Replacement customer message
    #[arg(long)]
    message: Option<String>,
}

impl OrderEditArgs {
    /// Build the patch, merging address flags into the order's current address.
    fn patch(self, current: &Order) -> Option<OrderPatch> {
        let touches_address = self.house.is_some()
            || self.area.is_some()
            || self.landmark.is_some()
            || self.pincode.is_some()
            || self.map_link.is_some()
            || self.label.is_some();
        let address = touches_address.then(|| {
            let base = &current.address;
            Address {
                house: self.house.unwrap_or_else(|| base.house.clone()),
                area: self.area.unwrap_or_else(|| base.area.clone()),
                landmark: self.landmark.or_else(|| base.landmark.clone()),
                pincode: self.pincode.unwrap_or_else(|| base.pincode.clone()),
                map_link: self.map_link.or_else(|| base.map_link.clone()),
                label: self.label.unwrap_or_else(|| base.label.clone()),
            }
        });

        let patch = OrderPatch {
            phase: self.phase,
            total_quantity: self.quantity,
            total_weight: self.weight,
            total_price: self.price,
            address,
            payment_method: self.payment,
            message: self.message,
        };
        (patch != OrderPatch::default()).then_some(patch)
    }
}

/// Fields of a customer to change; omitted flags are left as they are
#[derive(Args, Debug, Clone, Default)]
struct CustomerEditArgs {
    /// Display name
    #[arg(long)]
    name: Option<String>,

    /// Age in years
    #[arg(long)]
    age: Option<u32>,

    /// Last period start (YYYY-MM-DD)
    #[arg(long)]
    last_period: Option<NaiveDate>,

    /// Average cycle length in days
    #[arg(long)]
    cycle_length: Option<u32>,
}

impl CustomerEditArgs {
    fn patch(self) -> Option<CustomerPatch> {
        let patch = CustomerPatch {
            name: self.name.map(|n| n.trim().to_string()),
            age: self.age,
            last_period_date: self.last_period,
            average_cycle_length: self.cycle_length,
        };
        (patch != CustomerPatch::default()).then_some(patch)
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the cycle plan and customer message
    Plan {
        #[command(flatten)]
        plan: PlanArgs,

        /// Print the plan as JSON on stdout
        #[arg(long)]
        json: bool,
    },

    /// Compute the plan, save the order and print the WhatsApp link
    Order {
        #[command(flatten)]
        plan: PlanArgs,

        #[command(flatten)]
        checkout: CheckoutArgs,

        /// Print the saved order as JSON on stdout
        #[arg(long)]
        json: bool,
    },

    /// Inspect and manage orders
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },

    /// Inspect and manage customers
    Customers {
        #[command(subcommand)]
        action: CustomersAction,
    },

    /// Dashboard statistics over all orders
    Summary {
        /// Print as JSON on stdout
        #[arg(long)]
        json: bool,
    },

    /// Previously computed plans
    History,
}

#[derive(Subcommand, Debug)]
enum OrdersAction {
    /// List orders, newest first
    List {
        /// Only orders for this phone number
        #[arg(long)]
        phone: Option<String>,

        /// Only orders in this status
        #[arg(long)]
        status: Option<OrderStatus>,

        /// Page number
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Orders per page
        #[arg(long, default_value_t = seedcycle::order::store::DEFAULT_PAGE_LIMIT)]
        limit: usize,

        /// Print as JSON on stdout
        #[arg(long)]
        json: bool,
    },

    /// Show one order
    Show {
        /// Order id, e.g. A001A01
        id: String,

        /// Print as JSON on stdout
        #[arg(long)]
        json: bool,
    },

    /// Change an order's status
    SetStatus {
        /// Order id
        id: String,

        /// New status
        status: OrderStatus,
    },

    /// Change an order's phase, size, price, payment or address
    Edit {
        /// Order id
        id: String,

        #[command(flatten)]
        changes: OrderEditArgs,
    },

    /// Delete an order
    Delete {
        /// Order id
        id: String,
    },
}

#[derive(Subcommand, Debug)]
enum CustomersAction {
    /// List customers, newest first
    List,

    /// Show a customer and their orders
    Show {
        /// Phone number
        phone: String,
    },

    /// Create a customer, or update the name and age of an existing one
    Add {
        /// Phone number
        #[arg(long)]
        phone: String,

        /// Display name
        #[arg(long)]
        name: String,

        /// Age in years
        #[arg(long)]
        age: u32,
    },

    /// Change a customer's details
    Edit {
        /// Customer id, e.g. A001
        id: String,

        #[command(flatten)]
        changes: CustomerEditArgs,
    },

    /// Delete a customer record (orders are kept)
    Delete {
        /// Customer id, e.g. A001
        id: String,
    },
}

/// Parse the request and run the calculator, recording the plan in the log.
fn plan_from_args(config: &ShopConfig, args: &PlanArgs) -> Result<(CycleInput, PlanResult)> {
    let input = args
        .request()
        .into_input(&config.intake, Local::now().date_naive())?;
    let plan = compute_plan(&input).context("Could not compute a plan")?;

    let log = PlanLog::new(&config.shop.data_dir).context("Failed to initialize plan log")?;
    log.append(&PlanLogEntry::from_plan(&input.name, &plan, Utc::now()))
        .context("Failed to write to plan log")?;

    Ok((input, plan))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}

fn run_order(config: &ShopConfig, plan_args: &PlanArgs, checkout: &CheckoutArgs, json: bool) -> Result<()> {
    let (input, plan) = plan_from_args(config, plan_args)?;
    let contact = checkout.contact(&input.name);

    let store = OrderStore::open(&config.shop.data_dir)?;
    let submission = OrderSubmission::from_plan(&plan, &input, contact.clone());
    let order = store
        .submit_order(submission)
        .context("Failed to save order")?;

    let link = share::deep_link(&config.shop.whatsapp_number, &share::order_text(&plan, &contact))?;

    if json {
        print_json(&order)?;
    } else {
        cli::render_plan(&plan);
        eprintln!(
            "{} order {} for {}",
            "Saved".green().bold(),
            order.order_id.bold(),
            order.full_name
        );
        eprintln!("Send it on WhatsApp:");
        println!("{link}");
    }
    Ok(())
}

fn run_orders(store: &OrderStore, action: OrdersAction) -> Result<()> {
    match action {
        OrdersAction::List {
            phone,
            status,
            page,
            limit,
            json,
        } => {
            let page = store.list_orders(&OrderFilter {
                phone,
                status,
                page,
                limit,
            })?;
            if json {
                print_json(&page.orders)?;
            } else {
                cli::render_order_page(&page);
            }
        }
        OrdersAction::Show { id, json } => {
            let Some(order) = store.get_order(&id)? else {
                bail!("Order '{id}' not found");
            };
            if json {
                print_json(&order)?;
            } else {
                cli::render_order(&order);
            }
        }
        OrdersAction::SetStatus { id, status } => {
            let order = store.update_status(&id, status)?;
            eprintln!(
                "{} {} is now {}",
                "Updated".green().bold(),
                order.order_id,
                cli::display::status_badge(order.order_status)
            );
        }
        OrdersAction::Edit { id, changes } => {
            let Some(current) = store.get_order(&id)? else {
                bail!("Order '{id}' not found");
            };
            let Some(patch) = changes.patch(&current) else {
                bail!("Nothing to change: pass at least one field to edit");
            };
            let order = store.update_order(&id, patch)?;
            eprintln!("{} order {}", "Updated".green().bold(), order.order_id);
            cli::render_order(&order);
        }
        OrdersAction::Delete { id } => {
            let order = store.delete_order(&id)?;
            eprintln!("{} order {}", "Deleted".red().bold(), order.order_id);
        }
    }
    Ok(())
}

fn run_customers(store: &OrderStore, action: CustomersAction) -> Result<()> {
    match action {
        CustomersAction::List => cli::render_customers(&store.list_customers()?),
        CustomersAction::Show { phone } => {
            let Some(profile) = store.customer_profile(&phone)? else {
                bail!("No customer with phone '{phone}'");
            };
            cli::render_profile(&profile);
        }
        CustomersAction::Add { phone, name, age } => {
            let customer = store.upsert_customer(&phone, &name, age)?;
            eprintln!(
                "{} customer {} ({})",
                "Saved".green().bold(),
                customer.customer_id.as_deref().unwrap_or("-"),
                customer.name
            );
        }
        CustomersAction::Edit { id, changes } => {
            let Some(patch) = changes.patch() else {
                bail!("Nothing to change: pass at least one field to edit");
            };
            let customer = store.update_customer(&id, patch)?;
            eprintln!("{} customer {} ({})", "Updated".green().bold(), id, customer.name);
        }
        CustomersAction::Delete { id } => {
            let customer = store.delete_customer(&id)?;
            eprintln!("{} customer {} ({})", "Deleted".red().bold(), id, customer.name);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let config = ShopConfig::load_or_default(&args.config)
        .with_context(|| format!("Failed to load config from '{}'", args.config.display()))?;

    match args.command {
        Command::Plan { plan, json } => {
            let (_, plan) = plan_from_args(&config, &plan)?;
            if json {
                print_json(&plan)?;
            } else {
                cli::render_plan(&plan);
            }
        }
        Command::Order {
            plan,
            checkout,
            json,
        } => run_order(&config, &plan, &checkout, json)?,
        Command::Orders { action } => {
            let store = OrderStore::open(&config.shop.data_dir)?;
            run_orders(&store, action)?;
        }
        Command::Customers { action } => {
            let store = OrderStore::open(&config.shop.data_dir)?;
            run_customers(&store, action)?;
        }
        Command::Summary { json } => {
            let store = OrderStore::open(&config.shop.data_dir)?;
            let stats = DashboardStats::from_orders(&store.all_orders()?);
            if json {
                print_json(&stats)?;
            } else {
                cli::render_stats(&stats);
            }
        }
        Command::History => {
            let log = PlanLog::new(&config.shop.data_dir)?;
            cli::render_history(&log.read_all()?);
        }
    }

    Ok(())
}
