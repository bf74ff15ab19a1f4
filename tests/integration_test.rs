#![allow(missing_docs)]

use std::path::Path;
use std::process::Command;

use chrono::NaiveDate;
use tempfile::TempDir;

use seedcycle::order::{Address, Contact, OrderFilter, PaymentMethod};
use seedcycle::share;
use seedcycle::{
    compute_plan, DashboardStats, IntakeLimits, OrderStatus, OrderStore, OrderSubmission, Phase,
    PlanLog, PlanLogEntry, PlanRequest, ShopConfig,
};

fn contact(phone: &str) -> Contact {
    Contact {
        full_name: "Meera Iyer".to_string(),
        phone: phone.to_string(),
        age: Some(34),
        address: Address {
            house: "7/2".to_string(),
            area: "Jubilee Hills".to_string(),
            landmark: None,
            pincode: "500033".to_string(),
            map_link: None,
            label: "Work".to_string(),
        },
        payment_method: PaymentMethod::Upi,
    }
}

/// Integration test: form request → plan → stored order → dashboard → WhatsApp link.
#[test]
fn test_form_to_order_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let store = OrderStore::open(temp_dir.path()).unwrap();
    let fallback = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();

    let input = PlanRequest {
        last_period_date: "2023-12-01".to_string(),
        today: Some("2024-01-15".to_string()),
        average_cycle: "26".to_string(),
        name: "Meera".to_string(),
    }
    .into_input(&IntakeLimits::default(), fallback)
    .unwrap();

    let plan = compute_plan(&input).unwrap();
    assert_eq!(plan.phase, Phase::Two);
    assert!(plan.is_pre_order);

    let submission = OrderSubmission::from_plan(&plan, &input, contact("9100000001"));
    assert_eq!(submission.total_quantity, 15);
    assert_eq!(submission.total_weight, 450);
    assert_eq!(submission.total_price, 390);
    assert_eq!(submission.cycle_length, 26);

    let order = store.submit_order(submission).unwrap();
    assert_eq!(order.order_id, "A001A01");
    assert_eq!(order.phase, Phase::Two);
    assert_eq!(order.message, plan.message);

    store
        .update_status(&order.order_id, OrderStatus::Shipped)
        .unwrap();
    let deliveries = store
        .list_orders(&OrderFilter {
            status: Some(OrderStatus::Shipped),
            ..OrderFilter::default()
        })
        .unwrap();
    assert_eq!(deliveries.orders.len(), 1);

    let stats = DashboardStats::from_orders(&store.all_orders().unwrap());
    assert_eq!(stats.total_orders, 1);
    assert_eq!(stats.total_revenue, 390);
    assert_eq!(stats.count(OrderStatus::Shipped), 1);

    let text = share::order_text(&plan, &contact("9100000001"));
    let link = share::deep_link("919347122416", &text).unwrap();
    let (_, decoded) = link.query_pairs().next().unwrap();
    assert_eq!(decoded, text);
    assert!(decoded.contains("Address Label: Work"));
}

/// Records survive reopening the store.
#[test]
fn test_store_persists_across_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let input = seedcycle::CycleInput {
        last_period_date: day,
        today: day,
        average_cycle_length: 28,
        name: "Meera".to_string(),
    };
    let plan = compute_plan(&input).unwrap();

    {
        let store = OrderStore::open(temp_dir.path()).unwrap();
        store
            .submit_order(OrderSubmission::from_plan(&plan, &input, contact("9100000002")))
            .unwrap();
    }

    let store = OrderStore::open(temp_dir.path()).unwrap();
    let order = store.get_order("A001A01").unwrap().unwrap();
    assert_eq!(order.total_price, 338);
    let customer = store.find_customer("9100000002").unwrap().unwrap();
    assert_eq!(customer.age, 34);
    assert_eq!(customer.orders, vec!["A001A01".to_string()]);
}

/// Plan log entries are readable after the fact.
#[test]
fn test_plan_log_history() {
    let temp_dir = TempDir::new().unwrap();
    let log = PlanLog::new(temp_dir.path()).unwrap();
    let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

    for offset in [0_u64, 7, 20] {
        let input = seedcycle::CycleInput {
            last_period_date: day,
            today: day.checked_add_days(chrono::Days::new(offset)).unwrap(),
            average_cycle_length: 28,
            name: "Meera".to_string(),
        };
        let plan = compute_plan(&input).unwrap();
        log.append(&PlanLogEntry::from_plan(&input.name, &plan, chrono::Utc::now()))
            .unwrap();
    }

    let entries = log.read_all().unwrap();
    let days: Vec<u32> = entries.iter().map(|e| e.cycle_day).collect();
    assert_eq!(days, vec![1, 8, 21]);
    assert_eq!(entries[2].phase, Phase::Two);
}

fn write_config(dir: &Path) -> std::path::PathBuf {
    let config_path = dir.join("seedcycle.toml");
    let data_dir = dir.join("data");
    std::fs::write(
        &config_path,
        format!(
            "[shop]\nwhatsapp_number = \"919347122416\"\ndata_dir = {:?}\n",
            data_dir.to_string_lossy()
        ),
    )
    .unwrap();
    ShopConfig::from_path(&config_path).unwrap();
    config_path
}

/// Drives the compiled binary: plan as JSON, then an order, then the listing.
#[test]
fn test_cli_plan_and_order() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(temp_dir.path());
    let bin = env!("CARGO_BIN_EXE_seedcycle");

    let output = Command::new(bin)
        .args(["--config"])
        .arg(&config)
        .args([
            "plan",
            "--last-period",
            "2024-01-01",
            "--cycle-length",
            "28",
            "--name",
            "Asha",
            "--today",
            "2024-01-08",
            "--json",
        ])
        .output()
        .expect("failed to run seedcycle");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(plan["cycleDay"], 8);
    assert_eq!(plan["phase"], "Phase-1");
    assert_eq!(plan["totalPrice"], 390);

    let output = Command::new(bin)
        .arg("--config")
        .arg(&config)
        .args([
            "order",
            "--last-period",
            "2024-01-01",
            "--cycle-length",
            "28",
            "--name",
            "Asha",
            "--today",
            "2024-01-01",
            "--phone",
            "9100000003",
            "--house",
            "12",
            "--area",
            "Kondapur",
            "--pincode",
            "500084",
            "--payment",
            "upi",
        ])
        .output()
        .expect("failed to run seedcycle");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.trim().starts_with("https://wa.me/919347122416?text="));

    let output = Command::new(bin)
        .arg("--config")
        .arg(&config)
        .args(["orders", "list", "--json"])
        .output()
        .expect("failed to run seedcycle");
    assert!(output.status.success());
    let orders: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(orders[0]["orderId"], "A001A01");
    assert_eq!(orders[0]["paymentMethod"], "UPI");
    assert_eq!(orders[0]["totalQuantity"], 13);
}

fn run(config: &Path, args: &[&str]) -> std::process::Output {
    let output = Command::new(env!("CARGO_BIN_EXE_seedcycle"))
        .arg("--config")
        .arg(config)
        .args(args)
        .output()
        .expect("failed to run seedcycle");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    output
}

/// Orders and customers can be edited from the command line.
#[test]
fn test_cli_edits_order_and_customer() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(temp_dir.path());

    run(
        &config,
        &[
            "order", "--last-period", "2024-01-01", "--cycle-length", "28", "--name", "Asha",
            "--today", "2024-01-01", "--phone", "9100000004", "--house", "12", "--area",
            "Kondapur", "--pincode", "500084", "--age", "27",
        ],
    );

    run(
        &config,
        &[
            "orders", "edit", "A001A01", "--phase", "Phase-2", "--quantity", "10", "--price",
            "260", "--payment", "card", "--pincode", "500081",
        ],
    );
    let output = run(&config, &["orders", "show", "A001A01", "--json"]);
    let order: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(order["phase"], "Phase-2");
    assert_eq!(order["totalQuantity"], 10);
    assert_eq!(order["totalPrice"], 260);
    assert_eq!(order["totalWeight"], 405);
    assert_eq!(order["paymentMethod"], "Card");
    assert_eq!(order["address"]["pincode"], "500081");
    assert_eq!(order["address"]["house"], "12");

    run(&config, &["customers", "edit", "A001", "--name", "Asha K", "--age", "28"]);
    run(&config, &["customers", "add", "--phone", "9100000005", "--name", "Nila", "--age", "31"]);

    let store = OrderStore::open(temp_dir.path().join("data")).unwrap();
    let customer = store.find_customer("9100000004").unwrap().unwrap();
    assert_eq!(customer.name, "Asha K");
    assert_eq!(customer.age, 28);
    let added = store.find_customer("9100000005").unwrap().unwrap();
    assert_eq!(added.customer_id.as_deref(), Some("A002"));

    let output = Command::new(env!("CARGO_BIN_EXE_seedcycle"))
        .arg("--config")
        .arg(&config)
        .args(["orders", "edit", "A001A01"])
        .output()
        .expect("failed to run seedcycle");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Nothing to change"));
}

/// A future last-period date fails with a readable error.
#[test]
fn test_cli_rejects_future_date() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(temp_dir.path());

    let output = Command::new(env!("CARGO_BIN_EXE_seedcycle"))
        .arg("--config")
        .arg(&config)
        .args([
            "plan",
            "--last-period",
            "2024-02-01",
            "--cycle-length",
            "28",
            "--name",
            "Asha",
            "--today",
            "2024-01-01",
        ])
        .output()
        .expect("failed to run seedcycle");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("last period date cannot be in the future"));
}
