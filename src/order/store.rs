//! File-backed order and customer store
//!
//! Orders live in `orders.jsonl` and customers in `customers.jsonl` under the
//! data directory. Creation appends; edits rewrite the file atomically.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};

use super::ids::{next_customer_id, next_order_id};
use super::record::{Customer, CustomerPatch, Order, OrderPatch, OrderStatus, OrderSubmission};
use crate::log::JsonlFile;

/// Default page size for [`OrderStore::list_orders`]
pub const DEFAULT_PAGE_LIMIT: usize = 10;

/// Filter and pagination for order listings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderFilter {
    /// Only orders for this phone
    pub phone: Option<String>,
    /// Only orders in this status
    pub status: Option<OrderStatus>,
    /// 1-based page number
    pub page: usize,
    /// Orders per page
    pub limit: usize,
}

impl Default for OrderFilter {
    fn default() -> Self {
        Self {
            phone: None,
            status: None,
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl OrderFilter {
    fn matches(&self, order: &Order) -> bool {
        self.phone.as_deref().map_or(true, |p| order.phone == p.trim())
            && self.status.map_or(true, |s| order.order_status == s)
    }
}

/// One page of orders, newest first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderPage {
    /// Orders on this page
    pub orders: Vec<Order>,
    /// Orders matching the filter across all pages
    pub total_orders: usize,
    /// Number of pages
    pub total_pages: usize,
    /// This page's number
    pub current_page: usize,
}

/// A customer together with their orders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerProfile {
    /// The customer
    pub customer: Customer,
    /// Their orders, newest first
    pub orders: Vec<Order>,
}

/// Order and customer records on disk
pub struct OrderStore {
    orders: JsonlFile<Order>,
    customers: JsonlFile<Customer>,
}

impl OrderStore {
    /// Open the store in `data_dir`, creating the directory if needed
    pub fn open<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let data_dir = data_dir.as_ref();
        fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

        Ok(Self {
            orders: JsonlFile::new(data_dir.join("orders.jsonl")),
            customers: JsonlFile::new(data_dir.join("customers.jsonl")),
        })
    }

    /// Validate and store a new order, creating or updating its customer.
    ///
    /// The customer record is written before the order is appended. A
    /// failed customer write stores nothing; a failed order append leaves
    /// at most an unknown id in the customer's `orders`.
    pub fn submit_order(&self, submission: OrderSubmission) -> Result<Order> {
        self.submit_order_at(submission, Utc::now())
    }

    /// [`Self::submit_order`] with an explicit timestamp
    pub fn submit_order_at(&self, submission: OrderSubmission, now: DateTime<Utc>) -> Result<Order> {
        let missing = submission.missing_fields();
        if !missing.is_empty() {
            bail!("Missing required fields: {}", missing.join(", "));
        }
        let missing = submission.address.missing_fields();
        if !missing.is_empty() {
            bail!("Missing required address fields: {}", missing.join(", "));
        }

        let phone = submission.phone.trim().to_string();
        let full_name = submission.full_name.trim().to_string();
        let address = submission.address.normalized();

        let mut customers = self.customers.read_all()?;
        let idx = match customers.iter().position(|c| c.phone == phone) {
            Some(idx) => idx,
            None => {
                customers.push(Customer {
                    customer_id: None,
                    phone: phone.clone(),
                    name: full_name.clone(),
                    age: 0,
                    last_period_date: None,
                    average_cycle_length: None,
                    addresses: Vec::new(),
                    orders: Vec::new(),
                    created_at: now,
                    updated_at: now,
                });
                customers.len() - 1
            }
        };

        // Legacy customers without an id get one on their next order
        let customer_id = match customers[idx].customer_id.clone() {
            Some(id) => id,
            None => {
                let id = next_customer_id(customers.iter().filter_map(|c| c.customer_id.as_deref()));
                customers[idx].customer_id = Some(id.clone());
                id
            }
        };

        let existing_orders = self.orders.read_all()?;
        let order_id = next_order_id(
            &customer_id,
            existing_orders.iter().map(|o| o.order_id.as_str()),
        );

        let order = Order {
            order_id: order_id.clone(),
            customer_id,
            full_name: full_name.clone(),
            phone,
            periods_started: submission.periods_started,
            cycle_length: submission.cycle_length,
            phase: submission.phase,
            total_quantity: submission.total_quantity,
            total_weight: submission.total_weight,
            total_price: submission.total_price,
            address: address.clone(),
            payment_method: submission.payment_method,
            order_status: OrderStatus::Pending,
            message: submission.message,
            order_date: now,
            updated_at: now,
        };

        let customer = &mut customers[idx];
        customer.name = full_name;
        if let Some(age) = submission.age.filter(|a| *a > 0) {
            customer.age = age;
        }
        customer.last_period_date = Some(submission.periods_started);
        customer.average_cycle_length = Some(submission.cycle_length);
        customer.addresses.push(address);
        customer.orders.push(order_id);
        customer.updated_at = now;
        self.customers.rewrite(&customers)?;

        self.orders.append(&order)?;
        Ok(order)
    }

    /// Orders matching `filter`, newest first, paginated
    pub fn list_orders(&self, filter: &OrderFilter) -> Result<OrderPage> {
        let mut matching: Vec<Order> = self
            .orders
            .read_all()?
            .into_iter()
            .filter(|o| filter.matches(o))
            .collect();
        matching.sort_by(|a, b| b.order_date.cmp(&a.order_date));

        let limit = filter.limit.max(1);
        let page = filter.page.max(1);
        let total_orders = matching.len();
        let orders = matching
            .into_iter()
            .skip((page - 1) * limit)
            .take(limit)
            .collect();

        Ok(OrderPage {
            orders,
            total_orders,
            total_pages: total_orders.div_ceil(limit),
            current_page: page,
        })
    }

    /// Every order, in insertion order
    pub fn all_orders(&self) -> Result<Vec<Order>> {
        self.orders.read_all()
    }

    /// Look up an order by id
    pub fn get_order(&self, order_id: &str) -> Result<Option<Order>> {
        Ok(self
            .orders
            .read_all()?
            .into_iter()
            .find(|o| o.order_id == order_id))
    }

    /// Set an order's status
    pub fn update_status(&self, order_id: &str, status: OrderStatus) -> Result<Order> {
        self.modify_order(order_id, |order| order.order_status = status)
    }

    /// Apply a partial edit to an order
    pub fn update_order(&self, order_id: &str, patch: OrderPatch) -> Result<Order> {
        self.modify_order(order_id, |order| patch.apply(order))
    }

    /// Delete an order and unlink it from its customer
    pub fn delete_order(&self, order_id: &str) -> Result<Order> {
        let mut orders = self.orders.read_all()?;
        let Some(idx) = orders.iter().position(|o| o.order_id == order_id) else {
            bail!("Order '{order_id}' not found");
        };
        let removed = orders.remove(idx);
        self.orders.rewrite(&orders)?;

        let mut customers = self.customers.read_all()?;
        let mut unlinked = false;
        for customer in &mut customers {
            let before = customer.orders.len();
            customer.orders.retain(|id| id != order_id);
            unlinked |= customer.orders.len() != before;
        }
        if unlinked {
            self.customers.rewrite(&customers)?;
        }

        Ok(removed)
    }

    fn modify_order<F>(&self, order_id: &str, edit: F) -> Result<Order>
    where
        F: FnOnce(&mut Order),
    {
        let mut orders = self.orders.read_all()?;
        let Some(order) = orders.iter_mut().find(|o| o.order_id == order_id) else {
            bail!("Order '{order_id}' not found");
        };
        edit(order);
        order.updated_at = Utc::now();
        let updated = order.clone();
        self.orders.rewrite(&orders)?;
        Ok(updated)
    }

    /// Look up a customer by phone
    pub fn find_customer(&self, phone: &str) -> Result<Option<Customer>> {
        let phone = phone.trim();
        Ok(self
            .customers
            .read_all()?
            .into_iter()
            .find(|c| c.phone == phone))
    }

    /// Create a customer, or update name and age of an existing one
    pub fn upsert_customer(&self, phone: &str, name: &str, age: u32) -> Result<Customer> {
        let phone = phone.trim();
        let name = name.trim();
        if phone.is_empty() || name.is_empty() || age == 0 {
            bail!("Phone, name and age are required");
        }

        let now = Utc::now();
        let mut customers = self.customers.read_all()?;
        let customer = if let Some(idx) = customers.iter().position(|c| c.phone == phone) {
            let existing = &mut customers[idx];
            existing.name = name.to_string();
            existing.age = age;
            existing.updated_at = now;
            existing.clone()
        } else {
            let id = next_customer_id(customers.iter().filter_map(|c| c.customer_id.as_deref()));
            let customer = Customer {
                customer_id: Some(id),
                phone: phone.to_string(),
                name: name.to_string(),
                age,
                last_period_date: None,
                average_cycle_length: None,
                addresses: Vec::new(),
                orders: Vec::new(),
                created_at: now,
                updated_at: now,
            };
            customers.push(customer.clone());
            customer
        };
        self.customers.rewrite(&customers)?;
        Ok(customer)
    }

    /// Every customer, newest first
    pub fn list_customers(&self) -> Result<Vec<Customer>> {
        let mut customers = self.customers.read_all()?;
        customers.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(customers)
    }

    /// A customer and their orders, by phone
    pub fn customer_profile(&self, phone: &str) -> Result<Option<CustomerProfile>> {
        let Some(customer) = self.find_customer(phone)? else {
            return Ok(None);
        };
        let mut orders: Vec<Order> = self
            .orders
            .read_all()?
            .into_iter()
            .filter(|o| o.phone == customer.phone)
            .collect();
        orders.sort_by(|a, b| b.order_date.cmp(&a.order_date));
        Ok(Some(CustomerProfile { customer, orders }))
    }

    /// Apply a partial edit to a customer
    pub fn update_customer(&self, customer_id: &str, patch: CustomerPatch) -> Result<Customer> {
        let mut customers = self.customers.read_all()?;
        let Some(customer) = customers
            .iter_mut()
            .find(|c| c.customer_id.as_deref() == Some(customer_id))
        else {
            bail!("Customer '{customer_id}' not found");
        };
        patch.apply(customer);
        customer.updated_at = Utc::now();
        let updated = customer.clone();
        self.customers.rewrite(&customers)?;
        Ok(updated)
    }

    /// Delete a customer. Their orders are kept.
    pub fn delete_customer(&self, customer_id: &str) -> Result<Customer> {
        let mut customers = self.customers.read_all()?;
        let Some(idx) = customers
            .iter()
            .position(|c| c.customer_id.as_deref() == Some(customer_id))
        else {
            bail!("Customer '{customer_id}' not found");
        };
        let removed = customers.remove(idx);
        self.customers.rewrite(&customers)?;
        Ok(removed)
    }
}
