//! Orders and customers
//!
//! Record types, identifier sequences, the on-disk store and dashboard
//! statistics.

pub mod ids;
pub mod record;
pub mod store;
pub mod summary;

pub use record::{
    Address, Contact, Customer, CustomerPatch, Order, OrderPatch, OrderStatus, OrderSubmission,
    PaymentMethod,
};
pub use store::{CustomerProfile, OrderFilter, OrderPage, OrderStore};
pub use summary::DashboardStats;
