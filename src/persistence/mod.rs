//! # Order Persistence
//!
//! The order store is a collaborator: the webhook only needs the handful of operations in
//! [`OrderRepository`]. [`InMemoryOrderRepository`] is the implementation shipped with the
//! binary; a database-backed one plugs in behind the same trait.

pub mod memory;
pub mod menu;

pub use memory::*;
pub use menu::*;

use crate::model::OrderId;
use async_trait::async_trait;
use thiserror::Error;

/// Status every newly placed order starts with.
pub const STATUS_IN_PROGRESS: &str = "in progress";

/// Errors reported by an order repository.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RepositoryError {
    /// The item cannot be priced, so no line can be written for it.
    #[error("Unknown menu item: {0}")]
    UnknownItem(String),

    /// No lines exist for the order.
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    /// The backing store could not be reached or rejected the operation.
    #[error("Order store unavailable: {0}")]
    Unavailable(String),
}

/// Operations the webhook needs from the order store.
///
/// Calls are awaited once: no retries, no timeouts.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Reserves the id for the next placed order.
    async fn allocate_next_order_id(&self) -> Result<OrderId, RepositoryError>;

    /// Writes one line of an order.
    async fn insert_order_item(
        &self,
        order_id: OrderId,
        item: &str,
        quantity: u32,
    ) -> Result<(), RepositoryError>;

    /// Deletes every line written for `order_id`. Returns how many were deleted.
    async fn remove_order_items(&self, order_id: OrderId) -> Result<u64, RepositoryError>;

    /// Creates the tracking record of an order.
    async fn insert_order_tracking(&self, order_id: OrderId, status: &str) -> Result<(), RepositoryError>;

    /// Current status of an order, `None` if it has no tracking record.
    async fn get_order_status(&self, order_id: OrderId) -> Result<Option<String>, RepositoryError>;

    /// Sum of the line totals of an order.
    async fn get_total_order_price(&self, order_id: OrderId) -> Result<f64, RepositoryError>;
}
