//! In-memory order repository.
//!
//! Keeps order lines and tracking records in process memory behind a `tokio::sync::RwLock`.
//! Suitable for development, tests and single-instance demos; nothing survives a restart.

use super::{Menu, OrderRepository, RepositoryError};
use crate::model::OrderId;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// One persisted line of a placed order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    pub order_id: OrderId,
    pub item: String,
    pub quantity: u32,
    pub total_price: f64,
}

#[derive(Debug, Default)]
struct Ledger {
    lines: Vec<OrderLine>,
    tracking: HashMap<OrderId, String>,
}

/// Order repository backed by process memory and priced from a [`Menu`].
#[derive(Debug, Clone)]
pub struct InMemoryOrderRepository {
    ledger: Arc<RwLock<Ledger>>,
    next_order_id: Arc<AtomicI64>,
    menu: Arc<Menu>,
}

impl Default for InMemoryOrderRepository {
    fn default() -> Self {
        Self::new(Menu::default())
    }
}

impl InMemoryOrderRepository {
    pub fn new(menu: Menu) -> Self {
        Self {
            ledger: Arc::new(RwLock::new(Ledger::default())),
            next_order_id: Arc::new(AtomicI64::new(1)),
            menu: Arc::new(menu),
        }
    }

    /// Moves an order to a new status, as a fulfillment process would.
    pub async fn set_order_status(
        &self,
        order_id: OrderId,
        status: impl Into<String>,
    ) -> Result<(), RepositoryError> {
        let mut ledger = self.ledger.write().await;
        match ledger.tracking.get_mut(&order_id) {
            Some(current) => {
                *current = status.into();
                info!(%order_id, status = %current, "Order status changed");
                Ok(())
            }
            None => Err(RepositoryError::OrderNotFound(order_id)),
        }
    }

    /// Lines written for an order, in insertion order.
    pub async fn order_lines(&self, order_id: OrderId) -> Vec<OrderLine> {
        let ledger = self.ledger.read().await;
        ledger
            .lines
            .iter()
            .filter(|line| line.order_id == order_id)
            .cloned()
            .collect()
    }

    /// Total number of lines across all orders.
    pub async fn line_count(&self) -> usize {
        self.ledger.read().await.lines.len()
    }

    /// Number of tracking records.
    pub async fn tracking_count(&self) -> usize {
        self.ledger.read().await.tracking.len()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn allocate_next_order_id(&self) -> Result<OrderId, RepositoryError> {
        let id = OrderId(self.next_order_id.fetch_add(1, Ordering::SeqCst));
        debug!(order_id = %id, "Allocated order id");
        Ok(id)
    }

    async fn insert_order_item(
        &self,
        order_id: OrderId,
        item: &str,
        quantity: u32,
    ) -> Result<(), RepositoryError> {
        let price = self
            .menu
            .price_of(item)
            .ok_or_else(|| RepositoryError::UnknownItem(item.to_string()))?;

        let mut ledger = self.ledger.write().await;
        ledger.lines.push(OrderLine {
            order_id,
            item: item.to_string(),
            quantity,
            total_price: price * f64::from(quantity),
        });
        debug!(%order_id, item, quantity, "Inserted order line");
        Ok(())
    }

    async fn remove_order_items(&self, order_id: OrderId) -> Result<u64, RepositoryError> {
        let mut ledger = self.ledger.write().await;
        let before = ledger.lines.len();
        ledger.lines.retain(|line| line.order_id != order_id);
        let removed = (before - ledger.lines.len()) as u64;
        info!(%order_id, removed, "Removed order lines");
        Ok(removed)
    }

    async fn insert_order_tracking(&self, order_id: OrderId, status: &str) -> Result<(), RepositoryError> {
        let mut ledger = self.ledger.write().await;
        ledger.tracking.insert(order_id, status.to_string());
        debug!(%order_id, status, "Inserted order tracking");
        Ok(())
    }

    async fn get_order_status(&self, order_id: OrderId) -> Result<Option<String>, RepositoryError> {
        Ok(self.ledger.read().await.tracking.get(&order_id).cloned())
    }

    async fn get_total_order_price(&self, order_id: OrderId) -> Result<f64, RepositoryError> {
        let ledger = self.ledger.read().await;
        let mut lines = ledger.lines.iter().filter(|line| line.order_id == order_id).peekable();
        if lines.peek().is_none() {
            // A placed order with no lines is worth nothing; an unknown order has no total.
            return if ledger.tracking.contains_key(&order_id) {
                Ok(0.0)
            } else {
                Err(RepositoryError::OrderNotFound(order_id))
            };
        }
        Ok(lines.map(|line| line.total_price).sum())
    }
}
