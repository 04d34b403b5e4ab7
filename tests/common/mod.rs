#![allow(dead_code)]

use async_trait::async_trait;
use order_webhook::model::OrderId;
use order_webhook::persistence::{InMemoryOrderRepository, OrderRepository, RepositoryError};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};

pub const ADD: &str = "order.add - context: ongoing-order";
pub const REMOVE: &str = "order.remove - context: ongoing-order";
pub const COMPLETE: &str = "order.complete - context: ongoing-order";
pub const TRACK: &str = "track.order - context: ongoing-tracking";

pub fn session_path(id: &str) -> String {
    format!("projects/eatery/agent/sessions/{}/contexts/ongoing-order", id)
}

pub fn payload(intent: &str, session: &str, parameters: Value) -> Vec<u8> {
    json!({
        "session": session_path(session),
        "queryResult": {
            "intent": { "displayName": intent },
            "parameters": parameters,
        }
    })
    .to_string()
    .into_bytes()
}

/// In-memory repository that counts every call made to it.
#[derive(Default)]
pub struct CountingRepository {
    pub inner: InMemoryOrderRepository,
    calls: AtomicUsize,
}

impl CountingRepository {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn count(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl OrderRepository for CountingRepository {
    async fn allocate_next_order_id(&self) -> Result<OrderId, RepositoryError> {
        self.count();
        self.inner.allocate_next_order_id().await
    }

    async fn insert_order_item(
        &self,
        order_id: OrderId,
        item: &str,
        quantity: u32,
    ) -> Result<(), RepositoryError> {
        self.count();
        self.inner.insert_order_item(order_id, item, quantity).await
    }

    async fn remove_order_items(&self, order_id: OrderId) -> Result<u64, RepositoryError> {
        self.count();
        self.inner.remove_order_items(order_id).await
    }

    async fn insert_order_tracking(&self, order_id: OrderId, status: &str) -> Result<(), RepositoryError> {
        self.count();
        self.inner.insert_order_tracking(order_id, status).await
    }

    async fn get_order_status(&self, order_id: OrderId) -> Result<Option<String>, RepositoryError> {
        self.count();
        self.inner.get_order_status(order_id).await
    }

    async fn get_total_order_price(&self, order_id: OrderId) -> Result<f64, RepositoryError> {
        self.count();
        self.inner.get_total_order_price(order_id).await
    }
}
