//! Order status lookup. Works from the order id alone; the session plays no part.

use super::messages::{self, STATUS_LOOKUP_FAILED};
use super::OrderEngine;
use crate::model::{Fulfillment, OrderId};
use tracing::{debug, error};

impl OrderEngine {
    /// Replies with the status of a placed order. Repository faults become a 500 reply.
    pub async fn track_order(&self, order_id: OrderId) -> Fulfillment {
        match self.repository.get_order_status(order_id).await {
            Ok(Some(status)) => {
                debug!(%order_id, %status, "Order status found");
                Fulfillment::ok(messages::order_status(order_id, &status))
            }
            Ok(None) => Fulfillment::ok(messages::no_such_order(order_id)),
            Err(e) => {
                error!(%order_id, error = %e, "Error fetching order status");
                Fulfillment::internal_error(STATUS_LOOKUP_FAILED)
            }
        }
    }
}
