//! Adding to and removing from the in-progress order.

use super::messages::{self, CLARIFY_ITEMS, ORDER_NOT_FOUND};
use super::{EngineError, OrderEngine};
use crate::model::{Fulfillment, InProgressOrder, SessionId};
use tracing::{debug, info};

impl OrderEngine {
    /// Overlays the given items onto the session's order and reads the result back.
    ///
    /// `items` and `quantities` pair up by position; when their lengths differ the customer
    /// is asked to repeat and nothing changes.
    pub async fn add_to_order(
        &self,
        session: Option<SessionId>,
        items: Vec<String>,
        quantities: Vec<u32>,
    ) -> Result<Fulfillment, EngineError> {
        if items.len() != quantities.len() {
            debug!(items = items.len(), quantities = quantities.len(), "Item and quantity counts differ");
            return Ok(Fulfillment::ok(CLARIFY_ITEMS));
        }
        let Some(session) = session else {
            return Ok(Fulfillment::ok(ORDER_NOT_FOUND));
        };

        let lines: InProgressOrder = items.into_iter().zip(quantities).collect();
        let order = self.sessions.add_items(session.clone(), lines).await?;
        info!(%session, order = %order, "Order updated");

        Ok(Fulfillment::ok(messages::order_so_far(&order)))
    }

    /// Deletes the named items from the session's order.
    ///
    /// An order left empty stays open, so the customer can keep adding to it.
    pub async fn remove_from_order(
        &self,
        session: Option<SessionId>,
        items: Vec<String>,
    ) -> Result<Fulfillment, EngineError> {
        let Some(session) = session else {
            return Ok(Fulfillment::ok(ORDER_NOT_FOUND));
        };

        match self.sessions.remove_items(session.clone(), items).await? {
            Some(outcome) => {
                info!(%session, removed = ?outcome.removed, missing = ?outcome.missing, "Items removed");
                Ok(Fulfillment::ok(messages::removal(&outcome)))
            }
            None => {
                debug!(%session, "No order to remove from");
                Ok(Fulfillment::ok(ORDER_NOT_FOUND))
            }
        }
    }
}
