//! Placing the in-progress order.
//!
//! The order leaves the session store before anything is written, so a session is closed by
//! `order.complete` whatever happens next. Writing is all-or-nothing from the customer's
//! point of view: if any line or the tracking record fails, the lines already written for the
//! new order id are deleted again and the customer is asked to start over.

use super::messages::{self, BACKEND_ERROR, ORDER_NOT_FOUND};
use super::{EngineError, OrderEngine};
use crate::model::{Fulfillment, InProgressOrder, OrderId, SessionId};
use crate::persistence::{RepositoryError, STATUS_IN_PROGRESS};
use tracing::{error, info, instrument, warn};

impl OrderEngine {
    /// Persists the session's order and replies with its id and total.
    #[instrument(skip(self))]
    pub async fn complete_order(&self, session: Option<SessionId>) -> Result<Fulfillment, EngineError> {
        let Some(session) = session else {
            return Ok(Fulfillment::ok(ORDER_NOT_FOUND));
        };
        let Some(order) = self.sessions.take_order(session).await? else {
            return Ok(Fulfillment::ok(ORDER_NOT_FOUND));
        };
        let order_id = match self.save_order(&order).await {
            Ok(order_id) => order_id,
            Err(e) => {
                warn!(error = %e, "Order could not be placed");
                return Ok(Fulfillment::internal_error(BACKEND_ERROR));
            }
        };

        let total = self.repository.get_total_order_price(order_id).await?;
        info!(%order_id, total, "Order placed");
        Ok(Fulfillment::ok(messages::order_placed(order_id, total)))
    }

    async fn save_order(&self, order: &InProgressOrder) -> Result<OrderId, RepositoryError> {
        let order_id = self.repository.allocate_next_order_id().await?;

        for (item, quantity) in order.iter() {
            if let Err(e) = self.repository.insert_order_item(order_id, item, quantity).await {
                self.roll_back(order_id).await;
                return Err(e);
            }
        }
        if let Err(e) = self
            .repository
            .insert_order_tracking(order_id, STATUS_IN_PROGRESS)
            .await
        {
            self.roll_back(order_id).await;
            return Err(e);
        }

        Ok(order_id)
    }

    async fn roll_back(&self, order_id: OrderId) {
        match self.repository.remove_order_items(order_id).await {
            Ok(removed) => info!(%order_id, removed, "Rolled back partial order"),
            Err(e) => error!(%order_id, error = %e, "Rollback failed, order lines may be orphaned"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::OrderSessionClient;
    use crate::model::FulfillmentStatus;
    use crate::order_session;
    use crate::persistence::{InMemoryOrderRepository, Menu, OrderRepository};
    use async_trait::async_trait;
    use session_actor::SessionConfig;
    use std::sync::Arc;

    /// Delegates to the in-memory repository, failing where told to.
    #[derive(Default)]
    struct FlakyRepository {
        inner: InMemoryOrderRepository,
        fail_item: Option<&'static str>,
        fail_tracking: bool,
        fail_total: bool,
    }

    #[async_trait]
    impl OrderRepository for FlakyRepository {
        async fn allocate_next_order_id(&self) -> Result<OrderId, RepositoryError> {
            self.inner.allocate_next_order_id().await
        }

        async fn insert_order_item(&self, order_id: OrderId, item: &str, quantity: u32) -> Result<(), RepositoryError> {
            if self.fail_item.is_some_and(|fail| fail == item) {
                return Err(RepositoryError::Unavailable("connection reset".to_string()));
            }
            self.inner.insert_order_item(order_id, item, quantity).await
        }

        async fn remove_order_items(&self, order_id: OrderId) -> Result<u64, RepositoryError> {
            self.inner.remove_order_items(order_id).await
        }

        async fn insert_order_tracking(&self, order_id: OrderId, status: &str) -> Result<(), RepositoryError> {
            if self.fail_tracking {
                return Err(RepositoryError::Unavailable("connection reset".to_string()));
            }
            self.inner.insert_order_tracking(order_id, status).await
        }

        async fn get_order_status(&self, order_id: OrderId) -> Result<Option<String>, RepositoryError> {
            self.inner.get_order_status(order_id).await
        }

        async fn get_total_order_price(&self, order_id: OrderId) -> Result<f64, RepositoryError> {
            if self.fail_total {
                return Err(RepositoryError::Unavailable("connection reset".to_string()));
            }
            self.inner.get_total_order_price(order_id).await
        }
    }

    fn engine_with(repository: Arc<dyn OrderRepository>) -> OrderEngine {
        let (actor, client) = order_session::new(SessionConfig::default());
        tokio::spawn(actor.run(()));
        OrderEngine::new(OrderSessionClient::new(client), repository)
    }

    fn session() -> Option<SessionId> {
        SessionId::new("S1")
    }

    async fn add(engine: &OrderEngine, pairs: &[(&str, u32)]) {
        let items = pairs.iter().map(|(i, _)| i.to_string()).collect();
        let quantities = pairs.iter().map(|(_, q)| *q).collect();
        engine.add_to_order(session(), items, quantities).await.unwrap();
    }

    #[tokio::test]
    async fn test_complete_persists_lines_and_tracking() {
        let repository = Arc::new(InMemoryOrderRepository::new(Menu::new([("pizza", 8.0), ("soda", 1.5)])));
        let engine = engine_with(repository.clone());
        add(&engine, &[("pizza", 2), ("soda", 3)]).await;

        let reply = engine.complete_order(session()).await.unwrap();

        assert_eq!(
            reply.text,
            "Awesome. We have placed your order. Here is your order id # 1. \
             Your order total is 20.50 which you can pay at the time of delivery!"
        );
        assert_eq!(repository.order_lines(OrderId(1)).await.len(), 2);
        assert_eq!(
            repository.get_order_status(OrderId(1)).await.unwrap(),
            Some(STATUS_IN_PROGRESS.to_string())
        );
        assert_eq!(engine.sessions().open_sessions().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_second_complete_finds_no_order() {
        let engine = engine_with(Arc::new(InMemoryOrderRepository::default()));
        add(&engine, &[("pizza", 1)]).await;

        engine.complete_order(session()).await.unwrap();
        let reply = engine.complete_order(session()).await.unwrap();

        assert_eq!(reply, Fulfillment::ok(ORDER_NOT_FOUND));
    }

    #[tokio::test]
    async fn test_failed_line_rolls_back_and_closes_session() {
        let repository = Arc::new(FlakyRepository {
            fail_item: Some("samosa"),
            ..Default::default()
        });
        let engine = engine_with(repository.clone());
        add(&engine, &[("pizza", 2), ("samosa", 1), ("biryani", 1)]).await;

        let reply = engine.complete_order(session()).await.unwrap();

        assert_eq!(reply, Fulfillment::internal_error(BACKEND_ERROR));
        assert_eq!(reply.status.code(), 500);
        assert_eq!(repository.inner.line_count().await, 0);
        assert_eq!(repository.inner.tracking_count().await, 0);
        assert_eq!(engine.sessions().open_sessions().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unknown_item_is_a_backend_error() {
        let repository = Arc::new(InMemoryOrderRepository::new(Menu::new([("pizza", 8.0)])));
        let engine = engine_with(repository.clone());
        add(&engine, &[("pizza", 1), ("unicorn steak", 1)]).await;

        let reply = engine.complete_order(session()).await.unwrap();

        assert_eq!(reply.status, FulfillmentStatus::InternalError);
        assert_eq!(repository.line_count().await, 0);
    }

    #[tokio::test]
    async fn test_failed_tracking_rolls_back_lines() {
        let repository = Arc::new(FlakyRepository {
            fail_tracking: true,
            ..Default::default()
        });
        let engine = engine_with(repository.clone());
        add(&engine, &[("pizza", 2)]).await;

        let reply = engine.complete_order(session()).await.unwrap();

        assert_eq!(reply, Fulfillment::internal_error(BACKEND_ERROR));
        assert_eq!(repository.inner.line_count().await, 0);
    }

    #[tokio::test]
    async fn test_total_fault_after_save_escapes() {
        let repository = Arc::new(FlakyRepository {
            fail_total: true,
            ..Default::default()
        });
        let engine = engine_with(repository.clone());
        add(&engine, &[("pizza", 2)]).await;

        let result = engine.complete_order(session()).await;

        assert!(matches!(result, Err(EngineError::Repository(RepositoryError::Unavailable(_)))));
        assert_eq!(repository.inner.line_count().await, 1);
    }

    #[tokio::test]
    async fn test_emptied_order_is_placed_with_zero_total() {
        let repository = Arc::new(InMemoryOrderRepository::default());
        let engine = engine_with(repository.clone());
        add(&engine, &[("pizza", 1)]).await;
        engine
            .remove_from_order(session(), vec!["pizza".to_string()])
            .await
            .unwrap();

        let reply = engine.complete_order(session()).await.unwrap();

        assert_eq!(
            reply,
            Fulfillment::ok(
                "Awesome. We have placed your order. Here is your order id # 1. \
                 Your order total is 0.00 which you can pay at the time of delivery!"
            )
        );
        assert_eq!(repository.line_count().await, 0);
        assert_eq!(
            repository.get_order_status(OrderId(1)).await.unwrap(),
            Some(STATUS_IN_PROGRESS.to_string())
        );
        assert_eq!(engine.sessions().open_sessions().await.unwrap(), 0);
    }
}
