//! # Order Session Client
//!
//! A high-level API over the order session actor. It wraps a
//! `SessionClient<InProgressOrder>` and speaks in orders and sessions instead of messages.
use crate::model::{InProgressOrder, RemovalOutcome, SessionId};
use crate::order_session::{OrderAction, OrderActionResult, SessionError};
use async_trait::async_trait;
use session_actor::{FrameworkError, SessionClient, SessionStoreClient};
use tracing::{debug, instrument};

/// Client for the in-progress orders of all sessions.
#[derive(Clone)]
pub struct OrderSessionClient {
    inner: SessionClient<InProgressOrder>,
}

impl OrderSessionClient {
    pub fn new(inner: SessionClient<InProgressOrder>) -> Self {
        Self { inner }
    }

    /// Overlays `lines` onto the session's order, opening the order if needed.
    ///
    /// Returns the order as it stands afterwards.
    #[instrument(skip(self))]
    pub async fn add_items(
        &self,
        session: SessionId,
        lines: InProgressOrder,
    ) -> Result<InProgressOrder, SessionError> {
        debug!("Sending request");
        match self
            .inner
            .upsert(session, OrderAction::Merge(lines))
            .await
            .map_err(Self::map_error)?
        {
            OrderActionResult::Merge(order) => Ok(order),
            other => Err(SessionError::UnexpectedReply(format!("{:?}", other))),
        }
    }

    /// Deletes `items` from the session's order.
    ///
    /// Returns `None` when the session has no order. An order emptied by this call stays
    /// in the store.
    #[instrument(skip(self))]
    pub async fn remove_items(
        &self,
        session: SessionId,
        items: Vec<String>,
    ) -> Result<Option<RemovalOutcome>, SessionError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(session, OrderAction::Remove(items))
            .await
        {
            Ok(OrderActionResult::Remove(outcome)) => Ok(Some(outcome)),
            Ok(other) => Err(SessionError::UnexpectedReply(format!("{:?}", other))),
            Err(FrameworkError::NotFound(_)) => Ok(None),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Takes the session's order out of the store. The session has no order afterwards.
    #[instrument(skip(self))]
    pub async fn take_order(&self, session: SessionId) -> Result<Option<InProgressOrder>, SessionError> {
        self.discard(session).await
    }

    /// Number of sessions with an in-progress order.
    pub async fn open_sessions(&self) -> Result<usize, SessionError> {
        self.inner.len().await.map_err(Self::map_error)
    }
}

#[async_trait]
impl SessionStoreClient<InProgressOrder> for OrderSessionClient {
    type Error = SessionError;

    fn inner(&self) -> &SessionClient<InProgressOrder> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        SessionError::Unavailable(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use session_actor::mock::{create_mock_client, expect_action, expect_upsert, MockClient};

    fn session() -> SessionId {
        SessionId::new("S1").unwrap()
    }

    fn order(pairs: &[(&str, u32)]) -> InProgressOrder {
        pairs.iter().map(|(item, qty)| (item.to_string(), *qty)).collect()
    }

    #[tokio::test]
    async fn test_add_items_sends_merge_upsert() {
        let (client, mut receiver) = create_mock_client::<InProgressOrder>(10);
        let orders = OrderSessionClient::new(client);

        let task = tokio::spawn(async move { orders.add_items(session(), order(&[("pizza", 2)])).await });

        let (key, action, responder) = expect_upsert(&mut receiver)
            .await
            .expect("Expected Upsert request");
        assert_eq!(key, session());
        assert!(matches!(action, OrderAction::Merge(ref lines) if *lines == order(&[("pizza", 2)])));
        responder
            .send(Ok(OrderActionResult::Merge(order(&[("soda", 1), ("pizza", 2)]))))
            .unwrap();

        assert_eq!(task.await.unwrap().unwrap(), order(&[("soda", 1), ("pizza", 2)]));
    }

    #[tokio::test]
    async fn test_remove_items_maps_missing_session_to_none() {
        let (client, mut receiver) = create_mock_client::<InProgressOrder>(10);
        let orders = OrderSessionClient::new(client);

        let task = tokio::spawn(async move { orders.remove_items(session(), vec!["pizza".into()]).await });

        let (_, _, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        responder
            .send(Err(FrameworkError::NotFound("S1".to_string())))
            .unwrap();

        assert_eq!(task.await.unwrap(), Ok(None));
    }

    #[tokio::test]
    async fn test_unavailable_store_is_an_error() {
        let mut mock = MockClient::<InProgressOrder>::new();
        mock.expect_delete(session()).return_err(FrameworkError::ActorClosed);
        let orders = OrderSessionClient::new(mock.client());

        let result = orders.take_order(session()).await;

        assert!(matches!(result, Err(SessionError::Unavailable(_))));
        mock.verify();
    }
}
