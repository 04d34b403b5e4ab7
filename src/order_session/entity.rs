//! [`SessionEntity`] implementation for [`InProgressOrder`].

use super::actions::{OrderAction, OrderActionResult};
use super::error::SessionError;
use crate::model::{InProgressOrder, RemovalOutcome, SessionId};
use async_trait::async_trait;
use session_actor::SessionEntity;
use tracing::debug;

#[async_trait]
impl SessionEntity for InProgressOrder {
    type Key = SessionId;
    type Action = OrderAction;
    type ActionResult = OrderActionResult;
    type Context = ();
    type Error = SessionError;

    async fn on_close(&self, key: &SessionId, _ctx: &()) -> Result<(), Self::Error> {
        debug!(session = %key, lines = self.len(), "Closing in-progress order");
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        _ctx: &(),
    ) -> Result<OrderActionResult, Self::Error> {
        match action {
            OrderAction::Merge(additions) => {
                self.merge(additions);
                Ok(OrderActionResult::Merge(self.clone()))
            }
            OrderAction::Remove(items) => {
                let mut removed = Vec::new();
                let mut missing = Vec::new();
                for item in items {
                    if self.remove(&item) {
                        removed.push(item);
                    } else {
                        missing.push(item);
                    }
                }
                Ok(OrderActionResult::Remove(RemovalOutcome {
                    removed,
                    missing,
                    remaining: self.clone(),
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(pairs: &[(&str, u32)]) -> InProgressOrder {
        pairs.iter().map(|(item, qty)| (item.to_string(), *qty)).collect()
    }

    #[tokio::test]
    async fn test_remove_splits_present_and_missing() {
        let mut o = order(&[("pizza", 2), ("soda", 1)]);

        let result = o
            .handle_action(
                OrderAction::Remove(vec!["soda".into(), "lassi".into(), "soda".into()]),
                &(),
            )
            .await
            .unwrap();

        let OrderActionResult::Remove(outcome) = result else {
            panic!("Expected Remove result");
        };
        assert_eq!(outcome.removed, vec!["soda".to_string()]);
        assert_eq!(outcome.missing, vec!["lassi".to_string(), "soda".to_string()]);
        assert_eq!(outcome.remaining, order(&[("pizza", 2)]));
    }

    #[tokio::test]
    async fn test_merge_returns_snapshot() {
        let mut o = order(&[("pizza", 2)]);

        let result = o
            .handle_action(OrderAction::Merge(order(&[("pizza", 3), ("soda", 1)])), &())
            .await
            .unwrap();

        assert!(matches!(result, OrderActionResult::Merge(snapshot) if snapshot == order(&[("pizza", 3), ("soda", 1)])));
    }
}
