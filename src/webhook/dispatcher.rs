//! Routes a webhook request to the handler for its intent.
//!
//! This is the only place where errors turn into replies: every `DispatchError` maps to a
//! 400 or a 500 [`Fulfillment`], so [`Dispatcher::handle`] never fails.

use super::intent::{Intent, UnknownIntent};
use super::request::{ParameterError, WebhookRequest};
use crate::engine::messages::{self, INTENT_NOT_RECOGNIZED, INVALID_PAYLOAD};
use crate::engine::{EngineError, OrderEngine};
use crate::model::Fulfillment;
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Invalid request payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error(transparent)]
    UnknownIntent(#[from] UnknownIntent),

    #[error(transparent)]
    Parameter(#[from] ParameterError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl DispatchError {
    fn into_fulfillment(self) -> Fulfillment {
        match self {
            DispatchError::Payload(e) => {
                warn!(error = %e, "Rejected request payload");
                Fulfillment::bad_request(INVALID_PAYLOAD)
            }
            DispatchError::UnknownIntent(e) => {
                warn!(error = %e, "Rejected request");
                Fulfillment::bad_request(INTENT_NOT_RECOGNIZED)
            }
            DispatchError::Parameter(e) => {
                warn!(error = ?e, "Rejected parameters");
                Fulfillment::bad_request(e.to_string())
            }
            DispatchError::Engine(e) => {
                error!(error = %e, chain = %error_chain(&e), "Unexpected error");
                Fulfillment::internal_error(messages::internal_error(&e))
            }
        }
    }
}

fn error_chain(e: &(dyn std::error::Error + 'static)) -> String {
    let mut chain = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        chain.push_str(": ");
        chain.push_str(&cause.to_string());
        source = cause.source();
    }
    chain
}

/// Entry point for webhook requests.
#[derive(Clone)]
pub struct Dispatcher {
    engine: OrderEngine,
}

impl Dispatcher {
    pub fn new(engine: OrderEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &OrderEngine {
        &self.engine
    }

    /// Handles a raw request body.
    pub async fn handle(&self, body: &[u8]) -> Fulfillment {
        let result = match WebhookRequest::from_slice(body) {
            Ok(request) => self.dispatch(&request).await,
            Err(e) => Err(e.into()),
        };
        result.unwrap_or_else(DispatchError::into_fulfillment)
    }

    /// Handles a decoded request.
    pub async fn dispatch(&self, request: &WebhookRequest) -> Result<Fulfillment, DispatchError> {
        let name = request.intent_name().unwrap_or_default();
        let session = request.session_id();
        info!(
            intent = name,
            session = session.as_ref().map(|s| s.as_str()).unwrap_or_default(),
            "Received request"
        );

        let intent: Intent = name.parse()?;
        let params = request.parameters();

        let reply = match intent {
            Intent::AddToOrder => {
                let items = params.food_items()?;
                let quantities = params.quantities()?;
                self.engine.add_to_order(session, items, quantities).await?
            }
            Intent::RemoveFromOrder => {
                let items = params.food_items_to_remove()?;
                self.engine.remove_from_order(session, items).await?
            }
            Intent::CompleteOrder => self.engine.complete_order(session).await?,
            Intent::TrackOrder => {
                let order_id = params.order_id()?;
                self.engine.track_order(order_id).await
            }
        };
        Ok(reply)
    }
}
