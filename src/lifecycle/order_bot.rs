use crate::clients::OrderSessionClient;
use crate::engine::OrderEngine;
use crate::order_session;
use crate::persistence::OrderRepository;
use crate::webhook::Dispatcher;
use session_actor::SessionConfig;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
#[error("Session actor task failed: {0}")]
pub struct ShutdownError(#[from] tokio::task::JoinError);

/// The running webhook: the session actor plus everything wired to it.
///
/// `OrderBot` is responsible for:
/// - **Lifecycle Management**: starting the session actor and stopping it on shutdown
/// - **Dependency Wiring**: handing the session client and the order repository to the
///   [`OrderEngine`] behind the [`Dispatcher`]
///
/// # Example
///
/// ```rust
/// use order_webhook::lifecycle::OrderBot;
/// use order_webhook::persistence::InMemoryOrderRepository;
/// use session_actor::SessionConfig;
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() {
///     let bot = OrderBot::start(SessionConfig::default(), Arc::new(InMemoryOrderRepository::default()));
///
///     let reply = bot.dispatcher().handle(br#"{"queryResult": {}}"#).await;
///     assert_eq!(reply.status.code(), 400);
///
///     bot.shutdown().await.unwrap();
/// }
/// ```
pub struct OrderBot {
    dispatcher: Dispatcher,
    handle: tokio::task::JoinHandle<()>,
}

impl OrderBot {
    /// Spawns the session actor and wires the dispatcher to it. Must be called inside a
    /// Tokio runtime.
    pub fn start(config: SessionConfig, repository: Arc<dyn OrderRepository>) -> Self {
        info!(?config, "Starting order bot");
        let (actor, client) = order_session::new(config);
        let handle = tokio::spawn(actor.run(()));

        let engine = OrderEngine::new(OrderSessionClient::new(client), repository);

        Self {
            dispatcher: Dispatcher::new(engine),
            handle,
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Stops the session actor and waits for it to exit.
    ///
    /// Dropping the dispatcher drops the last session client this struct owns, which closes
    /// the actor's channel. Clones of the dispatcher still held elsewhere (for example by
    /// the HTTP server) must be dropped first or this waits for them.
    pub async fn shutdown(self) -> Result<(), ShutdownError> {
        info!("Shutting down order bot...");
        drop(self.dispatcher);

        if let Err(e) = self.handle.await {
            error!(error = ?e, "Session actor task failed");
            return Err(e.into());
        }

        info!("Order bot shutdown complete.");
        Ok(())
    }
}
