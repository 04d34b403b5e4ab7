//! # Order Session Actor
//!
//! Keeps each conversation's [`InProgressOrder`] in a [`SessionActor`], keyed by
//! [`SessionId`](crate::model::SessionId).
//!
//! ## Structure
//!
//! - [`entity`] - [`SessionEntity`](session_actor::SessionEntity) implementation for [`InProgressOrder`]
//! - [`actions`] - [`OrderAction`] and [`OrderActionResult`]
//! - [`error`] - [`SessionError`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use order_webhook::clients::OrderSessionClient;
//! use order_webhook::model::{InProgressOrder, SessionId};
//! use order_webhook::order_session;
//! use session_actor::SessionConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, generic_client) = order_session::new(SessionConfig::default());
//!     let client = OrderSessionClient::new(generic_client);
//!     tokio::spawn(actor.run(()));
//!
//!     let session = SessionId::new("S1").unwrap();
//!     let lines: InProgressOrder = [("pizza".to_string(), 2)].into_iter().collect();
//!     let order = client.add_items(session, lines).await?;
//!     assert_eq!(order.to_string(), "2 pizza");
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::InProgressOrder;
use session_actor::{SessionActor, SessionClient, SessionConfig};

/// Creates a new order session actor and its client.
pub fn new(config: SessionConfig) -> (SessionActor<InProgressOrder>, SessionClient<InProgressOrder>) {
    SessionActor::new(config)
}
