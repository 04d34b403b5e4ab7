//! Domain-specific clients that hide the session actor's message passing.

pub mod order_session_client;

pub use order_session_client::OrderSessionClient;
