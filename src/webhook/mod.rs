//! # Webhook
//!
//! Decoding of the dialogue platform's request and routing to the [`OrderEngine`](crate::engine::OrderEngine).
//!
//! - [`request`] - envelope and typed parameter access
//! - [`intent`] - the closed set of intents
//! - [`dispatcher`] - routing and the error-to-reply boundary
//! - [`http`] - the axum router serving `POST /`

pub mod dispatcher;
pub mod http;
pub mod intent;
pub mod request;

pub use dispatcher::{DispatchError, Dispatcher};
pub use http::router;
pub use intent::{Intent, UnknownIntent};
pub use request::{ParameterError, Parameters, WebhookRequest};
