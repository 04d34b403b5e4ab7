//! Plain data types shared by the session actor, the handlers and the webhook layer.

pub mod fulfillment;
pub mod order;
pub mod session;

pub use fulfillment::*;
pub use order::*;
pub use session::*;
