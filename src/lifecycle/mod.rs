//! # Lifecycle
//!
//! Start-up and shutdown of the webhook process.
//!
//! - [`AppConfig`] reads the environment once at start-up.
//! - [`setup_tracing`] installs the log subscriber.
//! - [`OrderBot`] spawns the session actor, wires it to the order repository and the
//!   dispatcher, and stops it again.
//!
//! ## Graceful Shutdown
//!
//! 1. The HTTP server stops accepting requests and drains the ones in flight.
//! 2. Its clone of the dispatcher is dropped with the router.
//! 3. [`OrderBot::shutdown`] drops the last session client, so the actor's `recv()` returns
//!    `None` and the actor logs its final state and exits.
//! 4. The actor task is awaited; a panic inside it is reported as a [`ShutdownError`].
//!
//! Open orders are held in memory only and are lost on shutdown.

pub mod config;
pub mod order_bot;
pub mod tracing;

pub use config::*;
pub use order_bot::*;
pub use self::tracing::*;
