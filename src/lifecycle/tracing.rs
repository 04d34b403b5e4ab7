//! # Logging
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by `RUST_LOG`.
//! Module paths are hidden (`with_target(false)`); every log line carries structured fields
//! such as `session` and `order_id` instead.
//!
//! ```bash
//! RUST_LOG=info cargo run     # one line per request plus order changes
//! RUST_LOG=debug cargo run    # session actor traffic and repository writes
//! RUST_LOG=order_webhook=debug,session_actor=info cargo run
//! ```
//!
//! With `RUST_LOG=info`, adding to an order and placing it looks like:
//!
//! ```text
//! INFO Received request intent="order.add - context: ongoing-order" session="S123"
//! INFO Order updated session=S123 order=2 pizza, 1 mango lassi
//! INFO Received request intent="order.complete - context: ongoing-order" session="S123"
//! INFO complete_order: Order placed order_id=1 total=21.0
//! ```
//!
//! Nothing is logged unless `RUST_LOG` is set.

pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
