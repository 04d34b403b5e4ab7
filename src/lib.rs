//! # Order Webhook
//!
//! > **Fulfillment webhook for a food-ordering conversational agent.**
//!
//! The agent recognises what the customer wants (add items, remove items, place the order,
//! track an order) and calls this webhook with the intent name, its parameters and the
//! conversation's session path. The webhook keeps one in-progress order per session,
//! places finished orders in an order repository and replies with the text the agent says.
//!
//! ## Concurrency Model
//!
//! Requests are served concurrently, but every in-progress order lives inside a single
//! [`SessionActor`](session_actor::SessionActor) task. Adds and removes are messages that the
//! actor applies one at a time, so two requests for the same session can never overwrite
//! each other. Orders left idle are swept out after a configurable time.
//!
//! ## Module Tour
//!
//! ### 1. The Data ([`model`])
//! - [`InProgressOrder`](model::InProgressOrder): item to quantity, in insertion order.
//! - [`SessionId`](model::SessionId): extracted from `.../sessions/<id>/contexts/...`.
//! - [`Fulfillment`](model::Fulfillment): reply text plus status.
//!
//! ### 2. The Session Store ([`order_session`], [`clients`])
//! - [`order_session`] plugs [`InProgressOrder`](model::InProgressOrder) into the generic
//!   `session-actor` crate.
//! - [`OrderSessionClient`](clients::OrderSessionClient) speaks in sessions and orders.
//!
//! ### 3. The Order Store ([`persistence`])
//! - [`OrderRepository`](persistence::OrderRepository): what the webhook needs from storage.
//! - [`InMemoryOrderRepository`](persistence::InMemoryOrderRepository): the shipped
//!   implementation, priced from a [`Menu`](persistence::Menu).
//!
//! ### 4. The Behaviour ([`engine`])
//! - Add and remove, place, track. Each returns the reply for the customer.
//!
//! ### 5. The Boundary ([`webhook`], [`lifecycle`])
//! - [`Dispatcher`](webhook::Dispatcher) decodes requests, routes intents and turns errors
//!   into 400 and 500 replies.
//! - [`OrderBot`](lifecycle::OrderBot) starts and stops the actor;
//!   [`AppConfig`](lifecycle::AppConfig) reads the environment.
//!
//! ## Running
//!
//! ```bash
//! RUST_LOG=info cargo run
//! curl -s localhost:8000/ -d '{
//!   "session": "projects/p/agent/sessions/S1/contexts/ongoing-order",
//!   "queryResult": {
//!     "intent": {"displayName": "order.add - context: ongoing-order"},
//!     "parameters": {"food-items": ["pizza"], "number": [2]}
//!   }
//! }'
//! ```

pub mod clients;
pub mod engine;
pub mod lifecycle;
pub mod model;
pub mod order_session;
pub mod persistence;
pub mod webhook;
