//! # Session Actor
//!
//! Building blocks for keeping per-conversation state in a single Tokio task.
//!
//! A conversation platform calls a webhook many times for the same dialogue, possibly in
//! parallel. Whatever state the dialogue accumulates has to live somewhere between calls,
//! keyed by the platform's session id, and concurrent calls for one session must not
//! overwrite each other's changes.
//!
//! This crate solves that with the **Actor Model**: a [`SessionActor`] owns a map from
//! session key to entry and drains a channel of requests one at a time. Callers hold a
//! cheap, cloneable [`SessionClient`]. A mutation is sent as an *action* that runs inside
//! the actor, so every read-modify-write is atomic per key without any locks.
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`SessionEntity`]) - the per-session value and the actions it understands
//! 2. **Runtime Layer** ([`SessionActor`]) - message processing, idle eviction
//! 3. **Interface Layer** ([`SessionClient`], [`SessionStoreClient`]) - typed request/response
//!
//! ## Lifetime of an entry
//!
//! - `upsert` opens an entry from `Default` the first time a key is seen, then applies the action.
//! - `perform_action` mutates an existing entry and fails with [`FrameworkError::NotFound`] otherwise.
//! - `delete` removes the entry and returns it, which makes "take and finish" a single step.
//! - Entries untouched for [`SessionConfig::idle_ttl`] are swept away.
//!
//! ## Testing
//!
//! The [`mock`] module provides a [`MockClient`](mock::MockClient) that answers requests from
//! scripted expectations, which is the easy way to simulate an unavailable store.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

// Re-export core types for convenience
pub use actor::{SessionActor, SessionConfig};
pub use client::SessionClient;
pub use client_trait::SessionStoreClient;
pub use entity::SessionEntity;
pub use error::FrameworkError;
pub use message::{Response, SessionRequest};
