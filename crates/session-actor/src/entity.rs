//! # SessionEntity Trait
//!
//! The `SessionEntity` trait defines the contract that every per-session value (an in-progress
//! order, a shopping cart, a wizard state, …) must implement to be owned by a `SessionActor`.
//!
//! Unlike a classic resource store, the key is **supplied by the caller** (it comes from the
//! conversation platform) instead of being allocated by the actor. Everything else follows the
//! same recipe: associated types for keys, actions and errors, an injected `Context`, and
//! lifecycle hooks with default implementations.
//!
//! # Provided Methods (Hooks)
//! - [`SessionEntity::on_open`] runs when an `upsert` creates a brand new entry.
//! - [`SessionEntity::on_close`] runs right before an entry is removed by `delete`.
//!
//! Eviction of idle entries does **not** run `on_close`; an evicted entry simply disappears.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any per-session value must implement to be managed by [`SessionActor`](crate::SessionActor).
///
/// # Async & Context
/// The trait is `#[async_trait]` so hooks may await other actors or services. The `Context`
/// is handed to `run()` rather than `new()`, which keeps construction free of dependencies.
#[async_trait]
pub trait SessionEntity: Clone + Default + Debug + Send + Sync + 'static {
    /// The session key (e.g., a conversation id).
    type Key: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// Enum representing the mutations an entry understands.
    type Action: Send + Sync + Debug;

    /// The result type returned by actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Called when `upsert` finds no entry and is about to create one from `Default`.
    async fn on_open(&mut self, _key: &Self::Key, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called immediately before the entry is removed through `delete`.
    async fn on_close(&self, _key: &Self::Key, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Apply an action to the entry in place.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
