//! # Order Engine
//!
//! The operations behind each intent:
//!
//! - [`mutation`] - add items to and remove items from the in-progress order
//! - [`finalizer`] - place the in-progress order in the order repository
//! - [`tracker`] - look up the status of a placed order
//! - [`messages`] - every text the agent replies with
//!
//! Handlers return `Ok(Fulfillment)` for every outcome the customer should hear about,
//! including soft failures. `Err(EngineError)` is reserved for faults (the session store or
//! the repository misbehaving outside a path that has its own reply), which the dispatcher
//! turns into a generic server error.

pub mod finalizer;
pub mod messages;
pub mod mutation;
pub mod tracker;

use crate::clients::OrderSessionClient;
use crate::order_session::SessionError;
use crate::persistence::{OrderRepository, RepositoryError};
use std::sync::Arc;
use thiserror::Error;

/// Faults that escape a handler.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EngineError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Runs intents against the session store and the order repository.
#[derive(Clone)]
pub struct OrderEngine {
    sessions: OrderSessionClient,
    repository: Arc<dyn OrderRepository>,
}

impl OrderEngine {
    pub fn new(sessions: OrderSessionClient, repository: Arc<dyn OrderRepository>) -> Self {
        Self {
            sessions,
            repository,
        }
    }

    pub fn sessions(&self) -> &OrderSessionClient {
        &self.sessions
    }
}
