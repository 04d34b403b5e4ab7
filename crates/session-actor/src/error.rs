//! # Framework Errors
//!
//! Common error types shared by every session actor and client.

/// Errors that can occur within the session actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Session actor closed")]
    ActorClosed,
    #[error("Session actor dropped response channel")]
    ActorDropped,
    #[error("Session not found: {0}")]
    NotFound(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}
