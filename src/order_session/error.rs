//! Error types for the order session store.

use thiserror::Error;

/// Errors that can occur while talking to the order session actor.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SessionError {
    /// The session actor is gone or did not answer.
    #[error("Session store unavailable: {0}")]
    Unavailable(String),

    /// The actor answered with a result that does not match the request.
    #[error("Unexpected session store reply: {0}")]
    UnexpectedReply(String),
}
