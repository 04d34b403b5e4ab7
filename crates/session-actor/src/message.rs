//! # Session Messages
//!
//! The message types exchanged between a `SessionClient` and its `SessionActor`.

use crate::entity::SessionEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Request sent to the actor.
///
/// The variants are the usual keyed-store operations plus two mutation forms:
///
/// - **Get**: snapshot of the entry, `None` if absent.
/// - **Put**: insert or replace the entry wholesale.
/// - **Delete**: remove the entry and hand back what was stored.
/// - **Action**: mutate an existing entry; `NotFound` if absent.
/// - **Upsert**: like `Action`, but an absent entry is first created from `Default`.
/// - **Len**: number of live entries.
///
/// Because a single task drains these messages, an `Action` or `Upsert` is a complete
/// read-modify-write that no other request can interleave with.
#[derive(Debug)]
pub enum SessionRequest<T: SessionEntity> {
    Get {
        key: T::Key,
        respond_to: Response<Option<T>>,
    },
    Put {
        key: T::Key,
        entity: T,
        respond_to: Response<()>,
    },
    Delete {
        key: T::Key,
        respond_to: Response<Option<T>>,
    },
    Action {
        key: T::Key,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
    Upsert {
        key: T::Key,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
    Len {
        respond_to: Response<usize>,
    },
}
