//! Actions an [`InProgressOrder`](crate::model::InProgressOrder) understands.
//!
//! They run inside the session actor, so each one is a complete read-modify-write on a
//! single session's order.

use crate::model::{InProgressOrder, RemovalOutcome};

/// Mutations applied to the in-progress order of one session.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Overlay these lines onto the order.
    Merge(InProgressOrder),
    /// Delete these items, recording which ones were present.
    Remove(Vec<String>),
}

/// Results from OrderActions - variants match 1:1 with OrderAction
#[derive(Debug, Clone)]
pub enum OrderActionResult {
    /// The order after merging.
    Merge(InProgressOrder),
    /// What the removal did.
    Remove(RemovalOutcome),
}
