//! The intents the webhook serves.

use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    AddToOrder,
    RemoveFromOrder,
    CompleteOrder,
    TrackOrder,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Intent not recognized: {0}")]
pub struct UnknownIntent(pub String);

impl Intent {
    pub const ALL: [Intent; 4] = [
        Intent::AddToOrder,
        Intent::RemoveFromOrder,
        Intent::CompleteOrder,
        Intent::TrackOrder,
    ];

    /// Display name of the intent as configured in the agent.
    pub fn display_name(self) -> &'static str {
        match self {
            Intent::AddToOrder => "order.add - context: ongoing-order",
            Intent::RemoveFromOrder => "order.remove - context: ongoing-order",
            Intent::CompleteOrder => "order.complete - context: ongoing-order",
            Intent::TrackOrder => "track.order - context: ongoing-tracking",
        }
    }
}

impl FromStr for Intent {
    type Err = UnknownIntent;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Intent::ALL
            .into_iter()
            .find(|intent| intent.display_name() == name)
            .ok_or_else(|| UnknownIntent(name.to_string()))
    }
}

impl Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
