//! Orders: the in-progress one being assembled in the conversation and the id of a placed one.
//!
//! [`InProgressOrder`] implements [`SessionEntity`](session_actor::SessionEntity) so a
//! [`SessionActor`](session_actor::SessionActor) can own one per session. See
//! [`crate::order_session`] for the actions it understands.
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Identifier the order repository allocates when an order is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderId(pub i64);

impl From<i64> for OrderId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Item name to quantity, in the order items were first mentioned.
///
/// `Display` renders `"2 pizza, 1 soda"`; an empty order renders as `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InProgressOrder {
    lines: IndexMap<String, u32>,
}

impl InProgressOrder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlays `other` onto this order: quantities in `other` replace existing ones,
    /// new items are appended.
    pub fn merge(&mut self, other: InProgressOrder) {
        self.lines.extend(other.lines);
    }

    /// Deletes `item`, keeping the remaining items in order. Returns whether it was present.
    pub fn remove(&mut self, item: &str) -> bool {
        self.lines.shift_remove(item).is_some()
    }

    pub fn quantity(&self, item: &str) -> Option<u32> {
        self.lines.get(item).copied()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.lines.iter().map(|(item, qty)| (item.as_str(), *qty))
    }
}

/// Later pairs win when an item repeats, but the item keeps its first position.
impl FromIterator<(String, u32)> for InProgressOrder {
    fn from_iter<I: IntoIterator<Item = (String, u32)>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().collect(),
        }
    }
}

impl Display for InProgressOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (item, qty)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} {}", qty, item)?;
        }
        Ok(())
    }
}

/// What a remove request did to an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalOutcome {
    /// Requested items that were in the order and are now gone.
    pub removed: Vec<String>,
    /// Requested items the order did not contain.
    pub missing: Vec<String>,
    /// The order after removal.
    pub remaining: InProgressOrder,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(pairs: &[(&str, u32)]) -> InProgressOrder {
        pairs.iter().map(|(item, qty)| (item.to_string(), *qty)).collect()
    }

    #[test]
    fn test_display_joins_quantity_and_item_in_insertion_order() {
        let o = order(&[("pizza", 2), ("soda", 1), ("samosa", 3)]);
        assert_eq!(o.to_string(), "2 pizza, 1 soda, 3 samosa");
    }

    #[test]
    fn test_display_empty_order() {
        assert_eq!(InProgressOrder::new().to_string(), "");
    }

    #[test]
    fn test_duplicate_pairs_last_wins_first_position_kept() {
        let o = order(&[("pizza", 2), ("soda", 1), ("pizza", 5)]);
        assert_eq!(o.quantity("pizza"), Some(5));
        assert_eq!(o.to_string(), "5 pizza, 1 soda");
    }

    #[test]
    fn test_merge_overwrites_matching_and_unions_the_rest() {
        let mut o = order(&[("pizza", 2), ("soda", 1)]);
        o.merge(order(&[("soda", 4), ("lassi", 2)]));
        assert_eq!(o.to_string(), "2 pizza, 4 soda, 2 lassi");
    }

    #[test]
    fn test_remove_keeps_remaining_order() {
        let mut o = order(&[("pizza", 2), ("soda", 1), ("lassi", 2)]);
        assert!(o.remove("soda"));
        assert!(!o.remove("soda"));
        assert_eq!(o.to_string(), "2 pizza, 2 lassi");
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let o = order(&[("pizza", 2)]);
        assert_eq!(serde_json::to_string(&o).unwrap(), r#"{"pizza":2}"#);
    }
}
