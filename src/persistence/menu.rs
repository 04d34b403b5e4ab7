//! Menu prices used by the in-memory repository to price order lines.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading a menu file.
#[derive(Debug, Error)]
pub enum MenuError {
    #[error("Failed to read menu file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid menu file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid price for {item}: {price}")]
    InvalidPrice { item: String, price: f64 },
}

/// Item name to unit price. Lookups ignore case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Menu {
    prices: IndexMap<String, f64>,
}

impl Default for Menu {
    fn default() -> Self {
        Self::new([
            ("pav bhaji", 6.00),
            ("chole bhature", 7.00),
            ("pizza", 8.00),
            ("mango lassi", 5.00),
            ("masala dosa", 6.00),
            ("biryani", 9.00),
            ("vada pav", 4.00),
            ("rava dosa", 7.00),
            ("samosa", 5.00),
            ("soda", 2.00),
        ])
    }
}

impl Menu {
    pub fn new<S: Into<String>>(prices: impl IntoIterator<Item = (S, f64)>) -> Self {
        Self {
            prices: prices
                .into_iter()
                .map(|(item, price)| (item.into().to_lowercase(), price))
                .collect(),
        }
    }

    /// Reads a JSON object of `{"item": price}` pairs.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, MenuError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| MenuError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let prices: IndexMap<String, f64> =
            serde_json::from_str(&raw).map_err(|source| MenuError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        if let Some((item, price)) = prices.iter().find(|(_, p)| !p.is_finite() || **p < 0.0) {
            return Err(MenuError::InvalidPrice {
                item: item.clone(),
                price: *price,
            });
        }
        Ok(Self::new(prices))
    }

    pub fn price_of(&self, item: &str) -> Option<f64> {
        self.prices.get(&item.to_lowercase()).copied()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_lookup_ignores_case() {
        let menu = Menu::new([("Pizza", 8.0)]);
        assert_eq!(menu.price_of("pizza"), Some(8.0));
        assert_eq!(menu.price_of("PIZZA"), Some(8.0));
        assert_eq!(menu.price_of("soda"), None);
    }

    #[test]
    fn test_loads_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"pizza": 8.5, "soda": 1.25}"#).unwrap();

        let menu = Menu::from_json_file(file.path()).unwrap();

        assert_eq!(menu.len(), 2);
        assert_eq!(menu.price_of("soda"), Some(1.25));
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"pizza": -1.0}"#).unwrap();

        let err = Menu::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, MenuError::InvalidPrice { ref item, .. } if item == "pizza"));
    }

    #[test]
    fn test_built_in_menu_prices_pizza_and_soda() {
        let menu = Menu::default();
        assert_eq!(menu.price_of("pizza"), Some(8.0));
        assert_eq!(menu.price_of("Soda"), Some(2.0));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = Menu::from_json_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, MenuError::Read { .. }));
    }
}
