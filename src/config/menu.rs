use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{CafeError, Result};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MenuItem {
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub description: Option<String>,
    /// Size name -> price. Empty for single-size items.
    #[serde(default)]
    pub sizes: BTreeMap<String, Decimal>,
}

/// The café catalog, keyed by item id
#[derive(Debug, Deserialize, Serialize, Default)]
#[serde(transparent)]
pub struct Menu {
    items: BTreeMap<String, MenuItem>,
}

/// What ends up as a cart line when an item is ordered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub line_id: String,
    pub name: String,
    pub price: Decimal,
}

impl Menu {
    pub fn iter(&self) -> impl Iterator<Item = (&String, &MenuItem)> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, item_id: &str) -> Option<&MenuItem> {
        self.items.get(item_id)
    }

    /// Every base and size price must be positive.
    pub fn validate(&self) -> std::result::Result<(), String> {
        for (id, item) in &self.items {
            if item.price <= Decimal::ZERO {
                return Err(format!("[{id}] price must be positive, got {}", item.price));
            }
            if let Some((size, price)) = item.sizes.iter().find(|(_, p)| **p <= Decimal::ZERO) {
                return Err(format!(
                    "[{id}] size '{size}' price must be positive, got {price}"
                ));
            }
        }
        Ok(())
    }

    /// Turn an item id and optional size into a cart line identity.
    ///
    /// Sized lines get their own id (`latte-Large`) so each size is tracked
    /// separately in the cart.
    pub fn resolve(&self, item_id: &str, size: Option<&str>) -> Result<Selection> {
        let item = self
            .items
            .get(item_id)
            .ok_or_else(|| CafeError::ItemNotFound(item_id.to_string()))?;

        let Some(size) = size else {
            return Ok(Selection {
                line_id: item_id.to_string(),
                name: item.name.clone(),
                price: item.price,
            });
        };

        let (size_name, price) = item
            .sizes
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(size))
            .ok_or_else(|| CafeError::SizeNotFound {
                item: item_id.to_string(),
                size: size.to_string(),
                available: if item.sizes.is_empty() {
                    "none".to_string()
                } else {
                    item.sizes.keys().cloned().collect::<Vec<_>>().join(", ")
                },
            })?;

        Ok(Selection {
            line_id: format!("{item_id}-{size_name}"),
            name: format!("{} ({})", item.name, size_name),
            price: *price,
        })
    }
}
