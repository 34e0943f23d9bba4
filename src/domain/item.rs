// ============================================================================
// Item Catalog
// Static purchasable items and their lookup index
// ============================================================================

use crate::numeric::Currency;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Value Objects
// ============================================================================

/// Stable handle for an item: its position in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub(crate) usize);

impl ItemId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A purchasable producer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique name, also the key used in saved games
    pub name: String,

    /// Price of the first unit
    pub base_cost: Currency,

    /// Currency produced per second by each owned unit
    pub production_rate: Currency,

    /// Display only
    #[serde(default)]
    pub icon: String,
}

impl Item {
    pub fn new(name: impl Into<String>, base_cost: Currency, production_rate: Currency) -> Self {
        Self {
            name: name.into(),
            base_cost,
            production_rate,
            icon: String::new(),
        }
    }

    /// Builder method: Set display icon
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// (name, base cost, production rate, icon)
const STANDARD_ITEMS: &[(&str, &str, &str, &str)] = &[
    ("sword", "6", "0.1", "⚔️"),
    ("shield", "50", "1", "🛡️"),
    ("armor", "750", "8", "👕"),
    ("helmet", "16000", "47", "👒"),
    ("boots", "120000", "500", "👢"),
    ("ring", "1200000", "4000", "💍"),
    ("dagger", "14000000", "35000", "🗡️"),
    ("axe", "580000000", "16000", "🪓"),
    ("magic stuff", "5400000000", "1020000", "🪄"),
    ("bow", "330000000000", "29600000", "🏹"),
];

/// Ordered, immutable set of items with a name index.
///
/// Order only matters for display.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<Item>,
    by_name: HashMap<String, ItemId>,
}

impl Catalog {
    /// Build a catalog, rejecting empty or duplicate names, free items and
    /// negative production
    pub fn new(items: Vec<Item>) -> Result<Self, String> {
        let mut by_name = HashMap::with_capacity(items.len());

        for (index, item) in items.iter().enumerate() {
            if item.name.is_empty() {
                return Err(format!("Item #{} has an empty name", index));
            }
            if !item.base_cost.is_positive() {
                return Err(format!("{}: base cost must be positive", item.name));
            }
            if item.production_rate.is_negative() {
                return Err(format!("{}: production rate must not be negative", item.name));
            }
            if by_name.insert(item.name.clone(), ItemId(index)).is_some() {
                return Err(format!("Duplicate item name: {}", item.name));
            }
        }

        Ok(Self { items, by_name })
    }

    /// The ten-item catalog the game ships with
    pub fn standard() -> Self {
        Self::from_table(STANDARD_ITEMS).expect("built-in catalog is well-formed")
    }

    fn from_table(table: &[(&str, &str, &str, &str)]) -> Result<Self, String> {
        let items = table
            .iter()
            .map(|(name, cost, rate, icon)| {
                let base_cost = cost
                    .parse()
                    .map_err(|e| format!("{}: base cost: {}", name, e))?;
                let production_rate = rate
                    .parse()
                    .map_err(|e| format!("{}: production rate: {}", name, e))?;
                Ok(Item::new(*name, base_cost, production_rate).with_icon(*icon))
            })
            .collect::<Result<Vec<_>, String>>()?;

        Self::new(items)
    }

    /// Load a catalog from a JSON array of items
    pub fn from_json_str(json: &str) -> Result<Self, String> {
        let items: Vec<Item> = serde_json::from_str(json).map_err(|e| e.to_string())?;
        Self::new(items)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id.0)
    }

    pub fn find(&self, name: &str) -> Option<ItemId> {
        self.by_name.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &Item)> {
        self.items
            .iter()
            .enumerate()
            .map(|(index, item)| (ItemId(index), item))
    }
}
