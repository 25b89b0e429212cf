//! Menu-item complexity lookup.
//!
//! The scorer needs a `complexityBase` per menu item. It asks through
//! [`ComplexityLookup`], so any menu source can back it. [`MenuCatalog`]
//! is the in-memory implementation.

use std::collections::HashMap;

/// Complexity assumed for menu items the catalog does not know.
pub const DEFAULT_COMPLEXITY: f64 = 2.0;

/// Maps a menu-item identifier to its base complexity.
///
/// Lookups never fail: unknown items fall back to a default.
///
/// # Examples
///
/// ```
/// use kds_priority::catalog::{ComplexityLookup, MenuCatalog};
///
/// let catalog = MenuCatalog::new().with_item("souffle", 5.0);
/// assert_eq!(catalog.lookup_complexity("souffle"), 5.0);
/// assert_eq!(catalog.lookup_complexity("unknown"), 2.0);
/// ```
pub trait ComplexityLookup: Send + Sync {
    /// Returns the base complexity of `menu_item_id`.
    fn lookup_complexity(&self, menu_item_id: &str) -> f64;
}

/// In-memory menu catalog.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MenuCatalog {
    items: HashMap<String, f64>,
    default_complexity: f64,
}

impl MenuCatalog {
    /// Creates an empty catalog with the standard default.
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
            default_complexity: DEFAULT_COMPLEXITY,
        }
    }

    /// Registers `menu_item_id` with the given base complexity.
    pub fn with_item(mut self, menu_item_id: impl Into<String>, complexity_base: f64) -> Self {
        self.insert(menu_item_id, complexity_base);
        self
    }

    /// Overrides the fallback for unknown items.
    pub fn with_default_complexity(mut self, complexity: f64) -> Self {
        self.default_complexity = complexity;
        self
    }

    /// Inserts or replaces an entry.
    pub fn insert(&mut self, menu_item_id: impl Into<String>, complexity_base: f64) {
        self.items.insert(menu_item_id.into(), complexity_base);
    }

    /// Number of known items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for MenuCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<(String, f64)> for MenuCatalog {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
            default_complexity: DEFAULT_COMPLEXITY,
        }
    }
}

impl ComplexityLookup for MenuCatalog {
    fn lookup_complexity(&self, menu_item_id: &str) -> f64 {
        self.items
            .get(menu_item_id)
            .copied()
            .unwrap_or(self.default_complexity)
    }
}

impl ComplexityLookup for HashMap<String, f64> {
    fn lookup_complexity(&self, menu_item_id: &str) -> f64 {
        self.get(menu_item_id).copied().unwrap_or(DEFAULT_COMPLEXITY)
    }
}

impl<L: ComplexityLookup + ?Sized> ComplexityLookup for &L {
    fn lookup_complexity(&self, menu_item_id: &str) -> f64 {
        (**self).lookup_complexity(menu_item_id)
    }
}
