//! Catalog types: categories, products, and their option model.
//!
//! These mirror the shape served by the menu endpoint and are
//! immutable once deserialized. Availability flags live here: a
//! product-level `out_of_stock` blocks the configurator entirely,
//! while a per-value `available` flag blocks individual selections.

use crate::ids::{CategoryId, OptionGroupId, OptionValueId, ProductId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// How many values may be selected from an option group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    /// Exactly one value (radio-like), e.g. size or sweetness.
    Single,
    /// Any subset of values (checkbox-like), e.g. toppings.
    Multi,
}

impl SelectionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionMode::Single => "single",
            SelectionMode::Multi => "multi",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "single" => Some(SelectionMode::Single),
            "multi" => Some(SelectionMode::Multi),
            _ => None,
        }
    }
}

/// One selectable value within an option group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OptionValue {
    /// Unique value identifier.
    pub id: OptionValueId,
    /// Display name (e.g., "Size L", "Pearl").
    pub name: String,
    /// Signed amount added to the product's base price when selected.
    pub price_adjustment: Money,
    /// Whether this value can currently be selected.
    pub available: bool,
}

/// A configurable dimension of a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OptionGroup {
    /// Unique group identifier.
    pub id: OptionGroupId,
    /// Display name (e.g., "Size", "Toppings").
    pub name: String,
    /// Selection mode for this group.
    pub mode: SelectionMode,
    /// Values in display order.
    pub values: Vec<OptionValue>,
}

impl OptionGroup {
    /// Look up a value by ID.
    pub fn value(&self, id: &OptionValueId) -> Option<&OptionValue> {
        self.values.iter().find(|v| &v.id == id)
    }

    /// First available value in display order, if any.
    pub fn first_available(&self) -> Option<&OptionValue> {
        self.values.iter().find(|v| v.available)
    }

    /// Whether any value of this group can be selected.
    pub fn has_available_value(&self) -> bool {
        self.values.iter().any(|v| v.available)
    }
}

/// A product on the menu.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Price before any option adjustments.
    pub base_price: Money,
    /// Full description.
    pub description: Option<String>,
    /// Image reference (URL or emoji placeholder).
    pub image_url: Option<String>,
    /// Whether the product is temporarily not orderable at all.
    pub out_of_stock: bool,
    /// Option groups in display order.
    pub option_groups: Vec<OptionGroup>,
}

impl Product {
    /// Look up an option group by ID.
    pub fn group(&self, id: &OptionGroupId) -> Option<&OptionGroup> {
        self.option_groups.iter().find(|g| &g.id == id)
    }

    /// Whether the product can be configured and ordered.
    pub fn is_orderable(&self) -> bool {
        !self.out_of_stock
    }
}

/// A menu category with its products, in display order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    /// Unique category identifier.
    pub id: CategoryId,
    /// Category name.
    pub name: String,
    /// Products in display order.
    pub products: Vec<Product>,
}

/// The full menu as served by the catalog collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(transparent)]
pub struct Menu {
    /// Categories in display order.
    pub categories: Vec<Category>,
}

impl Menu {
    /// Look up a product anywhere on the menu.
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.categories
            .iter()
            .flat_map(|c| c.products.iter())
            .find(|p| &p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn value(id: &str, adj: i64, available: bool) -> OptionValue {
        OptionValue {
            id: OptionValueId::new(id),
            name: id.to_string(),
            price_adjustment: Money::new(adj, Currency::VND),
            available,
        }
    }

    #[test]
    fn test_first_available_skips_unavailable() {
        let group = OptionGroup {
            id: OptionGroupId::new("size"),
            name: "Size".to_string(),
            mode: SelectionMode::Single,
            values: vec![value("m", 0, false), value("l", 5000, true)],
        };

        assert_eq!(group.first_available().unwrap().id.as_str(), "l");
    }

    #[test]
    fn test_no_available_value() {
        let group = OptionGroup {
            id: OptionGroupId::new("size"),
            name: "Size".to_string(),
            mode: SelectionMode::Single,
            values: vec![value("m", 0, false)],
        };

        assert!(!group.has_available_value());
        assert!(group.first_available().is_none());
    }

    #[test]
    fn test_menu_product_lookup() {
        let product = Product {
            id: ProductId::new("p1"),
            name: "Milk Tea".to_string(),
            base_price: Money::new(30000, Currency::VND),
            description: None,
            image_url: None,
            out_of_stock: false,
            option_groups: vec![],
        };
        let menu = Menu {
            categories: vec![Category {
                id: CategoryId::new("c1"),
                name: "Tea".to_string(),
                products: vec![product],
            }],
        };

        assert!(menu.product(&ProductId::new("p1")).is_some());
        assert!(menu.product(&ProductId::new("missing")).is_none());
    }

    #[test]
    fn test_selection_mode_round_trip() {
        assert_eq!(SelectionMode::from_str("single"), Some(SelectionMode::Single));
        assert_eq!(SelectionMode::from_str("MULTI"), Some(SelectionMode::Multi));
        assert_eq!(SelectionMode::from_str("other"), None);
        assert_eq!(SelectionMode::Multi.as_str(), "multi");
    }
}
