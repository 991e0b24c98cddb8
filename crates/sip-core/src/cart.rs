//! Cart state, line items, and the pure cart reducer.
//!
//! The reducer has no side effects: persistence and change
//! notification are layered on top by `sip-cart`. Derived aggregates
//! (`item_count`, `total_price`) are only ever produced by
//! [`CartState::from_items`], recomputed in full after every
//! transition so they can never drift from the item sequence.

use crate::ids::{OptionValueId, ProductId};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Frozen, human-readable copy of a line item's presentation,
/// captured at add-time and immune to later catalog changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplaySnapshot {
    /// Product name at add-time.
    pub name: String,
    /// Image reference at add-time.
    pub image_url: Option<String>,
    /// Selected option names joined for display (e.g. "Size L, Pearl").
    pub options_text: String,
}

/// One configured, priced, quantified entry in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Identity key; two additions with the same key merge.
    pub key: String,
    /// Product this line was configured from.
    pub product_id: ProductId,
    /// Quantity, always >= 1 once stored.
    pub quantity: i64,
    /// Selected option values across all groups, in display order.
    pub selected_value_ids: Vec<OptionValueId>,
    /// Free-form customer note; part of the identity key.
    pub note: String,
    /// Unit price snapshotted at add-time.
    pub unit_price: Money,
    /// Frozen presentation data.
    pub display: DisplaySnapshot,
}

impl LineItem {
    /// Total contribution of this line (`unit_price * quantity`).
    pub fn total(&self) -> Money {
        self.unit_price.saturating_mul(self.quantity)
    }
}

/// Derive the identity key for a cart line.
///
/// Selected value IDs are deduplicated and sorted so identity is
/// order-independent; the note is included verbatim — two otherwise
/// identical configurations whose notes differ even by whitespace are
/// distinct lines.
pub fn line_key(product_id: &ProductId, selected: &[OptionValueId], note: &str) -> String {
    let values: BTreeSet<&str> = selected.iter().map(|v| v.as_str()).collect();
    let values = values.into_iter().collect::<Vec<_>>().join("-");
    format!("{}|{}|{}", product_id, values, note)
}

/// The cart as a whole: the item sequence plus derived aggregates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CartState {
    /// Line items in insertion order.
    pub items: Vec<LineItem>,
    /// Sum of quantities across all items.
    pub item_count: i64,
    /// Sum of `unit_price * quantity` across all items. Advisory only;
    /// checkout uses the remote quote.
    pub total_price: Money,
}

impl CartState {
    /// Build a state from an item sequence, recomputing all aggregates.
    ///
    /// This is the only constructor of derived fields.
    pub fn from_items(items: Vec<LineItem>) -> Self {
        let currency = items
            .first()
            .map(|i| i.unit_price.currency)
            .unwrap_or(Currency::default());
        let item_count = items.iter().map(|i| i.quantity).sum();
        let totals: Vec<Money> = items.iter().map(|i| i.total()).collect();
        let total_price = Money::sum(totals.iter(), currency);
        Self {
            items,
            item_count,
            total_price,
        }
    }

    /// Check if the cart holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get a line item by identity key.
    pub fn item(&self, key: &str) -> Option<&LineItem> {
        self.items.iter().find(|i| i.key == key)
    }
}

/// A cart transition.
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// Merge-or-append a confirmed line item.
    Add(LineItem),
    /// Drop the entry with this key; no-op if absent.
    Remove { key: String },
    /// Replace the entry's quantity; `quantity <= 0` removes it.
    SetQuantity { key: String, quantity: i64 },
    /// Empty the cart.
    Clear,
}

/// Apply a transition, producing the next state.
///
/// Pure function; callers persist and notify separately. Merging an
/// addition into an existing line sums quantities but keeps the first
/// line's `unit_price` and `display` — if catalog prices changed
/// between adds, the original configuration's pricing wins.
pub fn reduce(state: CartState, action: CartAction) -> CartState {
    let mut items = state.items;
    match action {
        CartAction::Add(new_item) => {
            match items.iter_mut().find(|i| i.key == new_item.key) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(new_item.quantity);
                }
                None => items.push(new_item),
            }
            CartState::from_items(items)
        }
        CartAction::Remove { key } => {
            items.retain(|i| i.key != key);
            CartState::from_items(items)
        }
        CartAction::SetQuantity { key, quantity } => {
            if quantity <= 0 {
                items.retain(|i| i.key != key);
            } else if let Some(item) = items.iter_mut().find(|i| i.key == key) {
                item.quantity = quantity;
            }
            CartState::from_items(items)
        }
        CartAction::Clear => CartState::from_items(Vec::new()),
    }
}
