//! Per-product configuration session.
//!
//! A [`Configurator`] is a short-lived value object: opened fresh for
//! one product, edited, then either confirmed into a [`LineItem`] or
//! simply dropped (cancel). It never touches the cart directly and is
//! never persisted.

use crate::cart::{line_key, DisplaySnapshot, LineItem};
use crate::catalog::{Product, SelectionMode};
use crate::error::MenuError;
use crate::ids::{OptionGroupId, OptionValueId};
use crate::money::Money;

/// Selection state for one option group.
#[derive(Debug, Clone, PartialEq)]
enum GroupSelection {
    /// Exactly one value, or explicitly none when no value of the
    /// group is available.
    Single(Option<OptionValueId>),
    /// Any subset of available values, in toggle order.
    Multi(Vec<OptionValueId>),
}

/// An editing session over one product's option groups.
///
/// Construction computes defaults and the session is immediately
/// editable; `confirm` consumes it, producing exactly one validated
/// line item candidate.
#[derive(Debug, Clone)]
pub struct Configurator<'a> {
    product: &'a Product,
    /// One entry per option group, in group order.
    selections: Vec<(OptionGroupId, GroupSelection)>,
    quantity: i64,
    note: String,
}

impl<'a> Configurator<'a> {
    /// Open a session for a product, computing default selections:
    /// each single-select group picks its first available value (or
    /// none when the whole group is unavailable), each multi-select
    /// group starts empty.
    ///
    /// Fails with [`MenuError::ProductOutOfStock`] if the product is
    /// flagged out of stock — the catalog blocks entry entirely.
    pub fn open(product: &'a Product) -> Result<Self, MenuError> {
        if !product.is_orderable() {
            return Err(MenuError::ProductOutOfStock(product.name.clone()));
        }

        let selections = product
            .option_groups
            .iter()
            .map(|group| {
                let selection = match group.mode {
                    SelectionMode::Single => {
                        GroupSelection::Single(group.first_available().map(|v| v.id.clone()))
                    }
                    SelectionMode::Multi => GroupSelection::Multi(Vec::new()),
                };
                (group.id.clone(), selection)
            })
            .collect();

        Ok(Self {
            product,
            selections,
            quantity: 1,
            note: String::new(),
        })
    }

    /// The product this session configures.
    pub fn product(&self) -> &Product {
        self.product
    }

    /// Current quantity.
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Current note text.
    pub fn note(&self) -> &str {
        &self.note
    }

    /// Whether a value is currently selected.
    pub fn is_selected(&self, group_id: &OptionGroupId, value_id: &OptionValueId) -> bool {
        self.selections
            .iter()
            .find(|(id, _)| id == group_id)
            .map(|(_, sel)| match sel {
                GroupSelection::Single(current) => current.as_ref() == Some(value_id),
                GroupSelection::Multi(values) => values.contains(value_id),
            })
            .unwrap_or(false)
    }

    /// Apply a selection change.
    ///
    /// Unavailable or unknown values are ignored entirely — the
    /// selection state never passes through an invalid intermediate.
    /// Single-select groups replace their current value; multi-select
    /// groups toggle membership. No other group is affected.
    pub fn select(&mut self, group_id: &OptionGroupId, value_id: &OptionValueId) {
        let Some(group) = self.product.group(group_id) else {
            return;
        };
        let selectable = group.value(value_id).map(|v| v.available).unwrap_or(false);
        if !selectable {
            return;
        }
        let Some((_, selection)) = self.selections.iter_mut().find(|(id, _)| id == group_id)
        else {
            return;
        };

        match selection {
            GroupSelection::Single(current) => {
                *current = Some(value_id.clone());
            }
            GroupSelection::Multi(values) => {
                if let Some(pos) = values.iter().position(|v| v == value_id) {
                    values.remove(pos);
                } else {
                    values.push(value_id.clone());
                }
            }
        }
    }

    /// Set the quantity, clamped to a minimum of 1. There is no upper
    /// bound; the caller is trusted.
    pub fn set_quantity(&mut self, quantity: i64) {
        self.quantity = quantity.max(1);
    }

    /// Set the free-form note. Not validated; whitespace is kept
    /// verbatim and participates in cart identity.
    pub fn set_note(&mut self, note: impl Into<String>) {
        self.note = note.into();
    }

    /// Compute the unit price from scratch:
    /// `base_price + Σ price_adjustment` over every selected value.
    /// Never cached across selection changes.
    pub fn unit_price(&self) -> Money {
        let adjustments: Vec<Money> = self
            .selected_values()
            .map(|(_, value)| value.price_adjustment)
            .collect();
        let total = Money::sum(adjustments.iter(), self.product.base_price.currency);
        self.product
            .base_price
            .try_add(&total)
            .unwrap_or(self.product.base_price)
    }

    /// Confirm the session, producing the line item candidate.
    ///
    /// Fails with [`MenuError::ConfigurationIncomplete`] when a
    /// single-select group has no selection (every one of its values
    /// is unavailable); such a product must not reach the cart.
    pub fn confirm(self) -> Result<LineItem, MenuError> {
        for (group_id, selection) in &self.selections {
            if let GroupSelection::Single(None) = selection {
                let group = self
                    .product
                    .group(group_id)
                    .map(|g| g.name.clone())
                    .unwrap_or_else(|| group_id.to_string());
                return Err(MenuError::ConfigurationIncomplete { group });
            }
        }

        let unit_price = self.unit_price();
        let selected: Vec<OptionValueId> = self
            .selected_values()
            .map(|(_, value)| value.id.clone())
            .collect();
        let options_text = self
            .selected_values()
            .map(|(_, value)| value.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        Ok(LineItem {
            key: line_key(&self.product.id, &selected, &self.note),
            product_id: self.product.id.clone(),
            quantity: self.quantity,
            selected_value_ids: selected,
            note: self.note,
            unit_price,
            display: DisplaySnapshot {
                name: self.product.name.clone(),
                image_url: self.product.image_url.clone(),
                options_text,
            },
        })
    }

    /// Selected values with their groups, in group order; within a
    /// multi group, in toggle order.
    fn selected_values(
        &self,
    ) -> impl Iterator<Item = (&OptionGroupId, &crate::catalog::OptionValue)> {
        self.selections.iter().flat_map(move |(group_id, sel)| {
            let group = self.product.group(group_id);
            let ids: Vec<&OptionValueId> = match sel {
                GroupSelection::Single(Some(id)) => vec![id],
                GroupSelection::Single(None) => Vec::new(),
                GroupSelection::Multi(ids) => ids.iter().collect(),
            };
            ids.into_iter()
                .filter_map(move |id| group.and_then(|g| g.value(id)).map(|v| (group_id, v)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{OptionGroup, OptionValue};
    use crate::ids::ProductId;
    use crate::money::Currency;

    fn vnd(amount: i64) -> Money {
        Money::new(amount, Currency::VND)
    }

    fn value(id: &str, name: &str, adj: i64, available: bool) -> OptionValue {
        OptionValue {
            id: OptionValueId::new(id),
            name: name.to_string(),
            price_adjustment: vnd(adj),
            available,
        }
    }

    fn milk_tea() -> Product {
        Product {
            id: ProductId::new("p1"),
            name: "Milk Tea".to_string(),
            base_price: vnd(30000),
            description: None,
            image_url: Some("\u{1f9cb}".to_string()),
            out_of_stock: false,
            option_groups: vec![
                OptionGroup {
                    id: OptionGroupId::new("size"),
                    name: "Size".to_string(),
                    mode: SelectionMode::Single,
                    values: vec![
                        value("size-m", "Size M", 0, true),
                        value("size-l", "Size L", 5000, true),
                    ],
                },
                OptionGroup {
                    id: OptionGroupId::new("toppings"),
                    name: "Toppings".to_string(),
                    mode: SelectionMode::Multi,
                    values: vec![
                        value("pearl", "Pearl", 5000, true),
                        value("pudding", "Pudding", 7000, true),
                        value("aloe", "Aloe", 4000, false),
                    ],
                },
            ],
        }
    }

    #[test]
    fn test_defaults() {
        let product = milk_tea();
        let session = Configurator::open(&product).unwrap();

        // First available single value, empty multi set.
        assert!(session.is_selected(&OptionGroupId::new("size"), &OptionValueId::new("size-m")));
        assert!(!session.is_selected(&OptionGroupId::new("toppings"), &OptionValueId::new("pearl")));
        assert_eq!(session.quantity(), 1);
        assert_eq!(session.unit_price().amount, 30000);
    }

    #[test]
    fn test_defaults_skip_unavailable() {
        let mut product = milk_tea();
        product.option_groups[0].values[0].available = false;
        let session = Configurator::open(&product).unwrap();

        assert!(session.is_selected(&OptionGroupId::new("size"), &OptionValueId::new("size-l")));
    }

    #[test]
    fn test_out_of_stock_blocks_entry() {
        let mut product = milk_tea();
        product.out_of_stock = true;

        assert!(matches!(
            Configurator::open(&product),
            Err(MenuError::ProductOutOfStock(_))
        ));
    }

    #[test]
    fn test_single_select_replaces() {
        let product = milk_tea();
        let mut session = Configurator::open(&product).unwrap();
        session.select(&OptionGroupId::new("size"), &OptionValueId::new("size-l"));

        assert!(session.is_selected(&OptionGroupId::new("size"), &OptionValueId::new("size-l")));
        assert!(!session.is_selected(&OptionGroupId::new("size"), &OptionValueId::new("size-m")));
    }

    #[test]
    fn test_multi_toggle_is_idempotent_pair() {
        let product = milk_tea();
        let mut session = Configurator::open(&product).unwrap();
        let group = OptionGroupId::new("toppings");
        let pearl = OptionValueId::new("pearl");
        let before = session.unit_price();

        session.select(&group, &pearl);
        assert!(session.is_selected(&group, &pearl));
        session.select(&group, &pearl);
        assert!(!session.is_selected(&group, &pearl));
        assert_eq!(session.unit_price(), before);
    }

    #[test]
    fn test_unavailable_selection_is_noop() {
        let product = milk_tea();
        let mut session = Configurator::open(&product).unwrap();
        let before = session.clone();

        session.select(&OptionGroupId::new("toppings"), &OptionValueId::new("aloe"));
        session.select(&OptionGroupId::new("toppings"), &OptionValueId::new("unknown"));
        session.select(&OptionGroupId::new("unknown"), &OptionValueId::new("pearl"));

        assert_eq!(session.unit_price(), before.unit_price());
        assert!(!session.is_selected(&OptionGroupId::new("toppings"), &OptionValueId::new("aloe")));
    }

    #[test]
    fn test_quantity_clamps_to_one() {
        let product = milk_tea();
        let mut session = Configurator::open(&product).unwrap();

        session.set_quantity(0);
        assert_eq!(session.quantity(), 1);
        session.set_quantity(-3);
        assert_eq!(session.quantity(), 1);
        session.set_quantity(12);
        assert_eq!(session.quantity(), 12);
    }

    #[test]
    fn test_pricing_scenario() {
        // base 30000, Size L +5000, Pearl +5000, Pudding +7000, qty 2.
        let product = milk_tea();
        let mut session = Configurator::open(&product).unwrap();
        session.select(&OptionGroupId::new("size"), &OptionValueId::new("size-l"));
        session.select(&OptionGroupId::new("toppings"), &OptionValueId::new("pearl"));
        session.select(&OptionGroupId::new("toppings"), &OptionValueId::new("pudding"));
        session.set_quantity(2);

        assert_eq!(session.unit_price().amount, 47000);

        let line = session.confirm().unwrap();
        assert_eq!(line.unit_price.amount, 47000);
        assert_eq!(line.total().amount, 94000);
        assert_eq!(line.display.options_text, "Size L, Pearl, Pudding");
    }

    #[test]
    fn test_confirm_fails_when_single_group_exhausted() {
        let mut product = milk_tea();
        for v in &mut product.option_groups[0].values {
            v.available = false;
        }
        let session = Configurator::open(&product).unwrap();

        assert_eq!(
            session.confirm(),
            Err(MenuError::ConfigurationIncomplete {
                group: "Size".to_string()
            })
        );
    }

    #[test]
    fn test_confirm_key_matches_note() {
        let product = milk_tea();
        let mut session = Configurator::open(&product).unwrap();
        session.set_note("less ice");
        let line = session.confirm().unwrap();

        assert_eq!(line.note, "less ice");
        assert!(line.key.ends_with("|less ice"));
        assert_eq!(line.key, line_key(&line.product_id, &line.selected_value_ids, &line.note));
    }
}
