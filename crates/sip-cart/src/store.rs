//! The cart store: hydration, serialized transitions, persistence,
//! and change notification.

use crate::storage::CartStorage;
use sip_core::cart::{reduce, CartAction, CartState, LineItem};

/// Handle returned by [`CartStore::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn Fn(&CartState)>;

/// The single durable collection of line items for the session.
///
/// All mutation flows through [`dispatch`](CartStore::dispatch), which
/// runs each transition to completion: pure reduce, synchronous
/// persistence write, then subscriber notification. `&mut self`
/// serializes transitions; nothing can observe a half-applied state.
pub struct CartStore {
    state: CartState,
    storage: Box<dyn CartStorage>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl CartStore {
    /// Open the store, hydrating from durable storage before the first
    /// read. Any read failure, missing record, or malformed content
    /// falls back silently to an empty cart; hydration never fails.
    pub fn open(storage: Box<dyn CartStorage>) -> Self {
        let state = match storage.load() {
            Ok(Some(snapshot)) => {
                // Stored snapshots are untrusted: drop impossible
                // quantities and recompute the aggregates from the
                // item sequence rather than trusting persisted ones.
                let mut items = snapshot.items;
                items.retain(|i| i.quantity > 0);
                CartState::from_items(items)
            }
            Ok(None) => CartState::default(),
            Err(e) => {
                tracing::warn!(error = %e, "cart snapshot unreadable, starting empty");
                CartState::default()
            }
        };

        Self {
            state,
            storage,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Current cart state.
    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// Apply one transition: reduce, persist, notify.
    ///
    /// The persistence write happens before the transition is
    /// considered complete, but a write failure does not fail it —
    /// the in-memory state stays authoritative for the session, so
    /// the error is logged and swallowed.
    pub fn dispatch(&mut self, action: CartAction) {
        let erases_record = matches!(action, CartAction::Clear);
        self.state = reduce(std::mem::take(&mut self.state), action);

        let written = if erases_record {
            self.storage.clear()
        } else {
            self.storage.save(&self.state)
        };
        if let Err(e) = written {
            tracing::warn!(error = %e, "failed to persist cart snapshot");
        }

        for (_, listener) in &self.listeners {
            listener(&self.state);
        }
    }

    /// Merge-or-append a confirmed line item.
    pub fn add(&mut self, item: LineItem) {
        self.dispatch(CartAction::Add(item));
    }

    /// Remove the line with this identity key.
    pub fn remove(&mut self, key: impl Into<String>) {
        self.dispatch(CartAction::Remove { key: key.into() });
    }

    /// Replace a line's quantity; zero or less removes the line.
    pub fn set_quantity(&mut self, key: impl Into<String>, quantity: i64) {
        self.dispatch(CartAction::SetQuantity {
            key: key.into(),
            quantity,
        });
    }

    /// Empty the cart and erase the durable record.
    pub fn clear(&mut self) {
        self.dispatch(CartAction::Clear);
    }

    /// Register a listener called after every completed transition.
    pub fn subscribe(&mut self, listener: impl Fn(&CartState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a previously registered listener.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use sip_core::cart::DisplaySnapshot;
    use sip_core::ids::{OptionValueId, ProductId};
    use sip_core::money::{Currency, Money};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn item(note: &str, quantity: i64, price: i64) -> LineItem {
        let product_id = ProductId::new("p1");
        let selected = vec![OptionValueId::new("v1")];
        LineItem {
            key: sip_core::cart::line_key(&product_id, &selected, note),
            product_id,
            quantity,
            selected_value_ids: selected,
            note: note.to_string(),
            unit_price: Money::new(20000, Currency::VND),
            display: DisplaySnapshot {
                name: "Milk Tea".to_string(),
                image_url: None,
                options_text: "Size M".to_string(),
            },
        }
    }

    #[test]
    fn test_open_empty() {
        let store = CartStore::open(Box::new(MemoryStorage::new()));
        assert!(store.state().is_empty());
        assert_eq!(store.state().item_count, 0);
    }

    #[test]
    fn test_every_transition_persists() {
        let storage = MemoryStorage::new();
        let record = storage.handle();
        let mut store = CartStore::open(Box::new(storage));

        store.add(item("", 2, 20000));
        let persisted: CartState =
            serde_json::from_str(record.borrow().as_deref().unwrap()).unwrap();
        assert_eq!(&persisted, store.state());

        let key = store.state().items[0].key.clone();
        store.set_quantity(key, 5);
        let persisted: CartState =
            serde_json::from_str(record.borrow().as_deref().unwrap()).unwrap();
        assert_eq!(persisted.item_count, 5);
    }

    #[test]
    fn test_clear_erases_record() {
        let storage = MemoryStorage::new();
        let record = storage.handle();
        let mut store = CartStore::open(Box::new(storage));

        store.add(item("", 1, 20000));
        assert!(record.borrow().is_some());

        store.clear();
        assert!(store.state().is_empty());
        assert!(record.borrow().is_none());
    }

    #[test]
    fn test_hydration_round_trip() {
        let storage = MemoryStorage::new();
        let record = storage.handle();
        {
            let mut store = CartStore::open(Box::new(storage));
            store.add(item("less ice", 3, 20000));
        }

        let reopened = MemoryStorage::new();
        *reopened.handle().borrow_mut() = record.borrow().clone();
        let store = CartStore::open(Box::new(reopened));

        assert_eq!(store.state().item_count, 3);
        assert_eq!(store.state().total_price.amount, 60000);
        assert_eq!(store.state().items[0].note, "less ice");
    }

    #[test]
    fn test_corrupt_snapshot_hydrates_empty() {
        let storage = MemoryStorage::new();
        *storage.handle().borrow_mut() = Some("{\"items\": \"oops\"".to_string());

        let store = CartStore::open(Box::new(storage));
        assert!(store.state().is_empty());
    }

    #[test]
    fn test_hydration_recomputes_aggregates() {
        // A snapshot with drifted aggregates and an impossible
        // quantity gets normalized on load.
        let good = item("", 2, 20000);
        let bad = item("zero", 0, 20000);
        let drifted = CartState {
            items: vec![good, bad],
            item_count: 99,
            total_price: Money::new(1, Currency::VND),
        };
        let storage = MemoryStorage::new();
        *storage.handle().borrow_mut() = Some(serde_json::to_string(&drifted).unwrap());

        let store = CartStore::open(Box::new(storage));
        assert_eq!(store.state().items.len(), 1);
        assert_eq!(store.state().item_count, 2);
        assert_eq!(store.state().total_price.amount, 40000);
    }

    #[test]
    fn test_subscribers_observe_transitions() {
        let seen: Rc<RefCell<Vec<i64>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut store = CartStore::open(Box::new(MemoryStorage::new()));
        let id = store.subscribe(move |state| sink.borrow_mut().push(state.item_count));

        store.add(item("", 2, 20000));
        store.add(item("", 1, 20000));
        assert_eq!(*seen.borrow(), vec![2, 3]);

        store.unsubscribe(id);
        store.clear();
        assert_eq!(*seen.borrow(), vec![2, 3]);
    }
}
