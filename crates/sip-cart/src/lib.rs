//! Durable cart store for the SipMenu storefront client.
//!
//! [`CartStore`] is the single shared collection of line items for a
//! browsing session. It applies the pure reducer from `sip-core`,
//! persists a snapshot after every transition, and notifies
//! subscribers. Construct it once at startup and pass it by reference;
//! there is no global lookup.
//!
//! # Example
//!
//! ```rust,ignore
//! use sip_cart::{CartStore, JsonFileStorage};
//!
//! let mut cart = CartStore::open(Box::new(JsonFileStorage::new(path)));
//! cart.add(line_item);
//! assert_eq!(cart.state().item_count, 1);
//! ```

mod error;
mod storage;
mod store;

pub use error::StorageError;
pub use storage::{CartStorage, JsonFileStorage, MemoryStorage, SharedRecord, CART_STORAGE_KEY};
pub use store::{CartStore, SubscriptionId};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{CartStorage, CartStore, JsonFileStorage, MemoryStorage, StorageError};
}
