//! Durable storage backends for the cart snapshot.
//!
//! The session keeps exactly one serialized record under a fixed key,
//! shaped `{items, item_count, total_price}`. The trait is the seam
//! that keeps [`crate::CartStore`] unit-testable without touching the
//! filesystem.

use crate::error::StorageError;
use sip_core::cart::CartState;
use std::cell::RefCell;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Fixed name of the durable cart record.
pub const CART_STORAGE_KEY: &str = "cart";

/// Durable storage for the cart snapshot.
///
/// `load` distinguishes "no record" (`Ok(None)`) from a read or parse
/// failure (`Err`); the store treats both as an empty cart, but the
/// failure case is logged.
pub trait CartStorage {
    /// Read the stored snapshot, if any.
    fn load(&self) -> Result<Option<CartState>, StorageError>;

    /// Write the snapshot, replacing any previous record.
    fn save(&self, state: &CartState) -> Result<(), StorageError>;

    /// Erase the record entirely.
    fn clear(&self) -> Result<(), StorageError>;
}

/// File-backed storage: one JSON record at a fixed path.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Create storage writing to the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create storage using the conventional record name under a
    /// directory (`<dir>/cart.json`).
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(format!("{}.json", CART_STORAGE_KEY)))
    }
}

impl CartStorage for JsonFileStorage {
    fn load(&self) -> Result<Option<CartState>, StorageError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let state = serde_json::from_str(&raw)?;
        Ok(Some(state))
    }

    fn save(&self, state: &CartState) -> Result<(), StorageError> {
        let raw = serde_json::to_string(state)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Shared handle to an in-memory record, for inspection in tests.
pub type SharedRecord = Rc<RefCell<Option<String>>>;

/// In-memory storage holding the serialized record.
///
/// Keeps the snapshot as its serialized string so tests can corrupt
/// it and exercise the hydration fallback.
#[derive(Default)]
pub struct MemoryStorage {
    record: SharedRecord,
}

impl MemoryStorage {
    /// Create empty in-memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle to the underlying record, usable after the storage
    /// has been boxed into a store.
    pub fn handle(&self) -> SharedRecord {
        Rc::clone(&self.record)
    }
}

impl CartStorage for MemoryStorage {
    fn load(&self) -> Result<Option<CartState>, StorageError> {
        match self.record.borrow().as_deref() {
            Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
            None => Ok(None),
        }
    }

    fn save(&self, state: &CartState) -> Result<(), StorageError> {
        let raw = serde_json::to_string(state)?;
        *self.record.borrow_mut() = Some(raw);
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.record.borrow_mut() = None;
        Ok(())
    }
}
