//! Cart storage error types.

use thiserror::Error;

/// Errors that can occur when reading or writing the cart snapshot.
///
/// None of these propagate out of [`crate::CartStore`]: read failures
/// fall back to an empty cart, write failures are logged and swallowed
/// because the in-memory state stays authoritative for the session.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Underlying I/O failure.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot could not be serialized or parsed.
    #[error("snapshot serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
