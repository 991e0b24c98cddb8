//! Ordering error types.

use thiserror::Error;

/// Errors that can occur while configuring a product for the cart.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MenuError {
    /// Product is flagged out of stock; the configurator refuses to open.
    #[error("Product is out of stock: {0}")]
    ProductOutOfStock(String),

    /// A single-select group has no selectable value, so the
    /// configuration can never be completed.
    #[error("No available choice for required option group: {group}")]
    ConfigurationIncomplete { group: String },

    /// Quantity outside the accepted range.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Currency mismatch in a money calculation.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow in a money calculation.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,
}
