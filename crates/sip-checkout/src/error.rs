//! Checkout error types.
//!
//! Nothing here is fatal: every variant is either recovered locally or
//! shown to the customer as a retryable message, with the cart left
//! intact.

use thiserror::Error;

/// Errors that can occur while pricing or submitting an order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// The cart has no items; there is nothing to submit.
    #[error("cart is empty")]
    EmptyCart,

    /// Required customer fields are blank. Checked locally, before
    /// any network call.
    #[error("missing required fields: {0}")]
    ValidationFailed(String),

    /// No successful pricing response is currently held for the
    /// present inputs.
    #[error("no current price quote; request pricing first")]
    QuoteMissing,

    /// The pricing service refused or failed the request (e.g. an
    /// invalid voucher). The message is surfaced verbatim.
    #[error("{0}")]
    PricingRejected(String),

    /// Order submission failed; the cart is left untouched so the
    /// customer can retry.
    #[error("{0}")]
    SubmissionFailed(String),
}
