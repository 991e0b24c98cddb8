//! Checkout orchestration for the SipMenu storefront client.
//!
//! Thin layer over the cart store: it keeps the remotely computed
//! price synchronized with the locally observable inputs (cart
//! contents, delivery method, voucher code) and gates order
//! submission. The remote pricing and order services sit behind
//! async traits; their responses are the only authoritative prices.

mod error;
mod service;
mod session;

pub use error::CheckoutError;
pub use service::{OrderService, PricingService, ServiceError};
pub use session::{CheckoutSession, PricingToken};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        CheckoutError, CheckoutSession, OrderService, PricingService, PricingToken, ServiceError,
    };
}
