//! Ordering domain types and logic for the SipMenu storefront client.
//!
//! This crate is the pure core of the ordering client:
//!
//! - **Catalog**: products with configurable option groups, as served
//!   by the menu endpoint
//! - **Configurator**: a per-product editing session that validates
//!   selections and computes the unit price
//! - **Cart**: line items, identity keys, and the pure cart reducer
//! - **Checkout**: wire types for the remote pricing and order services
//!
//! Everything here is synchronous and side-effect free. Persistence
//! lives in `sip-cart`; the remote collaborators live behind the
//! traits in `sip-checkout`.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod configurator;
pub mod error;
pub mod ids;
pub mod money;

pub use error::MenuError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::MenuError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Category, Menu, OptionGroup, OptionValue, Product, SelectionMode};

    // Configurator
    pub use crate::configurator::Configurator;

    // Cart
    pub use crate::cart::{line_key, reduce, CartAction, CartState, DisplaySnapshot, LineItem};

    // Checkout
    pub use crate::checkout::{
        CustomerInfo, DeliveryMethod, OrderItem, OrderReceipt, OrderRequest, PaymentMethod,
        PriceQuote, PricingRequest,
    };
}
