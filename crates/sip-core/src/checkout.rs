//! Wire types for the remote pricing and order-submission services.
//!
//! The client never computes an authoritative total: it sends the cart
//! contents plus delivery method and voucher code, and displays and
//! submits against whatever [`PriceQuote`] comes back.

use crate::cart::LineItem;
use crate::ids::{OptionValueId, OrderId, ProductId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Delivery method options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMethod {
    /// Standard delivery (20-30 minutes).
    #[default]
    Standard,
    /// Express delivery (10-15 minutes).
    Express,
}

impl DeliveryMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryMethod::Standard => "standard",
            DeliveryMethod::Express => "express",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DeliveryMethod::Standard => "Standard (20-30 min)",
            DeliveryMethod::Express => "Express (10-15 min)",
        }
    }
}

/// Payment method options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash on delivery.
    #[default]
    Cash,
    /// MoMo e-wallet.
    Momo,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Momo => "momo",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Momo => "MoMo",
        }
    }
}

/// One cart line as sent to the remote services.
///
/// The note travels only on order submission; pricing ignores it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    /// Product identifier.
    pub product_id: ProductId,
    /// Quantity ordered.
    pub quantity: i64,
    /// Selected option value IDs across all groups.
    pub selected_value_ids: Vec<OptionValueId>,
    /// Customer note; omitted from pricing requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl OrderItem {
    /// Build the pricing payload for a cart line (no note).
    pub fn for_pricing(item: &LineItem) -> Self {
        Self {
            product_id: item.product_id.clone(),
            quantity: item.quantity,
            selected_value_ids: item.selected_value_ids.clone(),
            note: None,
        }
    }

    /// Build the order payload for a cart line (note included).
    pub fn for_order(item: &LineItem) -> Self {
        Self {
            note: Some(item.note.clone()),
            ..Self::for_pricing(item)
        }
    }
}

/// Request body for the pricing service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricingRequest {
    /// Cart lines to price.
    pub items: Vec<OrderItem>,
    /// Voucher code, if one was entered.
    pub voucher_code: Option<String>,
    /// Chosen delivery method.
    pub delivery_method: DeliveryMethod,
}

/// Authoritative price breakdown from the pricing service.
///
/// `total_amount` is the only figure ever shown at checkout or
/// submitted against; the client's own cart total is advisory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceQuote {
    /// Item subtotal.
    pub sub_total: Money,
    /// Delivery fee for the chosen method.
    pub delivery_fee: Money,
    /// Voucher discount (zero when no voucher applied).
    pub discount_amount: Money,
    /// Final total: `sub_total + delivery_fee - discount_amount`.
    pub total_amount: Money,
}

impl PriceQuote {
    /// Whether the voucher actually discounted this quote.
    pub fn has_discount(&self) -> bool {
        self.discount_amount.is_positive()
    }
}

/// Customer details collected at checkout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CustomerInfo {
    /// Full name (required).
    pub name: String,
    /// Phone number (required).
    pub phone: String,
    /// Delivery address (required).
    pub address: String,
    /// Additional note (optional).
    pub note: String,
}

impl CustomerInfo {
    /// Names of the required fields that are still blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.phone.trim().is_empty() {
            missing.push("phone");
        }
        if self.address.trim().is_empty() {
            missing.push("address");
        }
        missing
    }

    /// Whether every required field is filled in.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

/// Request body for order submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderRequest {
    /// Cart lines including per-line notes.
    pub items: Vec<OrderItem>,
    /// Voucher code, only when the held quote actually discounted it.
    pub voucher_code: Option<String>,
    /// Chosen delivery method.
    pub delivery_method: DeliveryMethod,
    /// Customer name.
    pub customer_name: String,
    /// Customer phone number.
    pub customer_phone: String,
    /// Customer delivery address.
    pub customer_address: String,
    /// Order-level customer note.
    pub customer_note: String,
    /// Chosen payment method.
    pub payment_method: PaymentMethod,
}

/// Confirmation returned by the order service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderReceipt {
    /// Identifier of the placed order.
    pub order_id: OrderId,
}
