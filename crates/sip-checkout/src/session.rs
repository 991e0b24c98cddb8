//! Checkout session: pricing synchronization and submission gating.

use crate::error::CheckoutError;
use crate::service::{OrderService, PricingService, ServiceError};
use sip_cart::CartStore;
use sip_core::cart::CartState;
use sip_core::checkout::{
    CustomerInfo, DeliveryMethod, OrderItem, OrderReceipt, OrderRequest, PaymentMethod,
    PriceQuote, PricingRequest,
};

/// Token identifying one pricing request.
///
/// Responses are only accepted for the most recently issued token:
/// when inputs change mid-flight, the newer request supersedes the
/// older one and the stale response is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingToken(u64);

/// One customer's path from cart to placed order.
///
/// Holds the checkout inputs (delivery method, voucher code, customer
/// details) and at most one *current* price quote. Any input change
/// drops the held quote, so a quote can only ever describe the inputs
/// as they are now; cart-content changes are reported the same way via
/// [`invalidate_quote`](CheckoutSession::invalidate_quote), typically
/// wired to a cart subscription.
#[derive(Default)]
pub struct CheckoutSession {
    delivery_method: DeliveryMethod,
    payment_method: PaymentMethod,
    voucher_code: String,
    customer: CustomerInfo,
    quote: Option<PriceQuote>,
    latest_token: u64,
}

impl CheckoutSession {
    /// Create a session with default delivery and payment methods.
    pub fn new() -> Self {
        Self::default()
    }

    /// The held authoritative quote, if one is current.
    pub fn quote(&self) -> Option<&PriceQuote> {
        self.quote.as_ref()
    }

    /// Whether a pricing request should be (re-)fired.
    pub fn needs_pricing(&self) -> bool {
        self.quote.is_none()
    }

    /// Current customer details.
    pub fn customer(&self) -> &CustomerInfo {
        &self.customer
    }

    /// Drop the held quote; the next submission requires re-pricing.
    /// Call this whenever the cart contents change.
    pub fn invalidate_quote(&mut self) {
        self.quote = None;
    }

    /// Change the delivery method. Invalidates the held quote.
    pub fn set_delivery_method(&mut self, method: DeliveryMethod) {
        if self.delivery_method != method {
            self.delivery_method = method;
            self.invalidate_quote();
        }
    }

    /// Change the payment method. Pricing does not depend on it, so
    /// the held quote stays valid.
    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.payment_method = method;
    }

    /// Change the voucher code. Invalidates the held quote.
    pub fn set_voucher_code(&mut self, code: impl Into<String>) {
        let code = code.into();
        if self.voucher_code != code {
            self.voucher_code = code;
            self.invalidate_quote();
        }
    }

    /// Replace the customer details. Invalidates the held quote.
    pub fn set_customer(&mut self, customer: CustomerInfo) {
        if self.customer != customer {
            self.customer = customer;
            self.invalidate_quote();
        }
    }

    /// The pricing payload for the current inputs.
    pub fn pricing_request(&self, cart: &CartState) -> PricingRequest {
        PricingRequest {
            items: cart.items.iter().map(OrderItem::for_pricing).collect(),
            voucher_code: self.voucher_trimmed().map(str::to_string),
            delivery_method: self.delivery_method,
        }
    }

    /// Issue a token for a pricing request about to be sent. Any
    /// previously issued token becomes stale.
    pub fn begin_pricing(&mut self) -> PricingToken {
        self.latest_token += 1;
        PricingToken(self.latest_token)
    }

    /// Record the outcome of a pricing request.
    ///
    /// A response for anything but the latest issued token is
    /// discarded: the inputs have moved on and treating it as
    /// authoritative would be a correctness bug. A rejection clears
    /// the held quote and surfaces the server's reason verbatim.
    pub fn resolve_pricing(
        &mut self,
        token: PricingToken,
        outcome: Result<PriceQuote, ServiceError>,
    ) -> Result<(), CheckoutError> {
        if token.0 != self.latest_token {
            tracing::debug!(
                token = token.0,
                latest = self.latest_token,
                "discarding stale pricing response"
            );
            return Ok(());
        }
        match outcome {
            Ok(quote) => {
                self.quote = Some(quote);
                Ok(())
            }
            Err(e) => {
                self.quote = None;
                Err(CheckoutError::PricingRejected(e.message().to_string()))
            }
        }
    }

    /// Fire a pricing request for the current inputs and hold its
    /// quote. This is the recomputation trigger: call it after every
    /// cart, delivery, or voucher change, and once more on an
    /// explicit "apply voucher".
    pub async fn request_quote(
        &mut self,
        pricing: &dyn PricingService,
        cart: &CartState,
    ) -> Result<&PriceQuote, CheckoutError> {
        let request = self.pricing_request(cart);
        let token = self.begin_pricing();
        let outcome = pricing.calculate(&request).await;
        self.resolve_pricing(token, outcome)?;
        self.quote.as_ref().ok_or(CheckoutError::QuoteMissing)
    }

    /// Explicit "apply voucher" action: set the code and re-price.
    pub async fn apply_voucher(
        &mut self,
        code: impl Into<String>,
        pricing: &dyn PricingService,
        cart: &CartState,
    ) -> Result<&PriceQuote, CheckoutError> {
        self.set_voucher_code(code);
        self.request_quote(pricing, cart).await
    }

    /// Submit the order.
    ///
    /// Fails fast, without any network call, when the cart is empty,
    /// required customer fields are blank, or no current quote is
    /// held. On success the cart store is cleared and the confirmation
    /// identifier returned; on failure the server's message is
    /// surfaced and the cart left untouched.
    pub async fn submit_order(
        &mut self,
        orders: &dyn OrderService,
        cart: &mut CartStore,
    ) -> Result<OrderReceipt, CheckoutError> {
        if cart.state().is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let missing = self.customer.missing_fields();
        if !missing.is_empty() {
            return Err(CheckoutError::ValidationFailed(missing.join(", ")));
        }
        let quote = self.quote.as_ref().ok_or(CheckoutError::QuoteMissing)?;

        // Only send the voucher when the quote actually discounted it.
        let voucher_code = if quote.has_discount() {
            self.voucher_trimmed().map(str::to_string)
        } else {
            None
        };
        let request = OrderRequest {
            items: cart.state().items.iter().map(OrderItem::for_order).collect(),
            voucher_code,
            delivery_method: self.delivery_method,
            customer_name: self.customer.name.clone(),
            customer_phone: self.customer.phone.clone(),
            customer_address: self.customer.address.clone(),
            customer_note: self.customer.note.clone(),
            payment_method: self.payment_method,
        };

        match orders.submit(&request).await {
            Ok(receipt) => {
                cart.clear();
                self.invalidate_quote();
                Ok(receipt)
            }
            Err(e) => Err(CheckoutError::SubmissionFailed(e.message().to_string())),
        }
    }

    fn voucher_trimmed(&self) -> Option<&str> {
        let code = self.voucher_code.trim();
        (!code.is_empty()).then_some(code)
    }
}
