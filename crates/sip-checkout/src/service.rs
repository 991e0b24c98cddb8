//! Async seams for the remote pricing and order-submission services.

use async_trait::async_trait;
use sip_core::checkout::{OrderReceipt, OrderRequest, PriceQuote, PricingRequest};
use thiserror::Error;

/// Failure reported by a remote service call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The service processed the request and refused it, with a
    /// human-readable reason (e.g. "invalid voucher").
    #[error("{0}")]
    Rejected(String),

    /// The request never completed (network or server failure).
    #[error("network error: {0}")]
    Transport(String),
}

impl ServiceError {
    /// The user-facing message for this failure.
    pub fn message(&self) -> &str {
        match self {
            ServiceError::Rejected(msg) | ServiceError::Transport(msg) => msg,
        }
    }
}

/// The remote pricing collaborator.
///
/// Computes the authoritative order total for a set of items, a
/// delivery method, and an optional voucher code.
#[async_trait]
pub trait PricingService: Send + Sync {
    /// Price the given request.
    async fn calculate(&self, request: &PricingRequest) -> Result<PriceQuote, ServiceError>;
}

/// The remote order-submission collaborator.
#[async_trait]
pub trait OrderService: Send + Sync {
    /// Submit the order, returning its confirmation identifier.
    async fn submit(&self, request: &OrderRequest) -> Result<OrderReceipt, ServiceError>;
}
