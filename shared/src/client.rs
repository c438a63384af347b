//! Client-facing request/response DTOs
//!
//! Shapes exchanged with the storefront frontend and the admin console.
//! Entity models live in [`crate::models`]; everything here is transport.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::cake::{CakeConfiguration, PriceBreakdown};
use crate::models::pricing::Cents;

// ========== Auth ==========

/// Admin login payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Bearer token for the session-guarded admin endpoints
    pub token: String,
    pub username: String,
    /// Session expiry, Unix millis
    pub expires_at: i64,
}

/// Current-session info (`GET /api/auth/me`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub username: String,
    /// Session creation time, Unix millis
    pub logged_in_at: i64,
    /// Session expiry, Unix millis
    pub expires_at: i64,
}

// ========== Price quote ==========

/// Quote response: the flat breakdown fields plus an itemized `breakdown`
/// object, mirroring what the wizard's summary panel renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    #[serde(flatten)]
    pub prices: PriceBreakdown,
    pub breakdown: BTreeMap<String, Cents>,
}

impl From<PriceBreakdown> for QuoteResponse {
    fn from(prices: PriceBreakdown) -> Self {
        let breakdown = prices
            .itemized()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        Self { prices, breakdown }
    }
}

// ========== Checkout ==========

/// Checkout customer details
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// One cart line in a checkout request. Custom cakes are priced server-side
/// at checkout time; specialty items are looked up in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CheckoutItem {
    #[serde(rename_all = "camelCase")]
    Custom { config: CakeConfiguration },
    #[serde(rename_all = "camelCase")]
    Specialty {
        category: String,
        item_key: String,
        #[serde(default = "default_quantity")]
        quantity: i64,
    },
}

fn default_quantity() -> i64 {
    1
}

/// Checkout payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub customer: CustomerInfo,
    /// Requested pickup date (YYYY-MM-DD)
    pub pickup_date: Option<String>,
    pub items: Vec<CheckoutItem>,
}

/// Checkout result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub order_id: i64,
    pub reference: String,
    pub total_price: Cents,
}

// ========== Admin pricing ==========

/// Result of a successful pricing-document replacement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplacePricingResponse {
    pub message: String,
    /// Filename of the backup taken from the previous live document
    pub backup: String,
}

/// Admin status update for an order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: crate::models::order::OrderStatus,
}
