//! Pricing Module
//!
//! The price calculator (pure, deterministic) and the document store it
//! reads from. The calculator never touches disk; handlers load the current
//! [`shared::models::PricingDocument`] through [`PricingStore`] and pass it in.

mod calculator;
mod store;

pub use calculator::{PROMO_TEMPLATE_KEY, QuoteError, quote};
pub use store::{PricingStore, PricingStoreError, validate_document};
