//! Shared types for the bakehouse storefront
//!
//! Common types used across crates: entity models, client-facing
//! request/response DTOs and small utility helpers.

pub mod client;
pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
