//! Contact Message Model

use serde::{Deserialize, Serialize};

/// A submitted contact-form message
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ContactMessage {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    /// Unix millis
    pub created_at: i64,
}

/// Contact-form submission payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessageCreate {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
}
