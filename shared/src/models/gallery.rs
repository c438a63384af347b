//! Gallery Item Model

use serde::{Deserialize, Serialize};

/// Gallery entry shown on the storefront (photo or linked Instagram post)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct GalleryItem {
    pub id: i64,
    pub title: String,
    pub image_url: String,
    pub instagram_url: Option<String>,
    /// Sort position, ascending
    pub position: i64,
    /// Unix millis
    pub created_at: i64,
}

/// Create gallery item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryItemCreate {
    pub title: String,
    pub image_url: String,
    pub instagram_url: Option<String>,
    pub position: Option<i64>,
}

/// Update gallery item payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryItemUpdate {
    pub title: Option<String>,
    pub image_url: Option<String>,
    pub instagram_url: Option<String>,
    pub position: Option<i64>,
}
