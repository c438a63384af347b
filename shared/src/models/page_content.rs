//! Page Content Model (keyed copy blocks)
//!
//! 页面文案按 slug 存储为 JSON，管理后台整块替换。

use serde::{Deserialize, Serialize};

/// A page's editable copy, keyed by slug ("home", "about", "faq", ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContent {
    pub slug: String,
    /// Arbitrary JSON the frontend renders
    pub content: serde_json::Value,
    /// Unix millis
    pub updated_at: i64,
}

/// Replace-content payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageContentUpdate {
    pub content: serde_json::Value,
}
