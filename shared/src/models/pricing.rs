//! Pricing Document Model
//!
//! 定价文档：所有可计价属性的单一 JSON 记录。
//!
//! 每次报价都从磁盘读取最新文档（无缓存），管理员的修改对下一次
//! 计算立即生效。所有价格一律为非负整数（美分），不存在小数舍入问题。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Integer cents. All monetary arithmetic in the workspace uses this alias.
pub type Cents = i64;

/// The live pricing document.
///
/// Every field defaults so a partial or older document still deserializes;
/// missing sections simply price as zero (permissive reads). Maps are
/// `BTreeMap` so serialization order is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PricingDocument {
    /// Base price per cake size ("6inch", "8inch")
    pub base_prices: BTreeMap<String, Cents>,
    /// Per-extra-layer price (applies per cake, layers beyond the first)
    pub layer_price: Cents,
    /// Per-cake flavor surcharges
    pub flavor_prices: BTreeMap<String, Cents>,
    /// Per-cake shape surcharges
    pub shape_prices: BTreeMap<String, Cents>,
    /// Per-cake icing surcharges
    pub icing_types: BTreeMap<String, Cents>,
    /// Per-cake decoration surcharges
    pub decoration_prices: BTreeMap<String, Cents>,
    /// Per-cake dietary-restriction surcharges
    pub dietary_prices: BTreeMap<String, Cents>,
    /// Per-cake prices for promotional templates
    pub template_prices: BTreeMap<String, Cents>,
    /// Fixed-price specialty catalog: category -> item key -> item
    pub cakes: BTreeMap<String, BTreeMap<String, SpecialtyCake>>,
}

impl PricingDocument {
    /// Base price for a size key, 0 when unpriced.
    pub fn base_price(&self, size: &str) -> Cents {
        self.base_prices.get(size).copied().unwrap_or(0)
    }

    /// Look up a specialty catalog item.
    pub fn specialty(&self, category: &str, item_key: &str) -> Option<&SpecialtyCake> {
        self.cakes.get(category).and_then(|c| c.get(item_key))
    }
}

/// A named fixed-price item in the specialty catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecialtyCake {
    pub name: String,
    pub price: Cents,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// One entry in the admin backup listing, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingBackupInfo {
    /// Backup file name (timestamp-tagged)
    pub filename: String,
    /// Creation time, Unix millis
    pub timestamp: i64,
    /// File size in bytes
    pub size: u64,
}
