//! Cake Configuration & Price Breakdown

use serde::{Deserialize, Serialize};

use super::pricing::Cents;
use super::serde_helpers;

/// The customer's wizard selections for a custom cake.
///
/// Counts arrive from the browser and are coerced leniently (strings, null
/// and garbage become 0); negative counts clamp to 0 at quote time. Unknown
/// option keys are not an error, they simply price as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CakeConfiguration {
    #[serde(deserialize_with = "serde_helpers::lenient_count")]
    pub six_inch_cakes: i64,
    #[serde(deserialize_with = "serde_helpers::lenient_count")]
    pub eight_inch_cakes: i64,
    /// Layer count, 1–3 in the wizard; values below 1 are treated as 1
    #[serde(deserialize_with = "serde_helpers::lenient_count")]
    pub layers: i64,
    pub shape: Option<String>,
    /// One flavor per layer
    pub flavors: Vec<String>,
    pub icing_type: Option<String>,
    pub decorations: Vec<String>,
    pub dietary_restrictions: Vec<String>,
    /// Promotional template key, when the wizard started from a template
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    /// Free-text message piped onto the cake; never priced
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CakeConfiguration {
    /// Six-inch count, clamped non-negative.
    pub fn six_inch(&self) -> i64 {
        self.six_inch_cakes.max(0)
    }

    /// Eight-inch count, clamped non-negative.
    pub fn eight_inch(&self) -> i64 {
        self.eight_inch_cakes.max(0)
    }

    /// Total cakes ordered across both sizes.
    pub fn cake_count(&self) -> i64 {
        self.six_inch() + self.eight_inch()
    }

    /// Effective layer count (at least 1).
    pub fn layer_count(&self) -> i64 {
        self.layers.max(1)
    }
}

/// The calculator's itemized output, one integer-cents field per category.
///
/// `total_price` always equals the sum of the other price fields; on the
/// promotional template path every field except `base_price` and
/// `template_price` is exactly 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PriceBreakdown {
    pub base_price: Cents,
    pub layer_price: Cents,
    pub flavor_price: Cents,
    pub shape_price: Cents,
    pub decoration_total: Cents,
    pub icing_price: Cents,
    pub dietary_upcharge: Cents,
    pub template_price: Cents,
    pub cake_quantity: i64,
    pub total_price: Cents,
}

impl PriceBreakdown {
    /// Per-category line items for the response `breakdown` object.
    pub fn itemized(&self) -> std::collections::BTreeMap<&'static str, Cents> {
        let mut items = std::collections::BTreeMap::new();
        items.insert("basePrice", self.base_price);
        items.insert("layerPrice", self.layer_price);
        items.insert("flavorPrice", self.flavor_price);
        items.insert("shapePrice", self.shape_price);
        items.insert("decorationTotal", self.decoration_total);
        items.insert("icingPrice", self.icing_price);
        items.insert("dietaryUpcharge", self.dietary_upcharge);
        items.insert("templatePrice", self.template_price);
        items
    }
}
