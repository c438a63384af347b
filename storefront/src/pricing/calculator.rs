//! Price Calculator
//!
//! Turns a cake configuration and the current pricing document into an
//! itemized breakdown. All arithmetic is integer cents; the function is pure
//! and performs no I/O.
//!
//! Lookup semantics: every option key (flavor, shape, icing, decoration,
//! dietary) is looked up in the document's map and prices as **zero when
//! absent**. Unpriced extras are free, not rejected; the storefront relies
//! on this when the admin adds a wizard option before pricing it.

use shared::models::{CakeConfiguration, Cents, PriceBreakdown, PricingDocument};

/// Reserved template key for the seasonal promotion.
pub const PROMO_TEMPLATE_KEY: &str = "fathers-day";

/// Legacy numeric ids the old frontend sent for the same template. Matched
/// forever so stale clients keep getting the promotional price.
const PROMO_LEGACY_ALIASES: [&str; 2] = ["15", "16"];

const SIZE_6INCH: &str = "6inch";
const SIZE_8INCH: &str = "8inch";

/// Quote failure. The only input the calculator rejects is an empty order;
/// everything else sanitizes to a permissive default.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum QuoteError {
    #[error("must select at least one cake")]
    NoCakesSelected,
}

impl From<QuoteError> for crate::utils::AppError {
    fn from(err: QuoteError) -> Self {
        crate::utils::AppError::validation(err.to_string())
    }
}

fn is_promo_template(template: &str) -> bool {
    template == PROMO_TEMPLATE_KEY || PROMO_LEGACY_ALIASES.contains(&template)
}

fn lookup(map: &std::collections::BTreeMap<String, Cents>, key: &str) -> Cents {
    // Absent keys price as zero; negative leaves in a hand-edited document
    // clamp to zero rather than producing a discount.
    map.get(key).copied().unwrap_or(0).max(0)
}

/// Compute the price breakdown for a configuration against a document.
///
/// Fails only when no cakes are selected. The promotional template is an
/// explicit early-return branch: base price by size plus the template's
/// per-cake price, every per-feature field zeroed.
pub fn quote(
    config: &CakeConfiguration,
    doc: &PricingDocument,
) -> Result<PriceBreakdown, QuoteError> {
    let six = config.six_inch();
    let eight = config.eight_inch();
    let count = six + eight;
    if count == 0 {
        return Err(QuoteError::NoCakesSelected);
    }

    let base_price =
        six * doc.base_price(SIZE_6INCH).max(0) + eight * doc.base_price(SIZE_8INCH).max(0);

    // Seasonal promotion: flat template price on top of the base, nothing
    // else billed. Not a generic discount mechanism.
    if let Some(template) = config.template.as_deref()
        && is_promo_template(template)
    {
        let template_price = lookup(&doc.template_prices, PROMO_TEMPLATE_KEY) * count;
        return Ok(PriceBreakdown {
            base_price,
            template_price,
            cake_quantity: count,
            total_price: base_price + template_price,
            ..PriceBreakdown::default()
        });
    }

    let layers = config.layer_count();
    let layer_price = if layers > 1 {
        (layers - 1) * doc.layer_price.max(0) * count
    } else {
        0
    };

    let flavor_price: Cents = config
        .flavors
        .iter()
        .map(|f| lookup(&doc.flavor_prices, f) * count)
        .sum();

    let shape_price = config
        .shape
        .as_deref()
        .map(|s| lookup(&doc.shape_prices, s) * count)
        .unwrap_or(0);

    let icing_price = config
        .icing_type
        .as_deref()
        .map(|i| lookup(&doc.icing_types, i) * count)
        .unwrap_or(0);

    let decoration_total: Cents = config
        .decorations
        .iter()
        .map(|d| lookup(&doc.decoration_prices, d) * count)
        .sum();

    let dietary_upcharge: Cents = config
        .dietary_restrictions
        .iter()
        .map(|d| lookup(&doc.dietary_prices, d) * count)
        .sum();

    let total_price = base_price
        + layer_price
        + flavor_price
        + shape_price
        + icing_price
        + decoration_total
        + dietary_upcharge;

    Ok(PriceBreakdown {
        base_price,
        layer_price,
        flavor_price,
        shape_price,
        decoration_total,
        icing_price,
        dietary_upcharge,
        template_price: 0,
        cake_quantity: count,
        total_price,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn doc() -> PricingDocument {
        let mut d = PricingDocument::default();
        d.base_prices = BTreeMap::from([("6inch".into(), 9000), ("8inch".into(), 15500)]);
        d.layer_price = 1500;
        d.flavor_prices = BTreeMap::from([("butter".into(), 0), ("ube".into(), 800)]);
        d.shape_prices = BTreeMap::from([("round".into(), 0), ("heart".into(), 1500)]);
        d.icing_types = BTreeMap::from([("butter".into(), 0), ("fondant".into(), 2500)]);
        d.decoration_prices = BTreeMap::from([("sprinkles".into(), 300)]);
        d.dietary_prices = BTreeMap::from([("vegan".into(), 2500)]);
        d.template_prices = BTreeMap::from([("fathers-day".into(), 1000)]);
        d
    }

    fn base_config() -> CakeConfiguration {
        CakeConfiguration {
            six_inch_cakes: 1,
            eight_inch_cakes: 0,
            layers: 1,
            shape: Some("round".into()),
            flavors: vec!["butter".into()],
            icing_type: Some("butter".into()),
            ..CakeConfiguration::default()
        }
    }

    #[test]
    fn zero_cakes_is_the_only_failure() {
        let mut config = base_config();
        config.six_inch_cakes = 0;
        config.eight_inch_cakes = 0;
        assert_eq!(quote(&config, &doc()), Err(QuoteError::NoCakesSelected));

        // Even with every other field garbage, zero count still dominates.
        config.flavors = vec!["nonexistent".into(); 10];
        config.layers = 99;
        assert_eq!(quote(&config, &doc()), Err(QuoteError::NoCakesSelected));

        // Negative counts clamp to zero and fail the same way.
        config.six_inch_cakes = -3;
        config.eight_inch_cakes = -1;
        assert_eq!(quote(&config, &doc()), Err(QuoteError::NoCakesSelected));
    }

    #[test]
    fn single_six_inch_round_butter_is_base_only() {
        let b = quote(&base_config(), &doc()).unwrap();
        assert_eq!(b.base_price, 9000);
        assert_eq!(b.total_price, 9000);
        assert_eq!(b.cake_quantity, 1);
    }

    #[test]
    fn three_layers_charge_two_extra_layers() {
        let mut config = base_config();
        config.layers = 3;
        let b = quote(&config, &doc()).unwrap();
        assert_eq!(b.layer_price, 2 * 1500);
        assert_eq!(b.total_price, 9000 + 2 * 1500);
    }

    #[test]
    fn per_cake_options_scale_with_quantity() {
        let mut config = base_config();
        config.six_inch_cakes = 2;
        config.eight_inch_cakes = 1;
        config.flavors = vec!["ube".into()];
        config.shape = Some("heart".into());
        config.icing_type = Some("fondant".into());
        config.decorations = vec!["sprinkles".into()];
        config.dietary_restrictions = vec!["vegan".into()];
        let b = quote(&config, &doc()).unwrap();
        assert_eq!(b.base_price, 2 * 9000 + 15500);
        assert_eq!(b.flavor_price, 800 * 3);
        assert_eq!(b.shape_price, 1500 * 3);
        assert_eq!(b.icing_price, 2500 * 3);
        assert_eq!(b.decoration_total, 300 * 3);
        assert_eq!(b.dietary_upcharge, 2500 * 3);
        assert_eq!(b.cake_quantity, 3);
    }

    #[test]
    fn unknown_keys_price_as_zero() {
        let mut config = base_config();
        config.flavors = vec!["unobtainium".into(), "butter".into()];
        config.shape = Some("dodecahedron".into());
        config.icing_type = Some("mystery".into());
        config.decorations = vec!["lasers".into()];
        config.dietary_restrictions = vec!["carnivore".into()];
        let b = quote(&config, &doc()).unwrap();
        assert_eq!(b.flavor_price, 0);
        assert_eq!(b.shape_price, 0);
        assert_eq!(b.icing_price, 0);
        assert_eq!(b.decoration_total, 0);
        assert_eq!(b.dietary_upcharge, 0);
        assert_eq!(b.total_price, 9000);
    }

    #[test]
    fn total_is_sum_of_itemized_fields() {
        let mut config = base_config();
        config.six_inch_cakes = 2;
        config.layers = 2;
        config.flavors = vec!["ube".into()];
        config.decorations = vec!["sprinkles".into()];
        let b = quote(&config, &doc()).unwrap();
        let sum = b.base_price
            + b.layer_price
            + b.flavor_price
            + b.shape_price
            + b.decoration_total
            + b.icing_price
            + b.dietary_upcharge;
        assert_eq!(b.total_price, sum);
        assert_eq!(b.template_price, 0);
    }

    #[test]
    fn quoting_twice_is_deterministic() {
        let config = base_config();
        let d = doc();
        let first = quote(&config, &d).unwrap();
        let second = quote(&config, &d).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn promo_template_bypasses_per_feature_pricing() {
        let mut config = base_config();
        config.six_inch_cakes = 2;
        config.eight_inch_cakes = 1;
        config.layers = 3;
        config.flavors = vec!["ube".into()];
        config.shape = Some("heart".into());
        config.icing_type = Some("fondant".into());
        config.decorations = vec!["sprinkles".into()];
        config.dietary_restrictions = vec!["vegan".into()];
        config.template = Some("fathers-day".into());

        let b = quote(&config, &doc()).unwrap();
        assert_eq!(b.base_price, 2 * 9000 + 15500); // 33500
        assert_eq!(b.template_price, 3 * 1000);
        assert_eq!(b.total_price, 36500);
        assert_eq!(b.layer_price, 0);
        assert_eq!(b.flavor_price, 0);
        assert_eq!(b.shape_price, 0);
        assert_eq!(b.icing_price, 0);
        assert_eq!(b.decoration_total, 0);
        assert_eq!(b.dietary_upcharge, 0);
        assert_eq!(b.cake_quantity, 3);
    }

    #[test]
    fn legacy_numeric_aliases_hit_the_promo_branch() {
        for alias in ["15", "16"] {
            let mut config = base_config();
            config.template = Some(alias.into());
            config.decorations = vec!["sprinkles".into()];
            let b = quote(&config, &doc()).unwrap();
            assert_eq!(b.template_price, 1000);
            assert_eq!(b.decoration_total, 0);
            assert_eq!(b.total_price, 9000 + 1000);
        }
    }

    #[test]
    fn non_promo_template_prices_normally() {
        let mut config = base_config();
        config.template = Some("mothers-day".into());
        config.decorations = vec!["sprinkles".into()];
        let b = quote(&config, &doc()).unwrap();
        // Not the reserved key: normal per-feature path, template ignored.
        assert_eq!(b.template_price, 0);
        assert_eq!(b.decoration_total, 300);
        assert_eq!(b.total_price, 9300);
    }

    #[test]
    fn promo_with_missing_template_price_still_charges_base() {
        let mut d = doc();
        d.template_prices.clear();
        let mut config = base_config();
        config.template = Some("fathers-day".into());
        let b = quote(&config, &d).unwrap();
        assert_eq!(b.template_price, 0);
        assert_eq!(b.total_price, 9000);
    }

    #[test]
    fn negative_document_values_clamp_to_zero() {
        // A hand-edited document with a negative leaf must never produce a
        // negative line item.
        let mut d = doc();
        d.decoration_prices.insert("sprinkles".into(), -500);
        d.layer_price = -100;
        let mut config = base_config();
        config.layers = 3;
        config.decorations = vec!["sprinkles".into()];
        let b = quote(&config, &d).unwrap();
        assert_eq!(b.decoration_total, 0);
        assert_eq!(b.layer_price, 0);
    }
}
