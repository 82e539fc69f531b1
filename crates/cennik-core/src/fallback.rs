//! Static, hand-maintained default pricing per operator.
//!
//! These values are the guarantee that a pipeline run never produces an
//! empty operator record: whenever retrieval or extraction comes up
//! short, the documented defaults below step in. Keep them in sync with
//! the operators' published tariffs.

use rust_decimal::Decimal;

use crate::models::{PriceMap, Promotion, TariffClass};

/// Default values for one subscription tier.
#[derive(Debug, Clone)]
pub struct FallbackTier {
    /// Tier key, matching a `TierSpec` of the same operator.
    pub key: &'static str,
    /// Monthly fee in PLN.
    pub monthly_cost: Decimal,
    /// Documented default per-kWh prices, all covered classes listed.
    pub prices: PriceMap,
}

/// Complete default dataset for an operator.
///
/// Materialized records built from this pass the same invariants as
/// extracted ones: at least one subscription, non-negative prices,
/// ordered validity ranges.
#[derive(Debug, Clone)]
pub struct FallbackPricing {
    pub tiers: Vec<FallbackTier>,
    /// Promotions included only on whole-operator fallback.
    pub promotions: Vec<Promotion>,
}

impl FallbackPricing {
    /// Look up the default values for a tier.
    pub fn tier(&self, key: &str) -> Option<&FallbackTier> {
        self.tiers.iter().find(|t| t.key == key)
    }
}

/// Build a price map from (class, price) pairs.
pub fn price_map(pairs: &[(TariffClass, Decimal)]) -> PriceMap {
    pairs.iter().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_lookup_by_key() {
        let fallback = FallbackPricing {
            tiers: vec![FallbackTier {
                key: "standard",
                monthly_cost: Decimal::ZERO,
                prices: price_map(&[(TariffClass::Ac, Decimal::new(195, 2))]),
            }],
            promotions: vec![],
        };

        assert!(fallback.tier("standard").is_some());
        assert!(fallback.tier("plus").is_none());
    }
}
