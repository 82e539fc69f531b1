//! Assembly of operator records from matcher output or fallback data.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::models::{OperatorPricing, PriceMap, Promotion, Subscription, TariffClass};
use crate::operators::{OperatorSpec, TierSpec};
use crate::rules::PriceGrid;

/// Stable subscription identifier: `{operator_id}_{tier}`.
pub fn subscription_id(operator_id: &str, tier_key: &str) -> String {
    format!("{}_{}", operator_id, tier_key)
}

/// Build a fully-populated operator record from matcher output.
///
/// Tiers come out in the spec's fixed order regardless of the order they
/// were discovered in the text. A tier whose captured fields fall below
/// its threshold is replaced by its fallback values alone; the rest of
/// the record keeps the extracted data.
pub fn build_record(
    spec: &OperatorSpec,
    grid: &PriceGrid,
    promotion: Option<Promotion>,
) -> OperatorPricing {
    let subscriptions = spec
        .tiers
        .iter()
        .filter_map(|tier| {
            extracted_tier(spec, tier, grid).or_else(|| {
                debug!(operator = spec.id, tier = tier.key, "tier under threshold, using fallback");
                fallback_tier(spec, tier)
            })
        })
        .collect();

    OperatorPricing {
        name: spec.name.to_string(),
        color: spec.color.to_string(),
        subscriptions,
        promotions: promotion.into_iter().collect(),
    }
}

/// The whole-operator fallback record, used on hard pipeline failures.
///
/// Unlike per-tier fallback this also carries the documented default
/// promotions.
pub fn fallback_record(spec: &OperatorSpec) -> OperatorPricing {
    OperatorPricing {
        name: spec.name.to_string(),
        color: spec.color.to_string(),
        subscriptions: spec
            .tiers
            .iter()
            .filter_map(|tier| fallback_tier(spec, tier))
            .collect(),
        promotions: spec.fallback.promotions.clone(),
    }
}

fn extracted_tier(spec: &OperatorSpec, tier: &TierSpec, grid: &PriceGrid) -> Option<Subscription> {
    let captured = grid.prices.get(tier.key)?;
    if captured.len() < tier.min_classes {
        return None;
    }

    let monthly_cost = if tier.paid {
        // A paid tier without its fee row is incomplete
        *grid.fees.get(tier.key)?
    } else {
        Decimal::ZERO
    };

    let mut prices = captured.clone();
    if spec.spread_dc {
        spread_dc(&mut prices);
    }

    Some(Subscription {
        id: subscription_id(spec.id, tier.key),
        name: tier.name.to_string(),
        monthly_cost,
        prices,
        benefits: tier.benefits.iter().map(|b| b.to_string()).collect(),
    })
}

fn fallback_tier(spec: &OperatorSpec, tier: &TierSpec) -> Option<Subscription> {
    let Some(defaults) = spec.fallback.tier(tier.key) else {
        warn!(operator = spec.id, tier = tier.key, "no fallback data for tier");
        return None;
    };

    Some(Subscription {
        id: subscription_id(spec.id, tier.key),
        name: tier.name.to_string(),
        monthly_cost: defaults.monthly_cost,
        prices: defaults.prices.clone(),
        benefits: tier.benefits.iter().map(|b| b.to_string()).collect(),
    })
}

/// Copy the DC price into dc_mid and hpc when the source has a single
/// DC figure.
fn spread_dc(prices: &mut PriceMap) {
    if let Some(dc) = prices.get(&TariffClass::Dc).copied() {
        prices.entry(TariffClass::DcMid).or_insert(dc);
        prices.entry(TariffClass::Hpc).or_insert(dc);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators;
    use crate::rules::match_prices;
    use pretty_assertions::assert_eq;

    const GREENWAY_TEXT: &str = "AC 1,60 zł 1,75 zł 1,95 zł 2,05 zł\n\
                                 DC 2,10 zł 2,40 zł 3,15 zł 3,40 zł\n\
                                 Miesięczna opłata 79,99 zł 29,99 zł";

    #[test]
    fn tiers_come_out_in_fixed_order() {
        let spec = operators::greenway::spec();
        let grid = match_prices(&spec.price_rules, spec.fee_rule.as_ref(), GREENWAY_TEXT);
        let record = build_record(&spec, &grid, None);

        let ids: Vec<&str> = record.subscriptions.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["greenway_standard", "greenway_plus", "greenway_max"]);
    }

    #[test]
    fn extracted_tier_gets_spread_dc_and_fee() {
        let spec = operators::greenway::spec();
        let grid = match_prices(&spec.price_rules, spec.fee_rule.as_ref(), GREENWAY_TEXT);
        let record = build_record(&spec, &grid, None);

        let plus = &record.subscriptions[1];
        assert_eq!(plus.monthly_cost, Decimal::new(2999, 2));
        assert_eq!(plus.prices[&TariffClass::Dc], Decimal::new(240, 2));
        assert_eq!(plus.prices[&TariffClass::DcMid], Decimal::new(240, 2));
        assert_eq!(plus.prices[&TariffClass::Hpc], Decimal::new(240, 2));
    }

    #[test]
    fn missing_fee_row_drops_paid_tiers_to_fallback() {
        let spec = operators::greenway::spec();
        let text = "AC 1,60 zł 1,75 zł 1,95 zł 2,05 zł\nDC 2,10 zł 2,40 zł 3,15 zł 3,40 zł";
        let grid = match_prices(&spec.price_rules, spec.fee_rule.as_ref(), text);
        let record = build_record(&spec, &grid, None);

        // Standard is extracted, paid tiers use the documented defaults
        let standard = &record.subscriptions[0];
        assert_eq!(standard.prices[&TariffClass::Ac], Decimal::new(195, 2));

        let plus = &record.subscriptions[1];
        assert_eq!(plus.monthly_cost, Decimal::new(2999, 2));
        assert_eq!(plus.prices[&TariffClass::Ac], Decimal::new(175, 2));
    }

    #[test]
    fn empty_grid_yields_full_fallback_subscriptions() {
        let spec = operators::greenway::spec();
        let record = build_record(&spec, &PriceGrid::default(), None);

        assert_eq!(record.subscriptions.len(), 3);
        assert_eq!(
            record.subscriptions[0].prices[&TariffClass::Dc],
            Decimal::new(315, 2)
        );
        // Soft insufficiency never pulls in fallback promotions
        assert!(record.promotions.is_empty());
    }

    #[test]
    fn fallback_record_includes_default_promotions() {
        let spec = operators::orlen::spec();
        let record = fallback_record(&spec);

        assert_eq!(record.subscriptions.len(), 1);
        assert_eq!(record.promotions.len(), 1);
        assert_eq!(record.promotions[0].valid_from.to_string(), "2025-10-02");
        assert!(record.validate().is_empty());
    }
}
