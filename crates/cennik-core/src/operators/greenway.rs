//! GreenWay Polska: tariff PDF with three price columns per row.

use rust_decimal::Decimal;

use crate::fallback::{price_map, FallbackPricing, FallbackTier};
use crate::models::TariffClass;
use crate::operators::{OperatorSpec, SourceSpec, TierSpec};
use crate::rules::{CaptureSlot, FeeRule, PriceRule};

const PRICELIST_URL: &str = "https://data.greenway.sk/clientzone/pl/GWP_pricelist_PL.pdf";

/// GreenWay extraction spec.
///
/// The PDF table rows read "AC 1,60 zł 1,75 zł 1,95 zł 2,05 zł" with
/// columns Max, Plus, Standard, one-off; one row match is split across
/// the three subscription tiers. DC power bands are not distinguished,
/// so the DC price spreads over dc_mid and hpc.
pub fn spec() -> OperatorSpec {
    let price_rules = vec![
        PriceRule::new(
            r"AC[^0-9]*(\d+[,.]\d+)[^0-9]+(\d+[,.]\d+)[^0-9]+(\d+[,.]\d+)",
            vec![
                CaptureSlot { group: 1, tier: "max", class: TariffClass::Ac },
                CaptureSlot { group: 2, tier: "plus", class: TariffClass::Ac },
                CaptureSlot { group: 3, tier: "standard", class: TariffClass::Ac },
            ],
        ),
        PriceRule::new(
            r"DC[^0-9]*(\d+[,.]\d+)[^0-9]+(\d+[,.]\d+)[^0-9]+(\d+[,.]\d+)",
            vec![
                CaptureSlot { group: 1, tier: "max", class: TariffClass::Dc },
                CaptureSlot { group: 2, tier: "plus", class: TariffClass::Dc },
                CaptureSlot { group: 3, tier: "standard", class: TariffClass::Dc },
            ],
        ),
    ];

    let fee_rule = FeeRule::new(
        r"(?i)Miesięczna opłata[^0-9]*(\d+[,.]\d+)[^0-9]+(\d+[,.]\d+)",
        vec![(1, "max"), (2, "plus")],
    );

    OperatorSpec {
        id: "greenway",
        name: "GreenWay",
        color: "#10b981",
        source: SourceSpec::Pdf { url: PRICELIST_URL },
        price_rules,
        fee_rule: Some(fee_rule),
        promo: None,
        tiers: vec![
            TierSpec {
                key: "standard",
                name: "Energia Standard",
                paid: false,
                min_classes: 2,
                benefits: &[],
            },
            TierSpec {
                key: "plus",
                name: "Energia Plus",
                paid: true,
                min_classes: 2,
                benefits: &["Dla średniego zużycia 50-200 kWh/mies"],
            },
            TierSpec {
                key: "max",
                name: "Energia Max",
                paid: true,
                min_classes: 2,
                benefits: &["Dla wysokiego zużycia >200 kWh/mies"],
            },
        ],
        spread_dc: true,
        fallback: FallbackPricing {
            tiers: vec![
                FallbackTier {
                    key: "standard",
                    monthly_cost: Decimal::ZERO,
                    prices: price_map(&[
                        (TariffClass::Ac, Decimal::new(195, 2)),
                        (TariffClass::Dc, Decimal::new(315, 2)),
                        (TariffClass::DcMid, Decimal::new(315, 2)),
                        (TariffClass::Hpc, Decimal::new(315, 2)),
                    ]),
                },
                FallbackTier {
                    key: "plus",
                    monthly_cost: Decimal::new(2999, 2),
                    prices: price_map(&[
                        (TariffClass::Ac, Decimal::new(175, 2)),
                        (TariffClass::Dc, Decimal::new(240, 2)),
                        (TariffClass::DcMid, Decimal::new(240, 2)),
                        (TariffClass::Hpc, Decimal::new(240, 2)),
                    ]),
                },
                FallbackTier {
                    key: "max",
                    monthly_cost: Decimal::new(7999, 2),
                    prices: price_map(&[
                        (TariffClass::Ac, Decimal::new(160, 2)),
                        (TariffClass::Dc, Decimal::new(210, 2)),
                        (TariffClass::DcMid, Decimal::new(210, 2)),
                        (TariffClass::Hpc, Decimal::new(210, 2)),
                    ]),
                },
            ],
            promotions: vec![],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::match_prices;
    use pretty_assertions::assert_eq;

    const PDF_TEXT: &str = "Cennik GreenWay Polska\n\
        AC 1,60 zł  1,75 zł  1,95 zł  2,05 zł\n\
        DC 2,10 zł  2,40 zł  3,15 zł  3,40 zł\n\
        Miesięczna opłata 79,99 zł 29,99 zł 0,00 zł";

    #[test]
    fn ac_row_splits_into_three_tiers() {
        let spec = spec();
        let grid = match_prices(&spec.price_rules, spec.fee_rule.as_ref(), PDF_TEXT);

        assert_eq!(grid.prices["max"][&TariffClass::Ac], Decimal::new(160, 2));
        assert_eq!(grid.prices["plus"][&TariffClass::Ac], Decimal::new(175, 2));
        assert_eq!(grid.prices["standard"][&TariffClass::Ac], Decimal::new(195, 2));
    }

    #[test]
    fn fee_row_covers_paid_tiers() {
        let spec = spec();
        let grid = match_prices(&spec.price_rules, spec.fee_rule.as_ref(), PDF_TEXT);

        assert_eq!(grid.fees["max"], Decimal::new(7999, 2));
        assert_eq!(grid.fees["plus"], Decimal::new(2999, 2));
        assert!(grid.fees.get("standard").is_none());
    }
}
