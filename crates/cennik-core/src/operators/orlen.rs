//! Orlen Charge: web price list with an optional promotional page.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::fallback::{price_map, FallbackPricing, FallbackTier};
use crate::models::{Promotion, TariffClass};
use crate::operators::{OperatorSpec, SourceSpec, TierSpec};
use crate::rules::{CaptureSlot, PriceRule, PromoRule, PromoSpec};

const STANDARD_URL: &str = "https://orlencharge.pl/cennik/";
const PROMO_URL: &str = "https://orlencharge.pl/cennik-promo/";

const PROMO_NAME: &str = "Promocja cenowa -25%";
const PROMO_CONDITIONS: &[&str] = &["Obowiązuje dla wszystkich użytkowników"];

/// Orlen Charge extraction spec.
///
/// The promotional page lists two price columns per row (standard,
/// promo); the plain price list has one. Four DC power bands map onto
/// dc, dc_mid and hpc.
pub fn spec() -> OperatorSpec {
    let price_rules = vec![
        single(r"(?i)AC[^0-9]*(\d+[,.]\d+)\s+PLN/kWh", TariffClass::Ac),
        single(r"(?i)DC[^0-9]*≤\s*50[^0-9]+(\d+[,.]\d+)\s+PLN/kWh", TariffClass::Dc),
        single(r"(?i)DC[^0-9]+50[^0-9]+125[^0-9]+(\d+[,.]\d+)\s+PLN/kWh", TariffClass::DcMid),
        single(r"(?i)DC[^0-9]+>\s*125[^0-9]+(\d+[,.]\d+)\s+PLN/kWh", TariffClass::Hpc),
    ];

    let promo = PromoSpec {
        name: PROMO_NAME,
        rules: vec![
            PromoRule::new(r"(?is)AC\s+(\d+[,.]\d+)\s+PLN/kWh\s+(\d+[,.]\d+)", TariffClass::Ac),
            PromoRule::new(
                r"(?is)DC[^0-9]*≤\s*50[^0-9]+(\d+[,.]\d+)\s+PLN/kWh\s+(\d+[,.]\d+)",
                TariffClass::Dc,
            ),
            PromoRule::new(
                r"(?is)DC[^0-9]+50[^0-9]+125[^0-9]+(\d+[,.]\d+)\s+PLN/kWh\s+(\d+[,.]\d+)",
                TariffClass::DcMid,
            ),
            PromoRule::new(
                r"(?is)DC[^0-9]+>\s*125[^0-9]+(\d+[,.]\d+)\s+PLN/kWh\s+(\d+[,.]\d+)",
                TariffClass::Hpc,
            ),
        ],
        min_prices: 4,
        conditions: PROMO_CONDITIONS,
    };

    OperatorSpec {
        id: "orlen",
        name: "Orlen Charge",
        color: "#ef4444",
        source: SourceSpec::Web {
            standard_url: STANDARD_URL,
            promo_url: Some(PROMO_URL),
        },
        price_rules,
        fee_rule: None,
        promo: Some(promo),
        tiers: vec![TierSpec {
            key: "standard",
            name: "Bez abonamentu",
            paid: false,
            min_classes: 1,
            benefits: &[],
        }],
        spread_dc: false,
        fallback: FallbackPricing {
            tiers: vec![FallbackTier {
                key: "standard",
                monthly_cost: Decimal::ZERO,
                prices: price_map(&[
                    (TariffClass::Ac, Decimal::new(195, 2)),
                    (TariffClass::Dc, Decimal::new(269, 2)),
                    (TariffClass::DcMid, Decimal::new(289, 2)),
                    (TariffClass::Hpc, Decimal::new(319, 2)),
                ]),
            }],
            // Documented default window: the October run of the -25%
            // promotion. See DESIGN.md for the choice.
            promotions: vec![Promotion {
                name: PROMO_NAME.to_string(),
                valid_from: NaiveDate::from_ymd_opt(2025, 10, 2).unwrap(),
                valid_to: NaiveDate::from_ymd_opt(2025, 11, 3).unwrap(),
                prices: price_map(&[
                    (TariffClass::Ac, Decimal::new(146, 2)),
                    (TariffClass::Dc, Decimal::new(202, 2)),
                    (TariffClass::DcMid, Decimal::new(217, 2)),
                    (TariffClass::Hpc, Decimal::new(239, 2)),
                ]),
                conditions: PROMO_CONDITIONS.iter().map(|c| c.to_string()).collect(),
            }],
        },
    }
}

fn single(pattern: &str, class: TariffClass) -> PriceRule {
    PriceRule::new(
        pattern,
        vec![CaptureSlot { group: 1, tier: "standard", class }],
    )
}
