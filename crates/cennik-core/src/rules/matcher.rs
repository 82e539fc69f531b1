//! Table-driven price matching against a text blob.

use std::collections::BTreeMap;

use regex::Regex;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::money::parse_pln_amount;
use crate::models::TariffClass;

/// One capture group of a price rule: which subscription tier and tariff
/// class the captured number belongs to.
#[derive(Debug, Clone, Copy)]
pub struct CaptureSlot {
    /// 1-based regex capture group index.
    pub group: usize,
    /// Subscription tier key, e.g. "standard".
    pub tier: &'static str,
    /// Tariff class the price applies to.
    pub class: TariffClass,
}

/// A single entry of an operator's pattern table.
///
/// One rule may capture several tiers at once (price columns of a table
/// row); the match is split by the slot mapping, not re-matched.
#[derive(Debug, Clone)]
pub struct PriceRule {
    pub regex: Regex,
    pub slots: Vec<CaptureSlot>,
}

impl PriceRule {
    pub fn new(pattern: &str, slots: Vec<CaptureSlot>) -> Self {
        Self {
            regex: Regex::new(pattern).unwrap(),
            slots,
        }
    }
}

/// Rule for a monthly-fee row, one capture group per paying tier.
#[derive(Debug, Clone)]
pub struct FeeRule {
    pub regex: Regex,
    /// (capture group, tier key) pairs.
    pub tiers: Vec<(usize, &'static str)>,
}

impl FeeRule {
    pub fn new(pattern: &str, tiers: Vec<(usize, &'static str)>) -> Self {
        Self {
            regex: Regex::new(pattern).unwrap(),
            tiers,
        }
    }
}

/// Partial-or-complete matcher output: tier -> tariff class -> price,
/// plus monthly fees per tier.
#[derive(Debug, Clone, Default)]
pub struct PriceGrid {
    pub prices: BTreeMap<&'static str, BTreeMap<TariffClass, Decimal>>,
    pub fees: BTreeMap<&'static str, Decimal>,
}

impl PriceGrid {
    /// Number of tariff classes captured for a tier.
    pub fn class_count(&self, tier: &str) -> usize {
        self.prices.get(tier).map(BTreeMap::len).unwrap_or(0)
    }

    /// Insert a price unless the slot is already filled.
    pub fn insert_price(&mut self, tier: &'static str, class: TariffClass, price: Decimal) {
        self.prices.entry(tier).or_default().entry(class).or_insert(price);
    }
}

/// Apply an ordered pattern table to the text blob.
///
/// Rules are evaluated in table order against the full blob; the first
/// successful capture for a given (tier, class) slot wins and is never
/// overwritten. A rule that does not match is skipped; missing data is an
/// expected outcome, handled downstream by thresholds.
pub fn match_prices(rules: &[PriceRule], fee_rule: Option<&FeeRule>, text: &str) -> PriceGrid {
    let mut grid = PriceGrid::default();

    for rule in rules {
        let Some(caps) = rule.regex.captures(text) else {
            debug!(pattern = rule.regex.as_str(), "price rule did not match");
            continue;
        };

        for slot in &rule.slots {
            let Some(group) = caps.get(slot.group) else {
                warn!(
                    pattern = rule.regex.as_str(),
                    group = slot.group,
                    "capture group missing from match"
                );
                continue;
            };

            match parse_pln_amount(group.as_str()) {
                Some(price) => grid.insert_price(slot.tier, slot.class, price),
                None => warn!(raw = group.as_str(), "captured price failed to parse"),
            }
        }
    }

    if let Some(fee_rule) = fee_rule {
        if let Some(caps) = fee_rule.regex.captures(text) {
            for &(group, tier) in &fee_rule.tiers {
                if let Some(fee) = caps.get(group).and_then(|m| parse_pln_amount(m.as_str())) {
                    grid.fees.entry(tier).or_insert(fee);
                }
            }
        } else {
            debug!(pattern = fee_rule.regex.as_str(), "fee rule did not match");
        }
    }

    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn three_column_ac_rule() -> PriceRule {
        PriceRule::new(
            r"AC[^0-9]*(\d+[,.]\d+)[^0-9]+(\d+[,.]\d+)[^0-9]+(\d+[,.]\d+)",
            vec![
                CaptureSlot { group: 1, tier: "max", class: TariffClass::Ac },
                CaptureSlot { group: 2, tier: "plus", class: TariffClass::Ac },
                CaptureSlot { group: 3, tier: "standard", class: TariffClass::Ac },
            ],
        )
    }

    #[test]
    fn splits_multi_column_row_by_slot_mapping() {
        let text = "AC 1,60 zł 1,75 zł 1,95 zł 2,05 zł";
        let grid = match_prices(&[three_column_ac_rule()], None, text);

        assert_eq!(grid.prices["max"][&TariffClass::Ac], dec("1.60"));
        assert_eq!(grid.prices["plus"][&TariffClass::Ac], dec("1.75"));
        assert_eq!(grid.prices["standard"][&TariffClass::Ac], dec("1.95"));
    }

    #[test]
    fn first_match_wins_for_a_slot() {
        let rules = vec![
            PriceRule::new(
                r"AC\s+(\d+[,.]\d+)",
                vec![CaptureSlot { group: 1, tier: "standard", class: TariffClass::Ac }],
            ),
            PriceRule::new(
                r"AC podstawowe\s+(\d+[,.]\d+)",
                vec![CaptureSlot { group: 1, tier: "standard", class: TariffClass::Ac }],
            ),
        ];
        let grid = match_prices(&rules, None, "AC 1,95 oraz AC podstawowe 9,99");
        assert_eq!(grid.prices["standard"][&TariffClass::Ac], dec("1.95"));
    }

    #[test]
    fn non_matching_rule_is_skipped() {
        let rules = vec![
            PriceRule::new(
                r"HPC\s+(\d+[,.]\d+)",
                vec![CaptureSlot { group: 1, tier: "standard", class: TariffClass::Hpc }],
            ),
            PriceRule::new(
                r"AC\s+(\d+[,.]\d+)",
                vec![CaptureSlot { group: 1, tier: "standard", class: TariffClass::Ac }],
            ),
        ];
        let grid = match_prices(&rules, None, "AC 1,95 PLN/kWh");
        assert_eq!(grid.class_count("standard"), 1);
        assert!(grid.prices["standard"].get(&TariffClass::Hpc).is_none());
    }

    #[test]
    fn fee_rule_fills_fees_per_tier() {
        let fee_rule = FeeRule::new(
            r"(?i)Miesięczna opłata[^0-9]*(\d+[,.]\d+)[^0-9]+(\d+[,.]\d+)",
            vec![(1, "max"), (2, "plus")],
        );
        let grid = match_prices(&[], Some(&fee_rule), "Miesięczna opłata 79,99 zł 29,99 zł");
        assert_eq!(grid.fees["max"], dec("79.99"));
        assert_eq!(grid.fees["plus"], dec("29.99"));
    }

    #[test]
    fn empty_text_yields_empty_grid() {
        let grid = match_prices(&[three_column_ac_rule()], None, "");
        assert_eq!(grid.class_count("standard"), 0);
        assert!(grid.fees.is_empty());
    }
}
