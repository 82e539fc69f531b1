//! Promotion detection: discounted price sets with a validity window.

use std::collections::BTreeMap;

use regex::Regex;
use rust_decimal::Decimal;
use tracing::{debug, info};

use super::dates::{extract_date_range, DateRange};
use super::money::parse_pln_amount;
use crate::models::{Promotion, TariffClass};

/// A two-capture price rule: standard column and promotional column of
/// the same table row.
#[derive(Debug, Clone)]
pub struct PromoRule {
    pub regex: Regex,
    pub class: TariffClass,
    /// Capture group holding the regular price.
    pub standard_group: usize,
    /// Capture group holding the discounted price.
    pub promo_group: usize,
}

impl PromoRule {
    pub fn new(pattern: &str, class: TariffClass) -> Self {
        Self {
            regex: Regex::new(pattern).unwrap(),
            class,
            standard_group: 1,
            promo_group: 2,
        }
    }
}

/// Per-operator promotion detection parameters.
#[derive(Debug, Clone)]
pub struct PromoSpec {
    /// Display name of the emitted promotion.
    pub name: &'static str,
    pub rules: Vec<PromoRule>,
    /// Minimum number of discounted tariff classes required to emit.
    pub min_prices: usize,
    /// Static condition strings attached to the promotion.
    pub conditions: &'static [&'static str],
}

/// Raw scan result over the promotional text variant.
#[derive(Debug, Clone, Default)]
pub struct PromoScan {
    /// Standard-column prices found alongside the discounted ones.
    pub standard: BTreeMap<TariffClass, Decimal>,
    /// Discounted prices.
    pub promo: BTreeMap<TariffClass, Decimal>,
    /// Validity window, when one was found.
    pub range: Option<DateRange>,
}

/// Scan the promotional text blob for discounted prices and a validity
/// date range.
pub fn scan_promo(spec: &PromoSpec, text: &str) -> PromoScan {
    let mut scan = PromoScan {
        range: extract_date_range(text),
        ..PromoScan::default()
    };

    for rule in &spec.rules {
        let Some(caps) = rule.regex.captures(text) else {
            debug!(class = rule.class.key(), "promo rule did not match");
            continue;
        };

        let standard = caps
            .get(rule.standard_group)
            .and_then(|m| parse_pln_amount(m.as_str()));
        let promo = caps
            .get(rule.promo_group)
            .and_then(|m| parse_pln_amount(m.as_str()));

        if let (Some(standard), Some(promo)) = (standard, promo) {
            debug!(class = rule.class.key(), %standard, %promo, "promo prices");
            scan.standard.entry(rule.class).or_insert(standard);
            scan.promo.entry(rule.class).or_insert(promo);
        }
    }

    scan
}

impl PromoScan {
    /// Turn the scan into a promotion, or nothing.
    ///
    /// A promotion is emitted only when the discounted price count meets
    /// the operator minimum and a valid date range was found. Anything
    /// less is a silently absent promotion, not an error.
    pub fn into_promotion(self, spec: &PromoSpec) -> Option<Promotion> {
        if self.promo.len() < spec.min_prices {
            debug!(
                found = self.promo.len(),
                required = spec.min_prices,
                "insufficient promotion prices"
            );
            return None;
        }

        let range = self.range?;

        info!(name = spec.name, prices = self.promo.len(), "promotion detected");
        Some(Promotion {
            name: spec.name.to_string(),
            valid_from: range.from,
            valid_to: range.to,
            prices: self.promo,
            conditions: spec.conditions.iter().map(|c| c.to_string()).collect(),
        })
    }
}
