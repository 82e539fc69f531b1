//! Canonical pricing document consumed by the display layer.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Charging-power tier with its own per-kWh price.
///
/// A closed enumeration; not every plan populates all four. The derive
/// order is the serialization order inside price maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TariffClass {
    /// Alternating current, typically up to 22 kW.
    Ac,
    /// Direct current up to ~50 kW.
    Dc,
    /// Direct current, mid power band (~50-125 kW).
    DcMid,
    /// High-power charging above ~125 kW.
    Hpc,
}

impl TariffClass {
    /// All tariff classes in canonical order.
    pub const ALL: [TariffClass; 4] = [
        TariffClass::Ac,
        TariffClass::Dc,
        TariffClass::DcMid,
        TariffClass::Hpc,
    ];

    /// The JSON/display key for this class.
    pub fn key(&self) -> &'static str {
        match self {
            TariffClass::Ac => "ac",
            TariffClass::Dc => "dc",
            TariffClass::DcMid => "dc_mid",
            TariffClass::Hpc => "hpc",
        }
    }
}

/// Per-kWh prices keyed by tariff class.
pub type PriceMap = BTreeMap<TariffClass, Decimal>;

/// A named pricing plan with an optional monthly fee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    /// Stable identifier, `{operator_id}_{tier}`.
    pub id: String,

    /// Human-readable plan name.
    pub name: String,

    /// Monthly fee in PLN; zero means pay-as-you-go.
    #[serde(rename = "monthlyCost")]
    pub monthly_cost: Decimal,

    /// Per-kWh prices for the covered tariff classes.
    pub prices: PriceMap,

    /// Static human-readable benefit strings for this plan.
    pub benefits: Vec<String>,
}

/// A time-bounded discounted price set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Promotion {
    /// Promotion name as displayed.
    pub name: String,

    /// First day the promotional prices apply.
    #[serde(rename = "validFrom")]
    pub valid_from: NaiveDate,

    /// Last day the promotional prices apply.
    #[serde(rename = "validTo")]
    pub valid_to: NaiveDate,

    /// Discounted per-kWh prices.
    pub prices: PriceMap,

    /// Conditions attached to the promotion.
    pub conditions: Vec<String>,
}

/// Pricing record for a single operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatorPricing {
    /// Operator display name.
    pub name: String,

    /// Display color hint, opaque to the core.
    pub color: String,

    /// Pricing plans, fixed order: standard first, then by commitment.
    pub subscriptions: Vec<Subscription>,

    /// Active promotions, possibly empty.
    pub promotions: Vec<Promotion>,
}

/// The single output artifact of a run: all operators under one roof.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingDocument {
    /// Retrieval timestamp of this run.
    #[serde(rename = "lastUpdate")]
    pub last_update: DateTime<Utc>,

    /// Operator records keyed by operator id.
    pub operators: BTreeMap<String, OperatorPricing>,
}

impl PricingDocument {
    /// Create an empty document stamped with the current time.
    pub fn new() -> Self {
        Self {
            last_update: Utc::now(),
            operators: BTreeMap::new(),
        }
    }

    /// Validate the document against its invariants and return any issues.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.operators.is_empty() {
            issues.push("operators map is empty".to_string());
        }

        for (id, operator) in &self.operators {
            for issue in operator.validate() {
                issues.push(format!("{}: {}", id, issue));
            }
        }

        issues
    }
}

impl Default for PricingDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl OperatorPricing {
    /// Validate the record and return any issues found.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.name.is_empty() {
            issues.push("missing operator name".to_string());
        }

        if self.subscriptions.is_empty() {
            issues.push("no subscriptions".to_string());
        }

        for sub in &self.subscriptions {
            if sub.id.is_empty() {
                issues.push(format!("subscription '{}' has no id", sub.name));
            }
            if sub.monthly_cost < Decimal::ZERO {
                issues.push(format!("subscription '{}' has negative fee", sub.name));
            }
            if sub.prices.values().any(|p| *p < Decimal::ZERO) {
                issues.push(format!("subscription '{}' has negative price", sub.name));
            }
        }

        for promo in &self.promotions {
            if promo.valid_from > promo.valid_to {
                issues.push(format!("promotion '{}' has inverted date range", promo.name));
            }
            if promo.prices.values().any(|p| *p < Decimal::ZERO) {
                issues.push(format!("promotion '{}' has negative price", promo.name));
            }
        }

        issues
    }
}
