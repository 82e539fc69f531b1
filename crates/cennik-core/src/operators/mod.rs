//! Declarative per-operator extraction specs.
//!
//! Adding an operator means adding a module with one `spec()` function:
//! a pattern table, tier definitions and a fallback dataset. No operator
//! gets its own control flow.

pub mod greenway;
pub mod orlen;

use crate::fallback::FallbackPricing;
use crate::rules::{FeeRule, PriceRule, PromoSpec};

/// Where an operator publishes its tariff.
#[derive(Debug, Clone)]
pub enum SourceSpec {
    /// A single tariff PDF.
    Pdf { url: &'static str },
    /// One or two web pages: the standard price list and an optional
    /// promotional variant checked first.
    Web {
        standard_url: &'static str,
        promo_url: Option<&'static str>,
    },
}

/// One subscription tier of an operator.
#[derive(Debug, Clone)]
pub struct TierSpec {
    /// Stable key, also the id suffix: `{operator_id}_{key}`.
    pub key: &'static str,
    /// Display name, e.g. "Energia Standard".
    pub name: &'static str,
    /// Whether the monthly fee must come from the fee row. A paid tier
    /// without a matched fee falls back to its defaults.
    pub paid: bool,
    /// Minimum captured tariff classes to accept the extracted tier.
    pub min_classes: usize,
    /// Static benefit strings tied to the tier.
    pub benefits: &'static [&'static str],
}

/// Everything the pipeline needs to process one operator.
#[derive(Debug, Clone)]
pub struct OperatorSpec {
    pub id: &'static str,
    pub name: &'static str,
    /// Display color hint, passed through to the output.
    pub color: &'static str,
    pub source: SourceSpec,
    /// Ordered pattern table for standard prices.
    pub price_rules: Vec<PriceRule>,
    /// Monthly-fee row rule, when the operator has paid tiers.
    pub fee_rule: Option<FeeRule>,
    /// Promotion detection parameters, when the operator runs promos.
    pub promo: Option<PromoSpec>,
    /// Tiers in presentation order: standard first, then by commitment.
    pub tiers: Vec<TierSpec>,
    /// Fill dc_mid and hpc from dc when the source does not distinguish
    /// DC power bands.
    pub spread_dc: bool,
    pub fallback: FallbackPricing,
}

/// All configured operators.
pub fn all() -> Vec<OperatorSpec> {
    vec![greenway::spec(), orlen::spec()]
}
