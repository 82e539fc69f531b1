//! Data models for the canonical pricing document.

pub mod pricing;

pub use pricing::{
    OperatorPricing, PriceMap, PricingDocument, Promotion, Subscription, TariffClass,
};
