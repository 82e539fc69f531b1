//! Core library for EV charging tariff scraping.
//!
//! This crate provides:
//! - Document text extraction (tariff PDFs, price-list web pages)
//! - Table-driven price matching with Polish decimal-comma amounts
//! - Promotion detection (discounted prices plus validity dates)
//! - Normalization into one canonical pricing document, with static
//!   fallback data guaranteeing a complete record per operator

pub mod aggregate;
pub mod error;
pub mod extract;
pub mod fallback;
pub mod models;
pub mod normalize;
pub mod operators;
pub mod pipeline;
pub mod rules;

pub use aggregate::build_document;
pub use error::{CennikError, ExtractError, FetchError, Result, WriteError};
pub use models::{OperatorPricing, PricingDocument, Promotion, Subscription, TariffClass};
pub use operators::{OperatorSpec, SourceSpec};
pub use pipeline::{run_operator, OfflineFetcher, PipelineOutcome, RawSource, SourceFetcher};
