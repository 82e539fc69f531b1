//! Per-operator extraction pipeline.
//!
//! One run walks FetchSource -> ExtractText -> MatchPrices ->
//! BuildRecord; any failure on the way routes through the fallback
//! dataset instead. The pipeline always hands back a complete record.

use std::future::Future;

use tracing::{debug, info, warn};

use crate::error::FetchError;
use crate::extract::{extract_html_text, extract_pdf_text};
use crate::models::{OperatorPricing, Promotion};
use crate::normalize;
use crate::operators::{OperatorSpec, SourceSpec};
use crate::rules::{match_prices, scan_promo, PriceGrid};

/// Raw material handed to the core by the retrieval collaborator.
#[derive(Debug, Clone)]
pub enum RawSource {
    /// Binary PDF document.
    Pdf(Vec<u8>),
    /// Fetched HTML pages; either may be missing when its request
    /// failed but the other succeeded.
    Pages {
        standard: Option<String>,
        promo: Option<String>,
    },
}

/// Source-retrieval boundary.
///
/// Implementations own timeouts and transport; the pipeline only cares
/// that it gets bytes/pages or a [`FetchError`].
pub trait SourceFetcher {
    fn fetch(
        &self,
        source: &SourceSpec,
    ) -> impl Future<Output = Result<RawSource, FetchError>> + Send;
}

/// Fetcher that never goes to the network; every operator takes the
/// fallback route.
pub struct OfflineFetcher;

impl SourceFetcher for OfflineFetcher {
    fn fetch(
        &self,
        _source: &SourceSpec,
    ) -> impl Future<Output = Result<RawSource, FetchError>> + Send {
        async { Err(FetchError::Offline) }
    }
}

/// Pipeline stage at which a run gave up on live data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    FetchSource,
    ExtractText,
}

/// How an operator record was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// Built from live matcher output (individual tiers may still have
    /// used their per-tier fallback).
    Extracted,
    /// Whole-operator fallback, with the stage that failed.
    Fallback(Stage),
}

/// Run the pipeline for one operator. Never fails: the worst case is
/// the operator's static fallback record.
pub async fn run_operator<F: SourceFetcher>(
    fetcher: &F,
    spec: &OperatorSpec,
) -> (OperatorPricing, PipelineOutcome) {
    info!(operator = spec.id, "starting pipeline");

    let raw = match fetcher.fetch(&spec.source).await {
        Ok(raw) => raw,
        Err(err) => {
            warn!(operator = spec.id, error = %err, "fetch failed, using fallback");
            return (
                normalize::fallback_record(spec),
                PipelineOutcome::Fallback(Stage::FetchSource),
            );
        }
    };

    let (grid, promotion) = match raw {
        RawSource::Pdf(bytes) => {
            let text = match extract_pdf_text(&bytes) {
                Ok(text) => text,
                Err(err) => {
                    warn!(operator = spec.id, error = %err, "extraction failed, using fallback");
                    return (
                        normalize::fallback_record(spec),
                        PipelineOutcome::Fallback(Stage::ExtractText),
                    );
                }
            };
            debug!(operator = spec.id, chars = text.len(), "extracted PDF text");
            (
                match_prices(&spec.price_rules, spec.fee_rule.as_ref(), &text),
                None,
            )
        }
        RawSource::Pages { standard, promo } => {
            if standard.is_none() && promo.is_none() {
                warn!(operator = spec.id, "no pages retrieved, using fallback");
                return (
                    normalize::fallback_record(spec),
                    PipelineOutcome::Fallback(Stage::ExtractText),
                );
            }
            match_pages(spec, standard.as_deref(), promo.as_deref())
        }
    };

    let record = normalize::build_record(spec, &grid, promotion);
    info!(
        operator = spec.id,
        subscriptions = record.subscriptions.len(),
        promotions = record.promotions.len(),
        "pipeline done"
    );
    (record, PipelineOutcome::Extracted)
}

/// Match the promotional page first; fall through to the standard page
/// when it yielded no standard-column prices.
fn match_pages(
    spec: &OperatorSpec,
    standard_page: Option<&str>,
    promo_page: Option<&str>,
) -> (PriceGrid, Option<Promotion>) {
    let mut grid = PriceGrid::default();
    let mut promotion = None;

    // Tier receiving the standard column of a side-by-side promo table
    let standard_tier = spec.tiers[0].key;

    if let (Some(html), Some(promo_spec)) = (promo_page, spec.promo.as_ref()) {
        match extract_html_text(html) {
            Ok(text) => {
                debug!(operator = spec.id, chars = text.len(), "extracted promo page text");
                let scan = scan_promo(promo_spec, &text);
                for (class, price) in &scan.standard {
                    grid.insert_price(standard_tier, *class, *price);
                }
                promotion = scan.into_promotion(promo_spec);
            }
            Err(err) => {
                warn!(operator = spec.id, error = %err, "promo page unusable");
            }
        }
    }

    if grid.class_count(standard_tier) == 0 {
        if let Some(html) = standard_page {
            match extract_html_text(html) {
                Ok(text) => {
                    debug!(operator = spec.id, chars = text.len(), "extracted standard page text");
                    grid = match_prices(&spec.price_rules, spec.fee_rule.as_ref(), &text);
                }
                Err(err) => {
                    warn!(operator = spec.id, error = %err, "standard page unusable");
                }
            }
        }
    }

    (grid, promotion)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators;
    use pretty_assertions::assert_eq;

    struct FixedFetcher(RawSource);

    impl SourceFetcher for FixedFetcher {
        fn fetch(
            &self,
            _source: &SourceSpec,
        ) -> impl Future<Output = Result<RawSource, FetchError>> + Send {
            async { Ok(self.0.clone()) }
        }
    }

    #[tokio::test]
    async fn fetch_failure_yields_exact_fallback_record() {
        let spec = operators::orlen::spec();
        let (record, outcome) = run_operator(&OfflineFetcher, &spec).await;

        assert_eq!(outcome, PipelineOutcome::Fallback(Stage::FetchSource));
        assert_eq!(record, normalize::fallback_record(&spec));
    }

    #[tokio::test]
    async fn corrupt_pdf_yields_fallback_at_extract() {
        let spec = operators::greenway::spec();
        let fetcher = FixedFetcher(RawSource::Pdf(b"not a pdf".to_vec()));
        let (record, outcome) = run_operator(&fetcher, &spec).await;

        assert_eq!(outcome, PipelineOutcome::Fallback(Stage::ExtractText));
        assert_eq!(record, normalize::fallback_record(&spec));
    }

    #[tokio::test]
    async fn missing_pages_yield_fallback() {
        let spec = operators::orlen::spec();
        let fetcher = FixedFetcher(RawSource::Pages {
            standard: None,
            promo: None,
        });
        let (record, outcome) = run_operator(&fetcher, &spec).await;

        assert_eq!(outcome, PipelineOutcome::Fallback(Stage::ExtractText));
        assert_eq!(record.promotions.len(), 1);
    }

    #[tokio::test]
    async fn standard_page_alone_gives_no_promotion() {
        let spec = operators::orlen::spec();
        let html = "<html><body>\
            <p>AC 1,95 PLN/kWh</p>\
            <p>DC ≤ 50 kW 2,69 PLN/kWh</p>\
            <p>DC 50-125 kW 2,89 PLN/kWh</p>\
            <p>DC > 125 kW 3,19 PLN/kWh</p>\
            </body></html>";
        let fetcher = FixedFetcher(RawSource::Pages {
            standard: Some(html.to_string()),
            promo: None,
        });
        let (record, outcome) = run_operator(&fetcher, &spec).await;

        assert_eq!(outcome, PipelineOutcome::Extracted);
        assert_eq!(record.subscriptions.len(), 1);
        assert_eq!(record.subscriptions[0].prices.len(), 4);
        assert!(record.promotions.is_empty());
    }
}
