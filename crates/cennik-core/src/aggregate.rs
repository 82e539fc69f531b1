//! Document assembly across all configured operators.

use tracing::{info, warn};

use crate::models::PricingDocument;
use crate::operators::OperatorSpec;
use crate::pipeline::{run_operator, PipelineOutcome, SourceFetcher};

/// Run the pipeline for every operator and assemble the pricing
/// document with the current retrieval timestamp.
///
/// A single operator's failure never prevents the others from being
/// processed or the document from being assembled; the output map is
/// keyed by operator id, so completion order is irrelevant.
pub async fn build_document<F: SourceFetcher>(
    fetcher: &F,
    specs: &[OperatorSpec],
) -> PricingDocument {
    let mut document = PricingDocument::new();

    for spec in specs {
        let (record, outcome) = run_operator(fetcher, spec).await;
        match outcome {
            PipelineOutcome::Extracted => {
                info!(
                    operator = spec.id,
                    subscriptions = record.subscriptions.len(),
                    "operator extracted"
                );
            }
            PipelineOutcome::Fallback(stage) => {
                warn!(operator = spec.id, ?stage, "operator served from fallback");
            }
        }
        document.operators.insert(spec.id.to_string(), record);
    }

    document
}
