//! Error types for the cennik-core library.

use thiserror::Error;

/// Main error type for the cennik library.
#[derive(Error, Debug)]
pub enum CennikError {
    /// Source retrieval error.
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Document text extraction error.
    #[error("extract error: {0}")]
    Extract(#[from] ExtractError),

    /// Final document write error.
    #[error("write error: {0}")]
    Write(#[from] WriteError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised at the source-retrieval boundary.
///
/// Produced by [`crate::pipeline::SourceFetcher`] implementations; the
/// pipeline recovers from every variant by switching to fallback data.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The source could not be reached.
    #[error("source unavailable: {0}")]
    Unavailable(String),

    /// The request exceeded its deadline.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The server answered with a non-success status.
    #[error("HTTP status {status} for {url}")]
    Status { status: u16, url: String },

    /// Network access was disabled for this run.
    #[error("offline mode, no source fetched")]
    Offline,
}

/// Errors related to turning raw documents into text.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Failed to open/parse the PDF document.
    #[error("failed to parse PDF: {0}")]
    PdfParse(String),

    /// Failed to extract text from the PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// The document produced no usable text.
    #[error("document contains no text")]
    EmptyText,

    /// The HTML document has no body to read.
    #[error("HTML document has no body")]
    NoBody,
}

/// Errors writing the final pricing document.
///
/// The only error class that aborts a whole run; per-operator failures
/// never surface past their own pipeline.
#[derive(Error, Debug)]
pub enum WriteError {
    /// Failed to serialize the document to JSON.
    #[error("failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Failed to write the output file.
    #[error("failed to write {path}: {source}")]
    File {
        path: String,
        source: std::io::Error,
    },
}

/// Result type for the cennik library.
pub type Result<T> = std::result::Result<T, CennikError>;
