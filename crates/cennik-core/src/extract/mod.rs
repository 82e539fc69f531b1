//! Document-to-text extraction.

mod html;
mod pdf;

pub use html::extract_html_text;
pub use pdf::extract_pdf_text;

use crate::error::ExtractError;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractError>;
