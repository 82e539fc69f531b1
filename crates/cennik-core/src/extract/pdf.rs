//! PDF text extraction using lopdf and pdf-extract.

use lopdf::Document;
use tracing::debug;

use super::Result;
use crate::error::ExtractError;

/// Extract a single text blob from raw PDF bytes.
///
/// lopdf handles the structural checks (encryption, page count) and
/// pdf-extract produces the text in reading order, which is good enough
/// for the nearby-token matching the rule tables rely on.
pub fn extract_pdf_text(data: &[u8]) -> Result<String> {
    let mut doc = Document::load_mem(data).map_err(|e| ExtractError::PdfParse(e.to_string()))?;

    // Handle PDFs with empty password encryption
    let raw_data = if doc.is_encrypted() {
        if doc.decrypt("").is_err() {
            return Err(ExtractError::Encrypted);
        }
        debug!("decrypted PDF with empty password");

        let mut decrypted = Vec::new();
        doc.save_to(&mut decrypted)
            .map_err(|e| ExtractError::PdfParse(format!("failed to save decrypted PDF: {}", e)))?;
        decrypted
    } else {
        data.to_vec()
    };

    let page_count = doc.get_pages().len();
    if page_count == 0 {
        return Err(ExtractError::NoPages);
    }
    debug!(pages = page_count, "loaded PDF");

    let text = pdf_extract::extract_text_from_mem(&raw_data)
        .map_err(|e| ExtractError::TextExtraction(e.to_string()))?;

    if text.trim().is_empty() {
        return Err(ExtractError::EmptyText);
    }

    Ok(text)
}
