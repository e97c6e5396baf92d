use crate::domain::error::{AppError, Result};
use lopdf::Document;

/// Extracts the text layer of an in-memory PDF, page by page.
///
/// Pages whose text cannot be decoded are skipped. Scanned PDFs without a
/// text layer come back as an empty string.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String> {
    let document = Document::load_mem(bytes)
        .map_err(|e| AppError::ParseError(format!("Failed to load PDF: {}", e)))?;

    let mut pages: Vec<String> = Vec::new();
    for page_number in document.get_pages().keys() {
        match document.extract_text(&[*page_number]) {
            Ok(page_text) => {
                let trimmed = page_text.trim();
                if !trimmed.is_empty() {
                    pages.push(trimmed.to_string());
                }
            }
            Err(e) => {
                tracing::warn!("Skipping unreadable PDF page {}: {}", page_number, e);
            }
        }
    }

    Ok(pages.join("\n\n"))
}
