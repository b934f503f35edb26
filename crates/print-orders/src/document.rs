//! Page-count discovery for uploaded documents

use crate::types::*;
use lopdf::Document;
use std::path::Path;

/// Count the pages of a document on disk. Only PDFs can be counted.
pub async fn count_pages(path: impl AsRef<Path>) -> Result<u32> {
    let path = path.as_ref();
    if mime_type_for(path) != "application/pdf" {
        return Err(OrderError::UnsupportedDocument(path.display().to_string()));
    }
    let bytes = tokio::fs::read(path).await?;
    count_pdf_bytes(bytes).await
}

/// Count the pages of an in-memory PDF
pub async fn count_pdf_bytes(bytes: Vec<u8>) -> Result<u32> {
    let doc = tokio::task::spawn_blocking(move || Document::load_mem(&bytes)).await??;
    Ok(doc.get_pages().len() as u32)
}

/// MIME type recorded for an upload, from its extension
pub fn mime_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("pdf") => "application/pdf",
        Some("doc") => "application/msword",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}
