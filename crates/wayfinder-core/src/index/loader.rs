//! Document text loading
//!
//! Reads one document at construction time. PDF files go through text
//! extraction; anything else is read as UTF-8.

use crate::error::{Result, WayfinderError};
use std::fs;
use std::path::Path;

/// Load a document's text content
pub fn load_document(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(WayfinderError::DocumentNotFound(
            path.to_string_lossy().to_string(),
        ));
    }

    let is_pdf = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);

    if is_pdf {
        extract_pdf_text(path)
    } else {
        Ok(fs::read_to_string(path)?)
    }
}

fn extract_pdf_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| {
        WayfinderError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to read PDF file {:?}: {}", path, e),
        ))
    })?;

    let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
        WayfinderError::Document(format!("Failed to extract text from PDF {:?}: {}", path, e))
    })?;

    if text.trim().is_empty() {
        return Err(WayfinderError::Document(format!(
            "PDF file {:?} contains no extractable text (may be image-based)",
            path
        )));
    }

    Ok(text)
}
