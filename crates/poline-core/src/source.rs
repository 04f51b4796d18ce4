//! Page-text sources: PDF files and form-feed separated text dumps.

use std::path::Path;

use tracing::debug;

use crate::error::{PolineError, Result};
use crate::extract::split_pages;

/// Kind of input file, detected from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// PDF document.
    Pdf,
    /// Plain text, pages separated by form feeds.
    Text,
}

impl SourceKind {
    /// Detect the source kind from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_lowercase();
        match extension.as_str() {
            "pdf" => Some(Self::Pdf),
            "txt" | "text" => Some(Self::Text),
            _ => None,
        }
    }
}

/// Read a file and return its page texts in page order.
pub fn load_pages(path: &Path) -> Result<Vec<String>> {
    let kind = SourceKind::from_path(path).ok_or_else(|| {
        PolineError::Config(format!("unsupported input file: {}", path.display()))
    })?;

    let pages = match kind {
        SourceKind::Pdf => load_pdf_pages(path)?,
        SourceKind::Text => {
            let text = std::fs::read_to_string(path)?;
            split_pages(&text).into_iter().map(str::to_string).collect()
        }
    };

    debug!("Loaded {} pages from {}", pages.len(), path.display());
    Ok(pages)
}

#[cfg(feature = "pdf")]
fn load_pdf_pages(path: &Path) -> Result<Vec<String>> {
    let data = std::fs::read(path)?;
    Ok(crate::pdf::extract_page_texts(&data)?)
}

#[cfg(not(feature = "pdf"))]
fn load_pdf_pages(path: &Path) -> Result<Vec<String>> {
    Err(PolineError::Config(format!(
        "PDF support is disabled in this build: {}",
        path.display()
    )))
}
