//! PDF text extraction

use crate::error::{Error, Result};

/// Extract text from PDF bytes
pub fn extract_pdf(bytes: &[u8]) -> Result<String> {
    pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| Error::Extraction(format!("PDF extraction failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corrupt_pdf_fails() {
        let err = extract_pdf(b"not a pdf at all").unwrap_err();
        assert!(matches!(err, Error::Extraction(_)));
    }
}
