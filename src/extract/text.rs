//! Plain text and JSON extraction

use crate::error::{Error, Result};

/// Decode plain text bytes (lossy UTF-8)
pub fn extract_txt(bytes: &[u8]) -> Result<String> {
    Ok(String::from_utf8_lossy(bytes).into_owned())
}

/// Validate and pretty-print JSON bytes
pub fn extract_json(bytes: &[u8]) -> Result<String> {
    let value: serde_json::Value = serde_json::from_slice(bytes)
        .map_err(|e| Error::Extraction(format!("Invalid JSON: {}", e)))?;

    serde_json::to_string_pretty(&value)
        .map_err(|e| Error::Extraction(format!("JSON render failed: {}", e)))
}
