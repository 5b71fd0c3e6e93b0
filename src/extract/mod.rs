//! Text extraction from uploaded documents
//!
//! Each supported format has an adapter turning an in-memory byte stream into
//! a single normalized text blob. Adapters never touch the filesystem, so
//! transient uploads can be extracted without being persisted first.

mod docx;
mod pdf;
mod tabular;
mod text;

use crate::error::{Error, Result};

/// Supported document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Pdf,
    Docx,
    Txt,
    Csv,
    Json,
    Xlsx,
}

impl Format {
    /// Parse a format tag (a file extension, with or without a leading dot)
    pub fn from_tag(tag: &str) -> Result<Self> {
        match tag.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "pdf" => Ok(Format::Pdf),
            "docx" => Ok(Format::Docx),
            "txt" => Ok(Format::Txt),
            "csv" => Ok(Format::Csv),
            "json" => Ok(Format::Json),
            "xlsx" => Ok(Format::Xlsx),
            other => Err(Error::UnsupportedFormat(format!(".{}", other))),
        }
    }

    /// Detect the format of a file from its name.
    ///
    /// Extension mapping first; MIME guessing as a fallback so that unusual
    /// extensions of plain-text files still ingest.
    pub fn detect(filename: &str) -> Result<Self> {
        let ext = std::path::Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");

        if let Ok(format) = Self::from_tag(ext) {
            return Ok(format);
        }

        let mime = mime_guess::from_path(filename).first_or_octet_stream();
        match (mime.type_().as_str(), mime.subtype().as_str()) {
            ("text", "plain") => Ok(Format::Txt),
            ("text", "csv") => Ok(Format::Csv),
            ("application", "json") => Ok(Format::Json),
            ("application", "pdf") => Ok(Format::Pdf),
            _ => Err(Error::UnsupportedFormat(filename.to_string())),
        }
    }

    /// The canonical extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Pdf => "pdf",
            Format::Docx => "docx",
            Format::Txt => "txt",
            Format::Csv => "csv",
            Format::Json => "json",
            Format::Xlsx => "xlsx",
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Extract normalized text from a document's raw bytes.
///
/// Fails with [`Error::Extraction`] when the stream is unreadable or corrupt,
/// and with [`Error::EmptyContent`] when extraction yields no usable text.
pub fn extract(bytes: &[u8], format: Format) -> Result<String> {
    let extracted = match format {
        Format::Pdf => pdf::extract_pdf(bytes)?,
        Format::Docx => docx::extract_docx(bytes)?,
        Format::Txt => text::extract_txt(bytes)?,
        Format::Json => text::extract_json(bytes)?,
        Format::Csv => tabular::extract_csv(bytes)?,
        Format::Xlsx => tabular::extract_xlsx(bytes)?,
    };

    if extracted.trim().is_empty() {
        return Err(Error::EmptyContent(
            "extracted text is empty".to_string(),
        ));
    }

    Ok(extracted)
}
