//! DOCX text extraction
//!
//! A .docx file is a zip archive; the document body lives in
//! `word/document.xml`. Text nodes are concatenated, with paragraph elements
//! (`w:p`) mapped to line breaks.

use crate::error::{Error, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};

/// Extract plain text from DOCX bytes
pub fn extract_docx(bytes: &[u8]) -> Result<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| Error::Extraction(format!("DOCX is not a valid archive: {}", e)))?;

    let mut document_xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| Error::Extraction(format!("DOCX has no document body: {}", e)))?
        .read_to_string(&mut document_xml)
        .map_err(|e| Error::Extraction(format!("DOCX body is unreadable: {}", e)))?;

    extract_document_xml(&document_xml)
}

fn extract_document_xml(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut out = String::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Text(t)) => {
                let text = t
                    .unescape()
                    .map_err(|e| Error::Extraction(format!("Malformed DOCX text node: {}", e)))?;
                out.push_str(&text);
            }
            Ok(Event::End(e)) if e.name().as_ref() == b"w:p" => out.push('\n'),
            Ok(Event::Empty(e)) if e.name().as_ref() == b"w:tab" => out.push('\t'),
            Ok(Event::Empty(e)) if e.name().as_ref() == b"w:br" => out.push('\n'),
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(Error::Extraction(format!("Malformed DOCX XML: {}", e)));
            }
        }
        buf.clear();
    }

    Ok(out)
}
