//! PDF decoding boundary.
//!
//! Text comes from `pdf-extract`; document metadata (page count, the `Info`
//! dictionary's `Creator`) comes from `lopdf`.

use lopdf::{Document, Object};
use tracing::debug;

use distill_shared::{DistillError, Result};

/// Text and metadata decoded from a PDF.
#[derive(Debug, Clone, Default)]
pub struct DecodedPdf {
    pub text: String,
    pub page_count: usize,
    /// `Creator` entry of the document info dictionary, or `""` when the entry
    /// is missing or not a string.
    pub creator: String,
}

/// Decode an in-memory PDF. Blocking; run it off the async executor.
pub fn decode_pdf(bytes: &[u8]) -> Result<DecodedPdf> {
    let doc = Document::load_mem(bytes).map_err(|e| DistillError::Pdf(e.to_string()))?;
    let page_count = doc.get_pages().len();
    let creator = creator_of(&doc);

    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| DistillError::Pdf(format!("text extraction failed: {e}")))?;

    debug!(page_count, text_len = text.len(), %creator, "pdf decoded");
    Ok(DecodedPdf {
        text,
        page_count,
        creator,
    })
}

fn creator_of(doc: &Document) -> String {
    let info = match doc.trailer.get(b"Info").and_then(|obj| doc.dereference(obj)) {
        Ok((_, Object::Dictionary(dict))) => dict,
        _ => return String::new(),
    };

    match info.get(b"Creator").and_then(|obj| doc.dereference(obj)) {
        Ok((_, Object::String(bytes, _))) => decode_text_string(bytes),
        _ => String::new(),
    }
}

/// PDF text strings are UTF-16BE when they start with a byte order mark,
/// UTF-8 with a UTF-8 BOM (PDF 2.0), and PDFDocEncoding otherwise. The latter
/// is read as Latin-1, which agrees on the printable range.
fn decode_text_string(bytes: &[u8]) -> String {
    let decoded = match bytes {
        [0xFE, 0xFF, rest @ ..] => {
            let units: Vec<u16> = rest
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect();
            String::from_utf16_lossy(&units)
        }
        [0xEF, 0xBB, 0xBF, rest @ ..] => String::from_utf8_lossy(rest).into_owned(),
        _ => bytes.iter().map(|&b| char::from(b)).collect(),
    };
    decoded.trim().to_string()
}
