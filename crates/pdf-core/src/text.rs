//! PDF text string encoding
//!
//! Field values are stored as PDF text strings (PDF 32000-1:2008, 7.9.2.2):
//! either PDFDocEncoding bytes or UTF-16BE prefixed with a byte order mark.

use lopdf::{Object, StringFormat};

const UTF16_BOM: [u8; 2] = [0xFE, 0xFF];

/// Encode a Rust string as a PDF text string object
///
/// Printable ASCII is written as a literal string. Anything else is
/// written as UTF-16BE with a BOM in hexadecimal form.
pub fn encode_text_string(text: &str) -> Object {
    if text.bytes().all(is_plain_ascii) {
        return Object::String(text.as_bytes().to_vec(), StringFormat::Literal);
    }

    let mut bytes = Vec::with_capacity(2 + text.len() * 2);
    bytes.extend_from_slice(&UTF16_BOM);
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

fn is_plain_ascii(b: u8) -> bool {
    matches!(b, 0x20..=0x7E | b'\n' | b'\r' | b'\t')
}

/// Decode the bytes of a PDF text string
///
/// UTF-16BE is detected by its BOM. Other bytes are read as
/// PDFDocEncoding, which agrees with Latin-1 for every byte a form
/// value realistically carries.
pub fn decode_text_string(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&UTF16_BOM) {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }

    bytes.iter().map(|&b| b as char).collect()
}
