//! PDF Core - Low-level AcroForm manipulation
//!
//! This crate provides functionality for:
//! - Opening and saving PDF documents
//! - Enumerating interactive form fields by fully qualified name
//! - Setting text, combo box, list box, checkbox and radio group values
//! - Marking fields read-only
//!
//! # Example
//!
//! ```ignore
//! use pdf_core::PdfDocument;
//!
//! let mut doc = PdfDocument::open("template.pdf")?;
//! doc.set_text_field("FullName", "Jane Doe", true)?;
//! doc.save("output.pdf")?;
//! ```

mod document;
mod form;
mod text;

pub use document::PdfDocument;
pub use form::{FieldKind, FormField};
pub use text::{decode_text_string, encode_text_string};

use thiserror::Error;

/// Errors that can occur during PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to open PDF: {0}")]
    OpenError(String),

    #[error("Failed to save PDF: {0}")]
    SaveError(String),

    #[error("Document has no interactive form")]
    NoAcroForm,

    #[error("Form field not found: {0}")]
    FieldNotFound(String),

    #[error("Form field '{name}' is a {actual} field, expected {expected}")]
    FieldTypeMismatch {
        name: String,
        expected: FieldKind,
        actual: FieldKind,
    },

    #[error("Invalid value for field '{name}': {reason}")]
    InvalidValue { name: String, reason: String },

    #[error("PDF parsing error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Lopdf error: {0}")]
    LopdfError(#[from] lopdf::Error),
}

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// Field flag bits (PDF 32000-1:2008, 12.7.3.1 and 12.7.4)
pub mod field_flags {
    /// Field may not be changed by the user
    pub const READ_ONLY: i64 = 1;
    /// Field must have a value at export time
    pub const REQUIRED: i64 = 1 << 1;
    /// Button: exactly one of a set of buttons is on
    pub const RADIO: i64 = 1 << 15;
    /// Button: no retained value
    pub const PUSHBUTTON: i64 = 1 << 16;
    /// Choice: combo box rather than list box
    pub const COMBO: i64 = 1 << 17;
    /// Choice: more than one option may be selected
    pub const MULTI_SELECT: i64 = 1 << 21;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_flag_bits() {
        assert_eq!(field_flags::READ_ONLY, 1);
        assert_eq!(field_flags::RADIO, 32768);
        assert_eq!(field_flags::PUSHBUTTON, 65536);
        assert_eq!(field_flags::COMBO, 131072);
        assert_eq!(field_flags::MULTI_SELECT, 2097152);
    }

    #[test]
    fn test_type_mismatch_message() {
        let err = PdfError::FieldTypeMismatch {
            name: "Agree".to_string(),
            expected: FieldKind::Text,
            actual: FieldKind::Checkbox,
        };
        assert_eq!(
            err.to_string(),
            "Form field 'Agree' is a checkbox field, expected text"
        );
    }
}
