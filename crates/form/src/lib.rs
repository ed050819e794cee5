//! Form - field payload mapping and form filling
//!
//! This crate provides:
//! - Field payload types (`FormDocument`, `FormSection`, `FieldEntry`)
//! - Mapping a flat name/value request into a field payload
//! - Payload JSON parsing and encoding
//! - Filling a PDF template's AcroForm from a payload
//!
//! # Example
//!
//! ```ignore
//! use form::{fill_form, map_fields, parse_payload, to_json};
//!
//! let payload = parse_payload(br#"{"FullName": "Jane Doe"}"#)?;
//! let document = map_fields(&payload);
//! let json = to_json(&document)?;
//!
//! let template = std::fs::File::open("template.pdf")?;
//! let mut output = std::fs::File::create("filled.pdf")?;
//! fill_form(template, json.as_slice(), &mut output)?;
//! ```

mod filler;
mod mapper;
pub mod parser;
mod schema;

pub use filler::{fill_document, fill_form, FillReport};
pub use mapper::map_fields;
pub use parser::{parse_form_document, parse_payload, to_json};
pub use schema::*;

use thiserror::Error;

/// Errors that can occur while mapping or filling a form
#[derive(Debug, Error)]
pub enum FormError {
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to fill field '{name}': {source}")]
    FieldError {
        name: String,
        #[source]
        source: pdf_core::PdfError,
    },

    #[error("PDF error: {0}")]
    PdfError(#[from] pdf_core::PdfError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for form operations
pub type Result<T> = std::result::Result<T, FormError>;
