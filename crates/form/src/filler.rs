//! Form filling

use crate::parser::parse_form_document;
use crate::{FormDocument, FormError, Result};
use pdf_core::PdfDocument;
use std::io::{Read, Write};

/// Summary of a completed fill
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FillReport {
    /// Assignments applied
    pub fields_filled: usize,
    /// Assignments that also locked their field
    pub fields_locked: usize,
}

impl FillReport {
    fn record(&mut self, locked: bool) {
        self.fields_filled += 1;
        if locked {
            self.fields_locked += 1;
        }
    }
}

/// Fill a template read from `template` with the JSON payload read from
/// `payload`, writing the result to `output`
///
/// Nothing is written to `output` unless every assignment succeeds.
pub fn fill_form<R, P, W>(template: R, payload: P, output: &mut W) -> Result<FillReport>
where
    R: Read,
    P: Read,
    W: Write,
{
    let document = parse_form_document(payload)?;
    let mut pdf = PdfDocument::open_from_reader(template)?;

    let report = fill_document(&mut pdf, &document)?;
    pdf.save_to(output)?;

    Ok(report)
}

/// Apply every section of `document` to an open PDF, in order
pub fn fill_document(pdf: &mut PdfDocument, document: &FormDocument) -> Result<FillReport> {
    let mut report = FillReport::default();

    for section in &document.forms {
        for entry in section.textfield.iter().chain(&section.datefield) {
            pdf.set_text_field(&entry.name, &entry.value, entry.locked)
                .map_err(|source| field_error(&entry.name, source))?;
            report.record(entry.locked);
        }

        for entry in &section.combobox {
            pdf.set_combo_box(&entry.name, &entry.value, entry.locked)
                .map_err(|source| field_error(&entry.name, source))?;
            report.record(entry.locked);
        }

        for entry in &section.listbox {
            pdf.set_list_box(&entry.name, &entry.values, entry.locked)
                .map_err(|source| field_error(&entry.name, source))?;
            report.record(entry.locked);
        }

        for entry in &section.radiobuttongroup {
            pdf.set_radio_group(&entry.name, &entry.value, entry.locked)
                .map_err(|source| field_error(&entry.name, source))?;
            report.record(entry.locked);
        }

        for entry in &section.checkbox {
            pdf.set_checkbox(&entry.name, entry.value, entry.locked)
                .map_err(|source| field_error(&entry.name, source))?;
            report.record(entry.locked);
        }
    }

    Ok(report)
}

fn field_error(name: &str, source: pdf_core::PdfError) -> FormError {
    FormError::FieldError {
        name: name.to_string(),
        source,
    }
}
