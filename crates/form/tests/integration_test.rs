//! Integration tests for form filling

use form::{
    fill_form, map_fields, parse_payload, to_json, CheckboxEntry, FieldEntry, FormDocument,
    FormError, FormSection, ListBoxEntry,
};
use lopdf::{dictionary, Object};
use pdf_core::{PdfDocument, PdfError};
use pretty_assertions::assert_eq;

/// One-page template with `FullName`, `City`, `BirthDate` (text),
/// `Agree` (checkbox), `Plan` (combo box with basic/premium),
/// `Interests` (multi-select list box) and `Seat` (radio group A/B)
fn create_template() -> Vec<u8> {
    let mut doc = lopdf::Document::new();
    let pages_id = doc.new_object_id();
    let page_id = doc.new_object_id();

    let mut fields = Vec::new();
    for name in ["FullName", "City", "BirthDate"] {
        fields.push(doc.add_object(dictionary! {
            "FT" => "Tx",
            "T" => Object::string_literal(name),
            "Type" => "Annot",
            "Subtype" => "Widget",
            "Rect" => vec![0.into(), 0.into(), 100.into(), 20.into()],
            "P" => page_id,
        }));
    }

    let on = doc.add_object(lopdf::Stream::new(dictionary! {}, Vec::new()));
    let off = doc.add_object(lopdf::Stream::new(dictionary! {}, Vec::new()));
    fields.push(doc.add_object(dictionary! {
        "FT" => "Btn",
        "T" => Object::string_literal("Agree"),
        "Type" => "Annot",
        "Subtype" => "Widget",
        "Rect" => vec![0.into(), 30.into(), 20.into(), 50.into()],
        "P" => page_id,
        "AP" => dictionary! { "N" => dictionary! { "Yes" => on, "Off" => off } },
    }));

    fields.push(doc.add_object(dictionary! {
        "FT" => "Ch",
        "Ff" => 1i64 << 17,
        "T" => Object::string_literal("Plan"),
        "Opt" => vec![Object::string_literal("basic"), Object::string_literal("premium")],
        "Type" => "Annot",
        "Subtype" => "Widget",
        "Rect" => vec![0.into(), 60.into(), 100.into(), 80.into()],
        "P" => page_id,
    }));

    fields.push(doc.add_object(dictionary! {
        "FT" => "Ch",
        "Ff" => 1i64 << 21,
        "T" => Object::string_literal("Interests"),
        "Opt" => vec![
            Object::string_literal("music"),
            Object::string_literal("sport"),
            Object::string_literal("travel"),
        ],
        "Type" => "Annot",
        "Subtype" => "Widget",
        "Rect" => vec![0.into(), 90.into(), 100.into(), 140.into()],
        "P" => page_id,
    }));

    let seat = doc.new_object_id();
    let mut seat_widgets: Vec<Object> = Vec::new();
    for (state, x) in [("A", 0), ("B", 30)] {
        let on = doc.add_object(lopdf::Stream::new(dictionary! {}, Vec::new()));
        let off = doc.add_object(lopdf::Stream::new(dictionary! {}, Vec::new()));
        let widget = doc.add_object(dictionary! {
            "Parent" => seat,
            "AS" => "Off",
            "Type" => "Annot",
            "Subtype" => "Widget",
            "Rect" => vec![x.into(), 150.into(), (x + 20).into(), 170.into()],
            "P" => page_id,
            "AP" => dictionary! { "N" => dictionary! { state => on, "Off" => off } },
        });
        seat_widgets.push(widget.into());
    }
    doc.objects.insert(
        seat,
        Object::Dictionary(dictionary! {
            "FT" => "Btn",
            "Ff" => 1i64 << 15,
            "T" => Object::string_literal("Seat"),
            "Kids" => seat_widgets.clone(),
        }),
    );

    let mut annots: Vec<Object> = fields.iter().map(|id| (*id).into()).collect();
    let form_fields: Vec<Object> = annots.iter().cloned().chain([seat.into()]).collect();
    annots.extend(seat_widgets);
    doc.objects.insert(
        page_id,
        Object::Dictionary(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.28.into(), 841.89.into()],
            "Annots" => annots.clone(),
        }),
    );
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Count" => 1,
            "Kids" => vec![page_id.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
        "AcroForm" => dictionary! { "Fields" => form_fields },
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

fn fill(template: &[u8], document: &FormDocument) -> Result<Vec<u8>, FormError> {
    let json = to_json(document)?;
    let mut output = Vec::new();
    fill_form(template, json.as_slice(), &mut output)?;
    Ok(output)
}

#[test]
fn test_request_to_filled_pdf() {
    let payload = parse_payload(br#"{"FullName": "Jane Doe", "City": "Bangkok"}"#).unwrap();
    let document = map_fields(&payload);

    let output = fill(&create_template(), &document).unwrap();
    let filled = PdfDocument::open_from_bytes(&output).unwrap();

    let full_name = filled.field("FullName").unwrap();
    assert_eq!(full_name.value.as_deref(), Some("Jane Doe"));
    assert!(full_name.read_only());

    let city = filled.field("City").unwrap();
    assert_eq!(city.value.as_deref(), Some("Bangkok"));
    assert!(city.read_only());

    // Untouched fields stay editable
    assert!(!filled.field("BirthDate").unwrap().read_only());
}

#[test]
fn test_report_counts() {
    let document = FormDocument::single(FormSection {
        textfield: vec![
            FieldEntry::locked("FullName", "Jane Doe"),
            FieldEntry {
                name: "City".to_string(),
                value: "Bangkok".to_string(),
                locked: false,
            },
        ],
        ..Default::default()
    });
    let json = to_json(&document).unwrap();

    let mut output = Vec::new();
    let report = fill_form(create_template().as_slice(), json.as_slice(), &mut output).unwrap();
    assert_eq!(report.fields_filled, 2);
    assert_eq!(report.fields_locked, 1);
}

#[test]
fn test_empty_payload_copies_template() {
    let document = map_fields(&parse_payload(b"{}").unwrap());
    let output = fill(&create_template(), &document).unwrap();

    let filled = PdfDocument::open_from_bytes(&output).unwrap();
    assert_eq!(filled.form_fields().unwrap().len(), 7);
    assert!(filled.form_fields().unwrap().iter().all(|f| f.value.is_none()));
}

#[test]
fn test_all_field_kinds() {
    let document = FormDocument::single(FormSection {
        textfield: vec![FieldEntry::locked("FullName", "Jane Doe")],
        datefield: vec![FieldEntry::locked("BirthDate", "1990-01-31")],
        combobox: vec![FieldEntry::locked("Plan", "premium")],
        listbox: vec![ListBoxEntry {
            name: "Interests".to_string(),
            values: vec!["music".to_string(), "travel".to_string()],
            locked: true,
        }],
        radiobuttongroup: vec![FieldEntry::locked("Seat", "B")],
        checkbox: vec![CheckboxEntry {
            name: "Agree".to_string(),
            value: true,
            locked: false,
        }],
    });

    let output = fill(&create_template(), &document).unwrap();
    let filled = PdfDocument::open_from_bytes(&output).unwrap();

    assert_eq!(
        filled.field("BirthDate").unwrap().value.as_deref(),
        Some("1990-01-31")
    );
    assert_eq!(filled.field("Plan").unwrap().value.as_deref(), Some("premium"));
    let agree = filled.field("Agree").unwrap();
    assert_eq!(agree.value.as_deref(), Some("Yes"));
    assert!(!agree.read_only());

    let interests = filled.field("Interests").unwrap();
    assert_eq!(interests.value.as_deref(), Some("music"));
    assert!(interests.read_only());

    let seat = filled.field("Seat").unwrap();
    assert_eq!(seat.value.as_deref(), Some("B"));
    assert_eq!(seat.options, vec!["A".to_string(), "B".to_string()]);
    assert!(seat.read_only());
}

#[test]
fn test_combobox_entry_on_list_box_fails() {
    let document = FormDocument::single(FormSection {
        combobox: vec![FieldEntry::locked("Interests", "music")],
        ..Default::default()
    });

    match fill(&create_template(), &document) {
        Err(FormError::FieldError { name, source }) => {
            assert_eq!(name, "Interests");
            assert!(matches!(source, PdfError::FieldTypeMismatch { .. }));
        }
        other => panic!("expected FieldError, got {:?}", other),
    }
}

#[test]
fn test_radio_group_unknown_button_fails() {
    let document = FormDocument::single(FormSection {
        radiobuttongroup: vec![FieldEntry::locked("Seat", "C")],
        ..Default::default()
    });

    let result = fill(&create_template(), &document);
    assert!(matches!(
        result,
        Err(FormError::FieldError {
            source: PdfError::InvalidValue { .. },
            ..
        })
    ));
}

#[test]
fn test_sections_apply_in_order() {
    let document = FormDocument {
        forms: vec![
            FormSection {
                textfield: vec![FieldEntry::locked("City", "Chiang Mai")],
                ..Default::default()
            },
            FormSection {
                textfield: vec![FieldEntry::locked("City", "Bangkok")],
                ..Default::default()
            },
        ],
    };

    let output = fill(&create_template(), &document).unwrap();
    let filled = PdfDocument::open_from_bytes(&output).unwrap();
    assert_eq!(filled.field("City").unwrap().value.as_deref(), Some("Bangkok"));
}

#[test]
fn test_unknown_field_fails_without_output() {
    let document = map_fields(vec![("Nickname", "JD")]);
    let json = to_json(&document).unwrap();

    let mut output = Vec::new();
    let result = fill_form(create_template().as_slice(), json.as_slice(), &mut output);

    match result {
        Err(FormError::FieldError { name, source }) => {
            assert_eq!(name, "Nickname");
            assert!(matches!(source, PdfError::FieldNotFound(_)));
        }
        other => panic!("expected FieldError, got {:?}", other),
    }
    assert!(output.is_empty());
}

#[test]
fn test_corrupt_template() {
    let document = map_fields(vec![("FullName", "Jane Doe")]);
    let result = fill(b"%PDF-1.7 garbage", &document);
    assert!(matches!(
        result,
        Err(FormError::PdfError(PdfError::OpenError(_)))
    ));
}

#[test]
fn test_invalid_payload() {
    let mut output = Vec::new();
    let result = fill_form(create_template().as_slice(), &b"not-json"[..], &mut output);
    assert!(matches!(result, Err(FormError::JsonError(_))));
}
