//! Field payload types
//!
//! The JSON shape follows the form-filling format used by PDF tooling:
//!
//! ```json
//! { "forms": [ { "textfield": [ { "name": "FullName", "value": "Jane Doe", "locked": true } ] } ] }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Wire input: field name to field value
///
/// Ordered by name so the produced field payload is deterministic.
pub type RequestPayload = BTreeMap<String, String>;

/// One text field assignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldEntry {
    /// Fully qualified or unique partial field name
    pub name: String,
    /// Value to store
    pub value: String,
    /// Make the field read-only after filling
    #[serde(default)]
    pub locked: bool,
}

impl FieldEntry {
    /// Create a locked entry
    pub fn locked(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            locked: true,
        }
    }
}

/// One checkbox assignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckboxEntry {
    pub name: String,
    pub value: bool,
    #[serde(default)]
    pub locked: bool,
}

/// One list box assignment
///
/// More than one value needs a multi-select list box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListBoxEntry {
    pub name: String,
    pub values: Vec<String>,
    #[serde(default)]
    pub locked: bool,
}

/// One logical group of field assignments
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSection {
    /// Text field assignments
    #[serde(default)]
    pub textfield: Vec<FieldEntry>,

    /// Date field assignments (stored as text)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub datefield: Vec<FieldEntry>,

    /// Combo box assignments
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub combobox: Vec<FieldEntry>,

    /// List box assignments
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub listbox: Vec<ListBoxEntry>,

    /// Radio group assignments, the value naming the button to turn on
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub radiobuttongroup: Vec<FieldEntry>,

    /// Checkbox assignments
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub checkbox: Vec<CheckboxEntry>,
}

impl FormSection {
    /// Total number of assignments in this section
    pub fn len(&self) -> usize {
        self.textfield.len()
            + self.datefield.len()
            + self.combobox.len()
            + self.listbox.len()
            + self.radiobuttongroup.len()
            + self.checkbox.len()
    }

    /// Whether the section assigns nothing
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The field payload handed to the fill operation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormDocument {
    pub forms: Vec<FormSection>,
}

impl FormDocument {
    /// Wrap a single section
    pub fn single(section: FormSection) -> Self {
        Self {
            forms: vec![section],
        }
    }

    /// Total number of assignments across all sections
    pub fn field_count(&self) -> usize {
        self.forms.iter().map(FormSection::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_serialize_shape() {
        let doc = FormDocument::single(FormSection {
            textfield: vec![FieldEntry::locked("FullName", "Jane Doe")],
            ..Default::default()
        });

        assert_eq!(
            serde_json::to_value(&doc).unwrap(),
            json!({
                "forms": [
                    { "textfield": [ { "name": "FullName", "value": "Jane Doe", "locked": true } ] }
                ]
            })
        );
    }

    #[test]
    fn test_empty_section_keeps_textfield_key() {
        let doc = FormDocument::single(FormSection::default());
        assert_eq!(
            serde_json::to_value(&doc).unwrap(),
            json!({ "forms": [ { "textfield": [] } ] })
        );
    }

    #[test]
    fn test_deserialize_defaults() {
        let doc: FormDocument = serde_json::from_value(json!({
            "forms": [
                {
                    "textfield": [ { "name": "a", "value": "1" } ],
                    "checkbox": [ { "name": "ok", "value": true, "locked": true } ],
                    "listbox": [ { "name": "colors", "values": ["red", "blue"] } ],
                    "radiobuttongroup": [ { "name": "size", "value": "L", "locked": true } ]
                },
                {}
            ]
        }))
        .unwrap();

        assert_eq!(doc.forms.len(), 2);
        assert!(!doc.forms[0].textfield[0].locked);
        assert!(doc.forms[0].checkbox[0].value);
        assert_eq!(doc.forms[0].listbox[0].values, vec!["red", "blue"]);
        assert!(!doc.forms[0].listbox[0].locked);
        assert_eq!(doc.forms[0].radiobuttongroup[0].value, "L");
        assert!(doc.forms[1].is_empty());
        assert_eq!(doc.field_count(), 4);
    }
}
