//! PDF Document wrapper

use crate::form::{self, AcroFormLocation, FieldKind, FormField};
use crate::text::encode_text_string;
use crate::{field_flags, PdfError, Result};
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::io::{Read, Write};
use std::path::Path;

/// PDF Document wrapper providing form-filling operations
pub struct PdfDocument {
    /// The underlying lopdf document
    inner: Document,
}

impl PdfDocument {
    /// Open a PDF document from a file path
    ///
    /// # Arguments
    /// * `path` - Path to the PDF file
    ///
    /// # Example
    /// ```ignore
    /// let doc = PdfDocument::open("template.pdf")?;
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let inner = Document::load(path).map_err(|e| PdfError::OpenError(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Open a PDF document from bytes
    ///
    /// # Arguments
    /// * `data` - PDF file bytes
    pub fn open_from_bytes(data: &[u8]) -> Result<Self> {
        let inner = Document::load_mem(data).map_err(|e| PdfError::OpenError(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Open a PDF document from any reader
    ///
    /// The reader is consumed to the end before parsing.
    pub fn open_from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::open_from_bytes(&data)
    }

    /// Whether the catalog carries an `/AcroForm`
    pub fn has_form(&self) -> bool {
        form::acroform_location(&self.inner).is_ok()
    }

    /// List every terminal form field
    ///
    /// Names are fully qualified (`parent.child`). Field type and flags
    /// are resolved through the parent chain.
    pub fn form_fields(&self) -> Result<Vec<FormField>> {
        form::collect_fields(&self.inner)
    }

    /// Look up a field by fully qualified name
    ///
    /// Falls back to the partial name (`/T`) when exactly one field
    /// carries it.
    pub fn field(&self, name: &str) -> Result<FormField> {
        let fields = self.form_fields()?;

        if let Some(field) = fields.iter().find(|f| f.name == name) {
            return Ok(field.clone());
        }

        let mut by_partial = fields.into_iter().filter(|f| f.partial_name == name);
        match (by_partial.next(), by_partial.next()) {
            (Some(field), None) => Ok(field),
            _ => Err(PdfError::FieldNotFound(name.to_string())),
        }
    }

    /// Set the value of a text field
    ///
    /// # Arguments
    /// * `name` - Field name
    /// * `value` - New value, stored as a PDF text string
    /// * `lock` - Mark the field read-only
    ///
    /// # Example
    /// ```ignore
    /// doc.set_text_field("FullName", "Jane Doe", true)?;
    /// ```
    pub fn set_text_field(&mut self, name: &str, value: &str, lock: bool) -> Result<()> {
        let field = self.field(name)?;
        expect_kind(&field, FieldKind::Text)?;

        self.field_dict_mut(field.id)?
            .set("V", encode_text_string(value));
        self.finish_field(&field, lock)
    }

    /// Select the value of a combo box
    ///
    /// When the field declares `/Opt`, the value must be one of its export values.
    pub fn set_combo_box(&mut self, name: &str, value: &str, lock: bool) -> Result<()> {
        let field = self.field(name)?;
        expect_kind(&field, FieldKind::ComboBox)?;
        expect_option(&field, value)?;

        self.field_dict_mut(field.id)?
            .set("V", encode_text_string(value));
        self.finish_field(&field, lock)
    }

    /// Select the values of a list box
    ///
    /// Several values need the MultiSelect flag. An empty slice clears the
    /// selection.
    pub fn set_list_box<S: AsRef<str>>(
        &mut self,
        name: &str,
        values: &[S],
        lock: bool,
    ) -> Result<()> {
        let field = self.field(name)?;
        expect_kind(&field, FieldKind::ListBox)?;

        if values.len() > 1 && field.flags & field_flags::MULTI_SELECT == 0 {
            return Err(PdfError::InvalidValue {
                name: field.name,
                reason: "list box does not allow multiple selections".to_string(),
            });
        }
        for value in values {
            expect_option(&field, value.as_ref())?;
        }

        let dict = self.field_dict_mut(field.id)?;
        match values {
            [] => {
                dict.remove(b"V");
            },
            [value] => dict.set("V", encode_text_string(value.as_ref())),
            _ => dict.set(
                "V",
                values
                    .iter()
                    .map(|value| encode_text_string(value.as_ref()))
                    .collect::<Vec<Object>>(),
            ),
        }
        self.finish_field(&field, lock)
    }

    /// Turn on the radio button whose on-state is `value`
    ///
    /// Every other button of the group is switched off. `Off` clears the group.
    pub fn set_radio_group(&mut self, name: &str, value: &str, lock: bool) -> Result<()> {
        let field = self.field(name)?;
        expect_kind(&field, FieldKind::RadioGroup)?;
        if value != "Off" {
            expect_option(&field, value)?;
        }

        for widget_id in &field.widgets {
            let widget = self.inner.get_object(*widget_id)?.as_dict()?;
            let state = match form::on_state(&self.inner, widget) {
                Some(on) if on == value.as_bytes() => on,
                _ => b"Off".to_vec(),
            };
            self.field_dict_mut(*widget_id)?
                .set("AS", Object::Name(state));
        }

        self.field_dict_mut(field.id)?
            .set("V", Object::Name(value.as_bytes().to_vec()));
        self.finish_field(&field, lock)
    }

    /// Check or uncheck a checkbox
    ///
    /// The on-state name is taken from each widget's normal appearance
    /// dictionary, defaulting to `/Yes`.
    pub fn set_checkbox(&mut self, name: &str, checked: bool, lock: bool) -> Result<()> {
        let field = self.field(name)?;
        expect_kind(&field, FieldKind::Checkbox)?;

        let mut field_state = b"Off".to_vec();
        for widget_id in &field.widgets {
            let widget = self.inner.get_object(*widget_id)?.as_dict()?;
            let state = if checked {
                form::on_state(&self.inner, widget).unwrap_or_else(|| b"Yes".to_vec())
            } else {
                b"Off".to_vec()
            };
            field_state = state.clone();
            self.field_dict_mut(*widget_id)?
                .set("AS", Object::Name(state));
        }

        self.field_dict_mut(field.id)?
            .set("V", Object::Name(field_state));
        self.finish_field(&field, lock)
    }

    /// Mark a field read-only without changing its value
    pub fn lock_field(&mut self, name: &str) -> Result<()> {
        let field = self.field(name)?;
        self.set_read_only(&field)
    }

    /// Save the document to a file
    ///
    /// # Arguments
    /// * `path` - Output file path
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.inner
            .save(path)
            .map_err(|e| PdfError::SaveError(e.to_string()))?;
        Ok(())
    }

    /// Save the document to a writer
    pub fn save_to<W: Write>(&mut self, writer: &mut W) -> Result<()> {
        self.inner
            .save_to(writer)
            .map_err(|e| PdfError::SaveError(e.to_string()))?;
        Ok(())
    }

    /// Save the document to bytes
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.save_to(&mut buffer)?;
        Ok(buffer)
    }

    /// Get a reference to the underlying lopdf document
    pub fn inner(&self) -> &Document {
        &self.inner
    }

    fn field_dict_mut(&mut self, id: ObjectId) -> Result<&mut Dictionary> {
        Ok(self.inner.get_object_mut(id)?.as_dict_mut()?)
    }

    /// Apply the lock and ask viewers to regenerate appearances
    fn finish_field(&mut self, field: &FormField, lock: bool) -> Result<()> {
        if lock {
            self.set_read_only(field)?;
        }
        self.set_need_appearances()
    }

    fn set_read_only(&mut self, field: &FormField) -> Result<()> {
        // Written on the terminal field itself, so inherited type bits must be kept
        let flags = field.flags | field_flags::READ_ONLY;
        self.field_dict_mut(field.id)?.set("Ff", flags);
        Ok(())
    }

    fn set_need_appearances(&mut self) -> Result<()> {
        let acroform = match form::acroform_location(&self.inner)? {
            AcroFormLocation::Indirect(id) => self.field_dict_mut(id)?,
            AcroFormLocation::Inline(catalog_id) => self
                .field_dict_mut(catalog_id)?
                .get_mut(b"AcroForm")?
                .as_dict_mut()?,
        };
        acroform.set("NeedAppearances", true);
        Ok(())
    }
}

fn expect_option(field: &FormField, value: &str) -> Result<()> {
    if field.options.is_empty() || field.options.iter().any(|opt| opt == value) {
        Ok(())
    } else {
        Err(PdfError::InvalidValue {
            name: field.name.clone(),
            reason: format!("'{}' is not one of the field options", value),
        })
    }
}

fn expect_kind(field: &FormField, expected: FieldKind) -> Result<()> {
    if field.kind == expected {
        Ok(())
    } else {
        Err(PdfError::FieldTypeMismatch {
            name: field.name.clone(),
            expected,
            actual: field.kind,
        })
    }
}
