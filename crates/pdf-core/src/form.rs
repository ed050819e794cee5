//! AcroForm field tree

use crate::text::decode_text_string;
use crate::{field_flags, PdfError, Result};
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::collections::HashSet;
use std::fmt;

/// Kind of a terminal form field, derived from `/FT` and `/Ff`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Checkbox,
    RadioGroup,
    PushButton,
    ComboBox,
    ListBox,
    Signature,
    Unknown,
}

impl FieldKind {
    fn from_type(field_type: Option<&[u8]>, flags: i64) -> Self {
        match field_type {
            Some(b"Tx") => FieldKind::Text,
            Some(b"Btn") if flags & field_flags::PUSHBUTTON != 0 => FieldKind::PushButton,
            Some(b"Btn") if flags & field_flags::RADIO != 0 => FieldKind::RadioGroup,
            Some(b"Btn") => FieldKind::Checkbox,
            Some(b"Ch") if flags & field_flags::COMBO != 0 => FieldKind::ComboBox,
            Some(b"Ch") => FieldKind::ListBox,
            Some(b"Sig") => FieldKind::Signature,
            _ => FieldKind::Unknown,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Text => "text",
            FieldKind::Checkbox => "checkbox",
            FieldKind::RadioGroup => "radio group",
            FieldKind::PushButton => "push button",
            FieldKind::ComboBox => "combo box",
            FieldKind::ListBox => "list box",
            FieldKind::Signature => "signature",
            FieldKind::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// A terminal field of the document's interactive form
#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    /// Fully qualified name (`parent.child`)
    pub name: String,
    /// The field's own `/T`
    pub partial_name: String,
    pub kind: FieldKind,
    /// Current `/V`, decoded
    pub value: Option<String>,
    /// Effective `/Ff`, including inherited bits
    pub flags: i64,
    /// Export values from `/Opt` for choice fields, widget on-states for
    /// radio groups
    pub options: Vec<String>,
    pub(crate) id: ObjectId,
    pub(crate) widgets: Vec<ObjectId>,
}

impl FormField {
    /// Whether the ReadOnly flag is set
    pub fn read_only(&self) -> bool {
        self.flags & field_flags::READ_ONLY != 0
    }
}

/// Where the `/AcroForm` dictionary lives
pub(crate) enum AcroFormLocation {
    /// Indirect object
    Indirect(ObjectId),
    /// Inline in the catalog with this id
    Inline(ObjectId),
}

/// Attributes a field inherits from its ancestors
#[derive(Clone, Default)]
struct Inherited {
    field_type: Option<Vec<u8>>,
    flags: i64,
    value: Option<String>,
}

impl Inherited {
    fn merge(&self, doc: &Document, dict: &Dictionary) -> Self {
        let mut next = self.clone();
        if let Ok(ft) = dict.get(b"FT").and_then(Object::as_name) {
            next.field_type = Some(ft.to_vec());
        }
        if let Ok(ff) = dict.get(b"Ff").and_then(Object::as_i64) {
            next.flags = ff;
        }
        if let Ok(v) = dict.get(b"V") {
            next.value = read_value(doc, v);
        }
        next
    }
}

pub(crate) fn catalog_id(doc: &Document) -> Result<ObjectId> {
    Ok(doc.trailer.get(b"Root")?.as_reference()?)
}

pub(crate) fn acroform_location(doc: &Document) -> Result<AcroFormLocation> {
    let catalog_id = catalog_id(doc)?;
    let catalog = doc.get_object(catalog_id)?.as_dict()?;

    match catalog.get(b"AcroForm") {
        Ok(Object::Reference(id)) => Ok(AcroFormLocation::Indirect(*id)),
        Ok(Object::Dictionary(_)) => Ok(AcroFormLocation::Inline(catalog_id)),
        Ok(_) => Err(PdfError::ParseError(
            "AcroForm entry is not a dictionary".to_string(),
        )),
        Err(_) => Err(PdfError::NoAcroForm),
    }
}

fn acroform_dict(doc: &Document) -> Result<&Dictionary> {
    match acroform_location(doc)? {
        AcroFormLocation::Indirect(id) => Ok(doc.get_object(id)?.as_dict()?),
        AcroFormLocation::Inline(catalog_id) => Ok(doc
            .get_object(catalog_id)?
            .as_dict()?
            .get(b"AcroForm")?
            .as_dict()?),
    }
}

/// Follow a single level of indirection
fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> Result<&'a Object> {
    match obj {
        Object::Reference(id) => Ok(doc.get_object(*id)?),
        other => Ok(other),
    }
}

fn references(doc: &Document, obj: &Object) -> Result<Vec<ObjectId>> {
    let items = resolve(doc, obj)?
        .as_array()
        .map_err(|_| PdfError::ParseError("expected an array of fields".to_string()))?;
    Ok(items
        .iter()
        .filter_map(|item| item.as_reference().ok())
        .collect())
}

fn read_value(doc: &Document, obj: &Object) -> Option<String> {
    match resolve(doc, obj).ok()? {
        Object::String(bytes, _) => Some(decode_text_string(bytes)),
        Object::Name(name) => Some(String::from_utf8_lossy(name).into_owned()),
        Object::Array(items) => items.first().and_then(|first| read_value(doc, first)),
        _ => None,
    }
}

fn read_options(doc: &Document, dict: &Dictionary) -> Vec<String> {
    let Some(opt) = dict.get(b"Opt").ok().and_then(|o| resolve(doc, o).ok()) else {
        return Vec::new();
    };
    let Ok(items) = opt.as_array() else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match resolve(doc, item).ok()? {
            // [export display] pairs export the first element
            Object::Array(pair) => pair.first().and_then(|export| read_value(doc, export)),
            other => read_value(doc, other),
        })
        .collect()
}

fn partial_name(doc: &Document, dict: &Dictionary) -> Option<String> {
    let t = dict.get(b"T").ok()?;
    match resolve(doc, t).ok()? {
        Object::String(bytes, _) => Some(decode_text_string(bytes)),
        _ => None,
    }
}

/// Collect every terminal field of the document's AcroForm
pub(crate) fn collect_fields(doc: &Document) -> Result<Vec<FormField>> {
    let acroform = acroform_dict(doc)?;
    let roots = match acroform.get(b"Fields") {
        Ok(fields) => references(doc, fields)?,
        Err(_) => Vec::new(),
    };

    let mut fields = Vec::new();
    let mut visited = HashSet::new();
    for root in roots {
        walk(doc, root, "", &Inherited::default(), &mut visited, &mut fields)?;
    }
    Ok(fields)
}

fn walk(
    doc: &Document,
    id: ObjectId,
    parent_name: &str,
    inherited: &Inherited,
    visited: &mut HashSet<ObjectId>,
    out: &mut Vec<FormField>,
) -> Result<()> {
    // Malformed files can contain cycles through /Kids
    if !visited.insert(id) {
        return Ok(());
    }

    let dict = doc.get_object(id)?.as_dict()?;
    let partial = partial_name(doc, dict).unwrap_or_default();
    let name = match (parent_name.is_empty(), partial.is_empty()) {
        (true, _) => partial.clone(),
        (false, true) => parent_name.to_string(),
        (false, false) => format!("{}.{}", parent_name, partial),
    };
    let inherited = inherited.merge(doc, dict);

    let kids = match dict.get(b"Kids") {
        Ok(kids) => references(doc, kids)?,
        Err(_) => Vec::new(),
    };

    // Kids carrying /T are child fields, the rest are widget annotations
    let (children, widgets): (Vec<ObjectId>, Vec<ObjectId>) = kids.into_iter().partition(|kid| {
        doc.get_object(*kid)
            .and_then(Object::as_dict)
            .map(|kid_dict| kid_dict.has(b"T"))
            .unwrap_or(false)
    });

    if !children.is_empty() {
        for child in children {
            walk(doc, child, &name, &inherited, visited, out)?;
        }
        return Ok(());
    }

    if name.is_empty() {
        return Ok(());
    }

    let kind = FieldKind::from_type(inherited.field_type.as_deref(), inherited.flags);
    let widgets = if widgets.is_empty() { vec![id] } else { widgets };
    let options = match kind {
        FieldKind::ComboBox | FieldKind::ListBox => read_options(doc, dict),
        FieldKind::RadioGroup => widgets
            .iter()
            .filter_map(|widget| doc.get_object(*widget).and_then(Object::as_dict).ok())
            .filter_map(|widget| on_state(doc, widget))
            .map(|state| String::from_utf8_lossy(&state).into_owned())
            .collect(),
        _ => Vec::new(),
    };

    out.push(FormField {
        name,
        partial_name: partial,
        kind,
        value: inherited.value.clone(),
        flags: inherited.flags,
        options,
        id,
        widgets,
    });

    Ok(())
}

/// The "on" appearance state of a checkbox or radio widget, if it declares one
pub(crate) fn on_state(doc: &Document, widget: &Dictionary) -> Option<Vec<u8>> {
    let ap = resolve(doc, widget.get(b"AP").ok()?).ok()?.as_dict().ok()?;
    let normal = resolve(doc, ap.get(b"N").ok()?).ok()?.as_dict().ok()?;
    normal
        .iter()
        .map(|(key, _)| key)
        .find(|key| key.as_slice() != b"Off")
        .cloned()
}
