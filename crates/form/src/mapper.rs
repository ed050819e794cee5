//! Flat request to field payload

use crate::schema::{FieldEntry, FormDocument, FormSection};

/// Map name/value pairs 1:1 onto locked text field entries
///
/// All entries land in a single section of a single-section document.
/// Names and values pass through unchanged. Entry order follows the
/// input order; a `RequestPayload` iterates sorted by name.
pub fn map_fields<I, K, V>(pairs: I) -> FormDocument
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let textfield = pairs
        .into_iter()
        .map(|(name, value)| FieldEntry::locked(name, value))
        .collect();

    FormDocument::single(FormSection {
        textfield,
        ..Default::default()
    })
}
