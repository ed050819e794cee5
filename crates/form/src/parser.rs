//! Payload JSON parsing and encoding

use crate::{FormDocument, RequestPayload, Result};
use std::io::Read;

/// Parse a request body as a flat JSON object of strings
pub fn parse_payload(body: &[u8]) -> Result<RequestPayload> {
    Ok(serde_json::from_slice(body)?)
}

/// Parse a field payload from a reader
pub fn parse_form_document<R: Read>(reader: R) -> Result<FormDocument> {
    Ok(serde_json::from_reader(reader)?)
}

/// Encode a field payload as JSON
pub fn to_json(document: &FormDocument) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(document)?)
}
