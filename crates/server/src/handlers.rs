//! HTTP request handlers.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use pdf_core::PdfDocument;
use serde::Serialize;

use crate::config::OutputMode;
use crate::error::ApiError;
use crate::output;
use crate::server::AppState;

/// Body of a successful fill.
#[derive(Debug, Serialize)]
pub struct FillResponse {
    pub message: &'static str,
    /// Written file, reported only when every request gets its own file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

/// One template field, as listed by `GET /replay-sjk/fields`.
#[derive(Debug, Serialize)]
pub struct FieldInfo {
    pub name: String,
    pub kind: String,
    pub value: Option<String>,
    pub read_only: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl From<pdf_core::FormField> for FieldInfo {
    fn from(field: pdf_core::FormField) -> Self {
        Self {
            read_only: field.read_only(),
            kind: field.kind.to_string(),
            name: field.name,
            value: field.value,
            options: field.options,
        }
    }
}

/// `POST /replay-sjk`: fill the template from a flat JSON object of strings.
pub async fn replay_sjk(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<FillResponse>), ApiError> {
    let body = body.map_err(|e| {
        tracing::warn!(error = %e, "Unable to read request body");
        ApiError::UnreadableBody
    })?;

    let payload = form::parse_payload(&body).map_err(|e| {
        tracing::debug!(error = %e, "Rejected request body");
        ApiError::InvalidJson
    })?;

    let document = form::map_fields(&payload);
    let json = form::to_json(&document).map_err(|e| {
        tracing::error!(error = %e, "Error encoding form data");
        ApiError::Encode(e)
    })?;

    let template = state.config.template_path.clone();
    let target = output::output_path(&state.config);

    let job_template = template.clone();
    let job_target = target.clone();
    let report = tokio::task::spawn_blocking(move || {
        output::fill_to_path(&job_template, &json, &job_target)
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))?
    .map_err(|e| {
        tracing::error!(
            error = %e,
            template = %template.display(),
            output = %target.display(),
            "Error filling form"
        );
        ApiError::Fill(e)
    })?;

    tracing::info!(
        fields = report.fields_filled,
        locked = report.fields_locked,
        output = %target.display(),
        "Form filled"
    );

    let output = match state.config.output_mode {
        OutputMode::Fixed => None,
        OutputMode::PerRequest => Some(target.display().to_string()),
    };

    Ok((
        StatusCode::OK,
        Json(FillResponse {
            message: "Form filled successfully",
            output,
        }),
    ))
}

/// `GET /replay-sjk/fields`: list the template's form fields.
pub async fn template_fields(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<FieldInfo>>, ApiError> {
    let template = state.config.template_path.clone();

    let fields = tokio::task::spawn_blocking(move || {
        PdfDocument::open(&template).and_then(|doc| doc.form_fields())
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))?
    .map_err(|e| {
        tracing::error!(
            error = %e,
            template = %state.config.template_path.display(),
            "Error reading form template"
        );
        ApiError::Template(e)
    })?;

    Ok(Json(fields.into_iter().map(FieldInfo::from).collect()))
}

/// `GET /health`
pub async fn health() -> &'static str {
    "OK"
}
