use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use log::info;
use serde_json::json;

use super::TemplatePath;
use crate::forms::uploads::{CsvUploadForm, CSV_MAX_BYTES};
use crate::services::multipart::read_upload;
use crate::services::{run_blocking, Outcome, ServiceError};
use crate::session::SessionId;
use crate::state::AppState;
use crate::validation::Upload;

/// Accepts a spreadsheet of recipients. The file is scanned for viruses
/// and its header row checked against the template's recipient columns.
pub async fn process(
    path: web::Path<TemplatePath>,
    session: SessionId,
    state: web::Data<AppState>,
    payload: Multipart,
) -> Result<HttpResponse, ServiceError> {
    let path = path.into_inner();
    let upload = read_upload(payload, "file", CSV_MAX_BYTES).await?;
    let state = state.into_inner();
    let outcome = run_blocking(move || check_upload(&state, &path, upload)).await?;
    Ok(outcome.respond(&session))
}

pub(crate) fn check_upload(
    state: &AppState,
    path: &TemplatePath,
    upload: Option<Upload>,
) -> Result<Outcome, ServiceError> {
    let template = state
        .templates
        .get(state.notify_api.as_ref(), &path.service_id, &path.template_id)?;
    let service = state.notify_api.get_service(&path.service_id)?;

    let mut form = CsvUploadForm::new(template.template_type);
    form.attach(upload);
    if !form.validate(&state.validation_context(&service.name))? {
        return Ok(Outcome::invalid(json!({ "form": form.view() })));
    }

    let (filename, size) = match form.file.upload() {
        Some(upload) => (upload.filename().to_string(), upload.size()?),
        None => (String::new(), 0),
    };
    info!(
        "Accepted recipients file {} for template {} of service {}",
        filename, path.template_id, path.service_id
    );
    Ok(Outcome::page(json!({
        "template_id": path.template_id,
        "filename": filename,
        "size": size,
        "status": "ok",
    })))
}
