use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use log::info;
use serde_json::json;

use super::ServicePath;
use crate::forms::uploads::{LetterBrandingUploadForm, LETTER_BRANDING_MAX_BYTES};
use crate::services::multipart::read_upload;
use crate::services::{run_blocking, Outcome, ServiceError};
use crate::session::SessionId;
use crate::state::AppState;
use crate::validation::Upload;

pub async fn process(
    path: web::Path<ServicePath>,
    session: SessionId,
    state: web::Data<AppState>,
    payload: Multipart,
) -> Result<HttpResponse, ServiceError> {
    let path = path.into_inner();
    let upload = read_upload(payload, "branding", LETTER_BRANDING_MAX_BYTES).await?;
    let state = state.into_inner();
    let outcome = run_blocking(move || check_branding(&state, &path, upload)).await?;
    Ok(outcome.respond(&session))
}

pub(crate) fn check_branding(
    state: &AppState,
    path: &ServicePath,
    upload: Option<Upload>,
) -> Result<Outcome, ServiceError> {
    let service = state.notify_api.get_service(&path.service_id)?;

    let mut form = LetterBrandingUploadForm::new();
    form.attach(upload);
    if !form.validate(&state.validation_context(&service.name))? {
        return Ok(Outcome::invalid(json!({ "form": form.view() })));
    }

    let filename = form
        .branding
        .upload()
        .map(|upload| upload.filename().to_string())
        .unwrap_or_default();
    info!("Letter branding {} accepted for service {}", filename, service.id);
    Ok(Outcome::page(json!({ "filename": filename, "status": "ok" })))
}
