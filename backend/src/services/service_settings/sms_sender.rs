use actix_web::{web, HttpResponse};
use log::info;
use serde::Deserialize;
use serde_json::json;

use super::ServicePath;
use crate::forms::sms_sender::SmsSenderForm;
use crate::services::{run_blocking, Outcome, ServiceError};
use crate::session::SessionId;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SmsSenderSubmission {
    #[serde(default)]
    sms_sender: String,
    /// Checkbox; present when ticked.
    #[serde(default)]
    is_default: Option<String>,
}

pub async fn process(
    path: web::Path<ServicePath>,
    session: SessionId,
    state: web::Data<AppState>,
    form: web::Form<SmsSenderSubmission>,
) -> Result<HttpResponse, ServiceError> {
    let path = path.into_inner();
    let submission = form.into_inner();
    let state = state.into_inner();
    let outcome = run_blocking(move || check_sms_sender(&state, &path, &submission)).await?;
    Ok(outcome.respond(&session))
}

pub(crate) fn check_sms_sender(
    state: &AppState,
    path: &ServicePath,
    submission: &SmsSenderSubmission,
) -> Result<Outcome, ServiceError> {
    let service = state.notify_api.get_service(&path.service_id)?;

    let mut form = SmsSenderForm::new();
    form.submit(&submission.sms_sender, submission.is_default.is_some());
    if !form.validate(&state.validation_context(&service.name))? {
        return Ok(Outcome::invalid(json!({ "form": form.view() })));
    }

    info!("Sender id {} accepted for service {}", form.sms_sender.data(), service.id);
    Ok(Outcome::page(json!({
        "sms_sender": form.sms_sender.data(),
        "is_default": form.is_default,
    })))
}
