use actix_web::{web, HttpResponse};
use log::info;
use serde::Deserialize;
use serde_json::json;

use super::ServicePath;
use crate::forms::service_name::ServiceNameForm;
use crate::services::{run_blocking, Outcome, ServiceError};
use crate::session::SessionId;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct NameSubmission {
    #[serde(default)]
    name: String,
}

pub async fn process(
    path: web::Path<ServicePath>,
    session: SessionId,
    state: web::Data<AppState>,
    form: web::Form<NameSubmission>,
) -> Result<HttpResponse, ServiceError> {
    let path = path.into_inner();
    let submission = form.into_inner();
    let state = state.into_inner();
    let outcome = run_blocking(move || check_name(&state, &path, &submission)).await?;
    Ok(outcome.respond(&session))
}

pub(crate) fn check_name(
    state: &AppState,
    path: &ServicePath,
    submission: &NameSubmission,
) -> Result<Outcome, ServiceError> {
    let service = state.notify_api.get_service(&path.service_id)?;

    let mut form = ServiceNameForm::new();
    form.submit(&submission.name);
    if !form.validate(&state.validation_context(&service.name))? {
        return Ok(Outcome::invalid(json!({ "form": form.view() })));
    }

    info!("Service {} may be renamed to {}", service.id, form.name.data());
    Ok(Outcome::page(json!({ "name": form.name.data() })))
}
