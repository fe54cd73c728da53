use actix_web::{web, HttpResponse};
use common::model::template::{Template, TemplateType};
use log::info;
use serde::Deserialize;
use serde_json::json;

use super::ServicePath;
use crate::forms::sms_template::SmsTemplateForm;
use crate::services::{run_blocking, Outcome, ServiceError};
use crate::session::SessionId;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SmsTemplateSubmission {
    #[serde(default)]
    name: String,
    #[serde(default)]
    template_content: String,
}

pub async fn process(
    path: web::Path<ServicePath>,
    session: SessionId,
    state: web::Data<AppState>,
    form: web::Form<SmsTemplateSubmission>,
) -> Result<HttpResponse, ServiceError> {
    let path = path.into_inner();
    let submission = form.into_inner();
    let state = state.into_inner();
    let outcome = run_blocking(move || check_sms_template(&state, &path, &submission)).await?;
    Ok(outcome.respond(&session))
}

pub(crate) fn check_sms_template(
    state: &AppState,
    path: &ServicePath,
    submission: &SmsTemplateSubmission,
) -> Result<Outcome, ServiceError> {
    let service = state.notify_api.get_service(&path.service_id)?;

    let mut form = SmsTemplateForm::new();
    form.submit(&submission.name, &submission.template_content);
    if !form.validate(&state.validation_context(&service.name))? {
        return Ok(Outcome::invalid(json!({ "form": form.view() })));
    }

    let template = Template {
        id: String::new(),
        name: form.name.data().to_string(),
        template_type: TemplateType::Sms,
        subject: None,
        content: form.template_content.data().to_string(),
    };
    info!("SMS template {:?} accepted for service {}", template.name, service.id);
    Ok(Outcome::page(json!({
        "name": template.name,
        "template_content": template.content,
        "placeholders": template.placeholders(),
    })))
}
