use actix_web::{web, HttpResponse};
use log::debug;
use serde::Deserialize;
use serde_json::json;

use super::{back_link_url, position_url, urls};
use crate::forms::placeholder::placeholder_form;
use common::model::template::ADDRESS_LINE_COUNT;

use crate::send_one_off::{Position, StepKind, StepSequencer};
use crate::services::{run_blocking, Outcome, ServiceError};
use crate::session::SessionId;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StepPath {
    service_id: String,
    template_id: String,
    step_index: usize,
}

#[derive(Debug, Default, Deserialize)]
pub struct PlaceholderSubmission {
    #[serde(default)]
    placeholder_value: String,
}

pub async fn show(
    path: web::Path<StepPath>,
    session: SessionId,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ServiceError> {
    respond(path.into_inner(), session, state, None).await
}

pub async fn submit(
    path: web::Path<StepPath>,
    session: SessionId,
    state: web::Data<AppState>,
    form: web::Form<PlaceholderSubmission>,
) -> Result<HttpResponse, ServiceError> {
    respond(path.into_inner(), session, state, Some(form.into_inner().placeholder_value)).await
}

async fn respond(
    path: StepPath,
    session: SessionId,
    state: web::Data<AppState>,
    submitted: Option<String>,
) -> Result<HttpResponse, ServiceError> {
    let state = state.into_inner();
    let session_id = session.as_str().to_string();
    let outcome =
        run_blocking(move || step_page(&state, &session_id, &path, submitted.as_deref())).await?;
    Ok(outcome.respond(&session))
}

/// One step of the wizard. Without a submission this renders the step (or
/// redirects if the sequencer says it should be skipped); with one it
/// validates, records and moves on. Answering the last address line also
/// checks the address as a whole before anything is saved.
pub(crate) fn step_page(
    state: &AppState,
    session_id: &str,
    path: &StepPath,
    submitted: Option<&str>,
) -> Result<Outcome, ServiceError> {
    let StepPath {
        service_id,
        template_id,
        step_index,
    } = path;

    let Some(draft) = state.drafts.load(session_id)? else {
        return Ok(Outcome::Redirect(urls::start(service_id, template_id)));
    };
    let template = state
        .templates
        .get(state.notify_api.as_ref(), service_id, template_id)?;
    let service = state.notify_api.get_service(service_id)?;
    let sequencer = StepSequencer::new(&template, state.config.letter_address_entry);

    let step = match sequencer.locate(*step_index, &draft) {
        Position::Show(step) => step,
        other => {
            return Ok(Outcome::Redirect(position_url(&other, service_id, template_id)));
        }
    };

    let mut form = placeholder_form(
        &step.placeholder,
        &draft,
        template.template_type,
        service.can_send_international_sms(),
        service.can_send_sms_to_landline(),
    );

    if let Some(value) = submitted {
        form.submit(value);
        let ctx = state.validation_context(&service.name);
        if form.validate(&ctx)? {
            let mut answered = draft.clone();
            sequencer.record(&mut answered, &step, form.value());
            let address_ok = step.kind != StepKind::AddressLine(ADDRESS_LINE_COUNT)
                || form.validate_address(
                    &answered,
                    service.can_send_international_letters(),
                    &ctx,
                )?;
            if address_ok {
                state.drafts.save(session_id, &answered)?;
                let next = sequencer.next_after(step.index, &answered);
                debug!("Step {} answered, next is {:?}", step.index, next);
                return Ok(Outcome::Redirect(position_url(&next, service_id, template_id)));
            }
        }
    }

    let page = json!({
        "template_id": template_id,
        "template_type": template.template_type,
        "step": step,
        "form": form.view(),
        "back_link": back_link_url(sequencer.back_link(step.index), service_id, template_id),
    });
    Ok(if submitted.is_some() {
        Outcome::invalid(page)
    } else {
        Outcome::page(page)
    })
}
