use actix_web::{web, HttpResponse};
use common::model::template::{TemplateType, ADDRESS_LINE_COUNT};
use log::debug;
use serde::Deserialize;
use serde_json::json;

use super::{position_url, urls, TemplatePath};
use crate::forms::letter_address::LetterAddressForm;
use crate::send_one_off::StepSequencer;
use crate::services::{run_blocking, Outcome, ServiceError};
use crate::session::SessionId;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct AddressSubmission {
    #[serde(default)]
    address: String,
}

pub async fn show(
    path: web::Path<TemplatePath>,
    session: SessionId,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ServiceError> {
    respond(path.into_inner(), session, state, None).await
}

pub async fn submit(
    path: web::Path<TemplatePath>,
    session: SessionId,
    state: web::Data<AppState>,
    form: web::Form<AddressSubmission>,
) -> Result<HttpResponse, ServiceError> {
    respond(path.into_inner(), session, state, Some(form.into_inner().address)).await
}

async fn respond(
    path: TemplatePath,
    session: SessionId,
    state: web::Data<AppState>,
    submitted: Option<String>,
) -> Result<HttpResponse, ServiceError> {
    let state = state.into_inner();
    let session_id = session.as_str().to_string();
    let outcome =
        run_blocking(move || address_page(&state, &session_id, &path, submitted.as_deref())).await?;
    Ok(outcome.respond(&session))
}

/// The address block for letters. A valid address fills every address line
/// and the postcode, then moves on to the first placeholder still missing.
pub(crate) fn address_page(
    state: &AppState,
    session_id: &str,
    path: &TemplatePath,
    submitted: Option<&str>,
) -> Result<Outcome, ServiceError> {
    let TemplatePath {
        service_id,
        template_id,
    } = path;

    let Some(mut draft) = state.drafts.load(session_id)? else {
        return Ok(Outcome::Redirect(urls::start(service_id, template_id)));
    };
    let template = state
        .templates
        .get(state.notify_api.as_ref(), service_id, template_id)?;
    if template.template_type != TemplateType::Letter {
        return Ok(Outcome::Redirect(urls::step(service_id, template_id, 0)));
    }
    let service = state.notify_api.get_service(service_id)?;
    let sequencer = StepSequencer::new(&template, state.config.letter_address_entry);

    let mut form = LetterAddressForm::new(service.can_send_international_letters(), &draft);

    if let Some(value) = submitted {
        form.submit(value);
        if form.validate(&state.validation_context(&service.name))? {
            sequencer.apply_address(&mut draft, &form.postal_address());
            state.drafts.save(session_id, &draft)?;
            let next = sequencer.next_after(ADDRESS_LINE_COUNT - 1, &draft);
            debug!("Address recorded, next is {:?}", next);
            return Ok(Outcome::Redirect(position_url(&next, service_id, template_id)));
        }
    }

    let page = json!({
        "template_id": template_id,
        "template_type": template.template_type,
        "form": form.view(),
        "back_link": urls::template(service_id, template_id),
    });
    Ok(if submitted.is_some() {
        Outcome::invalid(page)
    } else {
        Outcome::page(page)
    })
}
