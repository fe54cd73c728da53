use actix_web::{web, HttpResponse};
use log::info;
use serde_json::json;

use super::{position_url, urls, TemplatePath};
use crate::send_one_off::{gate, StepSequencer};
use crate::services::{run_blocking, Outcome, ServiceError};
use crate::session::SessionId;
use crate::state::AppState;

/// The review hand-off. Only a complete draft gets through; anything else
/// is sent back to the first thing still missing.
pub async fn process(
    path: web::Path<TemplatePath>,
    session: SessionId,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ServiceError> {
    let path = path.into_inner();
    let state = state.into_inner();
    let session_id = session.as_str().to_string();
    let outcome = run_blocking(move || review(&state, &session_id, &path)).await?;
    Ok(outcome.respond(&session))
}

pub(crate) fn review(
    state: &AppState,
    session_id: &str,
    path: &TemplatePath,
) -> Result<Outcome, ServiceError> {
    let TemplatePath {
        service_id,
        template_id,
    } = path;

    let Some(draft) = state.drafts.load(session_id)? else {
        return Ok(Outcome::Redirect(urls::start(service_id, template_id)));
    };
    let template = state
        .templates
        .get(state.notify_api.as_ref(), service_id, template_id)?;
    if !gate::is_complete(&template, &draft) {
        let sequencer = StepSequencer::new(&template, state.config.letter_address_entry);
        let missing = sequencer.locate(sequencer.fields().len(), &draft);
        return Ok(Outcome::Redirect(position_url(&missing, service_id, template_id)));
    }

    info!(
        "Draft for template {} of service {} is ready for review",
        template_id, service_id
    );
    Ok(Outcome::page(json!({
        "template_id": template_id,
        "template_type": template.template_type,
        "recipient": draft.recipient,
        "placeholders": draft.placeholders,
    })))
}
