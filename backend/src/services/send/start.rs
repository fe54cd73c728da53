use actix_web::{web, HttpResponse};
use common::model::draft::Draft;
use log::info;

use super::{urls, TemplatePath};
use crate::services::{run_blocking, Outcome, ServiceError};
use crate::session::SessionId;
use crate::state::AppState;

/// Throws away any draft in progress and starts at step 0.
pub async fn process(
    path: web::Path<TemplatePath>,
    session: SessionId,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ServiceError> {
    let TemplatePath {
        service_id,
        template_id,
    } = path.into_inner();
    let state = state.into_inner();
    let session_id = session.as_str().to_string();

    let outcome = run_blocking(move || {
        state.templates.forget(&service_id, &template_id);
        state.drafts.save(&session_id, &Draft::new())?;
        info!(
            "Started one-off send of template {} for service {}",
            template_id, service_id
        );
        Ok(Outcome::Redirect(urls::step(&service_id, &template_id, 0)))
    })
    .await?;

    Ok(outcome.respond(&session))
}
