//! # Registration Module
//!
//! `POST /register` checks the details of a new account. Email addresses
//! must belong to one of the configured government domains.

use actix_web::web::{post, scope};
use actix_web::{web, HttpResponse, Scope};
use log::info;
use serde::Deserialize;
use serde_json::json;

use crate::forms::registration::RegistrationForm;
use crate::services::{run_blocking, Outcome, ServiceError};
use crate::session::SessionId;
use crate::state::AppState;

const API_PATH: &str = "/register";

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("", post().to(process))
}

#[derive(Default, Deserialize)]
pub struct RegistrationSubmission {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email_address: String,
    #[serde(default)]
    mobile_number: String,
    #[serde(default)]
    password: String,
}

pub async fn process(
    session: SessionId,
    state: web::Data<AppState>,
    form: web::Form<RegistrationSubmission>,
) -> Result<HttpResponse, ServiceError> {
    let submission = form.into_inner();
    let state = state.into_inner();
    let outcome = run_blocking(move || check_registration(&state, &submission)).await?;
    Ok(outcome.respond(&session))
}

pub(crate) fn check_registration(
    state: &AppState,
    submission: &RegistrationSubmission,
) -> Result<Outcome, ServiceError> {
    let mut form = RegistrationForm::new(&state.config.government_email_domains);
    form.submit(
        &submission.name,
        &submission.email_address,
        &submission.mobile_number,
        &submission.password,
    );
    if !form.validate(&state.validation_context(""))? {
        return Ok(Outcome::invalid(json!({ "form": form.view() })));
    }

    info!("Registration accepted for {}", form.email_address.data());
    Ok(Outcome::page(json!({
        "name": form.name.data(),
        "email_address": form.email_address.data(),
        "mobile_number": form.mobile_number.data(),
    })))
}
