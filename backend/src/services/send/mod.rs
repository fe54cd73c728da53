//! # Send Service Module
//!
//! Routes for sending a template, under
//! `/services/{service_id}/send/{template_id}`.
//!
//! The one-off wizard keeps its draft in the session store and walks the
//! user through the template's fields one step at a time:
//!
//! - `start`: resets the draft and redirects to the first step.
//! - `step`: shows and accepts one placeholder value.
//! - `address`: takes a letter's whole address as one block.
//! - `check`: hands a complete draft over to review.
//! - `csv_upload`: accepts a spreadsheet of recipients.

mod address;
mod check;
mod csv_upload;
mod start;
mod step;


use actix_web::web::{get, post, scope};
use actix_web::Scope;
use serde::Deserialize;

use crate::send_one_off::{BackLink, Position};

const API_PATH: &str = "/services/{service_id}/send/{template_id}";

/// Configures and returns the Actix `Scope` for the send routes.
///
/// # Registered Routes:
///
/// *   **`GET /one-off`**: `start::process`. Starts a new draft.
/// *   **`GET|POST /one-off/step-{step_index}`**: `step::show` and
///     `step::submit`. A valid submission redirects to the next step, the
///     address page or review; an invalid one answers 400 with the form.
/// *   **`GET|POST /one-off/address`**: `address::show` and
///     `address::submit`. Letters only.
/// *   **`GET /notification/check`**: `check::process`. The completed draft,
///     or a redirect to whatever is still missing.
/// *   **`POST /csv`**: `csv_upload::process`. Multipart field `file`.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/one-off", get().to(start::process))
        .route("/one-off/step-{step_index}", get().to(step::show))
        .route("/one-off/step-{step_index}", post().to(step::submit))
        .route("/one-off/address", get().to(address::show))
        .route("/one-off/address", post().to(address::submit))
        .route("/notification/check", get().to(check::process))
        .route("/csv", post().to(csv_upload::process))
}

#[derive(Debug, Deserialize)]
pub(crate) struct TemplatePath {
    pub service_id: String,
    pub template_id: String,
}

pub(crate) mod urls {
    pub fn template(service_id: &str, template_id: &str) -> String {
        format!("/services/{service_id}/templates/{template_id}")
    }

    pub fn start(service_id: &str, template_id: &str) -> String {
        format!("/services/{service_id}/send/{template_id}/one-off")
    }

    pub fn step(service_id: &str, template_id: &str, index: usize) -> String {
        format!("/services/{service_id}/send/{template_id}/one-off/step-{index}")
    }

    pub fn address(service_id: &str, template_id: &str) -> String {
        format!("/services/{service_id}/send/{template_id}/one-off/address")
    }

    pub fn check(service_id: &str, template_id: &str) -> String {
        format!("/services/{service_id}/send/{template_id}/notification/check")
    }
}

/// The URL a sequencer position redirects to. A `Show` position is the
/// step's own URL.
pub(crate) fn position_url(position: &Position, service_id: &str, template_id: &str) -> String {
    match position {
        Position::Show(step) => urls::step(service_id, template_id, step.index),
        Position::Goto(index) => urls::step(service_id, template_id, *index),
        Position::Address => urls::address(service_id, template_id),
        Position::Review => urls::check(service_id, template_id),
    }
}

pub(crate) fn back_link_url(link: BackLink, service_id: &str, template_id: &str) -> String {
    match link {
        BackLink::Template => urls::template(service_id, template_id),
        BackLink::Address => urls::address(service_id, template_id),
        BackLink::Step(index) => urls::step(service_id, template_id, index),
    }
}
