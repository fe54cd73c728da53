//! # Templates Module
//!
//! Checks a template's content before it is stored by the notification
//! API, under `/services/{service_id}/templates`.

mod sms;

use actix_web::web::{post, scope};
use actix_web::Scope;
use serde::Deserialize;

const API_PATH: &str = "/services/{service_id}/templates";

/// # Registered Routes:
///
/// *   **`POST /add-sms`**: `sms::process`. Form fields `name` and
///     `template_content`. Answers with the placeholders found in the content.
pub fn configure_routes() -> Scope {
    scope(API_PATH).route("/add-sms", post().to(sms::process))
}

#[derive(Debug, Deserialize)]
pub(crate) struct ServicePath {
    pub service_id: String,
}
