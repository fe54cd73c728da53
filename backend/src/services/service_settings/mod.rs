//! # Service Settings Module
//!
//! Routes under `/services/{service_id}/service-settings` that validate a
//! service's settings before they are saved.

mod letter_branding;
mod name;
mod sms_sender;

use actix_web::web::{post, scope};
use actix_web::Scope;
use serde::Deserialize;

const API_PATH: &str = "/services/{service_id}/service-settings";

/// # Registered Routes:
///
/// *   **`POST /name`**: `name::process`. Form field `name`.
/// *   **`POST /sms-sender`**: `sms_sender::process`. Form fields
///     `sms_sender` and `is_default`.
/// *   **`POST /letter-branding/upload`**: `letter_branding::process`.
///     Multipart field `branding` holding an SVG.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/name", post().to(name::process))
        .route("/sms-sender", post().to(sms_sender::process))
        .route("/letter-branding/upload", post().to(letter_branding::process))
}

#[derive(Debug, Deserialize)]
pub(crate) struct ServicePath {
    pub service_id: String,
}
