//! # HTTP services
//!
//! Each sub-module owns one URL scope and exposes `configure_routes()`,
//! which `main` registers on the app.
//!
//! - `send`: the "send one message" wizard and the recipients upload for a
//!   template.
//! - `service_settings`: the name, SMS sender id and letter branding of a
//!   service.
//! - `templates`: the content of a new SMS template.
//! - `register`: the details of a new account.
//!
//! Handlers do their blocking work (HTTP collaborators, SQLite) inside
//! [`run_blocking`] and answer with an [`Outcome`]: a redirect, or a JSON
//! page with the form and its errors.

mod error;
mod multipart;
pub mod register;
pub mod send;
pub mod service_settings;
pub mod templates;

pub use error::ServiceError;

use actix_web::http::{header, StatusCode};
use actix_web::{web, HttpResponse};
use serde_json::Value;

use crate::session::SessionId;

/// Registers every scope on an app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(send::configure_routes())
        .service(service_settings::configure_routes())
        .service(templates::configure_routes())
        .service(register::configure_routes());
}

pub(crate) async fn run_blocking<F, T>(work: F) -> Result<T, ServiceError>
where
    F: FnOnce() -> Result<T, ServiceError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ServiceError::Join(e.to_string()))?
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Redirect(String),
    Page(StatusCode, Value),
}

impl Outcome {
    pub fn page(body: Value) -> Self {
        Outcome::Page(StatusCode::OK, body)
    }

    /// A form that failed validation, re-rendered with its errors.
    pub fn invalid(body: Value) -> Self {
        Outcome::Page(StatusCode::BAD_REQUEST, body)
    }

    pub fn respond(self, session: &SessionId) -> HttpResponse {
        let response = match self {
            Outcome::Redirect(location) => HttpResponse::Found()
                .insert_header((header::LOCATION, location))
                .finish(),
            Outcome::Page(status, body) => HttpResponse::build(status).json(body),
        };
        session.attach(response)
    }
}
