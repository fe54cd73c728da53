//! Outbound collaborators: the notification API, the antivirus scanner and
//! the support ticketing system.
//!
//! Handlers and validation rules only ever see the traits below. The
//! reqwest-backed implementations live in the submodules and are wired up
//! once in `main`.

pub mod antivirus;
mod http;
pub mod notify_api;
pub mod zendesk;

#[cfg(test)]
pub mod testing;

use common::model::service::Service;
use common::model::template::Template;
use serde::Serialize;
use std::io::Read;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("could not build HTTP client")]
    Build(#[source] reqwest::Error),
    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} responded with {status}: {body}")]
    Status { url: String, status: u16, body: String },
    #[error("unexpected response body from {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not read the document")]
    Io(#[from] std::io::Error),
}

/// Templates and services, as owned by the notification API.
pub trait NotifyApi: Send + Sync {
    fn get_template(&self, service_id: &str, template_id: &str) -> Result<Template, ClientError>;
    fn get_service(&self, service_id: &str) -> Result<Service, ClientError>;
}

pub trait Antivirus: Send + Sync {
    /// Returns `true` when the document is clean.
    fn scan(&self, document: &mut dyn Read, filename: &str) -> Result<bool, ClientError>;
}

pub trait SenderIdChecker: Send + Sync {
    /// Returns `true` when the sender id is on the protected list.
    fn is_suspicious(&self, sender_id: &str) -> Result<bool, ClientError>;
}

pub trait Ticketing: Send + Sync {
    fn file_ticket(&self, ticket: &SupportTicket) -> Result<(), ClientError>;
}

/// Tickets come from the service itself, never from a user, so there is
/// one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketCategory {
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupportTicket {
    pub subject: String,
    pub body: String,
    pub category: TicketCategory,
}
