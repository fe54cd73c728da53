//! Session identity. A browser is identified by a random id in a cookie;
//! the draft itself stays on the server in a [`DraftStore`].

pub mod store;

pub use store::{DraftStore, MemoryDraftStore, SqliteDraftStore, StoreError};

use actix_web::cookie::{Cookie, SameSite};
use actix_web::{dev::Payload, FromRequest, HttpRequest, HttpResponse};
use futures_util::future::{ready, Ready};
use log::error;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "notify_admin_session";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionId {
    id: String,
    fresh: bool,
}

impl SessionId {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            fresh: true,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.id
    }

    /// Sets the session cookie on `response` if this session is new.
    pub fn attach(&self, mut response: HttpResponse) -> HttpResponse {
        if !self.fresh {
            return response;
        }
        let cookie = Cookie::build(SESSION_COOKIE, self.id.clone())
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .finish();
        if let Err(e) = response.add_cookie(&cookie) {
            error!("Could not set session cookie: {}", e);
        }
        response
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromRequest for SessionId {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let existing = req
            .cookie(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .filter(|value| Uuid::parse_str(value).is_ok());
        let session = match existing {
            Some(id) => SessionId { id, fresh: false },
            None => SessionId::new(),
        };
        ready(Ok(session))
    }
}
