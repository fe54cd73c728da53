use std::time::Duration;

use log::debug;
use reqwest::blocking::{multipart::Form, RequestBuilder};
use reqwest::header::AUTHORIZATION;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::ClientError;

const USER_AGENT: &str = concat!("notify-admin/", env!("CARGO_PKG_VERSION"));

/// Blocking JSON client shared by the outbound collaborators.
///
/// Must be built outside the async runtime; handlers call it from
/// `spawn_blocking`.
pub(super) struct HttpClient {
    client: reqwest::blocking::Client,
    base_url: String,
    bearer: Option<String>,
}

impl HttpClient {
    pub(super) fn new(base_url: &str, bearer: Option<&str>) -> Result<Self, ClientError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(5))
            .pool_max_idle_per_host(10)
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            bearer: bearer.filter(|key| !key.is_empty()).map(str::to_string),
        })
    }

    pub(super) fn get<R: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<R, ClientError> {
        let url = self.build_url(path);
        let builder = self.client.request(Method::GET, &url).query(query);
        self.send(&url, builder)
    }

    pub(super) fn post<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        payload: &B,
    ) -> Result<R, ClientError> {
        let url = self.build_url(path);
        let builder = self.client.request(Method::POST, &url).json(payload);
        self.send(&url, builder)
    }

    pub(super) fn post_multipart<R: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<R, ClientError> {
        let url = self.build_url(path);
        let builder = self.client.request(Method::POST, &url).multipart(form);
        self.send(&url, builder)
    }

    fn send<R: DeserializeOwned>(
        &self,
        url: &str,
        mut builder: RequestBuilder,
    ) -> Result<R, ClientError> {
        if let Some(key) = &self.bearer {
            builder = builder.header(AUTHORIZATION, format!("Bearer {key}"));
        }

        debug!("Calling {}", url);
        let request_error = |source| ClientError::Request {
            url: url.to_string(),
            source,
        };
        let resp = builder.send().map_err(request_error)?;
        let status = resp.status();
        let body = resp.text().map_err(request_error)?;

        if !status.is_success() {
            return Err(ClientError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        debug!("Response from {}: {}", url, body);

        serde_json::from_str(&body).map_err(|source| ClientError::Decode {
            url: url.to_string(),
            source,
        })
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
