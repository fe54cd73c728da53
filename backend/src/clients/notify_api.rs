use common::model::service::Service;
use common::model::template::Template;
use log::info;
use serde::Deserialize;

use super::http::HttpClient;
use super::{ClientError, NotifyApi, SenderIdChecker};

/// The API wraps every resource in a `data` envelope.
#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

pub struct NotifyApiClient {
    http: HttpClient,
}

impl NotifyApiClient {
    pub fn new(api_host_name: &str, api_key: &str) -> Result<Self, ClientError> {
        Ok(Self {
            http: HttpClient::new(api_host_name, Some(api_key))?,
        })
    }
}

impl NotifyApi for NotifyApiClient {
    fn get_template(&self, service_id: &str, template_id: &str) -> Result<Template, ClientError> {
        let envelope: Envelope<Template> = self
            .http
            .get(&format!("/service/{service_id}/template/{template_id}"), &[])?;
        Ok(envelope.data)
    }

    fn get_service(&self, service_id: &str) -> Result<Service, ClientError> {
        let envelope: Envelope<Service> = self.http.get(&format!("/service/{service_id}"), &[])?;
        Ok(envelope.data)
    }
}

impl SenderIdChecker for NotifyApiClient {
    fn is_suspicious(&self, sender_id: &str) -> Result<bool, ClientError> {
        let protected: bool = self
            .http
            .get("/protected-senderid/check", &[("sender_id", sender_id)])?;
        if protected {
            info!("Sender id {} is on the protected list", sender_id);
        }
        Ok(protected)
    }
}
