//! In-memory collaborators for tests.

use std::collections::HashMap;
use std::io::Read;
use std::sync::{Arc, Mutex};

use common::model::service::Service;
use common::model::template::{Template, TemplateType};

use super::{Antivirus, ClientError, NotifyApi, SenderIdChecker, SupportTicket, Ticketing};
use crate::validation::Collaborators;

pub fn template(id: &str, template_type: TemplateType, content: &str) -> Template {
    Template {
        id: id.to_string(),
        name: format!("Sjabloon {id}"),
        template_type,
        subject: None,
        content: content.to_string(),
    }
}

pub fn service(permissions: &[&str]) -> Service {
    Service {
        id: "service-1".to_string(),
        name: "Gemeente Voorbeeld".to_string(),
        permissions: permissions.iter().map(|p| p.to_string()).collect(),
    }
}

#[derive(Default)]
pub struct FakeNotifyApi {
    templates: HashMap<String, Template>,
    service: Option<Service>,
    pub template_requests: Mutex<usize>,
}

impl FakeNotifyApi {
    pub fn new(service: Service) -> Self {
        Self {
            service: Some(service),
            ..Self::default()
        }
    }

    pub fn with_template(mut self, template: Template) -> Self {
        self.templates.insert(template.id.clone(), template);
        self
    }
}

impl NotifyApi for FakeNotifyApi {
    fn get_template(&self, _service_id: &str, template_id: &str) -> Result<Template, ClientError> {
        *self.template_requests.lock().unwrap() += 1;
        self.templates
            .get(template_id)
            .cloned()
            .ok_or_else(|| ClientError::Status {
                url: format!("/template/{template_id}"),
                status: 404,
                body: "No result found".to_string(),
            })
    }

    fn get_service(&self, service_id: &str) -> Result<Service, ClientError> {
        self.service.clone().ok_or_else(|| ClientError::Status {
            url: format!("/service/{service_id}"),
            status: 404,
            body: "No result found".to_string(),
        })
    }
}

/// Reports every document as clean unless told otherwise, and keeps what
/// it was given.
#[derive(Default)]
pub struct FakeAntivirus {
    pub infected: bool,
    pub scanned: Mutex<Vec<Vec<u8>>>,
}

impl Antivirus for FakeAntivirus {
    fn scan(&self, document: &mut dyn Read, _filename: &str) -> Result<bool, ClientError> {
        let mut buffer = Vec::new();
        document.read_to_end(&mut buffer)?;
        self.scanned.lock().unwrap().push(buffer);
        Ok(!self.infected)
    }
}

#[derive(Default)]
pub struct FakeSenderIds {
    pub protected: Vec<String>,
}

impl SenderIdChecker for FakeSenderIds {
    fn is_suspicious(&self, sender_id: &str) -> Result<bool, ClientError> {
        Ok(self.protected.iter().any(|p| p.eq_ignore_ascii_case(sender_id)))
    }
}

#[derive(Default)]
pub struct RecordingTicketing {
    pub tickets: Mutex<Vec<SupportTicket>>,
}

impl Ticketing for RecordingTicketing {
    fn file_ticket(&self, ticket: &SupportTicket) -> Result<(), ClientError> {
        self.tickets.lock().unwrap().push(ticket.clone());
        Ok(())
    }
}

/// Collaborators together with handles on the fakes behind them.
pub struct Fakes {
    pub antivirus: Arc<FakeAntivirus>,
    pub sender_ids: Arc<FakeSenderIds>,
    pub ticketing: Arc<RecordingTicketing>,
}

impl Fakes {
    pub fn new() -> Self {
        Self {
            antivirus: Arc::new(FakeAntivirus::default()),
            sender_ids: Arc::new(FakeSenderIds::default()),
            ticketing: Arc::new(RecordingTicketing::default()),
        }
    }

    pub fn collaborators(&self, antivirus_enabled: bool) -> Collaborators {
        Collaborators {
            antivirus: self.antivirus.clone(),
            antivirus_enabled,
            sender_ids: self.sender_ids.clone(),
            ticketing: self.ticketing.clone(),
        }
    }
}
