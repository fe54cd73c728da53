use log::info;
use serde::Serialize;

use super::http::HttpClient;
use super::{ClientError, SupportTicket, TicketCategory, Ticketing};

#[derive(Serialize)]
struct TicketRequest<'a> {
    ticket: TicketBody<'a>,
}

#[derive(Serialize)]
struct TicketBody<'a> {
    subject: &'a str,
    comment: Comment<'a>,
    #[serde(rename = "type")]
    ticket_type: &'static str,
    tags: Vec<&'static str>,
}

#[derive(Serialize)]
struct Comment<'a> {
    body: &'a str,
}

impl<'a> From<&'a SupportTicket> for TicketRequest<'a> {
    fn from(ticket: &'a SupportTicket) -> Self {
        let (ticket_type, tag) = match ticket.category {
            TicketCategory::Internal => ("task", "notify_internal"),
        };
        Self {
            ticket: TicketBody {
                subject: &ticket.subject,
                comment: Comment { body: &ticket.body },
                ticket_type,
                tags: vec![tag],
            },
        }
    }
}

pub struct ZendeskClient {
    http: HttpClient,
}

impl ZendeskClient {
    pub fn new(api_url: &str, api_key: &str) -> Result<Self, ClientError> {
        Ok(Self {
            http: HttpClient::new(api_url, Some(api_key))?,
        })
    }
}

impl Ticketing for ZendeskClient {
    fn file_ticket(&self, ticket: &SupportTicket) -> Result<(), ClientError> {
        let _: serde_json::Value = self
            .http
            .post("/api/v2/tickets.json", &TicketRequest::from(ticket))?;
        info!("Filed support ticket: {}", ticket.subject);
        Ok(())
    }
}
