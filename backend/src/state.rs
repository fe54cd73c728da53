use std::sync::Arc;

use log::info;

use crate::clients::antivirus::AntivirusClient;
use crate::clients::notify_api::NotifyApiClient;
use crate::clients::zendesk::ZendeskClient;
use crate::clients::NotifyApi;
use crate::config::Config;
use crate::send_one_off::TemplateCache;
use crate::session::{DraftStore, MemoryDraftStore, SqliteDraftStore};
use crate::validation::{Collaborators, ValidationContext};

/// Everything a handler needs, shared across workers as `web::Data`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub notify_api: Arc<dyn NotifyApi>,
    pub collaborators: Collaborators,
    pub drafts: Arc<dyn DraftStore>,
    pub templates: Arc<TemplateCache>,
}

impl AppState {
    /// Builds the real clients. Must run outside the async runtime, since
    /// the blocking HTTP client starts its own.
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let notify_api = Arc::new(NotifyApiClient::new(&config.api_host_name, &config.api_key)?);
        let antivirus = Arc::new(AntivirusClient::new(
            &config.antivirus_api_host,
            &config.antivirus_api_key,
        )?);
        let ticketing = Arc::new(ZendeskClient::new(
            &config.zendesk_api_url,
            &config.zendesk_api_key,
        )?);

        let drafts: Arc<dyn DraftStore> = if config.database_path.as_os_str().is_empty() {
            info!("Keeping drafts in memory");
            Arc::new(MemoryDraftStore::new(config.draft_lifetime()))
        } else {
            info!("Keeping drafts in {}", config.database_path.display());
            Arc::new(SqliteDraftStore::open(
                &config.database_path,
                config.draft_lifetime(),
            )?)
        };

        Ok(Self {
            collaborators: Collaborators {
                antivirus,
                antivirus_enabled: config.antivirus_enabled,
                sender_ids: notify_api.clone(),
                ticketing,
            },
            notify_api,
            drafts,
            templates: Arc::new(TemplateCache::default()),
            config: Arc::new(config),
        })
    }

    pub fn validation_context<'a>(&'a self, service_name: &'a str) -> ValidationContext<'a> {
        ValidationContext {
            collaborators: &self.collaborators,
            service_name,
        }
    }
}
