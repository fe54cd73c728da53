use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::send_one_off::AddressEntry;

/// Settings read from `notify-admin.toml`. confy writes the defaults out
/// the first time the file is missing.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Config {
    pub host: String,
    pub port: u16,

    /// SQLite file holding in-progress drafts. Empty keeps them in memory.
    pub database_path: PathBuf,
    /// Drafts untouched for longer than this are thrown away.
    pub draft_lifetime_hours: u64,

    pub api_host_name: String,
    pub api_key: String,

    pub antivirus_enabled: bool,
    pub antivirus_api_host: String,
    pub antivirus_api_key: String,

    pub zendesk_api_url: String,
    pub zendesk_api_key: String,

    /// Domains (and their subdomains) whose addresses count as government.
    pub government_email_domains: Vec<String>,

    pub letter_address_entry: AddressEntry,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 6012,
            database_path: PathBuf::from("notify-admin.sqlite"),
            draft_lifetime_hours: 20,
            api_host_name: "http://localhost:6011".to_string(),
            api_key: String::new(),
            antivirus_enabled: false,
            antivirus_api_host: "http://localhost:6016".to_string(),
            antivirus_api_key: String::new(),
            zendesk_api_url: "https://notifynl.zendesk.com".to_string(),
            zendesk_api_key: String::new(),
            government_email_domains: vec!["overheid.nl".to_string(), "rijksoverheid.nl".to_string()],
            letter_address_entry: AddressEntry::Block,
        }
    }
}

impl Config {
    pub fn draft_lifetime(&self) -> Duration {
        Duration::from_secs(self.draft_lifetime_hours * 60 * 60)
    }
}

/// Loads the configuration, creating the file with defaults if needed.
pub fn load(path: PathBuf) -> anyhow::Result<Config> {
    let cfg: Config = confy::load_path(path)?;
    Ok(cfg)
}
