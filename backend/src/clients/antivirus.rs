use std::io::Read;

use log::debug;
use reqwest::blocking::multipart::{Form, Part};
use serde::Deserialize;

use super::http::HttpClient;
use super::{Antivirus, ClientError};

#[derive(Deserialize)]
struct ScanResult {
    ok: bool,
}

pub struct AntivirusClient {
    http: HttpClient,
}

impl AntivirusClient {
    pub fn new(api_host: &str, api_key: &str) -> Result<Self, ClientError> {
        Ok(Self {
            http: HttpClient::new(api_host, Some(api_key))?,
        })
    }
}

impl Antivirus for AntivirusClient {
    fn scan(&self, document: &mut dyn Read, filename: &str) -> Result<bool, ClientError> {
        let mut buffer = Vec::new();
        document.read_to_end(&mut buffer)?;
        debug!("Scanning {} ({} bytes)", filename, buffer.len());

        let part = Part::bytes(buffer).file_name(filename.to_string());
        let form = Form::new().part("document", part);
        let result: ScanResult = self.http.post_multipart("/scan", form)?;
        Ok(result.ok)
    }
}
