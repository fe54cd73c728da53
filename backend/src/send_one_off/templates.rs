use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use common::model::template::Template;
use log::debug;

use crate::clients::{ClientError, NotifyApi};

/// Templates fetched during a flow, keyed by service and template id.
/// Starting a flow forgets the entry so edits to the template show up.
#[derive(Default)]
pub struct TemplateCache {
    templates: RwLock<HashMap<(String, String), Arc<Template>>>,
}

impl TemplateCache {
    pub fn get(
        &self,
        api: &dyn NotifyApi,
        service_id: &str,
        template_id: &str,
    ) -> Result<Arc<Template>, ClientError> {
        let key = (service_id.to_string(), template_id.to_string());
        let cached = self
            .templates
            .read()
            .ok()
            .and_then(|templates| templates.get(&key).cloned());
        if let Some(template) = cached {
            return Ok(template);
        }

        debug!("Fetching template {} for service {}", template_id, service_id);
        let template = Arc::new(api.get_template(service_id, template_id)?);
        if let Ok(mut templates) = self.templates.write() {
            templates.insert(key, template.clone());
        }
        Ok(template)
    }

    pub fn forget(&self, service_id: &str, template_id: &str) {
        if let Ok(mut templates) = self.templates.write() {
            templates.remove(&(service_id.to_string(), template_id.to_string()));
        }
    }
}
