//! Form fields: a value, its label, the rules it must satisfy and the
//! errors found the last time it was validated.
//!
//! Submitted text is stripped of surrounding whitespace before validation.
//! Forms render to JSON through [`FieldView`], which is what handlers send
//! back for an invalid submission.

pub mod fields;
pub mod letter_address;
pub mod placeholder;
pub mod registration;
pub mod service_name;
pub mod sms_sender;
pub mod sms_template;
pub mod uploads;

use serde::Serialize;

use crate::validation::{
    run_chain, FailureCode, FieldError, Input, Rule, Upload, ValidationContext, ValidationError,
};

#[derive(Debug, Clone, Serialize)]
pub struct FieldView {
    pub name: &'static str,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub errors: Vec<FieldError>,
    pub error_summary: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct TextField {
    name: &'static str,
    label: String,
    data: String,
    rules: Vec<Rule>,
    errors: Vec<FieldError>,
}

impl TextField {
    pub fn new(name: &'static str, label: impl Into<String>, rules: Vec<Rule>) -> Self {
        Self {
            name,
            label: label.into(),
            data: String::new(),
            rules,
            errors: Vec::new(),
        }
    }

    /// Prefills the field, e.g. with a value from an earlier submission.
    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.data = data.into();
        self
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn submit(&mut self, raw: &str) {
        self.data = raw.trim().to_string();
        self.errors.clear();
    }

    pub fn validate(&mut self, ctx: &ValidationContext<'_>) -> Result<bool, ValidationError> {
        let errors = run_chain(&self.rules, &mut Input::Text(&self.data), ctx)?;
        self.errors = errors;
        Ok(self.errors.is_empty())
    }

    /// Adds failures found outside this field's own rules.
    pub fn reject(&mut self, errors: Vec<FieldError>) {
        self.errors.extend(errors);
    }

    pub fn error_summary(&self) -> Vec<String> {
        summarise(&self.errors, &self.label)
    }

    pub fn view(&self) -> FieldView {
        FieldView {
            name: self.name,
            label: self.label.clone(),
            value: Some(self.data.clone()),
            errors: self.errors.clone(),
            error_summary: self.error_summary(),
        }
    }
}

/// A file input. A missing file fails with the field's own message without
/// running the rules.
#[derive(Debug)]
pub struct FileField {
    name: &'static str,
    label: String,
    missing_message: String,
    upload: Option<Upload>,
    rules: Vec<Rule>,
    errors: Vec<FieldError>,
}

impl FileField {
    pub fn new(
        name: &'static str,
        label: impl Into<String>,
        missing_message: impl Into<String>,
        rules: Vec<Rule>,
    ) -> Self {
        Self {
            name,
            label: label.into(),
            missing_message: missing_message.into(),
            upload: None,
            rules,
            errors: Vec::new(),
        }
    }

    pub fn attach(&mut self, upload: Option<Upload>) {
        self.upload = upload;
        self.errors.clear();
    }

    pub fn upload(&self) -> Option<&Upload> {
        self.upload.as_ref()
    }

    pub fn validate(&mut self, ctx: &ValidationContext<'_>) -> Result<bool, ValidationError> {
        self.errors = match self.upload.as_mut() {
            None => vec![FieldError::new(FailureCode::EmptyValue, &self.missing_message)],
            Some(upload) => run_chain(&self.rules, &mut Input::File(upload), ctx)?,
        };
        Ok(self.errors.is_empty())
    }

    pub fn view(&self) -> FieldView {
        FieldView {
            name: self.name,
            label: self.label.clone(),
            value: self.upload.as_ref().map(|u| u.filename().to_string()),
            errors: self.errors.clone(),
            error_summary: summarise(&self.errors, &self.label),
        }
    }
}

fn summarise(errors: &[FieldError], label: &str) -> Vec<String> {
    errors
        .iter()
        .map(|error| match &error.summary {
            Some(summary) => summary.replace("%s", label),
            None => error.message.clone(),
        })
        .collect()
}

#[cfg(test)]
impl TextField {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }
}

#[cfg(test)]
impl FileField {
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }
}
