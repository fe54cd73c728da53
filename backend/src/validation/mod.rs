//! Field validation.
//!
//! A field carries an ordered list of [`Rule`]s. Each rule inspects the
//! submitted value and either passes or produces a [`FieldError`] with a
//! machine-readable [`FailureCode`] and a Dutch message. Rules run in order
//! and every failure is kept, except that a failure marked as stopping
//! (an empty required value, a virus) ends the chain.
//!
//! Rules that talk to a collaborator (antivirus, protected sender ids,
//! ticketing) get it from the [`ValidationContext`]; a collaborator failing
//! is an [`ValidationError`], not a field error.

mod content;
mod files;
mod passwords;
mod recipients;
mod rules;
mod sender_id;
mod upload;

pub use content::{
    CharactersNotAllowed, CommonlyUsedPassword, Length, MustContainAlphanumeric,
    NoCommasInPlaceholders, NoUrls, Pattern, Required, StringsNotAllowed,
};
pub use files::{FileExtension, FileSize, SpreadsheetColumns, SvgElement};
pub use recipients::{EmailRule, GovernmentDomain, PhoneNumberRule, PostalAddressRule};
pub use rules::Rule;
pub use sender_id::GenericSenderId;
pub use upload::Upload;

use std::sync::Arc;

use common::recipients::phone_number::InvalidPhoneError;
use serde::Serialize;

use crate::clients::{Antivirus, ClientError, SenderIdChecker, Ticketing};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureCode {
    EmptyValue,
    MalformedEmail,
    NotGovernmentDomain,
    TooShort,
    TooLong,
    NotRecognizedMobile,
    UnsupportedCountryCode,
    UnknownCharacter,
    InvalidNumber,
    UnsupportedCharacters,
    BannedContent,
    UnrecognizedSpreadsheet,
    DisallowedSvgElement,
    VirusDetected,
    PotentialPhishing,
    OutOfRange,
    InvalidFormat,
    FileTooLarge,
    InvalidAddress,
}

impl From<InvalidPhoneError> for FailureCode {
    fn from(error: InvalidPhoneError) -> Self {
        match error {
            InvalidPhoneError::TooShort => FailureCode::TooShort,
            InvalidPhoneError::TooLong => FailureCode::TooLong,
            InvalidPhoneError::NotRecognizedMobile => FailureCode::NotRecognizedMobile,
            InvalidPhoneError::UnsupportedCountryCode => FailureCode::UnsupportedCountryCode,
            InvalidPhoneError::UnknownCharacter => FailureCode::UnknownCharacter,
            InvalidPhoneError::InvalidNumber => FailureCode::InvalidNumber,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub code: FailureCode,
    pub message: String,
    /// Message for the page-level error summary. `%s` stands for the field
    /// label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip)]
    pub stops_chain: bool,
}

impl FieldError {
    pub fn new(code: FailureCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            summary: None,
            stops_chain: false,
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn stopping(mut self) -> Self {
        self.stops_chain = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail(FieldError),
}

impl Verdict {
    pub fn fail(code: FailureCode, message: impl Into<String>) -> Self {
        Verdict::Fail(FieldError::new(code, message))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("could not read the uploaded file")]
    Io(#[from] std::io::Error),
}

/// What a rule is asked to validate.
pub enum Input<'a> {
    Text(&'a str),
    File(&'a mut Upload),
}

#[derive(Clone)]
pub struct Collaborators {
    pub antivirus: Arc<dyn Antivirus>,
    pub antivirus_enabled: bool,
    pub sender_ids: Arc<dyn SenderIdChecker>,
    pub ticketing: Arc<dyn Ticketing>,
}

pub struct ValidationContext<'a> {
    pub collaborators: &'a Collaborators,
    /// Used in support tickets raised from validation.
    pub service_name: &'a str,
}

/// Runs `rules` in order, collecting failures until one stops the chain.
/// A virus scan only runs on input nothing else has rejected.
pub fn run_chain(
    rules: &[Rule],
    input: &mut Input<'_>,
    ctx: &ValidationContext<'_>,
) -> Result<Vec<FieldError>, ValidationError> {
    let mut errors = Vec::new();
    for rule in rules {
        if rule.needs_accepted_input() && !errors.is_empty() {
            continue;
        }
        if let Verdict::Fail(error) = rule.validate(input, ctx)? {
            let stop = error.stops_chain;
            errors.push(error);
            if stop {
                break;
            }
        }
    }
    Ok(errors)
}
