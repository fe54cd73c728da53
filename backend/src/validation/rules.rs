use super::content::{self, *};
use super::files::{self, FileExtension, FileSize, SpreadsheetColumns, SvgElement};
use super::recipients::{EmailRule, GovernmentDomain, PhoneNumberRule, PostalAddressRule};
use super::sender_id::{self, GenericSenderId};
use super::{Input, Upload, ValidationContext, ValidationError, Verdict};

/// Every check a form field can carry. Text rules pass file input and
/// file rules pass text input.
#[derive(Debug, Clone)]
pub enum Rule {
    Required(Required),
    PhoneNumber(PhoneNumberRule),
    Email(EmailRule),
    GovernmentDomain(GovernmentDomain),
    PostalAddress(PostalAddressRule),
    StringsNotAllowed(StringsNotAllowed),
    CharactersNotAllowed(CharactersNotAllowed),
    CommonlyUsedPassword(CommonlyUsedPassword),
    SmsCharacters,
    NoCommasInPlaceholders(NoCommasInPlaceholders),
    NoUrls(NoUrls),
    MustContainAlphanumeric(MustContainAlphanumeric),
    Pattern(Pattern),
    Length(Length),
    DoesNotStartWithDoubleZero,
    GenericSenderId(GenericSenderId),
    MobileNumberOrShortCode,
    SuspiciousSenderId,
    FileExtension(FileExtension),
    FileSize(FileSize),
    SvgElement(SvgElement),
    MalwareScan,
    SpreadsheetColumns(SpreadsheetColumns),
}

impl Rule {
    pub fn needs_accepted_input(&self) -> bool {
        matches!(self, Rule::MalwareScan)
    }

    pub fn validate(
        &self,
        input: &mut Input<'_>,
        ctx: &ValidationContext<'_>,
    ) -> Result<Verdict, ValidationError> {
        match input {
            Input::Text(value) => self.validate_text(value, ctx),
            Input::File(upload) => self.validate_file(upload, ctx),
        }
    }

    fn validate_text(&self, value: &str, ctx: &ValidationContext<'_>) -> Result<Verdict, ValidationError> {
        let verdict = match self {
            Rule::Required(rule) => rule.check(value),
            Rule::PhoneNumber(rule) => rule.check(value),
            Rule::Email(rule) => rule.check(value),
            Rule::GovernmentDomain(rule) => rule.check(value),
            Rule::PostalAddress(rule) => rule.check(value),
            Rule::StringsNotAllowed(rule) => rule.check(value),
            Rule::CharactersNotAllowed(rule) => rule.check(value),
            Rule::CommonlyUsedPassword(rule) => rule.check(value),
            Rule::SmsCharacters => content::check_sms_characters(value),
            Rule::NoCommasInPlaceholders(rule) => rule.check(value),
            Rule::NoUrls(rule) => rule.check(value),
            Rule::MustContainAlphanumeric(rule) => rule.check(value),
            Rule::Pattern(rule) => rule.check(value),
            Rule::Length(rule) => rule.check(value),
            Rule::DoesNotStartWithDoubleZero => sender_id::check_double_zero(value),
            Rule::GenericSenderId(rule) => rule.check(value),
            Rule::MobileNumberOrShortCode => sender_id::check_mobile_or_short_code(value),
            Rule::SuspiciousSenderId => return sender_id::check_suspicious(value, ctx),
            Rule::FileExtension(_)
            | Rule::FileSize(_)
            | Rule::SvgElement(_)
            | Rule::MalwareScan
            | Rule::SpreadsheetColumns(_) => Verdict::Pass,
        };
        Ok(verdict)
    }

    fn validate_file(&self, upload: &mut Upload, ctx: &ValidationContext<'_>) -> Result<Verdict, ValidationError> {
        match self {
            Rule::FileExtension(rule) => Ok(rule.check(upload)),
            Rule::FileSize(rule) => rule.check(upload),
            Rule::SvgElement(rule) => rule.check(upload),
            Rule::MalwareScan => files::scan_for_malware(upload, ctx),
            Rule::SpreadsheetColumns(rule) => rule.check(upload),
            _ => Ok(Verdict::Pass),
        }
    }
}
