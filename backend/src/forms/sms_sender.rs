use std::sync::LazyLock;

use regex::Regex;

use super::{FieldView, TextField};
use crate::validation::{
    GenericSenderId, Length, Pattern, Required, Rule, ValidationContext, ValidationError,
};

static SENDER_CHARACTERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9 &.\-_]+$").unwrap());

/// A service's SMS sender id and whether it becomes the default.
#[derive(Debug, Clone)]
pub struct SmsSenderForm {
    pub sms_sender: TextField,
    pub is_default: bool,
}

impl SmsSenderForm {
    pub fn new() -> Self {
        let sms_sender = TextField::new(
            "sms_sender",
            "SMS-bericht verstuurders identificatie",
            vec![
                Rule::Required(Required::thing("een verstuurders identificatie")),
                Rule::Length(Length::between(3, 11, "verstuurders identificatie")),
                Rule::Pattern(Pattern::new(
                    SENDER_CHARACTERS.clone(),
                    "Gebruik alleen letters, cijfers, spaties en de tekens & . - _",
                )),
                Rule::DoesNotStartWithDoubleZero,
                Rule::GenericSenderId(GenericSenderId::default()),
                Rule::MobileNumberOrShortCode,
                Rule::SuspiciousSenderId,
            ],
        );
        Self {
            sms_sender,
            is_default: false,
        }
    }

    pub fn submit(&mut self, sms_sender: &str, is_default: bool) {
        self.sms_sender.submit(sms_sender);
        self.is_default = is_default;
    }

    pub fn validate(&mut self, ctx: &ValidationContext<'_>) -> Result<bool, ValidationError> {
        self.sms_sender.validate(ctx)
    }

    pub fn view(&self) -> FieldView {
        self.sms_sender.view()
    }
}

impl Default for SmsSenderForm {
    fn default() -> Self {
        Self::new()
    }
}
