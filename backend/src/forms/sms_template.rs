use super::{FieldView, TextField};
use crate::validation::{
    Length, NoCommasInPlaceholders, Required, Rule, ValidationContext, ValidationError,
};

/// Longest message content, in characters, before it would need more than
/// six SMS parts.
pub const SMS_CONTENT_MAX_CHARACTERS: usize = 918;

/// Creating or editing an SMS template.
#[derive(Debug, Clone)]
pub struct SmsTemplateForm {
    pub name: TextField,
    pub template_content: TextField,
}

impl SmsTemplateForm {
    pub fn new() -> Self {
        Self {
            name: TextField::new(
                "name",
                "Sjabloonnaam",
                vec![Rule::Required(Required::thing("een sjabloonnaam"))],
            ),
            template_content: TextField::new(
                "template_content",
                "Bericht",
                vec![
                    Rule::Required(Required::thing("de inhoud van het bericht")),
                    Rule::SmsCharacters,
                    Rule::NoCommasInPlaceholders(NoCommasInPlaceholders::default()),
                    Rule::Length(Length::at_most(SMS_CONTENT_MAX_CHARACTERS, "het bericht")),
                ],
            ),
        }
    }

    pub fn submit(&mut self, name: &str, template_content: &str) {
        self.name.submit(name);
        self.template_content.submit(template_content);
    }

    /// Validates both fields, so each carries its own errors afterwards.
    pub fn validate(&mut self, ctx: &ValidationContext<'_>) -> Result<bool, ValidationError> {
        let name = self.name.validate(ctx)?;
        let content = self.template_content.validate(ctx)?;
        Ok(name && content)
    }

    pub fn view(&self) -> Vec<FieldView> {
        vec![self.name.view(), self.template_content.view()]
    }
}

impl Default for SmsTemplateForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::testing::Fakes;
    use crate::validation::FailureCode;

    fn validated(name: &str, content: &str) -> SmsTemplateForm {
        let fakes = Fakes::new();
        let collaborators = fakes.collaborators(false);
        let ctx = ValidationContext {
            collaborators: &collaborators,
            service_name: "Gemeente Voorbeeld",
        };
        let mut form = SmsTemplateForm::new();
        form.submit(name, content);
        form.validate(&ctx).unwrap();
        form
    }

    #[test]
    fn accepts_plain_content_with_placeholders() {
        let form = validated("Herinnering", "Beste ((naam)), uw afspraak is op ((datum)).");
        assert!(form.name.errors().is_empty());
        assert!(form.template_content.errors().is_empty());
    }

    #[test]
    fn both_fields_report_errors() {
        let form = validated("", "Beste ((voornaam, achternaam))");
        assert_eq!(form.name.errors()[0].code, FailureCode::EmptyValue);
        assert_eq!(form.template_content.errors()[0].code, FailureCode::InvalidFormat);
    }

    #[test]
    fn emoji_is_not_an_sms_character() {
        let form = validated("Herinnering", "Tot morgen 🙂");
        let errors = form.template_content.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, FailureCode::UnsupportedCharacters);
        assert!(errors[0].message.contains("Dit karakter wordt"));
    }

    #[test]
    fn content_is_limited_to_six_parts() {
        let form = validated("Lang", &"a".repeat(SMS_CONTENT_MAX_CHARACTERS + 1));
        assert_eq!(form.template_content.errors()[0].code, FailureCode::OutOfRange);
    }
}
