use common::model::draft::Draft;
use common::model::template::{address_line_keys, TemplateType};
use common::recipients::insensitive::keys_match;
use common::recipients::postal_address::MIN_LINES;

use super::fields::{email_address_field, phone_number_field};
use super::{FieldView, TextField};
use crate::validation::{
    run_chain, Input, NoCommasInPlaceholders, PostalAddressRule, Required, Rule,
    ValidationContext, ValidationError,
};

/// The single-field form shown on each step of the send flow.
#[derive(Debug, Clone)]
pub struct PlaceholderForm {
    pub placeholder_value: TextField,
}

/// Builds the form for one placeholder. The recipient column gets email or
/// phone validation depending on the template; anything else must be
/// non-empty and free of commas inside `((…))`. Only the first three lines
/// of a letter's address are required. The field starts out with the value
/// already in the draft, if any.
pub fn placeholder_form(
    placeholder_name: &str,
    current_values: &Draft,
    template_type: TemplateType,
    allow_international_phone_numbers: bool,
    allow_sms_to_landline: bool,
) -> PlaceholderForm {
    let is_recipient = template_type.is_recipient_column(placeholder_name);
    let field = match template_type {
        TemplateType::Email if is_recipient => {
            email_address_field("placeholder_value", placeholder_name, "een e-mailadres", None)
        }
        TemplateType::Sms if is_recipient => phone_number_field(
            "placeholder_value",
            placeholder_name,
            allow_international_phone_numbers,
            allow_sms_to_landline,
        ),
        TemplateType::Letter if is_recipient => address_line_field(placeholder_name),
        _ => TextField::new(
            "placeholder_value",
            placeholder_name,
            vec![
                Rule::Required(Required::with_message("Kan niet leeg zijn")),
                Rule::NoCommasInPlaceholders(NoCommasInPlaceholders::default()),
            ],
        ),
    };

    let prefill = current_values.get(placeholder_name).unwrap_or_default();
    PlaceholderForm {
        placeholder_value: field.with_data(prefill),
    }
}

fn address_line_field(placeholder_name: &str) -> TextField {
    let line = address_line_keys()
        .iter()
        .position(|key| keys_match(key, placeholder_name))
        .map_or(1, |index| index + 1);

    let mut rules = Vec::with_capacity(2);
    if line <= MIN_LINES {
        rules.push(Rule::Required(Required::with_message("Kan niet leeg zijn")));
    }
    rules.push(Rule::NoCommasInPlaceholders(NoCommasInPlaceholders::default()));
    TextField::new("placeholder_value", placeholder_name, rules)
}

impl PlaceholderForm {
    pub fn submit(&mut self, value: &str) {
        self.placeholder_value.submit(value);
    }

    pub fn validate(&mut self, ctx: &ValidationContext<'_>) -> Result<bool, ValidationError> {
        self.placeholder_value.validate(ctx)
    }

    /// Checks the address made up of the address lines in `draft`, for
    /// when the last line has just been answered. Failures are reported on
    /// this form's field.
    pub fn validate_address(
        &mut self,
        draft: &Draft,
        allow_international_letters: bool,
        ctx: &ValidationContext<'_>,
    ) -> Result<bool, ValidationError> {
        let address = address_line_keys()
            .iter()
            .filter_map(|line| draft.get(line))
            .filter(|line| !line.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        let rules = [Rule::PostalAddress(PostalAddressRule {
            allow_international_letters,
        })];
        let errors = run_chain(&rules, &mut Input::Text(&address), ctx)?;
        let valid = errors.is_empty();
        self.placeholder_value.reject(errors);
        Ok(valid)
    }

    pub fn value(&self) -> &str {
        self.placeholder_value.data()
    }

    pub fn view(&self) -> FieldView {
        self.placeholder_value.view()
    }
}
