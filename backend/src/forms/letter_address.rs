use common::model::draft::Draft;
use common::model::template::address_line_keys;
use common::recipients::postal_address::PostalAddress;

use super::{FieldView, TextField};
use crate::validation::{PostalAddressRule, Required, Rule, ValidationContext, ValidationError};

/// The whole address typed as one block, one line per row.
#[derive(Debug, Clone)]
pub struct LetterAddressForm {
    pub address: TextField,
    allow_international_letters: bool,
}

impl LetterAddressForm {
    pub fn new(allow_international_letters: bool, current_values: &Draft) -> Self {
        let prefill: Vec<&str> = address_line_keys()
            .iter()
            .filter_map(|key| current_values.get(key))
            .filter(|line| !line.trim().is_empty())
            .collect();

        let address = TextField::new(
            "address",
            "Adres",
            vec![
                Rule::Required(Required::thing("een adres")),
                Rule::PostalAddress(PostalAddressRule {
                    allow_international_letters,
                }),
            ],
        )
        .with_data(prefill.join("\n"));

        Self {
            address,
            allow_international_letters,
        }
    }

    pub fn submit(&mut self, value: &str) {
        self.address.submit(value);
    }

    pub fn validate(&mut self, ctx: &ValidationContext<'_>) -> Result<bool, ValidationError> {
        self.address.validate(ctx)
    }

    pub fn postal_address(&self) -> PostalAddress {
        PostalAddress::new(self.address.data(), self.allow_international_letters)
    }

    pub fn view(&self) -> FieldView {
        self.address.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::testing::Fakes;
    use crate::validation::FailureCode;

    #[test]
    fn prefills_from_address_lines() {
        let mut draft = Draft::new();
        draft.insert("address_line_1", "Jan Jansen");
        draft.insert("address_line_2", "Straat 1");
        draft.insert("address_line_3", "");
        draft.insert("address_line_6", "1234 AB  DEN HAAG");
        let form = LetterAddressForm::new(false, &draft);
        assert_eq!(form.address.data(), "Jan Jansen\nStraat 1\n1234 AB  DEN HAAG");
    }

    #[test]
    fn validates_the_block() {
        let fakes = Fakes::new();
        let collaborators = fakes.collaborators(false);
        let ctx = ValidationContext {
            collaborators: &collaborators,
            service_name: "Test",
        };
        let mut form = LetterAddressForm::new(false, &Draft::new());

        form.submit("Jan Jansen\nStraat 1");
        assert!(!form.validate(&ctx).unwrap());
        assert_eq!(form.address.errors()[0].code, FailureCode::InvalidAddress);

        form.submit("  Jan Jansen\nStraat 1\n1234 AB Den Haag\n");
        assert!(form.validate(&ctx).unwrap());
        assert_eq!(form.postal_address().lines().len(), 3);
    }
}
