use super::{FieldView, TextField};
use crate::validation::{
    CharactersNotAllowed, Length, MustContainAlphanumeric, NoUrls, Required, Rule,
    StringsNotAllowed, ValidationContext, ValidationError,
};

const THING: &str = "de naam van uw dienst";

/// Names reserved for the platform itself.
const RESERVED_NAMES: [&str; 2] = ["notifynl", "notify"];

/// Renaming a service. The name ends up in emails and SMS messages, so it
/// must be readable and must not look like a link.
#[derive(Debug, Clone)]
pub struct ServiceNameForm {
    pub name: TextField,
}

impl ServiceNameForm {
    pub fn new() -> Self {
        let name = TextField::new(
            "name",
            "Naam van de dienst",
            vec![
                Rule::Required(Required::thing(THING)),
                Rule::Length(Length::at_most(255, THING)),
                Rule::MustContainAlphanumeric(MustContainAlphanumeric::new(THING)),
                Rule::NoUrls(NoUrls::new(THING)),
                Rule::CharactersNotAllowed(CharactersNotAllowed::new(['<', '>'])),
                Rule::StringsNotAllowed(
                    StringsNotAllowed::new(RESERVED_NAMES, false)
                        .with_message("Deze naam is gereserveerd", "%s is gereserveerd"),
                ),
            ],
        );
        Self { name }
    }

    pub fn submit(&mut self, name: &str) {
        self.name.submit(name);
    }

    pub fn validate(&mut self, ctx: &ValidationContext<'_>) -> Result<bool, ValidationError> {
        self.name.validate(ctx)
    }

    pub fn view(&self) -> FieldView {
        self.name.view()
    }
}

impl Default for ServiceNameForm {
    fn default() -> Self {
        Self::new()
    }
}
