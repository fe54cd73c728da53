use super::fields::{email_address_field, password_field, phone_number_field};
use super::{FieldView, TextField};
use crate::validation::{Length, Required, Rule, ValidationContext, ValidationError};

/// Creating an account. Only people with a government email address may
/// register; the mobile number receives the sign-in codes.
#[derive(Debug, Clone)]
pub struct RegistrationForm {
    pub name: TextField,
    pub email_address: TextField,
    pub mobile_number: TextField,
    pub password: TextField,
}

impl RegistrationForm {
    pub fn new(government_domains: &[String]) -> Self {
        Self {
            name: TextField::new(
                "name",
                "Volledige naam",
                vec![
                    Rule::Required(Required::thing("uw volledige naam")),
                    Rule::Length(Length::at_most(255, "uw naam")),
                ],
            ),
            email_address: email_address_field(
                "email_address",
                "E-mailadres",
                "uw e-mailadres",
                Some(government_domains),
            ),
            mobile_number: phone_number_field("mobile_number", "Mobiel nummer", true, false),
            password: password_field("password", "Wachtwoord", "een wachtwoord"),
        }
    }

    pub fn submit(&mut self, name: &str, email_address: &str, mobile_number: &str, password: &str) {
        self.name.submit(name);
        self.email_address.submit(email_address);
        self.mobile_number.submit(mobile_number);
        self.password.submit(password);
    }

    pub fn validate(&mut self, ctx: &ValidationContext<'_>) -> Result<bool, ValidationError> {
        let mut valid = true;
        for field in self.fields_mut() {
            valid &= field.validate(ctx)?;
        }
        Ok(valid)
    }

    /// The password is never echoed back.
    pub fn view(&self) -> Vec<FieldView> {
        let mut password = self.password.view();
        password.value = None;
        vec![
            self.name.view(),
            self.email_address.view(),
            self.mobile_number.view(),
            password,
        ]
    }

    fn fields_mut(&mut self) -> [&mut TextField; 4] {
        [
            &mut self.name,
            &mut self.email_address,
            &mut self.mobile_number,
            &mut self.password,
        ]
    }
}
