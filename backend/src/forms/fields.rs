use super::TextField;
use crate::validation::{
    CommonlyUsedPassword, EmailRule, GovernmentDomain, Length, PhoneNumberRule, Required, Rule,
};

/// An email address. Passing `government_domains` also restricts it to
/// addresses at those domains.
pub fn email_address_field(
    name: &'static str,
    label: &str,
    thing: &str,
    government_domains: Option<&[String]>,
) -> TextField {
    let mut rules = vec![
        Rule::Required(Required::thing(thing)),
        Rule::Email(EmailRule::thing(thing)),
    ];
    if let Some(domains) = government_domains {
        rules.push(Rule::GovernmentDomain(GovernmentDomain::new(domains)));
    }
    TextField::new(name, label, rules)
}

/// A phone number. A service limited to Dutch mobiles gets the generic
/// empty-value message; otherwise the message asks for a mobile number.
pub fn phone_number_field(
    name: &'static str,
    label: &str,
    allow_international: bool,
    allow_landline: bool,
) -> TextField {
    let required = if allow_international || allow_landline {
        Required::thing("een mobiel nummer")
    } else {
        Required::with_message("Mag niet leeg zijn")
    };
    TextField::new(
        name,
        label,
        vec![
            Rule::Required(required),
            Rule::PhoneNumber(PhoneNumberRule {
                allow_international,
                allow_landline,
            }),
        ],
    )
}

pub fn password_field(name: &'static str, label: &str, thing: &str) -> TextField {
    TextField::new(
        name,
        label,
        vec![
            Rule::Required(Required::thing(thing)),
            Rule::Length(Length::between(8, 255, "een wachtwoord")),
            Rule::CommonlyUsedPassword(CommonlyUsedPassword::new(
                "Kies een wachtwoord dat moeilijker te raden is",
            )),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::testing::Fakes;
    use crate::validation::{FailureCode, ValidationContext};

    fn codes(mut field: TextField, value: &str) -> Vec<FailureCode> {
        let fakes = Fakes::new();
        let collaborators = fakes.collaborators(false);
        let ctx = ValidationContext {
            collaborators: &collaborators,
            service_name: "Test",
        };
        field.submit(value);
        field.validate(&ctx).unwrap();
        field.errors().iter().map(|e| e.code).collect()
    }

    #[test]
    fn government_email() {
        let domains = vec!["overheid.nl".to_string()];
        let field = || email_address_field("email_address", "E-mailadres", "een e-mailadres", Some(domains.as_slice()));
        assert_eq!(codes(field(), "a@gemeente.overheid.nl"), vec![]);
        assert_eq!(codes(field(), "a@gmail.com"), vec![FailureCode::NotGovernmentDomain]);
        assert_eq!(codes(field(), ""), vec![FailureCode::EmptyValue]);
    }

    #[test]
    fn phone_number_required_message() {
        let mut field = phone_number_field("telefoonnummer", "Telefoonnummer", true, false);
        field.submit("");
        let fakes = Fakes::new();
        let collaborators = fakes.collaborators(false);
        let ctx = ValidationContext {
            collaborators: &collaborators,
            service_name: "Test",
        };
        field.validate(&ctx).unwrap();
        assert_eq!(field.errors()[0].message, "Vul een mobiel nummer in");
    }
}
