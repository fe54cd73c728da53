use common::recipients::email_address::{domain_of, validate_email_address};
use common::recipients::phone_number::validate_phone_number;
use common::recipients::postal_address::PostalAddress;

use super::{FailureCode, FieldError, Verdict};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhoneNumberRule {
    pub allow_international: bool,
    pub allow_landline: bool,
}

impl PhoneNumberRule {
    pub fn check(&self, value: &str) -> Verdict {
        if value.is_empty() {
            return Verdict::Pass;
        }
        match validate_phone_number(value, self.allow_international, self.allow_landline) {
            Ok(_) => Verdict::Pass,
            Err(error) => Verdict::Fail(
                FieldError::new(error.into(), error.to_string()).with_summary(error.summary()),
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailRule {
    message: String,
}

impl EmailRule {
    /// Message naming what is asked for: `Vul {thing} in het juiste
    /// formaat in, zoals naam@voorbeeld.nl`.
    pub fn thing(thing: &str) -> Self {
        Self {
            message: format!("Vul {thing} in het juiste formaat in, zoals naam@voorbeeld.nl"),
        }
    }

    pub fn check(&self, value: &str) -> Verdict {
        if value.is_empty() || validate_email_address(value).is_ok() {
            return Verdict::Pass;
        }
        Verdict::Fail(
            FieldError::new(FailureCode::MalformedEmail, &self.message)
                .with_summary("Vul %s in het juiste formaat in"),
        )
    }
}

impl Default for EmailRule {
    fn default() -> Self {
        Self::thing("een e-mailadres")
    }
}

/// Only addresses at one of the configured domains or their subdomains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GovernmentDomain {
    domains: Vec<String>,
}

impl GovernmentDomain {
    pub fn new(domains: &[String]) -> Self {
        Self {
            domains: domains
                .iter()
                .map(|d| d.trim().trim_start_matches('.').to_lowercase())
                .filter(|d| !d.is_empty())
                .collect(),
        }
    }

    fn is_government(&self, domain: &str) -> bool {
        self.domains
            .iter()
            .any(|d| domain == d || domain.ends_with(&format!(".{d}")))
    }

    pub fn check(&self, value: &str) -> Verdict {
        let Some(domain) = domain_of(value) else {
            return Verdict::Pass;
        };
        if self.is_government(&domain.to_lowercase()) {
            Verdict::Pass
        } else {
            Verdict::fail(
                FailureCode::NotGovernmentDomain,
                "Vul een e-mailadres in van een overheidsorganisatie",
            )
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostalAddressRule {
    pub allow_international_letters: bool,
}

impl PostalAddressRule {
    pub fn check(&self, value: &str) -> Verdict {
        match PostalAddress::new(value, self.allow_international_letters).validate() {
            Ok(()) => Verdict::Pass,
            Err(error) => Verdict::fail(FailureCode::InvalidAddress, error.to_string()),
        }
    }
}
