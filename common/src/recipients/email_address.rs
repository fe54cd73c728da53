use regex::Regex;
use std::sync::LazyLock;

/// Characters allowed in the local part, before the `@`.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~\-]+@([^.@][^@\s]+)$").unwrap()
});

static HOSTNAME_PART: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(xn|[a-z0-9]+)(-?-[a-z0-9]+)*$").unwrap());

static TLD_PART: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^([a-z]{2,63}|xn--([a-z0-9]+-)*[a-z0-9]+)$").unwrap());

const MAX_EMAIL_LENGTH: usize = 320;
const MAX_HOSTNAME_LENGTH: usize = 253;
const MAX_LABEL_LENGTH: usize = 63;

/// Characters that sneak in through copy and paste and are invisible in the form.
const OBSCURE_WHITESPACE: &[char] = &['\u{180E}', '\u{200B}', '\u{200C}', '\u{200D}', '\u{2060}', '\u{FEFF}'];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Vul een mailadres in het juiste formaat in, zoals naam@voorbeeld.nl")]
pub struct InvalidEmailError;

/// Removes surrounding whitespace (including non-breaking spaces) and any
/// zero-width characters.
pub fn strip_and_remove_obscure_whitespace(value: &str) -> String {
    let visible: String = value.chars().filter(|c| !OBSCURE_WHITESPACE.contains(c)).collect();
    visible.trim().to_string()
}

/// Validates the shape of an email address and returns it normalised.
///
/// This is a syntax check only; nothing here proves the mailbox exists.
pub fn validate_email_address(value: &str) -> Result<String, InvalidEmailError> {
    let email = strip_and_remove_obscure_whitespace(value);

    let captures = EMAIL_REGEX.captures(&email).ok_or(InvalidEmailError)?;

    if email.len() > MAX_EMAIL_LENGTH || email.contains("..") {
        return Err(InvalidEmailError);
    }

    let hostname = captures.get(1).map(|m| m.as_str()).ok_or(InvalidEmailError)?;
    if !hostname.is_ascii() || hostname.len() > MAX_HOSTNAME_LENGTH {
        return Err(InvalidEmailError);
    }

    let parts: Vec<&str> = hostname.split('.').collect();
    if parts.len() < 2 {
        return Err(InvalidEmailError);
    }
    if parts
        .iter()
        .any(|part| part.is_empty() || part.len() > MAX_LABEL_LENGTH || !HOSTNAME_PART.is_match(part))
    {
        return Err(InvalidEmailError);
    }
    if !parts.last().is_some_and(|tld| TLD_PART.is_match(tld)) {
        return Err(InvalidEmailError);
    }

    Ok(email)
}

/// The part after the `@`, lower-cased.
pub fn domain_of(email: &str) -> Option<String> {
    email.rsplit_once('@').map(|(_, domain)| domain.trim().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_addresses() {
        for email in [
            "test@example.com",
            "test@example.gov.uk",
            "naam.achternaam@gemeente-utrecht.nl",
            "a+b@xn--bcher-kva.example",
            "  padded@example.nl \u{200B}",
        ] {
            assert!(validate_email_address(email).is_ok(), "{email}");
        }
    }

    #[test]
    fn rejects_malformed_addresses() {
        for email in [
            "12345",
            "“bad”@email-address.com",
            "no-at-sign.nl",
            "two@@example.nl",
            "dots..here@example.nl",
            "user@localhost",
            "user@-example.nl",
            "user@example.n",
            "user@exa mple.nl",
            "user@.example.nl",
        ] {
            assert_eq!(validate_email_address(email), Err(InvalidEmailError), "{email}");
        }
    }

    #[test]
    fn returns_the_trimmed_address() {
        assert_eq!(
            validate_email_address(" test@example.com\u{00A0}").unwrap(),
            "test@example.com"
        );
    }

    #[test]
    fn extracts_the_domain() {
        assert_eq!(domain_of("Iemand@Rijksoverheid.NL").as_deref(), Some("rijksoverheid.nl"));
        assert_eq!(domain_of("geen-domein"), None);
    }
}
