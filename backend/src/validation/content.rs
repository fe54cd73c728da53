use std::sync::LazyLock;

use common::formatters::{formatted_list, sentence_case};
use common::model::template::placeholder_names;
use common::sms::non_compatible_characters;
use regex::Regex;

use super::passwords::COMMONLY_USED_PASSWORDS;
use super::{FailureCode, FieldError, Verdict};

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(https?://|www\.)\S+|\b[a-z0-9-]+(\.[a-z0-9-]+)*\.(nl|com|org|net|eu|info|io)\b")
        .unwrap()
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Required {
    message: String,
}

impl Required {
    /// `Vul {thing} in`, e.g. `Vul een e-mailadres in`.
    pub fn thing(thing: &str) -> Self {
        Self::with_message(format!("Vul {thing} in"))
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn check(&self, value: &str) -> Verdict {
        if value.trim().is_empty() {
            Verdict::Fail(FieldError::new(FailureCode::EmptyValue, &self.message).stopping())
        } else {
            Verdict::Pass
        }
    }
}

/// Rejects values equal to, or containing, any of a set of strings.
/// Comparison ignores case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringsNotAllowed {
    strings: Vec<String>,
    match_on_substrings: bool,
    message: Option<String>,
    summary: Option<String>,
}

impl StringsNotAllowed {
    pub fn new<I, S>(strings: I, match_on_substrings: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalised: Vec<String> = Vec::new();
        for s in strings {
            let s = s.as_ref().to_lowercase();
            if !normalised.contains(&s) {
                normalised.push(s);
            }
        }
        Self {
            strings: normalised,
            match_on_substrings,
            message: None,
            summary: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>, summary: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self.summary = Some(summary.into());
        self
    }

    pub fn check(&self, value: &str) -> Verdict {
        let value = value.to_lowercase();
        let found = self.strings.iter().find(|s| {
            value == **s || (self.match_on_substrings && value.contains(s.as_str()))
        });
        let Some(found) = found else {
            return Verdict::Pass;
        };

        let verb = if self.match_on_substrings { "bevatten" } else { "zijn" };
        let message = self
            .message
            .clone()
            .unwrap_or_else(|| format!("Mag niet {verb} ‘{found}’"));
        let summary = self
            .summary
            .clone()
            .unwrap_or_else(|| format!("%s mag niet {verb} ‘{found}’"));
        Verdict::Fail(FieldError::new(FailureCode::BannedContent, message).with_summary(summary))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharactersNotAllowed {
    characters: Vec<char>,
}

impl CharactersNotAllowed {
    pub fn new(characters: impl IntoIterator<Item = char>) -> Self {
        let mut unique = Vec::new();
        for c in characters {
            if !unique.contains(&c) {
                unique.push(c);
            }
        }
        Self { characters: unique }
    }

    pub fn check(&self, value: &str) -> Verdict {
        let illegal: Vec<char> = self
            .characters
            .iter()
            .copied()
            .filter(|c| value.contains(*c))
            .collect();
        if illegal.is_empty() {
            return Verdict::Pass;
        }

        let list = formatted_list(&illegal, "of", "", "");
        Verdict::Fail(
            FieldError::new(FailureCode::BannedContent, format!("Mag niet bevatten {list}"))
                .with_summary(format!("%s mag niet bevatten {list}")),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommonlyUsedPassword {
    message: String,
}

impl CommonlyUsedPassword {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn check(&self, value: &str) -> Verdict {
        if COMMONLY_USED_PASSWORDS.contains(&value) {
            Verdict::fail(FailureCode::BannedContent, &self.message)
        } else {
            Verdict::Pass
        }
    }
}

impl Default for CommonlyUsedPassword {
    fn default() -> Self {
        Self::new("Wachtwoord staat in de lijst van veelgebruikte wachtwoorden.")
    }
}

/// Characters in an SMS that cannot be sent, even after replacing accents
/// and curly quotes with their plain counterparts.
pub fn check_sms_characters(value: &str) -> Verdict {
    let unsupported = non_compatible_characters(value);
    if unsupported.is_empty() {
        return Verdict::Pass;
    }

    let which = if unsupported.len() == 1 {
        "Dit karakter wordt"
    } else {
        "Deze karakters worden"
    };
    let list = formatted_list(&unsupported, "of", "", "");
    Verdict::fail(
        FailureCode::UnsupportedCharacters,
        format!(
            "U kunt geen {list} gebruiken in SMS-berichten. {which} niet goed weergegeven op telefoons."
        ),
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoCommasInPlaceholders {
    message: String,
}

impl NoCommasInPlaceholders {
    pub fn check(&self, value: &str) -> Verdict {
        if placeholder_names(value).any(|name| name.contains(',')) {
            Verdict::fail(FailureCode::InvalidFormat, &self.message)
        } else {
            Verdict::Pass
        }
    }
}

impl Default for NoCommasInPlaceholders {
    fn default() -> Self {
        Self {
            message: "Geen komma's toegestaan tussen dubbele haakjes".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoUrls {
    thing: String,
}

impl NoUrls {
    pub fn new(thing: &str) -> Self {
        Self {
            thing: thing.to_string(),
        }
    }

    pub fn check(&self, value: &str) -> Verdict {
        if URL_PATTERN.is_match(value) {
            Verdict::fail(
                FailureCode::InvalidFormat,
                format!("{} mag geen URL bevatten", sentence_case(&self.thing)),
            )
        } else {
            Verdict::Pass
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MustContainAlphanumeric {
    thing: String,
}

impl MustContainAlphanumeric {
    pub fn new(thing: &str) -> Self {
        Self {
            thing: thing.to_string(),
        }
    }

    pub fn check(&self, value: &str) -> Verdict {
        let alphanumeric = value.chars().filter(char::is_ascii_alphanumeric).count();
        if value.is_empty() || alphanumeric >= 2 {
            Verdict::Pass
        } else {
            Verdict::fail(
                FailureCode::InvalidFormat,
                format!(
                    "{} moet ten minste 2 letters of cijfers bevatten",
                    sentence_case(&self.thing)
                ),
            )
        }
    }
}

#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
    message: String,
}

impl Pattern {
    pub fn new(regex: Regex, message: impl Into<String>) -> Self {
        Self {
            regex,
            message: message.into(),
        }
    }

    pub fn check(&self, value: &str) -> Verdict {
        if value.is_empty() || self.regex.is_match(value) {
            Verdict::Pass
        } else {
            Verdict::fail(FailureCode::InvalidFormat, &self.message)
        }
    }
}

/// Bounds on the number of characters, both ends inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Length {
    min: Option<usize>,
    max: Option<usize>,
    message: String,
}

impl Length {
    pub fn new(min: Option<usize>, max: Option<usize>, thing: &str, unit: &str) -> Self {
        let thing = sentence_case(thing);
        let message = match (min, max) {
            (Some(min), Some(max)) if min == max => format!("{thing} moet {min} {unit} lang zijn"),
            (Some(min), Some(max)) => {
                format!("{thing} moet tussen {min} en {max} {unit} lang zijn")
            }
            (Some(min), None) => format!("{thing} moet ten minste {min} {unit} lang zijn"),
            (None, Some(max)) => format!("{thing} mag niet langer zijn dan {max} {unit}"),
            (None, None) => String::new(),
        };
        Self { min, max, message }
    }

    pub fn between(min: usize, max: usize, thing: &str) -> Self {
        Self::new(Some(min), Some(max), thing, "karakters")
    }

    pub fn at_most(max: usize, thing: &str) -> Self {
        Self::new(None, Some(max), thing, "karakters")
    }

    pub fn check(&self, value: &str) -> Verdict {
        let length = value.chars().count();
        let too_short = self.min.is_some_and(|min| length < min);
        let too_long = self.max.is_some_and(|max| length > max);
        if too_short || too_long {
            Verdict::fail(FailureCode::OutOfRange, &self.message)
        } else {
            Verdict::Pass
        }
    }
}
