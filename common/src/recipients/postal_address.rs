//! Dutch postal addresses typed as a free-text block.
//!
//! The block is split into lines, each line is tidied up, and the last line
//! must hold a postcode and town (`1234 AB Den Haag`). The result is stored
//! as the six `address_line_N` placeholders plus `postcode`.

use indexmap::IndexMap;
use regex::Regex;
use std::sync::LazyLock;

pub const MIN_LINES: usize = 3;
pub const MAX_LINES: usize = 6;

static POSTCODE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([1-9][0-9]{3})\s*([A-Za-z]{2})\s+(\S.*)$").unwrap());

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidAddressError {
    #[error("Adres dient ten minste 3 regels lang te zijn")]
    NotEnoughLines,
    #[error("Adres mag niet meer dan 6 regels lang zijn")]
    TooManyLines,
    #[error(
        "De laatste regel van een adres moet ofwel de naam van een land ofwel een geldige postcode met plaatsnaam zijn"
    )]
    InvalidLastLineInternational,
    #[error("U hebt geen toestemming om brieven te sturen naar andere landen")]
    InternationalNotAllowed,
    #[error("De laatste regel moet een geldige postcode en plaatsnaam zijn")]
    InvalidLastLine,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostalAddress {
    lines: Vec<String>,
    allow_international_letters: bool,
}

impl PostalAddress {
    pub fn new(raw: &str, allow_international_letters: bool) -> Self {
        let lines = raw
            .lines()
            .map(|line| WHITESPACE_RUN.replace_all(line.trim(), " ").into_owned())
            .filter(|line| !line.is_empty())
            .collect();

        Self {
            lines,
            allow_international_letters,
        }
    }

    /// Builds an address from already-split lines, e.g. the `address line N`
    /// placeholders collected one at a time.
    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Self {
        Self::new(&lines.into_iter().collect::<Vec<_>>().join("\n"), false)
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn has_enough_lines(&self) -> bool {
        self.lines.len() >= MIN_LINES
    }

    pub fn has_too_many_lines(&self) -> bool {
        self.lines.len() > MAX_LINES
    }

    /// `1234 AB`, when the last line starts with a Dutch postcode.
    pub fn postcode(&self) -> Option<String> {
        let last = self.lines.last()?;
        let captures = POSTCODE_LINE.captures(last)?;
        Some(format!("{} {}", &captures[1], captures[2].to_uppercase()))
    }

    /// A last line without any digits is read as a country name.
    pub fn is_international(&self) -> bool {
        self.postcode().is_none()
            && self
                .lines
                .last()
                .is_some_and(|line| !line.chars().any(|c| c.is_ascii_digit()))
    }

    pub fn has_valid_last_line(&self) -> bool {
        self.postcode().is_some() || (self.allow_international_letters && self.is_international())
    }

    pub fn validate(&self) -> Result<(), InvalidAddressError> {
        if !self.has_enough_lines() {
            return Err(InvalidAddressError::NotEnoughLines);
        }
        if self.has_too_many_lines() {
            return Err(InvalidAddressError::TooManyLines);
        }
        if !self.has_valid_last_line() {
            if self.allow_international_letters {
                return Err(InvalidAddressError::InvalidLastLineInternational);
            }
            if self.is_international() {
                return Err(InvalidAddressError::InternationalNotAllowed);
            }
            return Err(InvalidAddressError::InvalidLastLine);
        }
        Ok(())
    }

    /// The last line in the form the printer expects: `1234 AB  DEN HAAG`.
    pub fn normalised_last_line(&self) -> String {
        let Some(last) = self.lines.last() else {
            return String::new();
        };
        match POSTCODE_LINE.captures(last) {
            Some(captures) => format!(
                "{} {}  {}",
                &captures[1],
                captures[2].to_uppercase(),
                captures[3].to_uppercase()
            ),
            None => last.to_uppercase(),
        }
    }

    /// The address as letter placeholders: `address_line_1` to `address_line_5`
    /// hold the leading lines (padded with empty strings), `address_line_6`
    /// the normalised last line, and `postcode` the postcode (empty for
    /// international addresses).
    pub fn as_personalisation(&self) -> IndexMap<String, String> {
        let leading = &self.lines[..self.lines.len().saturating_sub(1)];
        let mut values = IndexMap::with_capacity(MAX_LINES + 1);

        for n in 1..MAX_LINES {
            let line = leading.get(n - 1).cloned().unwrap_or_default();
            values.insert(format!("address_line_{n}"), line);
        }
        values.insert(format!("address_line_{MAX_LINES}"), self.normalised_last_line());
        values.insert("postcode".to_string(), self.postcode().unwrap_or_default());
        values
    }

    /// Non-empty lines joined with newlines, used as the letter's recipient.
    pub fn as_recipient(&self) -> String {
        let mut lines: Vec<String> = self.lines[..self.lines.len().saturating_sub(1)].to_vec();
        if !self.lines.is_empty() {
            lines.push(self.normalised_last_line());
        }
        lines.join("\n")
    }
}
