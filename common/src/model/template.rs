use crate::recipients::insensitive::make_key;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

/// Matches `((name))` and `((name??conditional text))`.
static PLACEHOLDER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\(([^()]+)\)\)").unwrap());

/// Number of address lines a letter is addressed with.
pub const ADDRESS_LINE_COUNT: usize = 6;

/// Placeholders that address parsing fills in on top of the address lines.
pub const ADDRESS_DERIVED_PLACEHOLDERS: &[&str] = &["postcode"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateType {
    Email,
    Sms,
    Letter,
}

impl TemplateType {
    pub fn as_str(self) -> &'static str {
        match self {
            TemplateType::Email => "email",
            TemplateType::Sms => "sms",
            TemplateType::Letter => "letter",
        }
    }

    /// The spreadsheet column, and first wizard step, holding the recipient.
    /// Letters are addressed with `address line 1` to `address line 6`.
    pub fn recipient_columns(self) -> Vec<String> {
        match self {
            TemplateType::Email => vec!["e-mailadres".to_string()],
            TemplateType::Sms => vec!["telefoonnummer".to_string()],
            TemplateType::Letter => address_line_keys(),
        }
    }

    /// Every name a recipient column goes by; older spreadsheets and
    /// templates still use the English headings.
    pub fn recipient_aliases(self) -> &'static [&'static str] {
        match self {
            TemplateType::Email => &["e-mailadres", "email address"],
            TemplateType::Sms => &["telefoonnummer", "phone number"],
            TemplateType::Letter => &[],
        }
    }

    pub fn is_recipient_column(self, name: &str) -> bool {
        let key = make_key(name);
        match self {
            TemplateType::Letter => is_address_line(name),
            _ => self.recipient_aliases().iter().any(|alias| make_key(alias) == key),
        }
    }
}

impl fmt::Display for TemplateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `address line 1` to `address line 6`.
pub fn address_line_keys() -> Vec<String> {
    (1..=ADDRESS_LINE_COUNT).map(|n| format!("address line {n}")).collect()
}

pub fn is_address_line(name: &str) -> bool {
    let key = make_key(name);
    address_line_keys().iter().any(|line| make_key(line) == key)
}

/// `postcode`, which letters get from the address block rather than asking.
pub fn is_address_derived(name: &str) -> bool {
    let key = make_key(name);
    ADDRESS_DERIVED_PLACEHOLDERS.iter().any(|p| make_key(p) == key)
}

/// A template as returned by the notification API. Read-only here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub template_type: TemplateType,
    #[serde(default)]
    pub subject: Option<String>,
    pub content: String,
}

impl Template {
    /// Placeholder names in order of first appearance in subject then
    /// content, each listed once however it is capitalised or spaced.
    pub fn placeholders(&self) -> Vec<String> {
        let subject = self.subject.as_deref().unwrap_or_default();
        let mut seen = HashSet::new();

        placeholder_names(subject)
            .chain(placeholder_names(&self.content))
            .filter(|name| seen.insert(make_key(name)))
            .collect()
    }
}

/// Every placeholder name in `text`, in order, duplicates included.
///
/// For conditional placeholders (`((name??text))`) only the name is returned.
pub fn placeholder_names(text: &str) -> impl Iterator<Item = String> + '_ {
    PLACEHOLDER_PATTERN.captures_iter(text).filter_map(|captures| {
        let body = captures.get(1)?.as_str();
        let name = body.split_once("??").map_or(body, |(name, _)| name).trim();
        (!name.is_empty()).then(|| name.to_string())
    })
}
