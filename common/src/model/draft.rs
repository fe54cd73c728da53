use crate::recipients::insensitive::make_key;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Values collected so far in one "send one message" flow.
///
/// Stored in the user's session between requests under exactly two keys:
/// `recipient` and `placeholders`. Placeholder lookups ignore case, spaces,
/// underscores and hyphens, so `address_line_1` answers for `address line 1`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    /// The phone number, email address or address block being sent to.
    #[serde(default)]
    pub recipient: Option<String>,
    /// Placeholder name to submitted value, in the order they were filled.
    #[serde(default)]
    pub placeholders: IndexMap<String, String>,
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        let key = make_key(name);
        self.placeholders
            .iter()
            .find(|(existing, _)| make_key(existing) == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Stores a value. A value already held under an equivalent name is
    /// replaced where it stands, so re-editing keeps the original order.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let key = make_key(&name);
        match self
            .placeholders
            .iter_mut()
            .find(|(existing, _)| make_key(existing) == key)
        {
            Some((_, existing)) => *existing = value.into(),
            None => {
                self.placeholders.insert(name, value.into());
            }
        }
    }

    pub fn extend<I, K, V>(&mut self, values: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in values {
            self.insert(name, value);
        }
    }
}
