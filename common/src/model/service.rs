use serde::{Deserialize, Serialize};

pub const INTERNATIONAL_SMS: &str = "international_sms";
pub const SMS_TO_LANDLINE: &str = "sms_to_landline";
pub const INTERNATIONAL_LETTERS: &str = "international_letters";

/// The parts of a service the send flow needs: its name, for support
/// tickets, and its permissions, which widen what recipients are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl Service {
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }

    pub fn can_send_international_sms(&self) -> bool {
        self.has_permission(INTERNATIONAL_SMS)
    }

    pub fn can_send_sms_to_landline(&self) -> bool {
        self.has_permission(SMS_TO_LANDLINE)
    }

    pub fn can_send_international_letters(&self) -> bool {
        self.has_permission(INTERNATIONAL_LETTERS)
    }
}
