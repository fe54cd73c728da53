//! Checks specific to SMS sender ids.

use std::sync::LazyLock;

use log::warn;
use regex::Regex;

use super::{FailureCode, ValidationContext, ValidationError, Verdict};
use crate::clients::{SupportTicket, TicketCategory};

static NUMERIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9.]+$").unwrap());
static DUTCH_MOBILE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^06[0-9]{8}$").unwrap());
static SHORT_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[1-9][0-9]{3,4}$").unwrap());

pub(super) fn check_double_zero(value: &str) -> Verdict {
    if value.starts_with("00") {
        Verdict::fail(
            FailureCode::BannedContent,
            "SMS-bericht verstuurders identificatie kan niet beginnen met 00",
        )
    } else {
        Verdict::Pass
    }
}

/// Sender ids too generic to tell the recipient who is texting them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericSenderId {
    generic: Vec<String>,
}

impl GenericSenderId {
    pub fn new<I, S>(generic: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            generic: generic.into_iter().map(|s| s.into().to_lowercase()).collect(),
        }
    }

    pub fn check(&self, value: &str) -> Verdict {
        let value = value.trim().to_lowercase();
        if self.generic.contains(&value) {
            Verdict::fail(
                FailureCode::BannedContent,
                "Een SMS-bericht verstuurders identificatie mag niet algemeen zijn, gebruik de naam van uw organisatie",
            )
        } else {
            Verdict::Pass
        }
    }
}

impl Default for GenericSenderId {
    fn default() -> Self {
        Self::new(["info", "verify", "alert"])
    }
}

/// A numeric sender id must be something a recipient could reply to: a
/// Dutch mobile number or a 4 or 5 digit short code.
pub(super) fn check_mobile_or_short_code(value: &str) -> Verdict {
    if !NUMERIC.is_match(value) || DUTCH_MOBILE.is_match(value) || SHORT_CODE.is_match(value) {
        return Verdict::Pass;
    }
    Verdict::fail(
        FailureCode::InvalidNumber,
        "Een numerieke verstuurders identificatie moet een geldig mobiel nummer of een korte code zijn",
    )
}

/// Asks the protected sender id list whether `value` imitates a known
/// sender. A hit files an internal ticket so the team can follow up.
pub(super) fn check_suspicious(
    value: &str,
    ctx: &ValidationContext<'_>,
) -> Result<Verdict, ValidationError> {
    if value.is_empty() || !ctx.collaborators.sender_ids.is_suspicious(value)? {
        return Ok(Verdict::Pass);
    }

    ctx.collaborators.ticketing.file_ticket(&SupportTicket {
        subject: format!(
            "Mogelijke Phishing verstuurders Identificatie - {}",
            ctx.service_name
        ),
        body: format!(
            "Service {} wilde de SMS-bericht verstuurders identificatie te veranderen in ‘{}’, \
             een beschermde verstuurders identificatie.",
            ctx.service_name, value
        ),
        category: TicketCategory::Internal,
    })?;
    warn!(
        "Service {} tried to use protected sender id {}",
        ctx.service_name, value
    );

    Ok(Verdict::fail(
        FailureCode::PotentialPhishing,
        format!(
            "SMS-bericht verstuurders identificatie mag geen ‘{value}’ zijn - in verband met risico op phishing"
        ),
    ))
}
