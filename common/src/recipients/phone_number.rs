//! Dutch and international phone numbers.
//!
//! Input is accepted in the forms people actually type: `06 1234 5678`,
//! `+31 (0)6-12345678`, `0031612345678`. Parsing keeps only the digits and
//! rewrites national numbers to international form (`31612345678`), after
//! which `PhoneNumber::validate` decides whether the number may receive an
//! SMS given the service's permissions.

use serde::Serialize;

/// Dutch country calling code.
const NL_COUNTRY_CODE: &str = "31";

/// Digits in a Dutch number after the country code (`6 12345678`).
const NL_SIGNIFICANT_DIGITS: usize = 9;

/// Shortest and longest international numbers we accept (E.164 caps at 15).
const MIN_DIGITS: usize = 8;
const MAX_DIGITS: usize = 15;

/// Country calling codes that the SMS provider can deliver to.
const COUNTRY_CODES: &[&str] = &[
    "1", "7", "20", "27", "30", "31", "32", "33", "34", "36", "39", "40", "41", "43", "44", "45",
    "46", "47", "48", "49", "51", "52", "53", "54", "55", "56", "57", "58", "60", "61", "62",
    "63", "64", "65", "66", "81", "82", "84", "86", "90", "91", "92", "93", "94", "95", "98",
    "211", "212", "213", "216", "218", "220", "221", "223", "225", "226", "227", "228", "229",
    "230", "231", "232", "233", "234", "235", "236", "237", "238", "239", "240", "241", "242",
    "243", "244", "245", "248", "249", "250", "251", "252", "253", "254", "255", "256", "257",
    "258", "260", "261", "262", "263", "264", "265", "266", "267", "268", "269", "290", "291",
    "297", "298", "299", "350", "351", "352", "353", "354", "355", "356", "357", "358", "359",
    "370", "371", "372", "373", "374", "375", "376", "377", "378", "380", "381", "382", "383",
    "385", "386", "387", "389", "420", "421", "423", "500", "501", "502", "503", "504", "505",
    "506", "507", "508", "509", "590", "591", "592", "593", "594", "595", "596", "597", "598",
    "599", "670", "673", "674", "675", "676", "677", "678", "679", "680", "682", "685", "686",
    "687", "689", "691", "692", "850", "852", "853", "855", "856", "880", "886", "960", "961",
    "962", "963", "964", "965", "966", "967", "968", "970", "971", "972", "973", "974", "975",
    "976", "977", "992", "993", "994", "995", "996", "998",
];

/// Why a phone number was rejected. The display text is the message shown
/// next to the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum InvalidPhoneError {
    #[error("Mobiel nummer is te kort")]
    TooShort,
    #[error("Mobiel nummer is te lang")]
    TooLong,
    #[error(
        "Dit lijkt geen Nederlands mobiel nummer – controleer het mobiele nummer dat u hebt ingevuld"
    )]
    NotRecognizedMobile,
    #[error("Landcode niet gevonden – controleer het mobiele nummer dat u hebt ingevuld")]
    UnsupportedCountryCode,
    #[error("Mobiele nummers kunnen alleen bevatten: 0 1 2 3 4 5 6 7 8 9 ( ) + -")]
    UnknownCharacter,
    #[error("Het nummer is niet correct – controleer het telefoonnummer")]
    InvalidNumber,
}

impl InvalidPhoneError {
    /// Short form for the error summary at the top of the page. `%s` is
    /// replaced by the field's label.
    pub fn summary(self) -> &'static str {
        match self {
            InvalidPhoneError::TooShort => "%s is te kort",
            InvalidPhoneError::TooLong => "%s is te lang",
            InvalidPhoneError::NotRecognizedMobile => "%s ziet er niet uit als een Nederlands nummer",
            InvalidPhoneError::UnsupportedCountryCode => "Landcode voor %s niet gevonden",
            InvalidPhoneError::UnknownCharacter => {
                "%s kan alleen bevatten: 0 1 2 3 4 5 6 7 8 9 ( ) + -"
            }
            InvalidPhoneError::InvalidNumber => "%s is niet correct – controleer het telefoonnummer",
        }
    }
}

/// A phone number reduced to its international digits, without `+` or `00`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber {
    digits: String,
}

impl PhoneNumber {
    /// Strips formatting and normalises to international digits.
    ///
    /// Only fails on characters that cannot appear in a phone number; length
    /// and country checks happen in `validate`.
    pub fn parse(value: &str) -> Result<Self, InvalidPhoneError> {
        let value = value.replace("(0)", "");
        let mut digits = String::with_capacity(value.len());
        let mut international = false;

        for c in value.trim().chars() {
            match c {
                '0'..='9' => digits.push(c),
                '+' if digits.is_empty() && !international => international = true,
                '(' | ')' | '-' => {}
                c if c.is_whitespace() => {}
                _ => return Err(InvalidPhoneError::UnknownCharacter),
            }
        }

        let digits = if international {
            digits
        } else if let Some(rest) = digits.strip_prefix("00") {
            rest.to_string()
        } else if let Some(rest) = digits.strip_prefix('0') {
            format!("{NL_COUNTRY_CODE}{rest}")
        } else if digits.len() == NL_SIGNIFICANT_DIGITS && digits.starts_with('6') {
            format!("{NL_COUNTRY_CODE}{digits}")
        } else {
            digits
        };

        // `+31 06...` carries a redundant trunk prefix.
        let digits = match digits.strip_prefix(NL_COUNTRY_CODE) {
            Some(rest) if rest.starts_with('0') => format!("{NL_COUNTRY_CODE}{}", &rest[1..]),
            _ => digits,
        };

        Ok(Self { digits })
    }

    /// Checks the number against Dutch numbering rules and the service's
    /// permissions.
    pub fn validate(
        &self,
        allow_international: bool,
        allow_landline: bool,
    ) -> Result<(), InvalidPhoneError> {
        if self.digits.len() < MIN_DIGITS {
            return Err(InvalidPhoneError::TooShort);
        }
        if self.digits.len() > MAX_DIGITS {
            return Err(InvalidPhoneError::TooLong);
        }

        match self.digits.strip_prefix(NL_COUNTRY_CODE) {
            Some(national) => validate_dutch(national, allow_landline),
            None => {
                if !allow_international {
                    return Err(InvalidPhoneError::NotRecognizedMobile);
                }
                let country_code =
                    country_code(&self.digits).ok_or(InvalidPhoneError::UnsupportedCountryCode)?;
                if self.digits.len() - country_code.len() < 4 {
                    return Err(InvalidPhoneError::TooShort);
                }
                Ok(())
            }
        }
    }
}

/// Parses and validates in one go.
pub fn validate_phone_number(
    value: &str,
    allow_international: bool,
    allow_landline: bool,
) -> Result<PhoneNumber, InvalidPhoneError> {
    let number = PhoneNumber::parse(value)?;
    number.validate(allow_international, allow_landline)?;
    Ok(number)
}

fn validate_dutch(national: &str, allow_landline: bool) -> Result<(), InvalidPhoneError> {
    if national.len() < NL_SIGNIFICANT_DIGITS {
        return Err(InvalidPhoneError::TooShort);
    }
    if national.len() > NL_SIGNIFICANT_DIGITS {
        return Err(InvalidPhoneError::TooLong);
    }

    let mut chars = national.chars();
    match (chars.next(), chars.next()) {
        // 061 - 065 and 068 are mobile ranges; 066 is pagers, 067 and 069 are unused.
        (Some('6'), Some('1'..='5' | '8')) => Ok(()),
        (Some('6'), _) => Err(InvalidPhoneError::InvalidNumber),
        (Some('1'..='5' | '7' | '8' | '9'), _) if allow_landline => Ok(()),
        (Some('0'), _) => Err(InvalidPhoneError::InvalidNumber),
        _ => Err(InvalidPhoneError::NotRecognizedMobile),
    }
}

fn country_code(digits: &str) -> Option<&'static str> {
    (1..=3)
        .filter_map(|len| digits.get(..len))
        .find_map(|prefix| COUNTRY_CODES.iter().copied().find(|code| *code == prefix))
}
