//! The SMS character set.
//!
//! Messages are sent as GSM-7. Characters outside that set either have a
//! close GSM equivalent (curly quotes, dashes, most accented letters) and are
//! swapped silently when sending, or they cannot be sent at all.

use std::collections::BTreeSet;

/// GSM 03.38 basic character set plus the extension table.
const GSM_CHARACTERS: &str = concat!(
    "@£$¥èéùìòÇ\nØø\rÅåΔ_ΦΓΛΩΠΨΣΘΞÆæßÉ !\"#¤%&'()*+,-./0123456789:;<=>?",
    "¡ABCDEFGHIJKLMNOPQRSTUVWXYZÄÖÑÜ§¿abcdefghijklmnopqrstuvwxyzäöñüà",
    "^{}\\[~]|€",
);

pub fn is_gsm_character(c: char) -> bool {
    GSM_CHARACTERS.contains(c)
}

/// The GSM replacement for a character that is not in the set, if there is one.
pub fn downgrade(c: char) -> Option<&'static str> {
    let replacement = match c {
        '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{2032}' | '`' | '´' => "'",
        '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{2033}' => "\"",
        '\u{2013}' | '\u{2014}' | '\u{2010}' | '\u{2011}' | '\u{2212}' => "-",
        '\u{2026}' => "...",
        '\u{00A0}' | '\u{2002}' | '\u{2003}' | '\u{2009}' | '\t' => " ",
        '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{2060}' | '\u{FEFF}' => "",
        '•' => "-",
        'á' | 'â' | 'ã' | 'ā' | 'ą' => "a",
        'Á' | 'À' | 'Â' | 'Ã' | 'Ā' | 'Ą' => "A",
        'ç' | 'ć' | 'č' => "c",
        'Ć' | 'Č' => "C",
        'ë' | 'ê' | 'ē' | 'ę' | 'ě' => "e",
        'È' | 'Ë' | 'Ê' | 'Ē' | 'Ę' | 'Ě' => "E",
        'í' | 'î' | 'ï' | 'ī' | 'ı' => "i",
        'Í' | 'Ì' | 'Î' | 'Ï' | 'Ī' | 'İ' => "I",
        'ó' | 'ô' | 'õ' | 'ō' | 'ő' => "o",
        'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ō' | 'Ő' => "O",
        'ú' | 'û' | 'ū' | 'ű' | 'ů' => "u",
        'Ú' | 'Ù' | 'Û' | 'Ū' | 'Ű' | 'Ů' => "U",
        'ý' | 'ÿ' => "y",
        'Ý' | 'Ÿ' => "Y",
        'ń' | 'ň' => "n",
        'Ń' | 'Ň' => "N",
        'ś' | 'š' | 'ş' => "s",
        'Ś' | 'Š' | 'Ş' => "S",
        'ź' | 'ż' | 'ž' => "z",
        'Ź' | 'Ż' | 'Ž' => "Z",
        'ł' => "l",
        'Ł' => "L",
        'ř' => "r",
        'Ř' => "R",
        'ď' => "d",
        'Ď' => "D",
        'ť' => "t",
        'Ť' => "T",
        'ĳ' => "ij",
        'Ĳ' => "IJ",
        'œ' => "oe",
        'Œ' => "OE",
        _ => return None,
    };
    Some(replacement)
}

/// Characters in `content` that cannot be sent by SMS at all, sorted and
/// without duplicates.
pub fn non_compatible_characters(content: &str) -> BTreeSet<char> {
    content
        .chars()
        .filter(|c| !is_gsm_character(*c) && downgrade(*c).is_none())
        .collect()
}
