/// Normalises a column or placeholder name so that `Address Line 1`,
/// `address_line_1` and `addressline1` compare equal.
///
/// Lower-cases the name and drops spaces, underscores and hyphens.
pub fn make_key(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Returns `true` when both names normalise to the same key.
pub fn keys_match(a: &str, b: &str) -> bool {
    make_key(a) == make_key(b)
}
