/// Joins items the way a sentence would: `‘a’, ‘b’ of ‘c’`.
///
/// `before_each` and `after_each` wrap every item; `conjunction` goes before
/// the last one.
pub fn formatted_list<I, T>(items: I, conjunction: &str, before_each: &str, after_each: &str) -> String
where
    I: IntoIterator<Item = T>,
    T: std::fmt::Display,
{
    let items: Vec<String> = items
        .into_iter()
        .map(|item| format!("{before_each}{item}{after_each}"))
        .collect();

    match items.split_last() {
        None => String::new(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} {conjunction} {last}", rest.join(", ")),
    }
}

/// Upper-cases the first character only: `een adres` becomes `Een adres`.
pub fn sentence_case(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_with_conjunction() {
        assert_eq!(formatted_list(["a"], "of", "‘", "’"), "‘a’");
        assert_eq!(formatted_list(["a", "b"], "of", "", ""), "a of b");
        assert_eq!(formatted_list(["a", "b", "c"], "en", "‘", "’"), "‘a’, ‘b’ en ‘c’");
        assert_eq!(formatted_list(Vec::<String>::new(), "of", "", ""), "");
    }

    #[test]
    fn capitalises_first_letter() {
        assert_eq!(sentence_case("sms-verzendersidentificatie"), "Sms-verzendersidentificatie");
        assert_eq!(sentence_case(""), "");
    }
}
