/// Rewrites `pattern` so that it matches letters in either case.
///
/// Every literal character with distinct single-character lowercase and
/// uppercase forms is replaced by a group alternating between them, so `ab`
/// becomes `(a|A)(b|B)`. A titlecase character differs from both of its
/// forms and is kept as a third alternative: `ǅ` becomes `(ǆ|Ǆ|ǅ)`.
/// Operators, and characters whose case mappings expand to several
/// characters (such as `ß`), are copied unchanged.
pub fn fold_case(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() * 5);
    for ch in pattern.chars() {
        match case_variants(ch) {
            Some(variants) => {
                out.push('(');
                for (i, &variant) in variants.iter().enumerate() {
                    if i > 0 {
                        out.push('|');
                    }
                    out.push(variant);
                }
                out.push(')');
            }
            None => out.push(ch),
        }
    }
    out
}

/// Returns the lowercase form, the uppercase form and, when it is neither,
/// `ch` itself. Returns `None` when either form is not a single character
/// or when both forms are the same.
fn case_variants(ch: char) -> Option<Vec<char>> {
    let lower = single(ch.to_lowercase())?;
    let upper = single(ch.to_uppercase())?;
    if lower == upper {
        return None;
    }
    let mut variants = vec![lower, upper];
    if ch != lower && ch != upper {
        variants.push(ch);
    }
    Some(variants)
}

fn single(mut it: impl Iterator<Item = char>) -> Option<char> {
    let first = it.next()?;
    match it.next() {
        None => Some(first),
        Some(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_become_groups() {
        assert_eq!("(a|A)", fold_case("a"));
        assert_eq!("(a|A)", fold_case("A"));
        assert_eq!("(a|A)*(b|B)", fold_case("a*B"));
        assert_eq!("((x|X)|1)+", fold_case("(x|1)+"));
    }

    #[test]
    fn caseless_characters_are_unchanged() {
        assert_eq!("1 2-", fold_case("1 2-"));
        assert_eq!("", fold_case(""));
    }

    #[test]
    fn non_ascii() {
        assert_eq!("(é|É)", fold_case("É"));
        // 'ß' uppercases to "SS".
        assert_eq!("ß", fold_case("ß"));
    }

    #[test]
    fn titlecase_keeps_itself() {
        assert_eq!("(ǆ|Ǆ|ǅ)", fold_case("ǅ"));
        assert_eq!("(ǉ|Ǉ|ǈ)", fold_case("ǈ"));
        assert_eq!("(ǆ|Ǆ)", fold_case("Ǆ"));
    }
}
